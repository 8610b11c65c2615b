/*!
 * File content reading for ctxdump
 *
 * Every accepted file yields exactly one `FileContent`. A failure to read
 * or decode a single file never aborts the run, it just changes which
 * variant that file gets in the report.
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::filter::is_hidden;
use crate::tree::AcceptedFile;
use crate::utils::format_file_size;

/// Bytes sampled from the head of a file for binary detection
const PROBE_LEN: usize = 8192;

/// Placeholder used when content cannot be rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded UTF-8 text
    Text(String),
    /// Binary file, content withheld
    Binary { size: u64 },
    /// File could not be read at all
    Unreadable(String),
}

impl FileContent {
    /// Rendering used in the report's per-file sections
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Binary { size } => {
                format!("[Binary file] Size: {}", format_file_size(*size))
            }
            Self::Unreadable(reason) => format!("[Unreadable file: {}]", reason),
        }
    }

    /// Number of characters contributing to the run summary
    pub fn char_count(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            _ => 0,
        }
    }
}

/// One file's entry in the report, in visitation order
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Content or placeholder
    pub content: FileContent,
}

/// Reads the contents of accepted files
pub struct ContentReader {
    include_hidden: bool,
    progress: Arc<ProgressBar>,
}

impl ContentReader {
    /// Create a content reader
    pub fn new(include_hidden: bool, progress: Arc<ProgressBar>) -> Self {
        Self {
            include_hidden,
            progress,
        }
    }

    /// Read every accepted file, preserving visitation order.
    ///
    /// The hidden check here is a guard consistent with the filter stage:
    /// a hidden file reaching this point is skipped, not an error.
    pub fn read_all(&self, accepted: &[AcceptedFile]) -> Vec<FileEntry> {
        let mut entries = Vec::with_capacity(accepted.len());

        for file in accepted {
            if !self.include_hidden && is_hidden(&file.rel_path) {
                continue;
            }

            self.progress.inc(1);
            self.progress
                .set_message(format!("Reading {}", file.rel_path.display()));

            entries.push(FileEntry {
                rel_path: file.rel_path.clone(),
                content: read_file(&file.abs_path),
            });
        }

        entries
    }
}

/// Classify and read one file
fn read_file(path: &Path) -> FileContent {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => return FileContent::Unreadable(e.to_string()),
    };

    match probe_binary(path, metadata.len()) {
        Ok(true) => FileContent::Binary {
            size: metadata.len(),
        },
        Ok(false) => match fs::read_to_string(path) {
            Ok(text) => FileContent::Text(text),
            // Valid-looking sample but the full file is not UTF-8
            Err(e) if e.kind() == io::ErrorKind::InvalidData => FileContent::Binary {
                size: metadata.len(),
            },
            Err(e) => FileContent::Unreadable(e.to_string()),
        },
        Err(e) => FileContent::Unreadable(e.to_string()),
    }
}

/// Heuristic binary detection on a sampled prefix.
///
/// A NUL byte is a definitive binary signal. Otherwise a high ratio of
/// control characters outside the usual whitespace range marks the file
/// as binary.
fn probe_binary(path: &Path, len: u64) -> io::Result<bool> {
    let sample_len = std::cmp::min(PROBE_LEN as u64, len) as usize;
    if sample_len == 0 {
        return Ok(false);
    }

    let mut buffer = vec![0u8; sample_len];
    let mut file = File::open(path)?;
    let bytes_read = file.read(&mut buffer)?;
    buffer.truncate(bytes_read);

    if buffer.contains(&0) {
        return Ok(true);
    }

    let control_count = buffer
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32))
        .count();

    Ok(control_count as f32 / buffer.len() as f32 >= 0.1)
}
