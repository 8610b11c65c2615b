/*!
 * Directory tree generation for ctxdump
 *
 * One depth-first walk produces both the branch-drawn tree text and the
 * ordered list of accepted files. Building both from the same pass is what
 * guarantees that the report's content sections match the rendered tree.
 */

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::{DirEntry, WalkDir};

use crate::filter::PathFilter;

/// Marker rendered in place of a directory that could not be listed
const ERROR_MARKER: &str = "[error reading directory]";

/// A file that survived filtering and is eligible for content reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    /// Path relative to the scan root, used for display
    pub rel_path: PathBuf,
    /// Absolute path used for reading
    pub abs_path: PathBuf,
}

/// Result of one tree pass
#[derive(Debug, Clone)]
pub struct TreeOutput {
    /// Rendered tree text, one entry per line
    pub text: String,
    /// Accepted files in visitation order
    pub files: Vec<AcceptedFile>,
    /// Number of directories visited, the root included
    pub directory_count: usize,
    /// Number of files accepted
    pub file_count: usize,
}

/// Walks a directory and renders its filtered structure
pub struct TreeBuilder<'a> {
    root: &'a Path,
    filter: &'a PathFilter,
    /// Maximum entry depth to render, 0 for unlimited. The root's direct
    /// children sit at depth 0.
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Create a tree builder for a scan root
    pub fn new(root: &'a Path, filter: &'a PathFilter, max_depth: usize) -> Self {
        Self {
            root,
            filter,
            max_depth,
        }
    }

    /// Walk the root and produce the tree text plus the accepted-file list
    pub fn generate(&self) -> TreeOutput {
        let mut output = TreeOutput {
            text: String::new(),
            files: Vec::new(),
            directory_count: 1,
            file_count: 0,
        };

        let mut lines = Vec::new();
        self.walk(self.root, Path::new(""), 0, "", &mut lines, &mut output);
        output.text = lines.join("\n");
        output
    }

    fn walk(
        &self,
        dir: &Path,
        rel_dir: &Path,
        depth: usize,
        prefix: &str,
        lines: &mut Vec<String>,
        output: &mut TreeOutput,
    ) {
        if self.max_depth != 0 && depth > self.max_depth {
            return;
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by(compare_entries)
        {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    lines.push(format!("{}{}", prefix, ERROR_MARKER));
                }
            }
        }

        let visible: Vec<DirEntry> = entries
            .into_iter()
            .filter(|entry| {
                let rel = rel_dir.join(entry.file_name());
                !self
                    .filter
                    .should_ignore(&rel, entry.file_type().is_dir())
            })
            .collect();

        for (i, entry) in visible.iter().enumerate() {
            let is_last = i == visible.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };
            let name = entry.file_name().to_string_lossy();
            lines.push(format!("{}{}{}", prefix, connector, name));

            let rel = rel_dir.join(entry.file_name());
            let file_type = entry.file_type();

            if file_type.is_dir() {
                output.directory_count += 1;
                let extension = if is_last { "    " } else { "│   " };
                self.walk(
                    entry.path(),
                    &rel,
                    depth + 1,
                    &format!("{}{}", prefix, extension),
                    lines,
                    output,
                );
            } else if file_type.is_file() {
                output.file_count += 1;
                output.files.push(AcceptedFile {
                    rel_path: rel,
                    abs_path: entry.path().to_path_buf(),
                });
            }
            // Symlinks are listed as leaf entries but never followed or
            // read, which also rules out traversal cycles.
        }
    }
}

/// Stable listing order: directories first, then case-insensitive name
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_is_dir = a.file_type().is_dir();
    let b_is_dir = b.file_type().is_dir();

    b_is_dir.cmp(&a_is_dir).then_with(|| {
        a.file_name()
            .to_string_lossy()
            .to_lowercase()
            .cmp(&b.file_name().to_string_lossy().to_lowercase())
    })
}
