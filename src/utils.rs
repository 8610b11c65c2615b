/*!
 * Utility functions for ctxdump
 */

use std::collections::HashMap;

use log::warn;
use tiktoken_rs::cl100k_base;

use crate::reader::{FileContent, FileEntry};

/// Token counts for the run summary
#[derive(Debug, Clone, Default)]
pub struct TokenStats {
    /// Total tokens across all text files
    pub total: usize,
    /// Tokens per file extension, sorted by count descending
    pub by_extension: Vec<(String, usize)>,
}

/// Count cl100k_base tokens per file extension.
///
/// Returns `None` when the tokenizer cannot be constructed, in which case
/// the summary falls back to a character-based estimate.
pub fn count_tokens(entries: &[FileEntry]) -> Option<TokenStats> {
    let bpe = match cl100k_base() {
        Ok(bpe) => bpe,
        Err(e) => {
            warn!("Token counting disabled: {}", e);
            return None;
        }
    };

    let mut total = 0;
    let mut map: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        if let FileContent::Text(text) = &entry.content {
            let tokens = bpe.encode_with_special_tokens(text).len();
            total += tokens;

            let name = entry
                .rel_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            *map.entry(extension_of(&name)).or_insert(0) += tokens;
        }
    }

    let mut by_extension: Vec<(String, usize)> = map.into_iter().collect();
    by_extension.sort_by(|(na, ca), (nb, cb)| cb.cmp(ca).then_with(|| na.cmp(nb)));

    Some(TokenStats {
        total,
        by_extension,
    })
}

/// Extension bucket for a file name, everything from the first dot on
pub fn extension_of(file_name: &str) -> String {
    match file_name.find('.') {
        Some(idx) => file_name[idx..].to_string(),
        None => "(no extension)".to_string(),
    }
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
