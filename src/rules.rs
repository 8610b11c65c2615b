/*!
 * Ignore rule loading and matching for ctxdump
 *
 * An `IgnoreRules` value is built once per run from three additive sources:
 * the built-in default lists, caller-supplied directory/file patterns, and
 * the patterns of a `.ctxdumpignore` file. All sources only ever add
 * exclusions, so merging is a plain union with no precedence conflicts.
 *
 * A `.ctxdumptarget` file is the one allow-list: when it carries patterns,
 * files matching none of them are excluded. Directories are still
 * traversed, so nested matches stay reachable.
 */

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use log::{debug, warn};
use once_cell::sync::Lazy;

/// Conventional name of the ignore file looked up at the project root
pub const IGNORE_FILE_NAME: &str = ".ctxdumpignore";

/// Conventional name of the target (allow-list) file
pub const TARGET_FILE_NAME: &str = ".ctxdumptarget";

/// Directory names always ignored
pub static DEFAULT_IGNORE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control
        ".git",
        ".svn",
        ".hg",
        // Dependencies
        "node_modules",
        ".venv",
        "venv",
        // Build output
        "build",
        "dist",
        "target",
        "out",
        // Caches
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".cache",
        // IDEs
        ".idea",
        ".vscode",
    ]
});

/// File names always ignored
pub static DEFAULT_IGNORE_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "poetry.lock",
        "package-lock.json",
        "Cargo.lock",
        "yarn.lock",
        "composer.lock",
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
    ]
});

/// A single glob pattern parsed from an ignore file
#[derive(Debug, Clone)]
struct IgnorePattern {
    glob: String,
    /// Pattern ended with `/`, so it only applies to directories
    dir_only: bool,
}

impl IgnorePattern {
    fn from_line(line: &str) -> Self {
        let dir_only = line.ends_with('/');
        Self {
            glob: line.trim_end_matches('/').to_string(),
            dir_only,
        }
    }

    fn matches(&self, name: &str, rel_path: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        glob_match(&self.glob, name) || glob_match(&self.glob, rel_path)
    }
}

/// Fully resolved, immutable set of exclusion rules for one run
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    /// Default + caller-supplied directory patterns
    dir_patterns: Vec<String>,
    /// Default + caller-supplied file patterns
    file_patterns: Vec<String>,
    /// Patterns parsed from the ignore file, applied to both kinds
    ignore_file_patterns: Vec<IgnorePattern>,
    /// Allow-list from the target file; empty means everything is targeted
    target_patterns: Vec<String>,
}

impl IgnoreRules {
    /// Merge all rule sources into one resolved set.
    ///
    /// A missing ignore or target file is not an error. One that exists but
    /// cannot be read is logged and treated as absent.
    pub fn load(
        additional_dirs: &[String],
        additional_files: &[String],
        ignore_file: Option<&Path>,
        target_file: Option<&Path>,
    ) -> Self {
        let mut dir_patterns: Vec<String> =
            DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect();
        dir_patterns.extend(additional_dirs.iter().cloned());

        let mut file_patterns: Vec<String> =
            DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect();
        file_patterns.extend(additional_files.iter().cloned());

        let ignore_file_patterns = match ignore_file {
            Some(path) => read_pattern_lines(path)
                .iter()
                .map(|line| IgnorePattern::from_line(line))
                .collect(),
            None => Vec::new(),
        };

        let target_patterns = match target_file {
            Some(path) => read_pattern_lines(path),
            None => Vec::new(),
        };

        Self {
            dir_patterns,
            file_patterns,
            ignore_file_patterns,
            target_patterns,
        }
    }

    /// Check a path's base name and root-relative path against the rule set
    pub fn matches(&self, name: &str, rel_path: &str, is_dir: bool) -> bool {
        let name_patterns = if is_dir {
            &self.dir_patterns
        } else {
            &self.file_patterns
        };

        if name_patterns.iter().any(|p| glob_match(p, name)) {
            return true;
        }

        self.ignore_file_patterns
            .iter()
            .any(|p| p.matches(name, rel_path, is_dir))
    }

    /// Check a file against the target allow-list.
    ///
    /// Always true when no target patterns exist (no target file, or an
    /// empty one, which disables targeting).
    pub fn is_targeted(&self, name: &str, rel_path: &str) -> bool {
        self.target_patterns.is_empty()
            || self
                .target_patterns
                .iter()
                .any(|p| glob_match(p, name) || glob_match(p, rel_path))
    }
}

/// Read a pattern file's lines, skipping blanks and `#` comments.
///
/// A file that cannot be read is logged and yields no patterns, so the run
/// degrades to the remaining rule sources instead of aborting.
fn read_pattern_lines(path: &Path) -> Vec<String> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!(
                "Could not read pattern file {}, proceeding without it: {}",
                path.display(),
                e
            );
            return Vec::new();
        }
    };

    let mut patterns = Vec::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    patterns.push(trimmed.to_string());
                }
            }
            Err(e) => {
                warn!(
                    "Stopped reading pattern file {} mid-way: {}",
                    path.display(),
                    e
                );
                break;
            }
        }
    }

    debug!(
        "Loaded {} pattern(s) from {}",
        patterns.len(),
        path.display()
    );
    patterns
}

/// Walk upward from `directory` looking for a `.ctxdumpignore` file
pub fn discover_ignore_file(directory: &Path) -> Option<PathBuf> {
    discover_upward(directory, IGNORE_FILE_NAME)
}

/// Walk upward from `directory` looking for a `.ctxdumptarget` file
pub fn discover_target_file(directory: &Path) -> Option<PathBuf> {
    discover_upward(directory, TARGET_FILE_NAME)
}

/// Return the first `file_name` found between `directory` and the
/// filesystem root, or `None` if no such file exists on that path
fn discover_upward(directory: &Path, file_name: &str) -> Option<PathBuf> {
    let start = directory.canonicalize().ok()?;
    let mut current: &Path = &start;

    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            debug!("Auto-discovered {} at {}", file_name, candidate.display());
            return Some(candidate);
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}
