/*!
 * Path filtering for ctxdump
 *
 * `PathFilter` is the single decision point consulted by both the tree pass
 * and the content-reading pass. It is a pure function of the resolved rule
 * set and the hidden-file policy, which keeps the two passes in agreement
 * on the accepted path set.
 */

use std::path::Path;

use crate::rules::IgnoreRules;

/// Marker that makes a path component hidden
const HIDDEN_MARKER: char = '.';

/// Decides whether a path is excluded from the run
#[derive(Debug, Clone)]
pub struct PathFilter {
    rules: IgnoreRules,
    include_hidden: bool,
}

impl PathFilter {
    /// Create a filter from a resolved rule set and the hidden-file policy
    pub fn new(rules: IgnoreRules, include_hidden: bool) -> Self {
        Self {
            rules,
            include_hidden,
        }
    }

    /// Whether hidden paths are allowed through this filter
    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Check whether a path should be excluded.
    ///
    /// `rel_path` is the path relative to the scan root. A directory that
    /// matches is pruned by the caller, so none of its descendants are ever
    /// checked here.
    pub fn should_ignore(&self, rel_path: &Path, is_dir: bool) -> bool {
        if !self.include_hidden && is_hidden(rel_path) {
            return true;
        }

        let name = match rel_path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        let rel = rel_path.to_string_lossy();

        if self.rules.matches(&name, &rel, is_dir) {
            return true;
        }

        // The target allow-list applies to files only; directories stay
        // traversable so nested matches are still found.
        !is_dir && !self.rules.is_targeted(&name, &rel)
    }
}

/// Check whether any component of a relative path is hidden
pub fn is_hidden(rel_path: &Path) -> bool {
    rel_path
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with(HIDDEN_MARKER))
}
