/*!
 * ctxdump - Copy a project's structure and file contents as LLM context
 *
 * This library walks a project directory through a filtered, depth-bounded
 * traversal and assembles a single plain-text report of the directory tree
 * and file contents, suitable for pasting into an LLM conversation.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod reader;
pub mod report;
pub mod rules;
pub mod tree;
pub mod utils;


// Re-export main components for easier access
pub use config::Config;
pub use error::{CtxError, Result};
pub use filter::PathFilter;
pub use reader::{ContentReader, FileContent, FileEntry};
pub use report::{ReportAssembler, Reporter, RunSummary};
pub use rules::IgnoreRules;
pub use tree::{AcceptedFile, TreeBuilder, TreeOutput};
pub use utils::format_file_size;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
