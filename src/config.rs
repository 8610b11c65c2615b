/*!
 * Configuration handling for ctxdump
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::{CtxError, Result};

/// Command-line arguments for ctxdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a project's directory tree and file contents as one report",
    long_about = "Builds a filtered view of a project directory (tree plus file contents) and delivers it as a single plain-text report to the system clipboard or a file, for use as LLM context."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory: String,

    /// Maximum tree depth to render (0 for unlimited)
    #[clap(long, default_value = "0")]
    pub depth: usize,

    /// Include hidden files and directories
    #[clap(long)]
    pub include_hidden: bool,

    /// Comma-separated list of extra directory names to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_dirs: Vec<String>,

    /// Comma-separated list of extra file names/patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_files: Vec<String>,

    /// Path to an explicit ignore file (skips auto-discovery)
    #[clap(long)]
    pub ignore_file: Option<String>,

    /// Path to an explicit target file listing allow-list patterns
    #[clap(long)]
    pub target_file: Option<String>,

    /// Write the report to this file instead of the clipboard
    #[clap(short = 'o', long)]
    pub output_file: Option<String>,

    /// Copy to the clipboard even when an output file is given
    #[clap(long)]
    pub clip: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process
    pub target_dir: PathBuf,

    /// Maximum tree depth, 0 for unlimited
    pub max_depth: usize,

    /// Whether hidden paths are included
    pub include_hidden: bool,

    /// Extra directory names to ignore
    pub ignore_dirs: Vec<String>,

    /// Extra file names/patterns to ignore
    pub ignore_files: Vec<String>,

    /// Explicit ignore file path
    pub ignore_file: Option<PathBuf>,

    /// Explicit target (allow-list) file path
    pub target_file: Option<PathBuf>,

    /// Report output file, clipboard when absent
    pub output_file: Option<PathBuf>,

    /// Copy to the clipboard in addition to the output file
    pub clip: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory),
            max_depth: args.depth,
            include_hidden: args.include_hidden,
            ignore_dirs: args.ignore_dirs,
            ignore_files: args.ignore_files,
            ignore_file: args.ignore_file.map(PathBuf::from),
            target_file: args.target_file.map(PathBuf::from),
            output_file: args.output_file.map(PathBuf::from),
            clip: args.clip,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            return Err(CtxError::Path(self.target_dir.clone()));
        }

        if let Some(path) = &self.ignore_file {
            if !path.is_file() {
                return Err(CtxError::Config(format!(
                    "Ignore file not found: {}",
                    path.display()
                )));
            }
        }

        if let Some(path) = &self.target_file {
            if !path.is_file() {
                return Err(CtxError::Config(format!(
                    "Target file not found: {}",
                    path.display()
                )));
            }
        }

        if let Some(output) = &self.output_file {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(CtxError::Config(format!(
                        "Output directory not found: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }
}
