/*!
 * Clipboard delivery for ctxdump
 *
 * Copies the report to the system clipboard by piping it into the first
 * available platform clipboard command.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to run the clipboard command
    #[error("Clipboard command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Platform clipboard commands, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    /// tmux paste buffer
    Tmux,
    /// macOS clipboard
    Pbcopy,
    /// Windows clipboard, also reachable from WSL
    ClipExe,
    /// Wayland clipboard
    WlCopy,
    /// X11 clipboard via xsel
    Xsel,
    /// X11 clipboard via xclip
    Xclip,
}

impl Provider {
    fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Pbcopy => ("pbcopy", &[]),
            Self::ClipExe => ("clip.exe", &[]),
            Self::WlCopy => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
        }
    }

    fn available(&self) -> bool {
        match self {
            Self::Tmux => env::var("TMUX").is_ok() && command_exists("tmux"),
            provider => command_exists(provider.command().0),
        }
    }
}

/// Copy text to the system clipboard.
///
/// Tries each clipboard mechanism supported on the current platform in
/// order of preference and pipes the text into the first one available.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = detect_provider().ok_or(ClipboardError::NoClipboardFound)?;
    let (cmd, args) = provider.command();
    pipe_to_command(cmd, args, text)
}

/// Check whether a command can be found on the PATH
pub fn command_exists(command: &str) -> bool {
    if let Ok(paths) = env::var("PATH") {
        for dir in env::split_paths(&paths) {
            if Path::new(&dir).join(command).is_file() {
                return true;
            }
        }
    }
    false
}

fn detect_provider() -> Option<Provider> {
    let candidates: &[Provider] = if cfg!(target_os = "macos") {
        &[Provider::Tmux, Provider::Pbcopy]
    } else if cfg!(target_os = "windows") {
        &[Provider::ClipExe]
    } else {
        // Linux and friends: prefer Wayland, fall back to X11, and let
        // clip.exe cover WSL sessions.
        &[
            Provider::Tmux,
            Provider::WlCopy,
            Provider::Xsel,
            Provider::Xclip,
            Provider::ClipExe,
        ]
    };

    candidates.iter().copied().find(Provider::available)
}

/// Spawn a command and write the text to its stdin
fn pipe_to_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to spawn {}: {}", cmd, e)))?;

    child
        .stdin
        .as_mut()
        .ok_or_else(|| ClipboardError::CommandFailed(format!("no stdin for {}", cmd)))?
        .write_all(text.as_bytes())
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to write to {}: {}", cmd, e)))?;

    let status = child
        .wait()
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to wait for {}: {}", cmd, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status {}",
            cmd, status
        )))
    }
}
