//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools are available before starting downloads
//! that would otherwise all fail the same way.

use crate::error::{GrabError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    /// Downloading needs yt-dlp plus ffmpeg/ffprobe for the MP3 conversion.
    Download { yt_dlp: &'a str },
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation<'_>) -> Result<()> {
    match operation {
        Operation::Download { yt_dlp } => {
            check_tool(yt_dlp)?;
            check_tool("ffmpeg")?;
            check_tool("ffprobe")?;
        }
    }
    Ok(())
}

/// Argument that makes the tool print its version and exit.
pub(crate) fn version_arg(name: &str) -> &'static str {
    // ffmpeg/ffprobe use -version (single dash), others use --version
    let stem = std::path::Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    match stem {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg(version_arg(name)).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(GrabError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(GrabError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(GrabError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
