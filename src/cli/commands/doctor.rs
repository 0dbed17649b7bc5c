//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight::version_arg;
use crate::cli::Output;
use crate::config::{ConfigStore, Settings};
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(yt_dlp: &str, store: &ConfigStore) -> anyhow::Result<()> {
    Output::header("audiograb doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_checks = [
        check_tool("yt-dlp", yt_dlp, install_hint_ytdlp()),
        check_tool("ffmpeg", "ffmpeg", install_hint_ffmpeg()),
        check_tool("ffprobe", "ffprobe", install_hint_ffmpeg()),
    ];
    for check in &tool_checks {
        check.print();
    }
    checks.extend(tool_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(store.path());
    config_check.print();
    checks.push(config_check);

    let destination = store.load().map(|s| s.destination_folder).unwrap_or_default();
    let dest_check = check_destination(&destination);
    dest_check.print();
    checks.push(dest_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before downloading.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! audiograb is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, program: &str, hint: &str) -> CheckResult {
    match Command::new(program).arg(version_arg(program)).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            // Truncate long version strings
            let version_display = if version.chars().count() > 50 {
                format!("{}...", version.chars().take(50).collect::<String>())
            } else {
                version
            };

            CheckResult::ok(name, &version_display)
        }
        Ok(_) => CheckResult::error(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, &format!("{} not found", program), hint)
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), hint),
    }
}

/// Check if the config file exists.
fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "not created yet",
            "It is written on the first download",
        )
    }
}

/// Check the stored destination folder.
fn check_destination(folder: &str) -> CheckResult {
    if folder.is_empty() {
        return CheckResult::warning(
            "Destination folder",
            "not set",
            "Pass --dest on download, or: audiograb config set destination_folder <path>",
        );
    }

    let path = Settings::expand_path(folder);
    if path.is_dir() {
        CheckResult::ok("Destination folder", &format!("{}", path.display()))
    } else if path.exists() {
        CheckResult::error(
            "Destination folder",
            &format!("{} is not a directory", path.display()),
            "Choose a folder with: audiograb config set destination_folder <path>",
        )
    } else {
        CheckResult::warning(
            "Destination folder",
            &format!("{} (will be created)", path.display()),
            "yt-dlp creates the folder on first download",
        )
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

/// Platform-specific install hint for ffmpeg.
fn install_hint_ffmpeg() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install ffmpeg (or your package manager)"
    } else {
        "Install from: https://ffmpeg.org/download.html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_missing_tool_is_error() {
        let result = check_tool("yt-dlp", "/nonexistent/yt-dlp-bin", "install it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("install it".to_string()));
    }

    #[test]
    fn test_check_destination() {
        assert_eq!(check_destination("").status, CheckStatus::Warning);

        let dir = tempfile::tempdir().unwrap();
        let ok = check_destination(dir.path().to_str().unwrap());
        assert_eq!(ok.status, CheckStatus::Ok);

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(check_destination(file.to_str().unwrap()).status, CheckStatus::Error);

        let missing = dir.path().join("missing");
        assert_eq!(
            check_destination(missing.to_str().unwrap()).status,
            CheckStatus::Warning
        );
    }
}
