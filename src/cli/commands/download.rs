//! Download command implementation.

use crate::audio::YtDlpFetcher;
use crate::batch::{BatchContext, BatchRequest};
use crate::cli::preflight::{self, Operation};
use crate::cli::{CliResultsView, Output};
use crate::config::{ConfigStore, Settings};
use crate::progress::StatusSlot;
use anyhow::Result;
use std::io::{IsTerminal, Read};
use std::sync::Arc;

/// Options for one `download` invocation.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub input: Option<String>,
    pub list: bool,
    pub dest: Option<String>,
    pub yt_dlp: String,
    pub tool_output: bool,
}

impl DownloadOptions {
    /// Whether the link input comes from stdin.
    fn reads_stdin(&self) -> bool {
        matches!(self.input.as_deref(), None | Some("-"))
    }
}

/// How a download invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The batch ran; per-item failures are in the result lines.
    Completed,
    /// The request was rejected before anything started.
    Rejected,
}

/// Build the batch request from the options, reading `stdin` only when the
/// input was omitted or `-`, and falling back to the stored destination.
pub fn resolve_request<R: Read>(
    options: &DownloadOptions,
    stdin: R,
    store: &ConfigStore,
) -> Result<BatchRequest> {
    let input = match options.input.as_deref() {
        Some(text) if !options.reads_stdin() => text.to_string(),
        _ => std::io::read_to_string(stdin)?,
    };

    let destination = match &options.dest {
        Some(dest) => dest.clone(),
        None => store.load_destination()?,
    };

    Ok(BatchRequest {
        input,
        list_mode: options.list,
        destination,
    })
}

/// The folder downloads are written to, with `~` expanded.
fn shown_destination(destination: &str) -> String {
    Settings::expand_path(destination).display().to_string()
}

/// Run the download command.
pub async fn run_download(options: DownloadOptions, store: ConfigStore) -> Result<DownloadOutcome> {
    let stdin = std::io::stdin();
    if options.reads_stdin() && stdin.is_terminal() {
        Output::info("Paste links or codes, then press Ctrl-D:");
    }

    let request = resolve_request(&options, stdin, &store)?;

    if let Err(e) = request.validate() {
        Output::warning(&e.to_string());
        return Ok(DownloadOutcome::Rejected);
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Download {
        yt_dlp: &options.yt_dlp,
    }) {
        Output::error(&format!("{}", e));
        Output::info("Run 'audiograb doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::kv("Destination", &shown_destination(&request.destination));

    let bar = Output::progress_bar();
    let ctx = BatchContext {
        fetcher: Arc::new(YtDlpFetcher::new(&options.yt_dlp).verbose(options.tool_output)),
        status: Arc::new(StatusSlot::with_progress_bar(bar.clone())),
        view: Arc::new(CliResultsView::new(Some(bar))),
        config: store,
    };

    let monitor = match ctx.launch(&request) {
        Ok(m) => m,
        Err(e) => {
            Output::error(&format!("Failed to start downloads: {}", e));
            return Err(e.into());
        }
    };

    Output::kv("Downloads", &monitor.urls().len().to_string());
    monitor.wait().await?;

    Ok(DownloadOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(input: Option<&str>, dest: Option<&str>) -> DownloadOptions {
        DownloadOptions {
            input: input.map(str::to_string),
            list: true,
            dest: dest.map(str::to_string),
            yt_dlp: "/nonexistent/audiograb-yt-dlp".to_string(),
            tool_output: false,
        }
    }

    #[test]
    fn test_omitted_input_reads_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let stdin = "aaa\nbbb\n".as_bytes();

        let request = resolve_request(&options(None, Some("/music")), stdin, &store).unwrap();
        assert_eq!(request.input, "aaa\nbbb\n");
        assert!(request.list_mode);

        let request = resolve_request(&options(Some("-"), Some("/music")), "ccc".as_bytes(), &store).unwrap();
        assert_eq!(request.input, "ccc");
    }

    #[test]
    fn test_explicit_input_ignores_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let request =
            resolve_request(&options(Some("abc"), Some("/music")), "from stdin".as_bytes(), &store).unwrap();
        assert_eq!(request.input, "abc");
    }

    #[test]
    fn test_destination_falls_back_to_stored_folder() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let request = resolve_request(&options(Some("abc"), None), std::io::empty(), &store).unwrap();
        assert_eq!(request.destination, "");

        store.save_destination("/srv/music").unwrap();
        let request = resolve_request(&options(Some("abc"), None), std::io::empty(), &store).unwrap();
        assert_eq!(request.destination, "/srv/music");

        let request =
            resolve_request(&options(Some("abc"), Some("/override")), std::io::empty(), &store).unwrap();
        assert_eq!(request.destination, "/override");
    }

    #[test]
    fn test_shown_destination_is_expanded() {
        assert_eq!(shown_destination("/srv/music"), "/srv/music");

        if let Some(home) = dirs::home_dir() {
            assert_eq!(shown_destination("~/Music"), home.join("Music").display().to_string());
        }
    }

    #[tokio::test]
    async fn test_rejected_request_starts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let outcome = run_download(options(Some("   "), Some("/music")), ConfigStore::new(&config_path))
            .await
            .unwrap();
        assert_eq!(outcome, DownloadOutcome::Rejected);

        let outcome = run_download(options(Some("abc"), None), ConfigStore::new(&config_path))
            .await
            .unwrap();
        assert_eq!(outcome, DownloadOutcome::Rejected);

        // Nothing was persisted, so nothing was launched
        assert!(!config_path.exists());
    }
}
