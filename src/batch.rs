//! Batch launching, per-item fetch-and-convert, and completion monitoring.
//!
//! A batch fans out one tokio task per requested item with no cap and no
//! ordering, then a single monitor task waits for all of them before the
//! results are rendered.

use crate::audio::AudioFetcher;
use crate::config::{ConfigStore, Settings};
use crate::error::{GrabError, Result};
use crate::progress::{ProgressEvent, StatusSlot};
use crate::report::{failure_line, success_line, ResultLog};
use crate::target::{id_fragment, normalize, parse_targets};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Warning shown when no link or code was given.
pub const EMPTY_INPUT_WARNING: &str = "Por favor, insira o link do vídeo ou o código.";

/// Warning shown when no destination folder was chosen.
pub const MISSING_DESTINATION_WARNING: &str = "Por favor, escolha a pasta de destino.";

/// Notice shown once every download of a batch has ended.
pub const COMPLETION_NOTICE: &str = "Todos os downloads foram concluídos.";

/// Where the batch summary ends up.
pub trait ResultsView: Send + Sync {
    /// Replace whatever is shown with `lines`.
    fn render(&self, lines: &[String]);

    /// Signal that the whole batch is done. Called once, after `render`.
    fn notify_complete(&self);
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Raw text: one identifier, or one per line in list mode.
    pub input: String,
    pub list_mode: bool,
    pub destination: String,
}

impl BatchRequest {
    /// Reject empty input or a missing destination folder.
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(GrabError::InvalidInput(EMPTY_INPUT_WARNING.to_string()));
        }
        if self.destination.is_empty() {
            return Err(GrabError::InvalidInput(
                MISSING_DESTINATION_WARNING.to_string(),
            ));
        }
        Ok(())
    }
}

/// Collaborators shared by every batch.
#[derive(Clone)]
pub struct BatchContext {
    pub fetcher: Arc<dyn AudioFetcher>,
    pub status: Arc<StatusSlot>,
    pub view: Arc<dyn ResultsView>,
    pub config: ConfigStore,
}

impl BatchContext {
    /// Validate the request, persist the destination and start every download.
    ///
    /// Must be called from within a tokio runtime. Validation failures return
    /// [`GrabError::InvalidInput`] before anything is written or started.
    #[instrument(skip_all, fields(list_mode = request.list_mode))]
    pub fn launch(&self, request: &BatchRequest) -> Result<BatchMonitor> {
        request.validate()?;
        self.config.save_destination(&request.destination)?;

        let urls: Vec<String> = parse_targets(&request.input, request.list_mode)
            .iter()
            .map(|id| normalize(id))
            .collect();
        info!("Launching {} download(s)", urls.len());

        let destination = Settings::expand_path(&request.destination);
        let results = ResultLog::new();

        let handles: Vec<JoinHandle<()>> = urls
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let status = Arc::clone(&self.status);
                let results = results.clone();
                let destination = destination.clone();
                let url = url.clone();
                tokio::spawn(async move {
                    run_operation(fetcher.as_ref(), &url, &destination, &status, &results).await;
                })
            })
            .collect();

        let monitor = tokio::spawn(monitor_downloads(
            urls.clone(),
            handles,
            results.clone(),
            Arc::clone(&self.view),
        ));

        Ok(BatchMonitor {
            urls,
            results,
            handle: monitor,
        })
    }
}

/// Fetch one URL and record exactly one result line for it.
#[instrument(skip(fetcher, destination, status, results))]
pub async fn run_operation(
    fetcher: &dyn AudioFetcher,
    url: &str,
    destination: &Path,
    status: &StatusSlot,
    results: &ResultLog,
) {
    let fragment = id_fragment(url);
    let on_progress = |event: ProgressEvent| status.apply(&event);

    let line = match fetcher.fetch_audio(url, destination, &on_progress).await {
        Ok(title) => {
            info!("Downloaded {:?}", title);
            success_line(&fragment, title.as_deref())
        }
        Err(e) => {
            warn!("Download failed: {}", e);
            failure_line(&fragment, &e.to_string())
        }
    };

    results.push(line);
}

/// Wait for every download, then render the collected lines once.
async fn monitor_downloads(
    urls: Vec<String>,
    handles: Vec<JoinHandle<()>>,
    results: ResultLog,
    view: Arc<dyn ResultsView>,
) -> Vec<String> {
    let outcomes = join_all(handles).await;

    for (url, outcome) in urls.iter().zip(outcomes) {
        if let Err(e) = outcome {
            // The task ended without recording a line for this item
            error!(url = %url, "Download task ended abnormally: {}", e);
        }
    }

    let lines = results.snapshot();
    view.render(&lines);
    view.notify_complete();
    lines
}

/// Handle on a running batch.
#[derive(Debug)]
pub struct BatchMonitor {
    urls: Vec<String>,
    results: ResultLog,
    handle: JoinHandle<Vec<String>>,
}

impl BatchMonitor {
    /// Normalized URLs, one per launched download.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Live view of the lines recorded so far.
    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    /// Wait until the monitor has rendered the results, returning them.
    pub async fn wait(self) -> Result<Vec<String>> {
        Ok(self.handle.await?)
    }
}
