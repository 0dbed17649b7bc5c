//! Audio fetching abstraction.
//!
//! The batch only talks to [`AudioFetcher`]; [`YtDlpFetcher`] is the
//! implementation backed by the `yt-dlp` executable.

mod downloader;

pub use downloader::{parse_output_line, ToolLine, YtDlpFetcher};

use crate::error::Result;
use crate::progress::ProgressEvent;
use async_trait::async_trait;
use std::path::Path;

/// Callback receiving progress events while a download runs.
pub type ProgressCallback<'a> = &'a (dyn Fn(ProgressEvent) + Send + Sync);

/// Trait for anything able to fetch a URL as an MP3 file.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Download the best audio of `url` into `destination` and convert it
    /// to MP3.
    ///
    /// Returns the media title, if the tool reported one.
    async fn fetch_audio(
        &self,
        url: &str,
        destination: &Path,
        on_progress: ProgressCallback<'_>,
    ) -> Result<Option<String>>;
}
