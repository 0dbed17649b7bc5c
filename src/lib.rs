//! audiograb - batch audio downloader
//!
//! Takes video URLs or bare video codes, downloads the best available audio
//! track of each with `yt-dlp` and has it converted to MP3.
//!
//! # Architecture
//!
//! - `target` - splitting user input and normalizing identifiers into URLs
//! - `audio` - the [`audio::AudioFetcher`] capability and its yt-dlp implementation
//! - `progress` - progress events and the shared status slot
//! - `report` - result line formatting and the shared result log
//! - `batch` - launching one download per item and monitoring completion
//! - `config` - the persisted destination folder
//! - `cli` - command-line surface
//!
//! # Example
//!
//! ```rust,no_run
//! use audiograb::audio::YtDlpFetcher;
//! use audiograb::batch::{BatchContext, BatchRequest, ResultsView};
//! use audiograb::config::ConfigStore;
//! use audiograb::progress::StatusSlot;
//! use std::sync::Arc;
//!
//! struct Print;
//!
//! impl ResultsView for Print {
//!     fn render(&self, lines: &[String]) {
//!         lines.iter().for_each(|l| println!("{}", l));
//!     }
//!     fn notify_complete(&self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = BatchContext {
//!         fetcher: Arc::new(YtDlpFetcher::default()),
//!         status: Arc::new(StatusSlot::new()),
//!         view: Arc::new(Print),
//!         config: ConfigStore::at_default_location(),
//!     };
//!
//!     let monitor = ctx.launch(&BatchRequest {
//!         input: "dQw4w9WgXcQ".to_string(),
//!         list_mode: false,
//!         destination: "~/Music".to_string(),
//!     })?;
//!     monitor.wait().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod target;

pub use error::{GrabError, Result};
