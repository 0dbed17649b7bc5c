//! CLI command implementations.

mod config;
mod doctor;
mod download;

pub use config::run_config;
pub use doctor::run_doctor;
pub use download::{resolve_request, run_download, DownloadOptions, DownloadOutcome};
