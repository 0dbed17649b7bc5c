//! Progress events and the shared status slot.
//!
//! Every running download reports into one [`StatusSlot`]. The slot holds a
//! single percent value and a single status line, so whichever download
//! reported last is what the user sees. There is no per-download isolation.

use indicatif::ProgressBar;
use std::sync::{Mutex, PoisonError};

/// Status text shown before any download reports progress.
pub const IDLE_STATUS: &str = "Aguardando...";

/// Status text shown once a download hands off to MP3 conversion.
pub const FINISHED_STATUS: &str = "Conversão para MP3 concluída";

/// A progress report from the extraction tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Downloading {
        downloaded_bytes: u64,
        /// Exact size, or the tool's estimate when the exact size is unknown.
        total_bytes: Option<u64>,
        /// Transfer rate in bytes per second.
        speed: Option<f64>,
    },
    Finished,
}

/// Percent and status line derived from the latest event.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub percent: u8,
    pub text: String,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            percent: 0,
            text: IDLE_STATUS.to_string(),
        }
    }
}

impl StatusSnapshot {
    /// Derive the snapshot for a progress event.
    pub fn from_event(event: &ProgressEvent) -> Self {
        match event {
            ProgressEvent::Downloading {
                downloaded_bytes,
                total_bytes,
                speed,
            } => {
                let total = total_bytes.unwrap_or(0);
                let percent = if total > 0 {
                    ((*downloaded_bytes as f64 / total as f64) * 100.0).floor() as u64
                } else {
                    0
                };
                let size_mib = total as f64 / 1024.0 / 1024.0;
                let speed_kib = match speed {
                    Some(s) if *s > 0.0 => s / 1024.0,
                    _ => 0.0,
                };

                Self {
                    percent: percent.min(100) as u8,
                    text: format!(
                        "Baixando: {}% - Velocidade: {:.2} KiB/s - Tamanho: {:.2} MiB",
                        percent, speed_kib, size_mib
                    ),
                }
            }
            ProgressEvent::Finished => Self {
                percent: 100,
                text: FINISHED_STATUS.to_string(),
            },
        }
    }
}

/// Single shared progress indicator, written by every running download.
#[derive(Default)]
pub struct StatusSlot {
    current: Mutex<StatusSnapshot>,
    bar: Option<ProgressBar>,
}

impl StatusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror every update onto a terminal progress bar (length 100).
    pub fn with_progress_bar(bar: ProgressBar) -> Self {
        bar.set_length(100);
        bar.set_position(0);
        bar.set_message(IDLE_STATUS);
        Self {
            current: Mutex::new(StatusSnapshot::default()),
            bar: Some(bar),
        }
    }

    /// Apply a progress event. Last writer wins.
    pub fn apply(&self, event: &ProgressEvent) {
        let snapshot = StatusSnapshot::from_event(event);

        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(snapshot.percent));
            bar.set_message(snapshot.text.clone());
        }

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Attached progress bar, if any.
    pub fn progress_bar(&self) -> Option<&ProgressBar> {
        self.bar.as_ref()
    }
}
