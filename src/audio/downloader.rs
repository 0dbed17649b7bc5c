//! yt-dlp backed audio fetcher.
//!
//! yt-dlp does the download and hands the file to ffmpeg for the MP3
//! conversion. Progress and the final title are read back from the child
//! process through `--progress-template` and `--print`.

use super::{AudioFetcher, ProgressCallback};
use crate::error::{GrabError, Result};
use crate::progress::ProgressEvent;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

const PROGRESS_MARKER: &str = "audiograb-progress|";
const TITLE_MARKER: &str = "audiograb-title|";

/// Format selector: best audio-only stream, else best overall.
const FORMAT_SELECTOR: &str = "bestaudio/best";

/// Target MP3 bitrate handed to the post-processor.
const AUDIO_QUALITY: &str = "192K";

/// A line of yt-dlp output this crate understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolLine {
    Progress(ProgressEvent),
    Title(Option<String>),
}

/// Parse one line printed by yt-dlp.
///
/// Returns `None` for anything that is not one of our templated lines.
pub fn parse_output_line(line: &str) -> Option<ToolLine> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(rest) = line.trim_start().strip_prefix(PROGRESS_MARKER) {
        return parse_progress_fields(rest).map(ToolLine::Progress);
    }

    if let Some(title) = line.strip_prefix(TITLE_MARKER) {
        return Some(ToolLine::Title(non_na(title).map(str::to_string)));
    }

    None
}

/// yt-dlp renders missing template fields as `NA`.
fn non_na(field: &str) -> Option<&str> {
    let field = field.trim();
    if field.is_empty() || field == "NA" || field == "None" {
        None
    } else {
        Some(field)
    }
}

fn parse_number(field: &str) -> Option<f64> {
    non_na(field)?.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// `status|downloaded|total|total_estimate|speed`
fn parse_progress_fields(rest: &str) -> Option<ProgressEvent> {
    let mut fields = rest.split('|');
    let status = fields.next()?.trim();

    match status {
        "finished" => Some(ProgressEvent::Finished),
        "downloading" => {
            let downloaded = fields.next().and_then(parse_number).unwrap_or(0.0);
            let total = fields.next().and_then(parse_number);
            let estimate = fields.next().and_then(parse_number);
            let speed = fields.next().and_then(parse_number);

            Some(ProgressEvent::Downloading {
                downloaded_bytes: downloaded as u64,
                total_bytes: total.or(estimate).map(|t| t as u64),
                speed,
            })
        }
        _ => None,
    }
}

/// What was read from one of the child's output streams.
#[derive(Debug, Default)]
struct StreamSummary {
    title: Option<Option<String>>,
    other_lines: Vec<String>,
}

async fn drain_stream<R>(reader: R, on_progress: ProgressCallback<'_>) -> std::io::Result<StreamSummary>
where
    R: AsyncRead + Unpin,
{
    let mut summary = StreamSummary::default();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    // yt-dlp writes in the locale encoding, which is not always UTF-8
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim_end_matches(['\r', '\n']);

        match parse_output_line(line) {
            Some(ToolLine::Progress(event)) => on_progress(event),
            Some(ToolLine::Title(title)) => summary.title = Some(title),
            None => {
                if !line.trim().is_empty() {
                    debug!("yt-dlp: {}", line);
                    summary.other_lines.push(line.to_string());
                }
            }
        }
    }

    Ok(summary)
}

/// Pick the most useful error text out of the tool's output.
fn error_message(lines: &[String], status: impl std::fmt::Display) -> String {
    if let Some(line) = lines.iter().rev().find(|l| l.trim_start().starts_with("ERROR:")) {
        return line.trim().to_string();
    }

    let joined = lines.join(" ");
    let joined = joined.trim();
    if joined.is_empty() {
        format!("yt-dlp exited with {}", status)
    } else {
        joined.to_string()
    }
}

/// Fetches audio by running the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: PathBuf,
    quiet: bool,
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpFetcher {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            quiet: true,
        }
    }

    /// Let yt-dlp print its warnings (they are logged at debug level).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.quiet = !verbose;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments passed to yt-dlp for one URL.
    pub fn build_args(&self, url: &str, destination: &Path) -> Vec<OsString> {
        let template = destination.join("%(title)s.%(ext)s");

        let mut args: Vec<OsString> = vec![
            "--format".into(),
            FORMAT_SELECTOR.into(),
            "--output".into(),
            template.into_os_string(),
            "--extract-audio".into(),
            "--audio-format".into(),
            "mp3".into(),
            "--audio-quality".into(),
            AUDIO_QUALITY.into(),
            "--newline".into(),
            "--progress".into(),
            "--progress-template".into(),
            format!(
                "download:{}%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.speed)s",
                PROGRESS_MARKER
            )
            .into(),
            "--print".into(),
            format!("after_move:{}%(title)s", TITLE_MARKER).into(),
        ];

        if self.quiet {
            args.push("--quiet".into());
            args.push("--no-warnings".into());
        }

        args.push(url.into());
        args
    }
}

#[async_trait]
impl AudioFetcher for YtDlpFetcher {
    #[instrument(skip(self, destination, on_progress), fields(url = %url))]
    async fn fetch_audio(
        &self,
        url: &str,
        destination: &Path,
        on_progress: ProgressCallback<'_>,
    ) -> Result<Option<String>> {
        info!("Downloading audio to {}", destination.display());

        let spawned = Command::new(&self.binary)
            .args(self.build_args(url, destination))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GrabError::ToolNotFound(self.binary.display().to_string()));
            }
            Err(e) => {
                return Err(GrabError::Extraction(format!("yt-dlp execution failed: {e}")));
            }
        };

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GrabError::Extraction("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GrabError::Extraction("yt-dlp stderr unavailable".into()))?;

        // Both pipes must be drained together or the child can block on a full one
        let (out, err) = tokio::try_join!(
            drain_stream(stdout, on_progress),
            drain_stream(stderr, on_progress)
        )?;

        let status = child.wait().await?;

        if !status.success() {
            let mut lines = out.other_lines;
            lines.extend(err.other_lines);
            let message = error_message(&lines, status);
            warn!("yt-dlp failed: {}", message);
            return Err(GrabError::Extraction(message));
        }

        let title = out.title.or(err.title).flatten();
        debug!("Finished with title {:?}", title);
        Ok(title)
    }
}
