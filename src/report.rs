//! Result lines and the shared, append-only result log.

use std::sync::{Arc, Mutex, PoisonError};

/// Title used when the tool reports none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Width the title is truncated or padded to in success lines.
const TITLE_WIDTH: usize = 35;

/// Number of characters of an error message kept in failure lines.
const ERROR_WIDTH: usize = 33;

/// First `max` characters of `s`, counted in chars.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `<fragment>|<title, exactly 35 chars>: Sucesso!`
pub fn success_line(fragment: &str, title: Option<&str>) -> String {
    let title = truncate_chars(title.unwrap_or(UNKNOWN_TITLE), TITLE_WIDTH);
    format!("{}|{:<width$}: Sucesso!", fragment, title, width = TITLE_WIDTH)
}

/// `<fragment>: Falhou! (<first 33 chars of message>)`
pub fn failure_line(fragment: &str, message: &str) -> String {
    format!("{}: Falhou! ({})", fragment, truncate_chars(message, ERROR_WIDTH))
}

/// Result lines in completion order. Cloning shares the same log.
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_line_pads_short_title() {
        let line = success_line("ABC123", Some("Song"));
        assert_eq!(line, format!("ABC123|Song{}: Sucesso!", " ".repeat(31)));
    }

    #[test]
    fn test_success_line_truncates_long_title() {
        let title = "A very long title that keeps going and going forever";
        let line = success_line("ABC123", Some(title));
        assert_eq!(line, "ABC123|A very long title that keeps going : Sucesso!");
    }

    #[test]
    fn test_success_line_unknown_title() {
        let line = success_line("x", None);
        assert!(line.starts_with("x|Unknown Title "));
        assert!(line.ends_with(": Sucesso!"));
    }

    #[test]
    fn test_truncation_counts_chars() {
        let title = "ção".repeat(20);
        let line = success_line("id", Some(&title));
        let shown = line
            .strip_prefix("id|")
            .and_then(|l| l.strip_suffix(": Sucesso!"))
            .unwrap();
        assert_eq!(shown.chars().count(), 35);
    }

    #[test]
    fn test_failure_line() {
        let message = "ERROR: [youtube] ABC123: Video unavailable. This video is private";
        assert_eq!(
            failure_line("ABC123", message),
            "ABC123: Falhou! (ERROR: [youtube] ABC123: Video un)"
        );
        assert_eq!(failure_line("ABC123", "boom"), "ABC123: Falhou! (boom)");
    }

    #[test]
    fn test_log_shares_lines_between_clones() {
        let log = ResultLog::new();
        let other = log.clone();
        other.push("a".into());
        log.push("b".into());

        assert_eq!(log.snapshot(), vec!["a", "b"]);
        assert_eq!(other.len(), 2);
    }
}
