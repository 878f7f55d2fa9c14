//! Logging utilities
//!
//! Helpers for keeping tracing output useful without leaking secrets.

use regex::Regex;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Await `future` and log how long it took at debug level
///
/// ```rust,ignore
/// let response = timed("gemini.generate_content", model.chat(request)).await?;
/// ```
pub async fn timed<F, T>(name: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    debug!("Starting: {}", name);

    let result = future.await;

    debug!("Completed: {} in {}", name, format_duration(start.elapsed()));
    result
}

/// Format duration in human-readable form
///
/// ```rust
/// use tooling::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis < 1 {
        format!("{}μs", duration.as_micros())
    } else if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let seconds = duration.as_secs();
        format!("{}m{}s", seconds / 60, seconds % 60)
    }
}

fn secret_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"(?i)([?&]key=)[^&\s)]+", "${1}[REDACTED]"),
            (r"(?i)(api[\s_-]?key|apikey)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(token|secret)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(authorization)\s*:\s*bearer\s+\S+", "$1: Bearer [REDACTED]"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|re| (re, replacement))
        })
        .collect()
    })
}

/// Redact credentials from text before it reaches a log line
///
/// Covers `?key=` query parameters (which HTTP client errors echo back
/// inside URLs), `api_key: ...` style pairs and bearer tokens.
///
/// ```rust
/// use tooling::logging::sanitize_for_logging;
///
/// let line = "error sending request for url (https://host/models/m:generateContent?key=AIzaSy123)";
/// assert!(!sanitize_for_logging(line).contains("AIzaSy123"));
/// ```
pub fn sanitize_for_logging(input: &str) -> String {
    secret_patterns()
        .iter()
        .fold(input.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}

/// Show just enough of a secret to tell keys apart
///
/// Keys of 14 characters or fewer are fully hidden.
///
/// ```rust
/// use tooling::logging::mask_secret;
///
/// assert_eq!(mask_secret("AIzaSyABCDEFGHIJKLMNOP"), "AIzaSyABCD...MNOP");
/// assert_eq!(mask_secret("short"), "****");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 14 {
        return "****".to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
