//! Copy-to-clipboard for code blocks, plus the short-lived "copied" marker
//! the code block header shows afterwards.

use std::fmt;
use std::time::{Duration, Instant};

/// How long a code block reads "copied" after being copied.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub struct ClipboardError(String);

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard unavailable: {}", self.0)
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(e: arboard::Error) -> Self {
        ClipboardError(e.to_string())
    }
}

/// Puts `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    log::info!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}

/// Remembers which code was copied last, and when.
///
/// Keyed by the code itself, so every block with identical contents shows
/// the marker.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    copied: Option<(String, Instant)>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, code: &str, now: Instant) {
        self.copied = Some((code.to_string(), now));
    }

    /// The code currently showing the marker, if it hasn't expired at `now`.
    pub fn active(&self, now: Instant) -> Option<&str> {
        match &self.copied {
            Some((code, at)) if now.duration_since(*at) < COPY_FEEDBACK_DURATION => {
                Some(code.as_str())
            }
            _ => None,
        }
    }

    /// Drops an expired marker. Returns true if one was dropped, so the
    /// caller knows to redraw.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.copied.is_some() && self.active(now).is_none() {
            self.copied = None;
            return true;
        }
        false
    }
}
