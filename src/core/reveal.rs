//! # Reveal Session
//!
//! State and timing for the typewriter effect, with no timers of its own.
//!
//! ```text
//!  restart ──► prefix 0 ──300ms──► 1 ──d──► 2 ──d──► … ──d──► n ──500ms──► settled
//!                                      d = speed, or speed/2 before ' ' , . ! ? \n
//! ```
//!
//! [`RevealSchedule`] yields the `(delay, prefix_len)` steps for a text; the
//! tokio side in `typewriter.rs` just sleeps and forwards them. The session
//! accepts a step only if it belongs to its generation and extends the prefix
//! by exactly one character, so steps from a superseded run are inert.

use std::time::Duration;

/// Pause before the first character appears.
pub const INITIAL_DELAY: Duration = Duration::from_millis(300);
/// How long the finished text keeps its cursor before the session settles.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Default time per character.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(15);

const MIN_STEP: Duration = Duration::from_millis(1);

/// Characters that are revealed at double speed.
pub fn is_fast_boundary(c: char) -> bool {
    matches!(c, ' ' | ',' | '.' | '!' | '?' | '\n')
}

/// Delay before revealing `next`.
pub fn step_delay(next: char, speed: Duration) -> Duration {
    if is_fast_boundary(next) {
        (speed / 2).max(MIN_STEP)
    } else {
        speed
    }
}

/// The timed steps of one reveal, as `(delay_before, prefix_len_in_chars)`.
#[derive(Debug, Clone)]
pub struct RevealSchedule {
    text: String,
    speed: Duration,
    /// Byte offset of the next character to reveal.
    offset: usize,
    emitted: usize,
}

impl RevealSchedule {
    pub fn new(text: impl Into<String>, speed: Duration) -> Self {
        Self {
            text: text.into(),
            speed,
            offset: 0,
            emitted: 0,
        }
    }
}

impl Iterator for RevealSchedule {
    type Item = (Duration, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.text[self.offset..].chars().next()?;
        let delay = if self.emitted == 0 {
            INITIAL_DELAY
        } else {
            step_delay(next, self.speed)
        };
        self.offset += next.len_utf8();
        self.emitted += 1;
        Some((delay, self.emitted))
    }
}

/// One run of the typewriter over a fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSession {
    full_text: String,
    generation: u64,
    revealed_chars: usize,
    revealed_bytes: usize,
    is_revealing: bool,
}

impl RevealSession {
    /// Starts revealing from an empty prefix.
    pub fn new(full_text: impl Into<String>, generation: u64) -> Self {
        Self {
            full_text: full_text.into(),
            generation,
            revealed_chars: 0,
            revealed_bytes: 0,
            is_revealing: true,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn is_revealing(&self) -> bool {
        self.is_revealing
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed_chars
    }

    pub fn total_len(&self) -> usize {
        self.full_text.chars().count()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_bytes == self.full_text.len()
    }

    /// What the presenter should draw: the prefix while revealing, the whole
    /// text once the session has stopped.
    pub fn visible_text(&self) -> &str {
        if self.is_revealing {
            &self.full_text[..self.revealed_bytes]
        } else {
            &self.full_text
        }
    }

    /// Applies one timer step. Returns false (and changes nothing) for steps
    /// from another generation, out-of-order lengths, or a stopped session.
    pub fn apply_step(&mut self, generation: u64, len: usize) -> bool {
        if generation != self.generation || !self.is_revealing || len != self.revealed_chars + 1 {
            return false;
        }
        match self.full_text[self.revealed_bytes..].chars().next() {
            Some(c) => {
                self.revealed_bytes += c.len_utf8();
                self.revealed_chars = len;
                true
            }
            None => false,
        }
    }

    /// The post-completion pause elapsed. Only meaningful for a finished,
    /// still-revealing session of the same generation.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_revealing || !self.is_complete() {
            return false;
        }
        self.is_revealing = false;
        true
    }

    /// Snap to the full text. Returns false if there was nothing to stop.
    pub fn skip_to_end(&mut self) -> bool {
        if !self.is_revealing {
            return false;
        }
        self.revealed_bytes = self.full_text.len();
        self.revealed_chars = self.total_len();
        self.is_revealing = false;
        true
    }

    /// Back to an empty prefix under a new generation.
    pub fn restart(&mut self, generation: u64) {
        self.generation = generation;
        self.revealed_chars = 0;
        self.revealed_bytes = 0;
        self.is_revealing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_schedule_for_hi_there() {
        let steps: Vec<(Duration, usize)> = RevealSchedule::new("Hi, there!", ms(10)).collect();
        let delays: Vec<Duration> = steps.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            delays,
            vec![
                ms(300), // H
                ms(10),  // i
                ms(5),   // ,
                ms(5),   // ' '
                ms(10),  // t
                ms(10),  // h
                ms(10),  // e
                ms(10),  // r
                ms(10),  // e
                ms(5),   // !
            ]
        );
        let lens: Vec<usize> = steps.iter().map(|(_, n)| *n).collect();
        assert_eq!(lens, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_half_speed_never_below_one_ms() {
        assert_eq!(step_delay('.', ms(1)), ms(1));
        assert_eq!(step_delay('.', Duration::ZERO), ms(1));
        assert_eq!(step_delay('\n', ms(15)), Duration::from_micros(7500));
        assert_eq!(step_delay('a', ms(15)), ms(15));
    }

    #[test]
    fn test_schedule_empty_text_has_no_steps() {
        assert_eq!(RevealSchedule::new("", ms(10)).count(), 0);
    }

    #[test]
    fn test_schedule_counts_chars_not_bytes() {
        let lens: Vec<usize> = RevealSchedule::new("héllo 🦀", ms(10)).map(|(_, n)| n).collect();
        assert_eq!(lens, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_stepping_yields_every_prefix_in_order() {
        let text = "Ownership: one **owner** at a time.\n```rust\nlet s = String::new();\n```";
        let mut session = RevealSession::new(text, 1);
        assert_eq!(session.visible_text(), "");

        let mut seen = Vec::new();
        for (_, len) in RevealSchedule::new(text, ms(10)) {
            assert!(session.apply_step(1, len));
            seen.push(session.visible_text().to_string());
        }

        let expected: Vec<String> = (1..=text.chars().count())
            .map(|n| text.chars().take(n).collect())
            .collect();
        assert_eq!(seen, expected);
        assert!(session.is_complete());
        assert!(session.is_revealing());
    }

    #[test]
    fn test_step_from_other_generation_ignored() {
        let mut session = RevealSession::new("abc", 2);
        assert!(!session.apply_step(1, 1));
        assert_eq!(session.revealed_len(), 0);
    }

    #[test]
    fn test_step_gaps_and_repeats_ignored() {
        let mut session = RevealSession::new("abc", 1);
        assert!(!session.apply_step(1, 2)); // gap
        assert!(session.apply_step(1, 1));
        assert!(!session.apply_step(1, 1)); // repeat
        assert!(!session.apply_step(1, 4)); // past end
        assert_eq!(session.visible_text(), "a");
    }

    #[test]
    fn test_settle_requires_completion() {
        let mut session = RevealSession::new("ab", 1);
        session.apply_step(1, 1);
        assert!(!session.settle(1));
        session.apply_step(1, 2);
        assert!(!session.settle(7));
        assert!(session.settle(1));
        assert!(!session.is_revealing());
        assert_eq!(session.visible_text(), "ab");
    }

    #[test]
    fn test_skip_to_end_is_idempotent() {
        let mut session = RevealSession::new("Hello", 1);
        session.apply_step(1, 1);
        assert!(session.skip_to_end());
        let after_first = session.clone();
        assert!(!session.skip_to_end());
        assert_eq!(session, after_first);
        assert_eq!(session.visible_text(), "Hello");
        assert_eq!(session.revealed_len(), 5);
    }

    #[test]
    fn test_no_step_applies_after_skip() {
        let mut session = RevealSession::new("Hello", 1);
        session.skip_to_end();
        assert!(!session.apply_step(1, 1));
        assert!(!session.settle(1));
        assert_eq!(session.visible_text(), "Hello");
    }

    #[test]
    fn test_restart_resets_prefix_and_generation() {
        let mut session = RevealSession::new("Hello", 1);
        session.skip_to_end();
        session.restart(2);
        assert!(session.is_revealing());
        assert_eq!(session.visible_text(), "");
        assert_eq!(session.generation(), 2);
        assert!(!session.apply_step(1, 1));
        assert!(session.apply_step(2, 1));
    }

    #[test]
    fn test_empty_text_settles_immediately() {
        let mut session = RevealSession::new("", 1);
        assert!(session.is_complete());
        assert!(session.settle(1));
    }
}
