use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::drill::PracticeMode;

/// Rounded speed and accuracy for a span of typing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillStats {
    pub wpm: u32,
    pub accuracy: u32,
}

/// `(chars - errors) / max(1, chars + errors)`, as a whole percentage.
/// Floors at zero when errors outnumber typed characters.
fn accuracy_percent(chars: usize, errors: usize) -> u32 {
    let total = (chars + errors).max(1) as f64;
    let pct = (chars as f64 - errors as f64) / total * 100.0;
    pct.round().max(0.0) as u32
}

/// Five characters to a word.
fn words_per_minute(chars: usize, minutes: f64) -> u32 {
    if minutes <= 0.0 {
        return 0;
    }
    ((chars as f64 / 5.0) / minutes).round() as u32
}

impl DrillStats {
    /// Stats over the time actually spent so far.
    pub fn live(chars: usize, errors: usize, elapsed_secs: f64) -> Self {
        Self {
            wpm: words_per_minute(chars, elapsed_secs / 60.0),
            accuracy: accuracy_percent(chars, errors),
        }
    }

    /// Stats over the full drill length, however early the drill ended, so
    /// quitting early cannot inflate speed.
    pub fn over_duration(chars: usize, errors: usize, duration_secs: u64) -> Self {
        Self {
            wpm: words_per_minute(chars, duration_secs as f64 / 60.0),
            accuracy: accuracy_percent(chars, errors),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrillResult {
    pub practice_mode: PracticeMode,
    /// Curriculum position drilled, for repeating it.
    pub lesson_index: usize,
    #[serde(default)]
    pub lesson_name: Option<String>,
    pub wpm: u32,
    pub accuracy: u32,
    pub typed_chars: usize,
    pub errors: usize,
    pub chunks_completed: usize,
    pub elapsed_secs: f64,
    pub passed: bool,
    pub timestamp: DateTime<Utc>,
}

impl DrillResult {
    pub fn stats(&self) -> DrillStats {
        DrillStats {
            wpm: self.wpm,
            accuracy: self.accuracy,
        }
    }
}
