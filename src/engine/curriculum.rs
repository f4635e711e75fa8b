use crate::error::{KeyrowError, Result};
use crate::generator::Algorithm;
use crate::generator::render::ShiftMode;
use crate::keyboard::rows::{RowLayout, row_layout};

// --- Lesson Definitions ---

/// What a lesson asks the typist to type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonSource {
    /// A generated drill over one practice row.
    Drill {
        algorithm: Algorithm,
        row: &'static str,
    },
    /// Sentences from the configured sentence source.
    Sentence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub name: &'static str,
    pub source: LessonSource,
    /// Minimum accuracy percentage to pass.
    pub target_acc: u32,
    pub target_wpm: u32,
    pub shift_mode: ShiftMode,
}

impl Lesson {
    /// The practice row for drill lessons. Fails on a row name missing from
    /// the registry.
    pub fn row(&self) -> Result<Option<&'static RowLayout>> {
        match self.source {
            LessonSource::Drill { row, .. } => row_layout(row).map(Some),
            LessonSource::Sentence => Ok(None),
        }
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        match self.source {
            LessonSource::Drill { algorithm, .. } => Some(algorithm),
            LessonSource::Sentence => None,
        }
    }

    pub fn passes(&self, wpm: u32, accuracy: u32) -> bool {
        accuracy >= self.target_acc && wpm >= self.target_wpm
    }
}

const DRILL_WPM: u32 = 10;

const fn drill(
    name: &'static str,
    algorithm: Algorithm,
    row: &'static str,
    target_acc: u32,
    shift_mode: ShiftMode,
) -> Lesson {
    Lesson {
        name,
        source: LessonSource::Drill { algorithm, row },
        target_acc,
        target_wpm: DRILL_WPM,
        shift_mode,
    }
}

const fn sentence(name: &'static str, target_acc: u32, target_wpm: u32) -> Lesson {
    Lesson {
        name,
        source: LessonSource::Sentence,
        target_acc,
        target_wpm,
        shift_mode: ShiftMode::Off,
    }
}

use Algorithm::{Adjacency, Alternating, Isolation, Mirror, Rolls, Synthesis};
use ShiftMode::{Mixed, Off};

/// The whole course, in order. Home row first with every drill, then one
/// pair of reaches at a time, then numbers, symbols and full sentences.
pub const LESSONS: &[Lesson] = &[
    // home row
    drill("1.1: Isolation", Isolation, "home", 95, Off),
    drill("1.2: Adjacency", Adjacency, "home", 95, Off),
    drill("1.3: Alternating", Alternating, "home", 92, Off),
    drill("1.4: Mirroring", Mirror, "home", 92, Off),
    drill("1.5: Rolling", Rolls, "home", 90, Off),
    drill("1.6: Synthesis", Synthesis, "home", 95, Off),
    drill("1.7: Mixed Case", Synthesis, "home", 90, Mixed),
    // reaches
    drill("2.1: Isolation", Isolation, "focus_e_i", 95, Off),
    drill("2.2: Variation", Synthesis, "focus_e_i", 95, Off),
    drill("3.1: Isolation", Isolation, "focus_r_u", 95, Off),
    drill("3.2: Variation", Synthesis, "focus_r_u", 95, Off),
    drill("4.1: Isolation", Isolation, "focus_t_o", 95, Off),
    drill("4.2: Variation", Synthesis, "focus_t_o", 95, Off),
    drill("5.1: Isolation", Isolation, "focus_shift_period", 95, Mixed),
    drill("5.2: Variation", Synthesis, "focus_shift_period", 95, Mixed),
    drill("6.1: Isolation", Isolation, "focus_c_comma", 95, Off),
    drill("6.2: Variation", Synthesis, "focus_c_comma", 95, Mixed),
    drill("7.1: Isolation", Isolation, "focus_g_h", 95, Off),
    drill("7.2: Variation", Synthesis, "focus_g_h", 95, Mixed),
    drill("8.1: Isolation", Isolation, "focus_v_n_slash", 95, Off),
    drill("8.2: Variation", Synthesis, "focus_v_n_slash", 95, Mixed),
    drill("9.1: Isolation", Isolation, "focus_w_m", 95, Off),
    drill("9.2: Variation", Synthesis, "focus_w_m", 95, Mixed),
    drill("10.1: Isolation", Isolation, "focus_q_p", 95, Off),
    drill("10.2: Variation", Synthesis, "focus_q_p", 95, Mixed),
    drill("11.1: Isolation", Isolation, "focus_b_y", 95, Off),
    drill("11.2: Variation", Synthesis, "focus_b_y", 95, Mixed),
    drill("12.1: Isolation", Isolation, "focus_z_x", 95, Off),
    drill("12.2: Variation", Synthesis, "focus_z_x", 95, Mixed),
    // numbers and symbols
    drill("13.1: Numbers Isolation", Isolation, "numbers", 95, Off),
    drill("13.2: Numbers Variation", Synthesis, "numbers", 95, Off),
    drill("14.1: Special Symbols", Isolation, "symbols_basic", 90, Mixed),
    drill("14.2: Symbols Adjacency", Adjacency, "symbols_basic", 90, Mixed),
    drill("14.3: Symbols Synthesis", Synthesis, "symbols_basic", 90, Mixed),
    // sentences
    sentence("15.1: Sentence Practice I", 90, 20),
    sentence("15.2: Sentence Practice II", 92, 25),
    sentence("15.3: Sentence Practice III", 95, 30),
];

// --- Lookup ---

pub fn lesson(index: usize) -> Result<&'static Lesson> {
    LESSONS.get(index).ok_or(KeyrowError::UnknownLesson(index))
}

/// Clamp a stored lesson index to the course, for profiles saved against a
/// longer curriculum.
pub fn clamp_index(index: usize) -> usize {
    index.min(LESSONS.len().saturating_sub(1))
}

/// Find a lesson by its number prefix, e.g. `"1.4"`.
pub fn find_by_number(number: &str) -> Option<usize> {
    LESSONS
        .iter()
        .position(|l| l.name.split(':').next() == Some(number))
}
