use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigOverrides};
use crate::engine::curriculum;
use crate::session::drill::PracticeMode;
use crate::session::result::DrillResult;

/// A typist's progress through the course and their own settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub current_lesson_index: usize,
    #[serde(default)]
    pub wpm_record: u32,
    #[serde(default)]
    pub total_drills: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub config_overrides: ConfigOverrides,
}

fn default_level() -> u32 {
    1
}

impl UserProfile {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            current_lesson_index: 0,
            wpm_record: 0,
            total_drills: 0,
            level: default_level(),
            config_overrides: ConfigOverrides::default(),
        }
    }

    /// The global config with this profile's overrides applied.
    pub fn config(&self, global: &Config) -> Config {
        global.with_overrides(&self.config_overrides)
    }

    /// Fold a finished drill into the profile. A passed curriculum drill
    /// moves on to the next lesson, stopping at the last one.
    pub fn record_drill(&mut self, result: &DrillResult) {
        if result.passed && result.practice_mode == PracticeMode::Curriculum {
            self.current_lesson_index = curriculum::clamp_index(result.lesson_index + 1);
        }
        self.wpm_record = self.wpm_record.max(result.wpm);
        self.total_drills += 1;
    }

    /// Go back to the lesson `last` drilled if it advanced past it.
    /// Returns whether the index moved.
    pub fn repeat_lesson(&mut self, last: &DrillResult) -> bool {
        if self.current_lesson_index > last.lesson_index {
            self.current_lesson_index = last.lesson_index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(mode: PracticeMode, lesson_index: usize, wpm: u32, passed: bool) -> DrillResult {
        DrillResult {
            practice_mode: mode,
            lesson_index,
            lesson_name: None,
            wpm,
            accuracy: 96,
            typed_chars: 400,
            errors: 4,
            chunks_completed: 8,
            elapsed_secs: 300.0,
            passed,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_pass_advances_lesson() {
        let mut profile = UserProfile::new("Ada");
        profile.record_drill(&result(PracticeMode::Curriculum, 0, 14, true));
        assert_eq!(profile.current_lesson_index, 1);
        assert_eq!(profile.wpm_record, 14);
        assert_eq!(profile.total_drills, 1);
    }

    #[test]
    fn test_fail_keeps_lesson_but_counts_drill() {
        let mut profile = UserProfile::new("ada");
        profile.record_drill(&result(PracticeMode::Curriculum, 0, 30, false));
        assert_eq!(profile.current_lesson_index, 0);
        assert_eq!(profile.wpm_record, 30);
        profile.record_drill(&result(PracticeMode::Curriculum, 0, 12, false));
        assert_eq!(profile.wpm_record, 30);
        assert_eq!(profile.total_drills, 2);
    }

    #[test]
    fn test_last_lesson_is_clamped() {
        let last = curriculum::LESSONS.len() - 1;
        let mut profile = UserProfile::new("ada");
        profile.current_lesson_index = last;
        profile.record_drill(&result(PracticeMode::Curriculum, last, 40, true));
        assert_eq!(profile.current_lesson_index, last);
    }

    #[test]
    fn test_free_practice_never_advances() {
        let mut profile = UserProfile::new("ada");
        profile.record_drill(&result(PracticeMode::Code, 0, 40, true));
        assert_eq!(profile.current_lesson_index, 0);
    }

    #[test]
    fn test_repeat_restores_previous_lesson() {
        let mut profile = UserProfile::new("ada");
        let drilled = result(PracticeMode::Curriculum, 4, 20, true);
        profile.current_lesson_index = 4;
        profile.record_drill(&drilled);
        assert_eq!(profile.current_lesson_index, 5);
        assert!(profile.repeat_lesson(&drilled));
        assert_eq!(profile.current_lesson_index, 4);
        assert!(!profile.repeat_lesson(&drilled));
    }

    #[test]
    fn test_missing_fields_default() {
        let profile: UserProfile = serde_json::from_str(r#"{"name": "bo"}"#).unwrap();
        assert_eq!(profile, UserProfile::new("bo"));
    }
}
