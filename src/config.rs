use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::generator::sentence::SentenceSource;
use crate::keyboard::model::LAYOUT_NAMES;
use crate::session::drill::PracticeMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keyboard_layout")]
    pub keyboard_layout: String,
    /// Hard mode: a wrong key holds the cursor until the right one is typed.
    #[serde(default = "default_strict_mode")]
    pub strict_mode: bool,
    #[serde(default = "default_drill_duration_secs")]
    pub drill_duration_secs: u64,
    /// Chunks typed in a drill before generated units are shuffled.
    #[serde(default = "default_shuffle_after")]
    pub shuffle_after: usize,
    #[serde(default = "default_practice_mode")]
    pub practice_mode: String,
    #[serde(default = "default_sentence_source")]
    pub sentence_source: String,
    #[serde(default = "default_sentences_file")]
    pub sentences_file: String,
    #[serde(default)]
    pub sentence_command: String,
    #[serde(default = "default_quote_api_url")]
    pub quote_api_url: String,
    #[serde(default = "default_code_languages")]
    pub code_languages: String,
}

fn default_keyboard_layout() -> String {
    "qwerty".to_string()
}
fn default_strict_mode() -> bool {
    true
}
fn default_drill_duration_secs() -> u64 {
    300
}
fn default_shuffle_after() -> usize {
    5
}
fn default_practice_mode() -> String {
    "curriculum".to_string()
}
fn default_sentence_source() -> String {
    "local".to_string()
}
fn default_sentences_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyrow")
        .join("sentences.txt")
        .to_string_lossy()
        .to_string()
}
fn default_quote_api_url() -> String {
    "https://api.quotify.top/random".to_string()
}
fn default_code_languages() -> String {
    "python,rust,c,cpp".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyboard_layout: default_keyboard_layout(),
            strict_mode: default_strict_mode(),
            drill_duration_secs: default_drill_duration_secs(),
            shuffle_after: default_shuffle_after(),
            practice_mode: default_practice_mode(),
            sentence_source: default_sentence_source(),
            sentences_file: default_sentences_file(),
            sentence_command: String::new(),
            quote_api_url: default_quote_api_url(),
            code_languages: default_code_languages(),
        }
    }
}

/// Per-profile settings layered over the global file. `None` leaves the
/// global value in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drill_duration_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_after: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practice_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_languages: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyrow")
            .join("config.toml")
    }

    /// Profile value if set, else this config's value.
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Config {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        let mut config = Config {
            keyboard_layout: pick(&overrides.keyboard_layout, &self.keyboard_layout),
            strict_mode: overrides.strict_mode.unwrap_or(self.strict_mode),
            drill_duration_secs: overrides
                .drill_duration_secs
                .unwrap_or(self.drill_duration_secs),
            shuffle_after: overrides.shuffle_after.unwrap_or(self.shuffle_after),
            practice_mode: pick(&overrides.practice_mode, &self.practice_mode),
            sentence_source: pick(&overrides.sentence_source, &self.sentence_source),
            sentences_file: pick(&overrides.sentences_file, &self.sentences_file),
            sentence_command: pick(&overrides.sentence_command, &self.sentence_command),
            quote_api_url: pick(&overrides.quote_api_url, &self.quote_api_url),
            code_languages: pick(&overrides.code_languages, &self.code_languages),
        };
        config.normalize();
        config
    }

    /// Reset unknown enumerated values to their defaults. Call after
    /// deserialization; config files and profiles may predate a rename.
    pub fn normalize(&mut self) {
        let layout = self.keyboard_layout.trim().to_ascii_lowercase();
        if LAYOUT_NAMES.contains(&layout.as_str()) {
            self.keyboard_layout = layout;
        } else {
            warn!("unknown keyboard_layout {:?}, using qwerty", self.keyboard_layout);
            self.keyboard_layout = default_keyboard_layout();
        }

        if PracticeMode::from_key(&self.practice_mode).is_none() {
            warn!("unknown practice_mode {:?}, using curriculum", self.practice_mode);
            self.practice_mode = default_practice_mode();
        }

        if SentenceSource::from_key(&self.sentence_source).is_none() {
            warn!("unknown sentence_source {:?}, using local", self.sentence_source);
            self.sentence_source = default_sentence_source();
        }

        if self.drill_duration_secs == 0 {
            self.drill_duration_secs = default_drill_duration_secs();
        }
    }

    pub fn practice_mode(&self) -> PracticeMode {
        PracticeMode::from_key(&self.practice_mode).unwrap_or_default()
    }

    pub fn sentence_source(&self) -> SentenceSource {
        SentenceSource::from_key(&self.sentence_source).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.keyboard_layout, "qwerty");
        assert!(config.strict_mode);
        assert_eq!(config.drill_duration_secs, 300);
        assert_eq!(config.shuffle_after, 5);
        assert_eq!(config.practice_mode(), PracticeMode::Curriculum);
        assert_eq!(config.sentence_source(), SentenceSource::Local);
        assert!(config.sentences_file.ends_with("sentences.txt"));
        assert_eq!(config.code_languages, "python,rust,c,cpp");
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
keyboard_layout = "dvorak"
strict_mode = false
practice_mode = "code"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.keyboard_layout, "dvorak");
        assert!(!config.strict_mode);
        assert_eq!(config.practice_mode(), PracticeMode::Code);
        assert_eq!(config.drill_duration_secs, 300);
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            keyboard_layout: "colemak".to_string(),
            shuffle_after: 2,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_normalize_resets_unknown_values() {
        let mut config = Config {
            keyboard_layout: "AZERTY".to_string(),
            practice_mode: "freestyle".to_string(),
            sentence_source: "ai".to_string(),
            drill_duration_secs: 0,
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.keyboard_layout, "qwerty");
        assert_eq!(config.practice_mode, "curriculum");
        assert_eq!(config.sentence_source, "local");
        assert_eq!(config.drill_duration_secs, 300);
    }

    #[test]
    fn test_normalize_lowercases_known_layout() {
        let mut config = Config {
            keyboard_layout: " Dvorak ".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.keyboard_layout, "dvorak");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let base = Config::default();
        let overrides = ConfigOverrides {
            strict_mode: Some(false),
            practice_mode: Some("sentences".to_string()),
            drill_duration_secs: Some(60),
            ..ConfigOverrides::default()
        };
        let resolved = base.with_overrides(&overrides);
        assert!(!resolved.strict_mode);
        assert_eq!(resolved.practice_mode(), PracticeMode::Sentences);
        assert_eq!(resolved.drill_duration_secs, 60);
        assert_eq!(resolved.keyboard_layout, base.keyboard_layout);
        assert_eq!(base.with_overrides(&ConfigOverrides::default()), base);
    }

    #[test]
    fn test_overrides_skip_unset_fields_when_serialized() {
        let overrides = ConfigOverrides {
            code_languages: Some("rust".to_string()),
            ..ConfigOverrides::default()
        };
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"code_languages":"rust"}"#);
    }
}
