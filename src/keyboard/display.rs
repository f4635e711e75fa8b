use std::collections::HashMap;

use crate::keyboard::key::PhysicalKey;
use crate::keyboard::layout::{LayoutResolver, Modifiers};

/// Fixed labels for keys whose resolved character is unprintable or blank.
pub fn control_label(key: PhysicalKey) -> Option<&'static str> {
    match key {
        PhysicalKey::Escape => Some("ESC"),
        PhysicalKey::Tab => Some("TAB"),
        PhysicalKey::Backspace => Some("BACK"),
        PhysicalKey::Enter => Some("ENTER"),
        PhysicalKey::ShiftLeft | PhysicalKey::ShiftRight => Some("SHIFT"),
        PhysicalKey::Space => Some("SPACE"),
        _ => None,
    }
}

/// Human-readable name for an expected character in status lines.
/// Returns `""` for printable chars; callers use `ch.to_string()` for those.
pub fn char_display_name(ch: char) -> &'static str {
    match ch {
        ' ' => "Space",
        '\n' | '\r' => "Enter",
        '\t' => "Tab",
        _ => "",
    }
}

/// Keycap labels for the active layout, resolved once.
#[derive(Clone, Debug, Default)]
pub struct KeyLabels {
    labels: HashMap<PhysicalKey, String>,
}

impl KeyLabels {
    pub fn build<R: LayoutResolver + ?Sized>(resolver: &R) -> Self {
        let labels = PhysicalKey::ALL
            .iter()
            .map(|&key| (key, Self::label_for(key, resolver)))
            .collect();
        Self { labels }
    }

    fn label_for<R: LayoutResolver + ?Sized>(key: PhysicalKey, resolver: &R) -> String {
        if let Some(label) = control_label(key) {
            return label.to_string();
        }
        match resolver.resolve_key(key, Modifiers::NONE) {
            Some(ch) if ch.is_control() => key.name().to_string(),
            Some(ch) => ch.to_uppercase().collect(),
            None => String::new(),
        }
    }

    pub fn get(&self, key: PhysicalKey) -> &str {
        self.labels.get(&key).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::model::KeyboardModel;

    #[test]
    fn test_control_labels_override_resolver() {
        let labels = KeyLabels::build(&KeyboardModel::qwerty());
        assert_eq!(labels.get(PhysicalKey::Space), "SPACE");
        assert_eq!(labels.get(PhysicalKey::ShiftRight), "SHIFT");
        assert_eq!(labels.get(PhysicalKey::Escape), "ESC");
    }

    #[test]
    fn test_letters_are_upper_cased_per_layout() {
        let qwerty = KeyLabels::build(&KeyboardModel::qwerty());
        let dvorak = KeyLabels::build(&KeyboardModel::dvorak());
        assert_eq!(qwerty.get(PhysicalKey::S), "S");
        assert_eq!(dvorak.get(PhysicalKey::S), "O");
        assert_eq!(qwerty.get(PhysicalKey::Semicolon), ";");
    }

    #[test]
    fn test_char_display_name() {
        assert_eq!(char_display_name(' '), "Space");
        assert_eq!(char_display_name('\n'), "Enter");
        assert_eq!(char_display_name('\t'), "Tab");
        assert_eq!(char_display_name('a'), "");
    }
}
