use std::collections::HashMap;

use log::debug;

use crate::keyboard::key::PhysicalKey;
use crate::keyboard::layout::{LayoutResolver, Modifiers};

/// Reverse lookup from a typed character to the physical key that produces
/// it on the active layout. Built once per layout and read-only afterwards;
/// rebuild it (do not mutate it) when the layout changes.
#[derive(Clone, Debug, Default)]
pub struct CharMap {
    map: HashMap<char, PhysicalKey>,
}

impl CharMap {
    /// Resolve every key unshifted then shifted. Later entries win, so a
    /// character reachable from two keys maps to the last one enumerated.
    pub fn build<R: LayoutResolver + ?Sized>(resolver: &R) -> Self {
        let mut map = HashMap::new();
        for &key in PhysicalKey::ALL {
            for modifiers in [Modifiers::NONE, Modifiers::SHIFT] {
                if let Some(ch) = resolver.resolve_key(key, modifiers) {
                    map.insert(ch, key);
                }
            }
        }
        debug!("built char map with {} entries", map.len());
        Self { map }
    }

    /// Physical key for a typed character. Space, enter and tab always map
    /// to their dedicated keys whatever the resolver says.
    pub fn physical_for(&self, ch: char) -> Option<PhysicalKey> {
        match ch {
            ' ' => Some(PhysicalKey::Space),
            '\n' | '\r' => Some(PhysicalKey::Enter),
            '\t' => Some(PhysicalKey::Tab),
            _ => self.map.get(&ch).copied(),
        }
    }

    /// Key sequence for free text (sentences, code). Characters the layout
    /// cannot produce map to the space key so the result stays aligned with
    /// the text one-to-one.
    pub fn keys_for_text(&self, text: &str) -> Vec<PhysicalKey> {
        text.chars()
            .map(|ch| self.physical_for(ch).unwrap_or(PhysicalKey::Space))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::model::KeyboardModel;

    #[test]
    fn test_qwerty_lookup_both_cases() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        assert_eq!(map.physical_for('a'), Some(PhysicalKey::A));
        assert_eq!(map.physical_for('A'), Some(PhysicalKey::A));
        assert_eq!(map.physical_for(':'), Some(PhysicalKey::Semicolon));
        assert_eq!(map.physical_for('?'), Some(PhysicalKey::Slash));
    }

    #[test]
    fn test_dvorak_lookup_follows_layout() {
        let map = CharMap::build(&KeyboardModel::dvorak());
        assert_eq!(map.physical_for('o'), Some(PhysicalKey::S));
        assert_eq!(map.physical_for('s'), Some(PhysicalKey::Semicolon));
    }

    #[test]
    fn test_specials_are_hard_wired() {
        let map = CharMap::default();
        assert!(map.is_empty());
        assert_eq!(map.physical_for(' '), Some(PhysicalKey::Space));
        assert_eq!(map.physical_for('\n'), Some(PhysicalKey::Enter));
        assert_eq!(map.physical_for('\r'), Some(PhysicalKey::Enter));
        assert_eq!(map.physical_for('\t'), Some(PhysicalKey::Tab));
        assert_eq!(map.physical_for('a'), None);
    }

    #[test]
    fn test_unknown_char_is_absent() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        assert_eq!(map.physical_for('é'), None);
    }

    #[test]
    fn test_keys_for_text_stays_aligned() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        let keys = map.keys_for_text("Hi é!\n");
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], PhysicalKey::H);
        assert_eq!(keys[2], PhysicalKey::Space);
        assert_eq!(keys[3], PhysicalKey::Space);
        assert_eq!(keys[4], PhysicalKey::Digit1);
        assert_eq!(keys[5], PhysicalKey::Enter);
    }
}
