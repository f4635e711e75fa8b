use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::KeySequence;
use crate::keyboard::char_map::CharMap;
use crate::keyboard::key::PhysicalKey;
use crate::keyboard::layout::{LayoutResolver, Modifiers};

/// Whether rendered keys are typed with shift held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftMode {
    #[default]
    Off,
    /// Coin flip per key. The boundary is never shifted.
    Mixed,
    Always,
}

impl ShiftMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "off" => Some(ShiftMode::Off),
            "mixed" => Some(ShiftMode::Mixed),
            "always" => Some(ShiftMode::Always),
            _ => None,
        }
    }

    fn wants_shift<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        match self {
            ShiftMode::Off => false,
            ShiftMode::Always => true,
            ShiftMode::Mixed => rng.gen_bool(0.5),
        }
    }
}

/// A practice chunk: the keys to press and the text shown for them, index
/// for index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    pub keys: KeySequence,
    pub text: Vec<char>,
}

impl Chunk {
    /// Wrap free text (sentences, code) with the keys that type it.
    pub fn from_text(text: &str, char_map: &CharMap) -> Self {
        Self {
            keys: char_map.keys_for_text(text),
            text: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn text_string(&self) -> String {
        self.text.iter().collect()
    }
}

/// Resolve one key under the chosen shift state, falling back to unshifted
/// when the shifted level is empty.
fn resolve_char<L: LayoutResolver + ?Sized>(
    key: PhysicalKey,
    shift: bool,
    resolver: &L,
) -> Option<char> {
    if shift {
        if let Some(ch) = resolver.resolve_key(key, Modifiers::SHIFT) {
            return Some(ch);
        }
    }
    resolver.resolve_key(key, Modifiers::NONE)
}

/// Turn a generated key sequence into display text. Keys the layout cannot
/// produce at all are dropped from both sides so `keys` and `text` stay
/// aligned.
pub fn render_chunk<L, R>(seq: &[PhysicalKey], mode: ShiftMode, resolver: &L, rng: &mut R) -> Chunk
where
    L: LayoutResolver + ?Sized,
    R: Rng + ?Sized,
{
    let mut chunk = Chunk {
        keys: Vec::with_capacity(seq.len()),
        text: Vec::with_capacity(seq.len()),
    };

    for &key in seq {
        let ch = if key.is_boundary() {
            Some(' ')
        } else {
            resolve_char(key, mode.wants_shift(rng), resolver)
        };

        match ch {
            Some(ch) => {
                chunk.keys.push(key);
                chunk.text.push(ch);
            }
            None => warn!("layout has no character for {key}, dropping it from the drill"),
        }
    }
    chunk
}

/// Display text only. Same length as `seq` whenever every key resolves.
pub fn render<L, R>(seq: &[PhysicalKey], mode: ShiftMode, resolver: &L, rng: &mut R) -> String
where
    L: LayoutResolver + ?Sized,
    R: Rng + ?Sized,
{
    render_chunk(seq, mode, resolver, rng).text_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Algorithm, generate};
    use crate::keyboard::key::PhysicalKey::*;
    use crate::keyboard::model::KeyboardModel;
    use crate::keyboard::rows::ROW_REGISTRY;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Resolves letters unshifted only, like a layout with an empty shift
    /// level.
    struct LowerOnly;

    impl LayoutResolver for LowerOnly {
        fn resolve(&self, scancode: u16, modifiers: Modifiers) -> Option<char> {
            if modifiers.shift {
                return None;
            }
            match PhysicalKey::from_scancode(scancode)? {
                A => Some('a'),
                J => Some('j'),
                _ => None,
            }
        }
    }

    #[test]
    fn test_off_and_always() {
        let model = KeyboardModel::qwerty();
        let mut rng = SmallRng::seed_from_u64(0);
        let seq = [A, S, Space, Semicolon];
        assert_eq!(render(&seq, ShiftMode::Off, &model, &mut rng), "as ;");
        assert_eq!(render(&seq, ShiftMode::Always, &model, &mut rng), "AS :");
    }

    #[test]
    fn test_mixed_only_picks_base_or_shifted() {
        let model = KeyboardModel::qwerty();
        let mut rng = SmallRng::seed_from_u64(3);
        let seq = vec![A; 64];
        let text = render(&seq, ShiftMode::Mixed, &model, &mut rng);
        assert!(text.chars().all(|c| c == 'a' || c == 'A'));
        assert!(text.contains('a') && text.contains('A'));
    }

    #[test]
    fn test_boundary_is_never_shifted() {
        let model = KeyboardModel::qwerty();
        let mut rng = SmallRng::seed_from_u64(0);
        let text = render(&[A, Space, J], ShiftMode::Always, &model, &mut rng);
        assert_eq!(text, "A J");
    }

    #[test]
    fn test_shift_falls_back_to_unshifted() {
        let mut rng = SmallRng::seed_from_u64(0);
        let text = render(&[A, Space, J], ShiftMode::Always, &LowerOnly, &mut rng);
        assert_eq!(text, "a j");
    }

    #[test]
    fn test_unresolvable_keys_are_dropped_from_both_sides() {
        let mut rng = SmallRng::seed_from_u64(0);
        let chunk = render_chunk(&[A, S, J], ShiftMode::Off, &LowerOnly, &mut rng);
        assert_eq!(chunk.keys, vec![A, J]);
        assert_eq!(chunk.text, vec!['a', 'j']);
    }

    #[test]
    fn test_generated_drills_render_aligned() {
        let mut rng = SmallRng::seed_from_u64(12);
        for model in [
            KeyboardModel::qwerty(),
            KeyboardModel::dvorak(),
            KeyboardModel::colemak(),
        ] {
            for row in ROW_REGISTRY {
                for &algo in Algorithm::all() {
                    let seq = generate(algo, &row.layout, 2, true, &mut rng);
                    let chunk = render_chunk(&seq, ShiftMode::Mixed, &model, &mut rng);
                    assert_eq!(chunk.keys, seq);
                    assert_eq!(chunk.text.len(), seq.len());
                }
            }
        }
    }

    #[test]
    fn test_chunk_from_text() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        let chunk = Chunk::from_text("Hi!", &map);
        assert_eq!(chunk.keys, vec![H, I, Digit1]);
        assert_eq!(chunk.text_string(), "Hi!");
    }
}
