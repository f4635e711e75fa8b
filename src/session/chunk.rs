use crate::generator::KeySequence;
use crate::generator::render::Chunk;
use crate::keyboard::char_map::CharMap;
use crate::keyboard::key::PhysicalKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    Correct,
    Incorrect,
    /// Typed past the end of the chunk.
    Ignored,
}

fn is_enter_char(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Validation state for one chunk. The cursor is the length of the typed
/// buffer; `target_keys` and `target` are aligned index for index.
#[derive(Clone, Debug, Default)]
pub struct ChunkState {
    pub target_keys: KeySequence,
    pub target: Vec<char>,
    pub typed: Vec<char>,
    pub errors: usize,
}

impl ChunkState {
    pub fn new(chunk: Chunk) -> Self {
        Self {
            target_keys: chunk.keys,
            target: chunk.text,
            typed: Vec::new(),
            errors: 0,
        }
    }

    pub fn from_text(text: &str, char_map: &CharMap) -> Self {
        Self::new(Chunk::from_text(text, char_map))
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn len(&self) -> usize {
        self.target.len().min(self.target_keys.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.cursor() >= self.len()
    }

    /// Key and character expected at the cursor.
    pub fn expected(&self) -> Option<(PhysicalKey, char)> {
        let idx = self.cursor();
        if idx >= self.len() {
            return None;
        }
        Some((self.target_keys[idx], self.target[idx]))
    }

    pub fn progress(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.cursor() as f64 / self.len() as f64
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    /// Judge `ch` against the cursor position. When the key that produced
    /// `ch` is known, both the key and the character must match, so a
    /// character reachable from two keys (or a wrong shift state) is caught.
    /// Unknown keys are judged on the character alone.
    pub fn accepts(&self, ch: char, pressed: Option<PhysicalKey>) -> Option<bool> {
        let (expected_key, expected_char) = self.expected()?;
        let char_match = ch == expected_char
            || (pressed == Some(PhysicalKey::Enter)
                && is_enter_char(ch)
                && is_enter_char(expected_char));

        Some(match pressed {
            Some(key) => key == expected_key && char_match,
            None => char_match,
        })
    }

    /// Apply a typed character. Strict mode holds the cursor on a mistake so
    /// the position has to be retyped; otherwise the wrong character is kept
    /// and the cursor moves on. Either way the mistake is counted.
    pub fn apply(&mut self, ch: char, pressed: Option<PhysicalKey>, strict: bool) -> KeystrokeOutcome {
        match self.accepts(ch, pressed) {
            None => KeystrokeOutcome::Ignored,
            Some(true) => {
                self.typed.push(ch);
                KeystrokeOutcome::Correct
            }
            Some(false) => {
                self.errors += 1;
                if !strict {
                    self.typed.push(ch);
                }
                KeystrokeOutcome::Incorrect
            }
        }
    }

    /// Drop the last typed character. Counted errors stay counted.
    pub fn backspace(&mut self) -> bool {
        self.typed.pop().is_some()
    }
}
