use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keyboard::char_map::CharMap;
use crate::keyboard::key::PhysicalKey;
use crate::session::chunk::{ChunkState, KeystrokeOutcome};

/// A key press that matters to a drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Backspace,
}

/// Map a terminal key event to a drill keystroke. Enter is `'\n'`, tab is
/// `'\t'`. Releases, repeats, control chords and non-character keys are
/// not keystrokes.
pub fn classify(key: &KeyEvent) -> Option<Keystroke> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match key.code {
        KeyCode::Backspace => Some(Keystroke::Backspace),
        KeyCode::Enter => Some(Keystroke::Char('\n')),
        KeyCode::Tab => Some(Keystroke::Char('\t')),
        KeyCode::Char(ch) if !ch.is_control() => Some(Keystroke::Char(ch)),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct KeystrokeEvent {
    pub expected: char,
    pub actual: char,
    pub pressed: Option<PhysicalKey>,
    pub timestamp: Instant,
    pub correct: bool,
}

/// Validate one typed character against the chunk, resolving the physical
/// key through the layout's reverse map. Returns `None` once the chunk is
/// complete.
pub fn process_char(
    chunk: &mut ChunkState,
    ch: char,
    char_map: &CharMap,
    strict: bool,
) -> Option<KeystrokeEvent> {
    let (_, expected) = chunk.expected()?;
    let pressed = char_map.physical_for(ch);

    let outcome = chunk.apply(ch, pressed, strict);
    if outcome == KeystrokeOutcome::Ignored {
        return None;
    }

    Some(KeystrokeEvent {
        expected,
        actual: ch,
        pressed,
        timestamp: Instant::now(),
        correct: outcome == KeystrokeOutcome::Correct,
    })
}

pub fn process_backspace(chunk: &mut ChunkState) -> bool {
    chunk.backspace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::render::Chunk;
    use crate::keyboard::key::PhysicalKey::*;
    use crate::keyboard::model::KeyboardModel;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_classify_printables_and_specials() {
        assert_eq!(classify(&press(KeyCode::Char('a'))), Some(Keystroke::Char('a')));
        assert_eq!(classify(&press(KeyCode::Char(' '))), Some(Keystroke::Char(' ')));
        assert_eq!(classify(&press(KeyCode::Enter)), Some(Keystroke::Char('\n')));
        assert_eq!(classify(&press(KeyCode::Tab)), Some(Keystroke::Char('\t')));
        assert_eq!(classify(&press(KeyCode::Backspace)), Some(Keystroke::Backspace));
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(classify(&shifted), Some(Keystroke::Char('A')));
    }

    #[test]
    fn test_classify_ignores_everything_else() {
        assert_eq!(classify(&press(KeyCode::Left)), None);
        assert_eq!(classify(&press(KeyCode::F(5))), None);
        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&ctrl), None);
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify(&release), None);
    }

    #[test]
    fn test_process_char_uses_reverse_map() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        let mut chunk = ChunkState::new(Chunk {
            keys: vec![A, Space, Semicolon],
            text: vec!['A', ' ', ':'],
        });

        let event = process_char(&mut chunk, 'A', &map, true).unwrap();
        assert!(event.correct);
        assert_eq!(event.pressed, Some(A));

        let event = process_char(&mut chunk, ' ', &map, true).unwrap();
        assert!(event.correct);

        let event = process_char(&mut chunk, ';', &map, true).unwrap();
        assert!(!event.correct);
        assert_eq!(event.expected, ':');
        assert_eq!(chunk.errors, 1);

        assert!(process_char(&mut chunk, ':', &map, true).unwrap().correct);
        assert!(process_char(&mut chunk, 'x', &map, true).is_none());
    }

    #[test]
    fn test_same_char_from_wrong_key_rejected_on_dvorak() {
        // On dvorak 'o' lives on the S key.
        let map = CharMap::build(&KeyboardModel::dvorak());
        let mut chunk = ChunkState::new(Chunk {
            keys: vec![O],
            text: vec!['o'],
        });
        let event = process_char(&mut chunk, 'o', &map, true).unwrap();
        assert!(!event.correct);
        assert_eq!(event.pressed, Some(S));
    }

    #[test]
    fn test_backspace_after_accept() {
        let map = CharMap::build(&KeyboardModel::qwerty());
        let mut chunk = ChunkState::from_text("aj", &map);
        process_char(&mut chunk, 'x', &map, true);
        process_char(&mut chunk, 'a', &map, true);
        assert_eq!(chunk.cursor(), 1);
        assert!(process_backspace(&mut chunk));
        assert_eq!(chunk.cursor(), 0);
        assert!(chunk.typed.is_empty());
    }
}
