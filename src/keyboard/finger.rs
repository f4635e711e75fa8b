use std::fmt;

use crate::keyboard::key::PhysicalKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }

    /// Compact guide label: L1..L4 run pinky to index on the left hand,
    /// R1..R4 run index to pinky on the right.
    pub fn label(self) -> &'static str {
        use Finger::*;
        use Hand::*;

        match (self.hand, self.finger) {
            (Left, Pinky) => "L1",
            (Left, Ring) => "L2",
            (Left, Middle) => "L3",
            (Left, Index) => "L4",
            (Right, Index) => "R1",
            (Right, Middle) => "R2",
            (Right, Ring) => "R3",
            (Right, Pinky) => "R4",
            (_, Thumb) => "THUMB",
        }
    }
}

impl fmt::Display for FingerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Touch-typing finger for a physical key position.
pub fn finger_for_key(key: PhysicalKey) -> FingerAssignment {
    use Finger::*;
    use Hand::*;
    use PhysicalKey as K;

    match key {
        K::Escape | K::Grave | K::Digit1 | K::Tab | K::Q | K::A | K::ShiftLeft | K::Z => {
            FingerAssignment::new(Left, Pinky)
        }
        K::Digit2 | K::W | K::S | K::X => FingerAssignment::new(Left, Ring),
        K::Digit3 | K::E | K::D | K::C => FingerAssignment::new(Left, Middle),
        K::Digit4 | K::Digit5 | K::R | K::T | K::F | K::G | K::V | K::B => {
            FingerAssignment::new(Left, Index)
        }
        K::Digit6 | K::Digit7 | K::Y | K::U | K::H | K::J | K::N | K::M => {
            FingerAssignment::new(Right, Index)
        }
        K::Digit8 | K::I | K::K | K::Comma => FingerAssignment::new(Right, Middle),
        K::Digit9 | K::O | K::L | K::Dot => FingerAssignment::new(Right, Ring),
        K::Digit0
        | K::Minus
        | K::Equal
        | K::Backspace
        | K::P
        | K::LeftBracket
        | K::RightBracket
        | K::Backslash
        | K::Semicolon
        | K::Quote
        | K::Enter
        | K::Slash
        | K::ShiftRight => FingerAssignment::new(Right, Pinky),
        K::Space => FingerAssignment::new(Right, Thumb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_fingers() {
        assert_eq!(finger_for_key(PhysicalKey::A).label(), "L1");
        assert_eq!(finger_for_key(PhysicalKey::F).label(), "L4");
        assert_eq!(finger_for_key(PhysicalKey::J).label(), "R1");
        assert_eq!(finger_for_key(PhysicalKey::Semicolon).label(), "R4");
    }

    #[test]
    fn test_space_is_thumb() {
        let f = finger_for_key(PhysicalKey::Space);
        assert_eq!(f.finger, Finger::Thumb);
        assert_eq!(f.to_string(), "THUMB");
    }

    #[test]
    fn test_index_fingers_cover_center_columns() {
        for key in [PhysicalKey::T, PhysicalKey::G, PhysicalKey::B] {
            assert_eq!(finger_for_key(key), FingerAssignment::new(Hand::Left, Finger::Index));
        }
        for key in [PhysicalKey::Y, PhysicalKey::H, PhysicalKey::N] {
            assert_eq!(finger_for_key(key), FingerAssignment::new(Hand::Right, Finger::Index));
        }
    }
}
