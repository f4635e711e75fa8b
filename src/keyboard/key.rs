use std::fmt;

/// A physical key position, independent of the character the active layout
/// assigns to it. Discriminants are Linux evdev scancodes, which is what the
/// layout resolvers are keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum PhysicalKey {
    Escape = 1,
    Digit1 = 2,
    Digit2 = 3,
    Digit3 = 4,
    Digit4 = 5,
    Digit5 = 6,
    Digit6 = 7,
    Digit7 = 8,
    Digit8 = 9,
    Digit9 = 10,
    Digit0 = 11,
    Minus = 12,
    Equal = 13,
    Backspace = 14,
    Tab = 15,
    Q = 16,
    W = 17,
    E = 18,
    R = 19,
    T = 20,
    Y = 21,
    U = 22,
    I = 23,
    O = 24,
    P = 25,
    LeftBracket = 26,
    RightBracket = 27,
    Enter = 28,
    A = 30,
    S = 31,
    D = 32,
    F = 33,
    G = 34,
    H = 35,
    J = 36,
    K = 37,
    L = 38,
    Semicolon = 39,
    Quote = 40,
    Grave = 41,
    ShiftLeft = 42,
    Backslash = 43,
    Z = 44,
    X = 45,
    C = 46,
    V = 47,
    B = 48,
    N = 49,
    M = 50,
    Comma = 51,
    Dot = 52,
    Slash = 53,
    ShiftRight = 54,
    Space = 57,
}

use PhysicalKey::*;

impl PhysicalKey {
    /// Every key, in scancode order.
    pub const ALL: &'static [PhysicalKey] = &[
        Escape,
        Digit1,
        Digit2,
        Digit3,
        Digit4,
        Digit5,
        Digit6,
        Digit7,
        Digit8,
        Digit9,
        Digit0,
        Minus,
        Equal,
        Backspace,
        Tab,
        Q,
        W,
        E,
        R,
        T,
        Y,
        U,
        I,
        O,
        P,
        LeftBracket,
        RightBracket,
        Enter,
        A,
        S,
        D,
        F,
        G,
        H,
        J,
        K,
        L,
        Semicolon,
        Quote,
        Grave,
        ShiftLeft,
        Backslash,
        Z,
        X,
        C,
        V,
        B,
        N,
        M,
        Comma,
        Dot,
        Slash,
        ShiftRight,
        Space,
    ];

    /// The space bar doubles as the word boundary in generated sequences.
    pub const BOUNDARY: PhysicalKey = Space;

    pub fn scancode(self) -> u16 {
        self as u16
    }

    pub fn from_scancode(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.scancode() == code)
    }

    pub fn is_boundary(self) -> bool {
        self == Self::BOUNDARY
    }

    pub fn name(self) -> &'static str {
        match self {
            Escape => "ESCAPE",
            Digit1 => "1",
            Digit2 => "2",
            Digit3 => "3",
            Digit4 => "4",
            Digit5 => "5",
            Digit6 => "6",
            Digit7 => "7",
            Digit8 => "8",
            Digit9 => "9",
            Digit0 => "0",
            Minus => "MINUS",
            Equal => "EQUAL",
            Backspace => "BACKSPACE",
            Tab => "TAB",
            Q => "Q",
            W => "W",
            E => "E",
            R => "R",
            T => "T",
            Y => "Y",
            U => "U",
            I => "I",
            O => "O",
            P => "P",
            LeftBracket => "LEFT_BRACKET",
            RightBracket => "RIGHT_BRACKET",
            Enter => "ENTER",
            A => "A",
            S => "S",
            D => "D",
            F => "F",
            G => "G",
            H => "H",
            J => "J",
            K => "K",
            L => "L",
            Semicolon => "SEMICOLON",
            Quote => "QUOTE",
            Grave => "GRAVE",
            ShiftLeft => "SHIFT_LEFT",
            Backslash => "BACKSLASH",
            Z => "Z",
            X => "X",
            C => "C",
            V => "V",
            B => "B",
            N => "N",
            M => "M",
            Comma => "COMMA",
            Dot => "DOT",
            Slash => "SLASH",
            ShiftRight => "SHIFT_RIGHT",
            Space => "SPACE",
        }
    }
}

impl fmt::Display for PhysicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Visual rows of the board, left to right: number, top, home, bottom, space.
pub const KEYBOARD_ROWS: &[&[PhysicalKey]] = &[
    &[
        Escape, Grave, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        Digit0, Minus, Equal, Backspace,
    ],
    &[
        Tab, Q, W, E, R, T, Y, U, I, O, P, LeftBracket, RightBracket, Backslash,
    ],
    &[A, S, D, F, G, H, J, K, L, Semicolon, Quote, Enter],
    &[ShiftLeft, Z, X, C, V, B, N, M, Comma, Dot, Slash, ShiftRight],
    &[Space],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scancodes_match_evdev() {
        assert_eq!(PhysicalKey::A.scancode(), 30);
        assert_eq!(PhysicalKey::Space.scancode(), 57);
        assert_eq!(PhysicalKey::Grave.scancode(), 41);
        assert_eq!(PhysicalKey::Enter.scancode(), 28);
    }

    #[test]
    fn test_from_scancode_round_trips_every_key() {
        for &key in PhysicalKey::ALL {
            assert_eq!(PhysicalKey::from_scancode(key.scancode()), Some(key));
        }
        assert_eq!(PhysicalKey::from_scancode(29), None);
    }

    #[test]
    fn test_all_is_sorted_and_unique() {
        assert!(PhysicalKey::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_keyboard_rows_cover_every_key_once() {
        let mut seen: Vec<PhysicalKey> = KEYBOARD_ROWS
            .iter()
            .flat_map(|r| r.iter().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, PhysicalKey::ALL);
    }
}
