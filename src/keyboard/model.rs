use std::collections::HashMap;

use log::warn;

use crate::keyboard::key::PhysicalKey::{self, *};
use crate::keyboard::layout::{LayoutResolver, Modifiers};

/// Character keys of each visual row, in the same order as the strings in a
/// layout table.
const CHAR_ROWS: [&[PhysicalKey]; 4] = [
    &[
        Grave, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9, Digit0,
        Minus, Equal,
    ],
    &[
        Q, W, E, R, T, Y, U, I, O, P, LeftBracket, RightBracket, Backslash,
    ],
    &[A, S, D, F, G, H, J, K, L, Semicolon, Quote],
    &[Z, X, C, V, B, N, M, Comma, Dot, Slash],
];

/// (base, shifted) strings per row, aligned with `CHAR_ROWS`.
type LayoutTable = [(&'static str, &'static str); 4];

const QWERTY: LayoutTable = [
    ("`1234567890-=", "~!@#$%^&*()_+"),
    ("qwertyuiop[]\\", "QWERTYUIOP{}|"),
    ("asdfghjkl;'", "ASDFGHJKL:\""),
    ("zxcvbnm,./", "ZXCVBNM<>?"),
];

const DVORAK: LayoutTable = [
    ("`1234567890[]", "~!@#$%^&*(){}"),
    ("',.pyfgcrl/=\\", "\"<>PYFGCRL?+|"),
    ("aoeuidhtns-", "AOEUIDHTNS_"),
    (";qjkxbmwvz", ":QJKXBMWVZ"),
];

const COLEMAK: LayoutTable = [
    ("`1234567890-=", "~!@#$%^&*()_+"),
    ("qwfpgjluy;[]\\", "QWFPGJLUY:{}|"),
    ("arstdhneio'", "ARSTDHNEIO\""),
    ("zxcvbkm,./", "ZXCVBKM<>?"),
];

/// Layout names accepted by [`KeyboardModel::from_name`].
pub const LAYOUT_NAMES: &[&str] = &["qwerty", "dvorak", "colemak"];

#[derive(Clone, Copy, Debug)]
struct KeyChars {
    base: char,
    shifted: Option<char>,
}

/// A static keyboard layout: what each physical key types with and without
/// shift. Serves as the built-in [`LayoutResolver`].
#[derive(Clone, Debug)]
pub struct KeyboardModel {
    pub name: String,
    keys: HashMap<PhysicalKey, KeyChars>,
}

impl KeyboardModel {
    fn from_table(name: &str, table: &LayoutTable) -> Self {
        let mut keys = HashMap::new();
        for (row, (base, shifted)) in CHAR_ROWS.iter().zip(table.iter()) {
            for ((&key, b), s) in row.iter().zip(base.chars()).zip(shifted.chars()) {
                keys.insert(
                    key,
                    KeyChars {
                        base: b,
                        shifted: Some(s),
                    },
                );
            }
        }

        // Control keys produce the same characters on every layout.
        for (key, ch) in [
            (Space, ' '),
            (Tab, '\t'),
            (Enter, '\r'),
            (Backspace, '\x08'),
            (Escape, '\x1b'),
        ] {
            let shifted = if key == Space { Some(' ') } else { None };
            keys.insert(key, KeyChars { base: ch, shifted });
        }

        Self {
            name: name.to_string(),
            keys,
        }
    }

    pub fn qwerty() -> Self {
        Self::from_table("qwerty", &QWERTY)
    }

    pub fn dvorak() -> Self {
        Self::from_table("dvorak", &DVORAK)
    }

    pub fn colemak() -> Self {
        Self::from_table("colemak", &COLEMAK)
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "qwerty" => Self::qwerty(),
            "dvorak" => Self::dvorak(),
            "colemak" => Self::colemak(),
            other => {
                warn!("unknown keyboard layout {other:?}, using qwerty");
                Self::qwerty()
            }
        }
    }
}

impl Default for KeyboardModel {
    fn default() -> Self {
        Self::qwerty()
    }
}

impl LayoutResolver for KeyboardModel {
    fn resolve(&self, scancode: u16, modifiers: Modifiers) -> Option<char> {
        if modifiers.altgr {
            return None;
        }
        let key = PhysicalKey::from_scancode(scancode)?;
        let chars = self.keys.get(&key)?;
        if modifiers.shift {
            chars.shifted
        } else {
            Some(chars.base)
        }
    }
}
