use crate::error::{KeyrowError, Result};
use crate::keyboard::key::PhysicalKey::{self, *};

/// One practice row split between the hands. Each side is ordered by
/// physical finger position, left to right; the drill generators rely on
/// that order for adjacency, mirroring and rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLayout {
    pub left: &'static [PhysicalKey],
    pub right: &'static [PhysicalKey],
}

impl RowLayout {
    pub const fn new(left: &'static [PhysicalKey], right: &'static [PhysicalKey]) -> Self {
        Self { left, right }
    }

    /// Both hands flattened, left hand first.
    pub fn all_keys(&self) -> Vec<PhysicalKey> {
        self.left.iter().chain(self.right.iter()).copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

pub struct NamedRow {
    pub name: &'static str,
    pub layout: RowLayout,
}

pub const ROW_REGISTRY: &[NamedRow] = &[
    NamedRow {
        name: "home",
        layout: RowLayout::new(&[A, S, D, F], &[J, K, L, Semicolon]),
    },
    NamedRow {
        name: "top",
        layout: RowLayout::new(&[Q, W, E, R], &[U, I, O, P]),
    },
    NamedRow {
        name: "bottom",
        layout: RowLayout::new(&[Z, X, C, V], &[N, M, Comma, Dot]),
    },
    NamedRow {
        name: "numbers",
        layout: RowLayout::new(
            &[Digit1, Digit2, Digit3, Digit4, Digit5],
            &[Digit6, Digit7, Digit8, Digit9, Digit0, Minus, Equal],
        ),
    },
    NamedRow {
        name: "symbols_basic",
        layout: RowLayout::new(&[Grave], &[LeftBracket, RightBracket, Semicolon, Quote]),
    },
    NamedRow {
        name: "focus_e_i",
        layout: RowLayout::new(&[E], &[I]),
    },
    NamedRow {
        name: "focus_r_u",
        layout: RowLayout::new(&[R], &[U]),
    },
    NamedRow {
        name: "focus_t_o",
        layout: RowLayout::new(&[T], &[O]),
    },
    NamedRow {
        name: "focus_c_comma",
        layout: RowLayout::new(&[C], &[Comma]),
    },
    NamedRow {
        name: "focus_g_h",
        layout: RowLayout::new(&[G], &[H]),
    },
    NamedRow {
        name: "focus_v_n_slash",
        layout: RowLayout::new(&[V], &[N, Slash]),
    },
    NamedRow {
        name: "focus_w_m",
        layout: RowLayout::new(&[W], &[M]),
    },
    NamedRow {
        name: "focus_q_p",
        layout: RowLayout::new(&[Q], &[P]),
    },
    NamedRow {
        name: "focus_b_y",
        layout: RowLayout::new(&[B], &[Y]),
    },
    NamedRow {
        name: "focus_z_x",
        layout: RowLayout::new(&[Z], &[X]),
    },
    NamedRow {
        name: "focus_shift_period",
        layout: RowLayout::new(
            &[A, S, D, F, E, R, T],
            &[J, K, L, Semicolon, I, U, O, Dot],
        ),
    },
];

/// Look up a practice row by name. Unknown names are a curriculum bug and
/// fail rather than fall back to some default row.
pub fn row_layout(name: &str) -> Result<&'static RowLayout> {
    ROW_REGISTRY
        .iter()
        .find(|r| r.name == name)
        .map(|r| &r.layout)
        .ok_or_else(|| KeyrowError::UnknownRow(name.to_string()))
}

pub fn row_names() -> impl Iterator<Item = &'static str> {
    ROW_REGISTRY.iter().map(|r| r.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_lookup() {
        let row = row_layout("home").unwrap();
        assert_eq!(row.left, &[A, S, D, F]);
        assert_eq!(row.right, &[J, K, L, Semicolon]);
        assert_eq!(row.all_keys().len(), 8);
    }

    #[test]
    fn test_unknown_row_fails() {
        let err = row_layout("middle_earth").unwrap_err();
        assert!(matches!(err, KeyrowError::UnknownRow(ref n) if n == "middle_earth"));
    }

    #[test]
    fn test_row_names_unique() {
        let mut names: Vec<&str> = row_names().collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_no_row_contains_the_boundary_key() {
        for row in ROW_REGISTRY {
            assert!(!row.layout.all_keys().contains(&PhysicalKey::Space), "{}", row.name);
        }
    }
}
