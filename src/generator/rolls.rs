use rand::Rng;

use crate::generator::{KeySequence, build_pool, join_units};
use crate::keyboard::key::PhysicalKey;
use crate::keyboard::rows::RowLayout;

/// Whole-hand runs: left inward, left outward, right inward, right outward.
/// The pool of four runs is repeated and optionally shuffled; each run keeps
/// its own key order.
pub fn rolls<R: Rng + ?Sized>(
    row: &RowLayout,
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let reversed = |hand: &[PhysicalKey]| hand.iter().rev().copied().collect::<Vec<_>>();
    let patterns = [
        row.left.to_vec(),
        reversed(row.left),
        row.right.to_vec(),
        reversed(row.right),
    ];

    let pool = build_pool(&patterns, repetitions, shuffle, rng);
    join_units(&pool)
}
