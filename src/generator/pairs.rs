use rand::Rng;

use crate::generator::{KeySequence, build_pool, join_units};
use crate::keyboard::key::PhysicalKey;
use crate::keyboard::rows::RowLayout;

type Pair = [PhysicalKey; 2];

fn pairs_to_sequence<R: Rng + ?Sized>(
    pairs: &[Pair],
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let pool = build_pool(pairs, repetitions, shuffle, rng);
    join_units(&pool)
}

/// Neighbouring keys within each hand: `n - 1` pairs for a hand of `n` keys,
/// left hand first.
pub fn same_hand_adjacent<R: Rng + ?Sized>(
    row: &RowLayout,
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let pairs: Vec<Pair> = [row.left, row.right]
        .iter()
        .flat_map(|hand| hand.windows(2).map(|w| [w[0], w[1]]))
        .collect();
    pairs_to_sequence(&pairs, repetitions, shuffle, rng)
}

/// `left[i]` with `right[i]`, up to the shorter hand.
pub fn alternating_pairs<R: Rng + ?Sized>(
    row: &RowLayout,
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let pairs: Vec<Pair> = row
        .left
        .iter()
        .zip(row.right.iter())
        .map(|(&l, &r)| [l, r])
        .collect();
    pairs_to_sequence(&pairs, repetitions, shuffle, rng)
}

/// `left[i]` with `right[len - 1 - i]`: outermost left against outermost
/// right, working inward, up to the shorter hand.
pub fn mirror_pairs<R: Rng + ?Sized>(
    row: &RowLayout,
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let pairs: Vec<Pair> = row
        .left
        .iter()
        .zip(row.right.iter().rev())
        .map(|(&l, &r)| [l, r])
        .collect();
    pairs_to_sequence(&pairs, repetitions, shuffle, rng)
}
