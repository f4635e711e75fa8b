use rand::Rng;
use rand::seq::SliceRandom;

use crate::generator::{KeySequence, join_units};
use crate::keyboard::key::PhysicalKey;
use crate::keyboard::rows::RowLayout;

const MIN_WORD_LEN: usize = 3;
const MAX_WORD_LEN: usize = 5;

/// `count` made-up words drawn from both hands of the row. Each word is
/// 3 to 5 keys, every key an independent pick with replacement.
/// No boundary follows the last word.
pub fn pseudo_words<R: Rng + ?Sized>(row: &RowLayout, count: usize, rng: &mut R) -> KeySequence {
    let candidates = row.all_keys();
    if candidates.is_empty() {
        return KeySequence::new();
    }

    let mut words: Vec<Vec<PhysicalKey>> = Vec::with_capacity(count);
    for _ in 0..count {
        let len = rng.gen_range(MIN_WORD_LEN..=MAX_WORD_LEN);
        let word = (0..len)
            .filter_map(|_| candidates.choose(&mut *rng).copied())
            .collect();
        words.push(word);
    }
    join_units(&words)
}
