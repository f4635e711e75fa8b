use rand::Rng;
use rand::seq::SliceRandom;

use crate::generator::{KeySequence, join_units};
use crate::keyboard::key::PhysicalKey;

/// Each key typed `repetitions` times in a row, one group per key, so the
/// finger learns its key without any transitions.
pub fn single_key_repeat<R: Rng + ?Sized>(
    keys: &[PhysicalKey],
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    let mut order = keys.to_vec();
    if shuffle {
        order.shuffle(rng);
    }

    let groups: Vec<Vec<PhysicalKey>> = order
        .into_iter()
        .map(|key| vec![key; repetitions])
        .collect();
    join_units(&groups)
}
