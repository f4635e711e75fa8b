pub mod code_snippets;
pub mod isolation;
pub mod normalize;
pub mod pairs;
pub mod pseudo_words;
pub mod render;
pub mod rolls;
pub mod sentence;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::keyboard::key::PhysicalKey;
use crate::keyboard::rows::RowLayout;

/// Practice text shipped inside the binary: `sentences.txt` and
/// `snippets/<language>.txt`.
#[derive(Embed)]
#[folder = "assets/"]
struct PracticeAssets;

pub(crate) fn bundled_text(path: &str) -> Option<String> {
    let file = PracticeAssets::get(path)?;
    std::str::from_utf8(file.data.as_ref())
        .ok()
        .map(str::to_string)
}

/// Ordered physical keys for one practice chunk. Word boundaries are single
/// `PhysicalKey::Space` entries: never leading, trailing or doubled.
pub type KeySequence = Vec<PhysicalKey>;

/// The six row drills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Each key repeated on its own.
    Isolation,
    /// Neighbouring fingers on the same hand.
    Adjacency,
    /// Same finger position, opposite hands.
    Alternating,
    /// Mirrored fingers, outside in.
    Mirror,
    /// Whole-hand runs inward and outward.
    Rolls,
    /// Random pseudo-words from the row's keys.
    Synthesis,
}

impl Algorithm {
    pub fn to_key(self) -> &'static str {
        match self {
            Algorithm::Isolation => "isolation",
            Algorithm::Adjacency => "adjacency",
            Algorithm::Alternating => "alternating",
            Algorithm::Mirror => "mirror",
            Algorithm::Rolls => "rolls",
            Algorithm::Synthesis => "synthesis",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "isolation" => Some(Algorithm::Isolation),
            "adjacency" => Some(Algorithm::Adjacency),
            "alternating" => Some(Algorithm::Alternating),
            "mirror" => Some(Algorithm::Mirror),
            "rolls" => Some(Algorithm::Rolls),
            "synthesis" => Some(Algorithm::Synthesis),
            _ => None,
        }
    }

    pub fn all() -> &'static [Algorithm] {
        &[
            Algorithm::Isolation,
            Algorithm::Adjacency,
            Algorithm::Alternating,
            Algorithm::Mirror,
            Algorithm::Rolls,
            Algorithm::Synthesis,
        ]
    }

    /// Repetitions per chunk; for synthesis this is the word count.
    pub fn default_repetitions(self) -> usize {
        match self {
            Algorithm::Isolation => 4,
            Algorithm::Adjacency => 3,
            Algorithm::Alternating => 4,
            Algorithm::Mirror => 4,
            Algorithm::Rolls => 2,
            Algorithm::Synthesis => 10,
        }
    }
}

/// Run one drill over a row. `repetitions` is the word count for synthesis,
/// which also ignores `shuffle`.
pub fn generate<R: Rng + ?Sized>(
    algorithm: Algorithm,
    row: &RowLayout,
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> KeySequence {
    match algorithm {
        Algorithm::Isolation => {
            isolation::single_key_repeat(&row.all_keys(), repetitions, shuffle, rng)
        }
        Algorithm::Adjacency => pairs::same_hand_adjacent(row, repetitions, shuffle, rng),
        Algorithm::Alternating => pairs::alternating_pairs(row, repetitions, shuffle, rng),
        Algorithm::Mirror => pairs::mirror_pairs(row, repetitions, shuffle, rng),
        Algorithm::Rolls => rolls::rolls(row, repetitions, shuffle, rng),
        Algorithm::Synthesis => pseudo_words::pseudo_words(row, repetitions, rng),
    }
}

/// Repeat the unit pool `repetitions` times, then optionally shuffle the
/// pool as a whole. Units themselves are never reordered internally.
pub(crate) fn build_pool<T: Clone, R: Rng + ?Sized>(
    units: &[T],
    repetitions: usize,
    shuffle: bool,
    rng: &mut R,
) -> Vec<T> {
    let mut pool: Vec<T> = Vec::with_capacity(units.len() * repetitions);
    for _ in 0..repetitions {
        pool.extend_from_slice(units);
    }
    if shuffle {
        pool.shuffle(rng);
    }
    pool
}

/// Flatten units into one sequence with exactly one boundary between
/// consecutive units. Empty units are skipped.
pub(crate) fn join_units<U: AsRef<[PhysicalKey]>>(units: &[U]) -> KeySequence {
    let mut seq = KeySequence::new();
    for unit in units.iter().map(AsRef::as_ref).filter(|u| !u.is_empty()) {
        if !seq.is_empty() {
            seq.push(PhysicalKey::BOUNDARY);
        }
        seq.extend_from_slice(unit);
    }
    seq
}

/// Splits a sequence at boundaries, for checking the shapes of drills.
pub fn units_of(seq: &[PhysicalKey]) -> Vec<&[PhysicalKey]> {
    if seq.is_empty() {
        return Vec::new();
    }
    seq.split(|k| k.is_boundary()).collect()
}
