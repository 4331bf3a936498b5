//! Word matching against fixed (position, letter) constraints.
//!
//! The matcher is a pure lookup: it never touches the store and never
//! mutates usage counters. Finding nothing is an expected, frequent
//! outcome and is reported as `None`, not as an error.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::text::normalize;
use crate::types::WordId;

/// Picks one uniformly-random word whose normalized characters match the
/// required letters at the given offsets.
///
/// With `letter2 = Some(l2)` both positions must match; with `None` (the
/// trailing unmatched letter of an odd split) only `pos1` is constrained.
/// Words without a character at a constrained position are simply not
/// eligible. Pools are ordered maps, so a seeded [`Rng`] reproduces the
/// same pick for the same pool.
pub fn pick_word<R: Rng>(
    pool: &BTreeMap<WordId, String>,
    pos1: usize,
    pos2: usize,
    letter1: char,
    letter2: Option<char>,
    rng: &mut R,
) -> Option<(WordId, String)> {
    let eligible: Vec<(WordId, &String)> = pool
        .iter()
        .filter(|(_, word)| {
            let normalized = normalize(word);
            let matches_at = |pos: usize, letter: char| normalized.chars().nth(pos) == Some(letter);
            match letter2 {
                Some(l2) => matches_at(pos1, letter1) && matches_at(pos2, l2),
                None => matches_at(pos1, letter1),
            }
        })
        .map(|(&id, word)| (id, word))
        .collect();

    eligible
        .choose(rng)
        .map(|&(id, word)| (id, word.clone()))
}
