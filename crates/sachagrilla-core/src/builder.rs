//! Grid construction: one build attempt for one column pair.
//!
//! The builder is a greedy single pass over the quote's letter pairs with
//! no backtracking: the first row that finds no eligible word sinks the
//! whole attempt, and nothing is persisted. Retrying with a different
//! column pair is the scheduler's job, not ours.

use rand::Rng;
use tracing::{debug, error, info};

use crate::error::{Result, SachagrillaError};
use crate::matcher::pick_word;
use crate::store::GrillaStore;
use crate::text::split_quote;
use crate::types::{ColumnPair, GridId, GridRow, WordId};

/// Outcome of one build attempt. `Infeasible` is an expected result of
/// dictionary sparsity, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The grid was fully assembled and persisted.
    Built(GridId),
    /// Some row had no eligible word; nothing was written.
    Infeasible,
}

/// Builds one grid against a store, drawing words through an injected RNG.
pub struct GridBuilder<'a, S, R> {
    store: &'a mut S,
    rng: &'a mut R,
}

impl<'a, S: GrillaStore, R: Rng> GridBuilder<'a, S, R> {
    pub fn new(store: &'a mut S, rng: &'a mut R) -> Self {
        Self { store, rng }
    }

    /// Runs one complete attempt for the given column pair.
    ///
    /// Fetches a random quotation, splits it, matches one word per letter
    /// pair and, when the normalized length is odd, one extra shorter word
    /// for the trailing letter of the first half. All rows are kept in
    /// memory and written in a single unit only on full success.
    pub fn build(&mut self, columns: ColumnPair) -> Result<BuildOutcome> {
        let quote = self.store.get_random_quote()?;
        let (half_a, half_b) = split_quote(&quote.content);
        let half_a: Vec<char> = half_a.chars().collect();
        let half_b: Vec<char> = half_b.chars().collect();
        debug!(
            quote_id = quote.id,
            rows = half_b.len(),
            leftover = half_a.len() > half_b.len(),
            "quote split"
        );

        let pool = self.store.get_words(columns.min_word_length())?;
        let mut rows: Vec<GridRow> = Vec::with_capacity(half_a.len());

        // Paired iteration truncates at the shorter half.
        for (i, (&letter_a, &letter_b)) in half_a.iter().zip(half_b.iter()).enumerate() {
            match pick_word(
                &pool,
                columns.first,
                columns.second,
                letter_a,
                Some(letter_b),
                self.rng,
            ) {
                Some((word_id, _)) => rows.push(self.confirm_row(i, word_id)?),
                None => {
                    debug!(row = i, "no eligible word, attempt infeasible");
                    return Ok(BuildOutcome::Infeasible);
                }
            }
        }

        // Odd normalized length: the first half carries one trailing letter
        // with no partner, covered by a word short enough to end at the
        // first column.
        if half_a.len() > half_b.len() {
            let shorter_pool = self.store.get_shorter_words(columns.min_word_length())?;
            let trailing = half_a[half_a.len() - 1];
            match pick_word(
                &shorter_pool,
                columns.first,
                columns.second,
                trailing,
                None,
                self.rng,
            ) {
                Some((word_id, _)) => {
                    let row_nbr = rows.len();
                    rows.push(self.confirm_row(row_nbr, word_id)?);
                }
                None => {
                    debug!("no eligible short word for the trailing letter");
                    return Ok(BuildOutcome::Infeasible);
                }
            }
        }

        let grid_id = self.store.save_grid(&rows, quote.id, columns)?;
        info!(grid_id, rows = rows.len(), "build succeeded");
        Ok(BuildOutcome::Built(grid_id))
    }

    /// Resolves the clue of a matched word and seals the row.
    fn confirm_row(&mut self, row_nbr: usize, word_id: WordId) -> Result<GridRow> {
        match self.store.find_clue(word_id)? {
            Some(clue) => Ok(GridRow {
                row_nbr,
                word_id,
                clue_id: clue.id,
            }),
            None => {
                // Not infeasibility: the store broke its word-clue pairing.
                error!(word_id, "matched word has no clue, aborting attempt");
                Err(SachagrillaError::MissingClue(word_id))
            }
        }
    }
}
