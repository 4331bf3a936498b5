//! Persistence for words, clues, quotes and generated grids.
//!
//! The builder and scheduler only ever see [`GrillaStore`], the minimal
//! surface the construction algorithm needs; [`SqliteStore`] implements it
//! on SQLite plus the wider surface the collector and the CLI use
//! (ingestion, scrape cursor, solution lookup).

pub mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::{Clue, ColumnPair, GridId, GridRow, QuoteId, Quotation, WordId};

/// The store operations the puzzle-construction core consumes.
///
/// Pools are ordered maps so that an injected, seeded RNG downstream makes
/// reproducible picks. Implementations must write a grid and its rows as
/// one unit: a failed build persists nothing.
pub trait GrillaStore {
    /// One random quotation. Empty stores are an error, not an option:
    /// generation cannot proceed at all without quotes.
    fn get_random_quote(&self) -> Result<Quotation>;

    /// Words (with a clue) of length at least `min_length`, keyed by id.
    fn get_words(&self, min_length: usize) -> Result<BTreeMap<WordId, String>>;

    /// Words (with a clue) of length at most `max_length`, keyed by id.
    fn get_shorter_words(&self, max_length: usize) -> Result<BTreeMap<WordId, String>>;

    /// The clue of one word, if any. The store schema guarantees one clue
    /// per word; a `None` here means the dictionary is corrupt and the
    /// caller escalates it.
    fn find_clue(&self, word_id: WordId) -> Result<Option<Clue>>;

    /// Persists a complete grid with all its rows atomically and returns
    /// the new grid id.
    fn save_grid(
        &mut self,
        rows: &[GridRow],
        quote_id: QuoteId,
        columns: ColumnPair,
    ) -> Result<GridId>;
}
