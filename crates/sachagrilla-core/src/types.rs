//! Shared data types for the Sachagrilla engine.
//!
//! Ids are the store's `INTEGER PRIMARY KEY` row ids; the core treats them
//! as opaque handles and never derives meaning from their values.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SachagrillaError};

/// Opaque id of a dictionary word.
pub type WordId = i64;

/// Opaque id of a clue.
pub type ClueId = i64;

/// Opaque id of a quotation.
pub type QuoteId = i64;

/// Opaque id of a persisted grid.
pub type GridId = i64;

/// Number of the first claringrilla ever published online (2021-01-01);
/// scraping starts here when the store has no cursor yet.
pub const FIRST_CLARINGRILLA: i64 = 18874;

/// A quotation as supplied by the store. Read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: QuoteId,
    pub content: String,
    pub author: String,
}

/// A clue paired to one dictionary word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    pub word_id: WordId,
    pub content: String,
}

/// The two character offsets of each row's word that encode the quotation
/// halves vertically. Always `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPair {
    pub first: usize,
    pub second: usize,
}

impl ColumnPair {
    /// Builds a validated pair. `first` must be strictly below `second`.
    pub fn new(first: usize, second: usize) -> Result<Self> {
        if first >= second {
            return Err(SachagrillaError::Config(format!(
                "invalid column pair ({first}, {second}): first position must be below second"
            )));
        }
        Ok(Self { first, second })
    }

    /// Minimum word length needed to have a character at `second`.
    pub const fn min_word_length(&self) -> usize {
        self.second + 1
    }
}

/// One confirmed row of a grid under construction: the word occupying the
/// row and the clue that hints it. Held in memory until the whole attempt
/// succeeds; never written on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub row_nbr: usize,
    pub word_id: WordId,
    pub clue_id: ClueId,
}

/// The scraping cursor: the next claringrilla number to download.
/// Passed by value into and out of the collector; the store keeps an
/// append-only ledger of its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeCursor {
    pub next_grid: i64,
}

impl Default for ScrapeCursor {
    fn default() -> Self {
        Self {
            next_grid: FIRST_CLARINGRILLA,
        }
    }
}

impl ScrapeCursor {
    /// Cursor after consuming `pages` grid pages.
    pub fn advanced(self, pages: usize) -> Self {
        Self {
            next_grid: self.next_grid + pages as i64,
        }
    }
}

/// Joined read model of a persisted grid, as used by rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub grid_id: GridId,
    pub quote: String,
    pub author: String,
    pub position1: usize,
    pub position2: usize,
    pub lines: Vec<SolutionLine>,
}

/// One solved row: the word and the clue text, in row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionLine {
    pub row_nbr: usize,
    pub word: String,
    pub clue: String,
}
