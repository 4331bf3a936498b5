//! Sachagrilla Core - quote-driven word grid generation
//!
//! A sachagrilla is a word puzzle built around a quotation: every row
//! holds one dictionary word, and two fixed letter columns, read down the
//! rows, encode the two halves of the quote. This crate is the whole
//! engine behind the game:
//!
//! 1. **Text** (`text`): normalization and quote splitting
//! 2. **Matcher** (`matcher`): constrained random word lookup
//! 3. **Builder** (`builder`): one greedy, fail-fast build attempt
//! 4. **Scheduler** (`scheduler`): bounded retries over column pairs
//! 5. **Store** (`store`): SQLite persistence for the dictionary, the
//!    quotes and the finished grids
//! 6. **Collector** (`collector`): scraping published grids into the store
//! 7. **Syllables** (`syllables`): the printed puzzle's syllable bank
//!
//! # Quick Start
//!
//! ```no_run
//! use sachagrilla_core::{GenerateOutcome, Scheduler, SchedulerConfig, SqliteStore};
//!
//! # fn main() -> sachagrilla_core::Result<()> {
//! let mut store = SqliteStore::open("sachagrilla.db")?;
//! let mut scheduler = Scheduler::new(SchedulerConfig::default());
//!
//! match scheduler.generate(&mut store)? {
//!     GenerateOutcome::Generated(grid_id) => {
//!         let solution = store.find_solution(grid_id)?;
//!         println!("grilla {grid_id} lista: {solution:?}");
//!     }
//!     GenerateOutcome::Exhausted { attempts } => {
//!         println!("sin suerte tras {attempts} intentos");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design Principles
//!
//! 1. **Fail fast, retry cheap**: a build attempt never backtracks; the
//!    scheduler simply redraws the column pair
//! 2. **Expected failure is not an error**: infeasibility travels as plain
//!    outcomes, `Result` is reserved for faults
//! 3. **All-or-nothing persistence**: a grid hits the store with all its
//!    rows in one transaction or not at all
//! 4. **Reproducibility**: every random draw of the matcher and scheduler
//!    goes through an injectable, seedable RNG

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, clippy::all)]

pub mod builder;
pub mod collector;
pub mod config;
pub mod error;
pub mod matcher;
pub mod scheduler;
pub mod store;
pub mod syllables;
pub mod text;
pub mod types;

// Re-export commonly used types for convenience
pub use builder::{BuildOutcome, GridBuilder};
pub use collector::{ClarinScraper, CollectReport, Harvest};
pub use config::GrillaConfig;
pub use error::{Result, SachagrillaError, StoreError};
pub use scheduler::{GenerateOutcome, Scheduler, SchedulerConfig};
pub use store::{GrillaStore, SqliteStore};
pub use types::{
    Clue, ClueId, ColumnPair, GridId, GridRow, QuoteId, Quotation, ScrapeCursor, Solution,
    SolutionLine, WordId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
