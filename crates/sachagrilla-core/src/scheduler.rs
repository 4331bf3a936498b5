//! Attempt scheduling: bounded retries over a curated set of column pairs.
//!
//! A single build attempt fails often (the dictionary is sparse relative
//! to an arbitrary column pair and quotation), so the scheduler redraws a
//! pair and tries again, up to a hard cap. The candidate set is explicit
//! configuration: alternate puzzle geometries are a config change, not a
//! code change.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::{BuildOutcome, GridBuilder};
use crate::error::{Result, SachagrillaError};
use crate::store::GrillaStore;
use crate::types::{ColumnPair, GridId};

/// Configuration for puzzle generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Candidate column pairs, drawn uniformly with replacement.
    pub column_pairs: Vec<ColumnPair>,
    /// Maximum build attempts before giving up.
    pub max_attempts: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            column_pairs: vec![
                ColumnPair { first: 0, second: 2 },
                ColumnPair { first: 0, second: 3 },
                ColumnPair { first: 0, second: 4 },
                ColumnPair { first: 0, second: 5 },
                ColumnPair { first: 1, second: 3 },
                ColumnPair { first: 1, second: 4 },
                ColumnPair { first: 1, second: 5 },
                ColumnPair { first: 2, second: 4 },
                ColumnPair { first: 2, second: 5 },
                ColumnPair { first: 2, second: 6 },
            ],
            max_attempts: 10,
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate pairs.
    pub fn with_column_pairs(mut self, pairs: Vec<ColumnPair>) -> Self {
        self.column_pairs = pairs;
        self
    }

    /// Replace the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Outcome of a whole generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Some attempt succeeded.
    Generated(GridId),
    /// Every attempt came back infeasible; the caller may simply run the
    /// whole thing again.
    Exhausted { attempts: usize },
}

/// Best-effort puzzle generator with bounded latency.
pub struct Scheduler<R: Rng> {
    config: SchedulerConfig,
    rng: R,
}

impl Scheduler<StdRng> {
    /// Scheduler with OS-seeded randomness.
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Scheduler with a fixed seed, for reproducible runs.
    pub fn with_seed(config: SchedulerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Scheduler<R> {
    pub fn with_rng(config: SchedulerConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Tries to generate one grid, redrawing the column pair on every
    /// infeasible attempt. Store faults and dictionary corruption abort
    /// the run; only infeasibility is retried.
    pub fn generate<S: GrillaStore>(&mut self, store: &mut S) -> Result<GenerateOutcome> {
        for attempt in 1..=self.config.max_attempts {
            let columns = match self.config.column_pairs.choose(&mut self.rng) {
                Some(&pair) => pair,
                None => {
                    return Err(SachagrillaError::Config(
                        "the column-pair candidate set is empty".to_string(),
                    ))
                }
            };

            let mut builder = GridBuilder::new(store, &mut self.rng);
            match builder.build(columns)? {
                BuildOutcome::Built(grid_id) => {
                    info!(attempt, grid_id, "grid generated");
                    return Ok(GenerateOutcome::Generated(grid_id));
                }
                BuildOutcome::Infeasible => {
                    info!(
                        attempt,
                        pos1 = columns.first,
                        pos2 = columns.second,
                        "attempt infeasible, redrawing columns"
                    );
                }
            }
        }
        Ok(GenerateOutcome::Exhausted {
            attempts: self.config.max_attempts,
        })
    }
}
