//! Data collection: scraping published claringrillas into the store.
//!
//! The collector is the only async surface of the crate (HTTP fetches);
//! everything it extracts goes straight into the store, and the scrape
//! cursor travels by value: read from the ledger, advanced by the
//! scraper, pushed back as a new version.

pub mod clarin;

pub use clarin::ClarinScraper;

use tracing::info;

use crate::error::Result;
use crate::store::SqliteStore;
use crate::types::ScrapeCursor;

/// Everything harvested from one scraping run.
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// `(word, clue)` pairs.
    pub words: Vec<(String, String)>,
    /// `(content, author)` pairs.
    pub quotes: Vec<(String, String)>,
}

impl Harvest {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.quotes.is_empty()
    }
}

/// Summary of one collection run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectReport {
    pub words_saved: usize,
    pub quotes_saved: usize,
    pub duplicates: usize,
    pub cursor: ScrapeCursor,
}

/// Scrapes `pages` grid pages starting at the stored cursor and loads the
/// harvest into the store. The advanced cursor is persisted even when the
/// harvest is empty, so a stretch of unpublished grids is not re-fetched
/// forever.
pub async fn collect(
    store: &mut SqliteStore,
    scraper: &ClarinScraper,
    pages: usize,
) -> Result<CollectReport> {
    let cursor = store.scrape_cursor()?;
    info!(start = cursor.next_grid, pages, "collection started");

    let (harvest, next_cursor) = scraper.scrape(cursor, pages).await?;

    let mut report = CollectReport {
        cursor: next_cursor,
        ..CollectReport::default()
    };
    for (word, clue) in &harvest.words {
        match store.save_word(word, clue)? {
            Some(_) => report.words_saved += 1,
            None => report.duplicates += 1,
        }
    }
    for (content, author) in &harvest.quotes {
        match store.save_quote(content, author, None)? {
            Some(_) => report.quotes_saved += 1,
            None => report.duplicates += 1,
        }
    }
    store.push_scrape_cursor(next_cursor)?;

    info!(
        words = report.words_saved,
        quotes = report.quotes_saved,
        duplicates = report.duplicates,
        "collection finished"
    );
    Ok(report)
}
