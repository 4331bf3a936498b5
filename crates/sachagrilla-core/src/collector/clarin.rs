//! Scraper for the published claringrilla pages.
//!
//! Each puzzle lives at `<base_url><number>`; the page carries the clue
//! list and the quotation, while the answer words appear on the NEXT
//! puzzle's page. Extraction is pure (`&str` in, data out) so it can be
//! unit-tested on fixture markup; only the fetch itself touches the
//! network.

use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::collector::Harvest;
use crate::error::{Result, SachagrillaError};
use crate::types::ScrapeCursor;

/// Default page root for published claringrillas.
pub const DEFAULT_BASE_URL: &str = "https://www.clarin.com/claringrilla/";

/// Scraper over the claringrilla archive.
pub struct ClarinScraper {
    base_url: String,
    client: reqwest::Client,
}

impl ClarinScraper {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Downloads `pages` consecutive grid pages starting at the cursor and
    /// extracts words, clues and quotes. Pages that are missing (non-2xx)
    /// are skipped; pages whose markup no longer matches the selectors are
    /// an error. Returns the harvest and the advanced cursor.
    pub async fn scrape(&self, cursor: ScrapeCursor, pages: usize) -> Result<(Harvest, ScrapeCursor)> {
        let mut harvest = Harvest::default();

        for nbr in cursor.next_grid..cursor.next_grid + pages as i64 {
            let page = self.fetch(nbr).await?;
            let next_page = self.fetch(nbr + 1).await?;
            let (Some(page), Some(next_page)) = (page, next_page) else {
                warn!(grid = nbr, "page not available, skipped");
                continue;
            };

            let clues = extract_clues(&page)?;
            let words = extract_words(&next_page)?;
            if !clues.is_empty() && !words.is_empty() {
                harvest
                    .words
                    .extend(words.into_iter().zip(clues.into_iter()));
            }
            if let Some(quote) = extract_quote(&page)? {
                harvest.quotes.push(quote);
            }
            info!(grid = nbr, "page data extracted");
        }

        Ok((harvest, cursor.advanced(pages)))
    }

    async fn fetch(&self, grid_number: i64) -> Result<Option<String>> {
        let url = format!("{}{}", self.base_url, grid_number);
        let response = self.client.get(&url).send().await?;
        if response.status().is_success() {
            Ok(Some(response.text().await?))
        } else {
            Ok(None)
        }
    }
}

impl Default for ClarinScraper {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn first_element<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Strips newlines, marginal blanks and quoting punctuation, as published
/// items come wrapped in assorted decoration.
fn clean(item: &str) -> String {
    item.trim_matches(|c: char| matches!(c, '\n' | '\r' | ' ' | '.' | ',' | '"' | '\''))
        .to_string()
}

/// The clue list of a puzzle page, in published order.
pub fn extract_clues(page: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(page);
    let container = first_element(&doc, "div.definiciones").ok_or_else(|| {
        SachagrillaError::Extract("clue block (div.definiciones) not found".to_string())
    })?;

    let row_selector = Selector::parse("p.definition-row").unwrap();
    Ok(container
        .select(&row_selector)
        .map(|row| clean(&element_text(row)))
        .filter(|clue| !clue.is_empty())
        .collect())
}

/// The answer words of a puzzle, as listed on the FOLLOWING page.
pub fn extract_words(page: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(page);
    let container = first_element(&doc, "div.words").ok_or_else(|| {
        SachagrillaError::Extract("answer block (div.words) not found".to_string())
    })?;

    let span_selector = Selector::parse("div > .col2 > span").unwrap();
    let span = container.select(&span_selector).next().ok_or_else(|| {
        SachagrillaError::Extract("answer word list span not found".to_string())
    })?;

    Ok(element_text(span)
        .split(',')
        .map(clean)
        .filter(|word| !word.is_empty())
        .collect())
}

/// The quotation of a puzzle page: `(content, author)`.
///
/// Quotes split across several puzzles ("1ra parte" / "Conclusión") are
/// useless for grid building and come back as `None`.
pub fn extract_quote(page: &str) -> Result<Option<(String, String)>> {
    let doc = Html::parse_document(page);
    let container = first_element(&doc, "div.words").ok_or_else(|| {
        SachagrillaError::Extract("quote block (div.words) not found".to_string())
    })?;

    let span_selector = Selector::parse("div > .col3 > span").unwrap();
    let span = container.select(&span_selector).next().ok_or_else(|| {
        SachagrillaError::Extract("quote span not found".to_string())
    })?;

    let raw = element_text(span).trim().to_string();
    if raw.contains("parte)") || raw.contains("(Conclus") {
        return Ok(None);
    }

    // The published form is `"content" author`.
    let body = raw.strip_prefix('"').unwrap_or(&raw);
    let Some(closing) = body.find('"') else {
        return Err(SachagrillaError::Extract(format!(
            "quote without closing mark: {raw}"
        )));
    };
    let content = clean(&body[..closing]);
    let author = clean(&body[closing + 1..]);
    Ok(Some((content, author)))
}
