//! SQLite-backed store.
//!
//! WAL mode, foreign keys on, idempotent DDL migrations. Content columns
//! carry UNIQUE constraints, so ingestion deduplicates via `INSERT OR
//! IGNORE`; timestamps are UTC milliseconds. Usage counters on words,
//! clues and quotes are bumped inside the same transaction that persists
//! a grid, never during matching.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::store::GrillaStore;
use crate::types::{
    Clue, ClueId, ColumnPair, GridId, GridRow, QuoteId, Quotation, ScrapeCursor, Solution,
    SolutionLine, WordId,
};

/// SQLite store for the whole product: dictionary, quotes, cursor, grids.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file in WAL mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Idempotent DDL migrations.
    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS words (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                content       TEXT NOT NULL UNIQUE,
                length        INTEGER NOT NULL,
                times_used    INTEGER NOT NULL DEFAULT 0,
                last_used_ms  INTEGER,
                created_at_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_words_length ON words(length);

            CREATE TABLE IF NOT EXISTS clues (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                content       TEXT NOT NULL UNIQUE,
                word_id       INTEGER NOT NULL REFERENCES words(id),
                times_used    INTEGER NOT NULL DEFAULT 0,
                last_used_ms  INTEGER,
                created_at_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_clues_word ON clues(word_id);

            CREATE TABLE IF NOT EXISTS quotes (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                content       TEXT NOT NULL UNIQUE,
                author        TEXT NOT NULL,
                extra         TEXT,
                times_used    INTEGER NOT NULL DEFAULT 0,
                last_used_ms  INTEGER,
                created_at_ms INTEGER NOT NULL
            );

            -- Scrape cursor history (append-only ledger)
            CREATE TABLE IF NOT EXISTS control (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                last_grid_nbr INTEGER NOT NULL,
                created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS grids (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                quote_id      INTEGER NOT NULL REFERENCES quotes(id),
                position1     INTEGER NOT NULL,
                position2     INTEGER NOT NULL,
                created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS grid_lines (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                grid_id       INTEGER NOT NULL REFERENCES grids(id),
                row_nbr       INTEGER NOT NULL,
                word_id       INTEGER NOT NULL REFERENCES words(id),
                clue_id       INTEGER NOT NULL REFERENCES clues(id),
                created_at_ms INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_grid_lines_grid
                ON grid_lines(grid_id, row_nbr);
            ",
        )?;
        Ok(())
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    // ── Ingestion ────────────────────────────────────────────────────────

    /// Stores a word together with its clue, atomically.
    ///
    /// Word and clue content are both UNIQUE; if either already exists the
    /// pair is skipped as a whole and `None` comes back, so a word never
    /// ends up clueless.
    pub fn save_word(&mut self, word: &str, clue: &str) -> Result<Option<(WordId, ClueId)>> {
        let now = Self::now_ms();
        let length = word.chars().count() as i64;

        let tx = self.conn.transaction()?;
        let inserted = tx.execute(
            "INSERT OR IGNORE INTO words (content, length, created_at_ms)
             VALUES (?1, ?2, ?3)",
            params![word, length, now],
        )?;
        if inserted == 0 {
            warn!(word, "palabra existente, no insertada");
            return Ok(None);
        }
        let word_id = tx.last_insert_rowid();

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO clues (content, word_id, created_at_ms)
             VALUES (?1, ?2, ?3)",
            params![clue, word_id, now],
        )?;
        if inserted == 0 {
            // Dropping the transaction rolls the word back too.
            warn!(word, clue, "significado existente, par no insertado");
            return Ok(None);
        }
        let clue_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(Some((word_id, clue_id)))
    }

    /// Stores a quotation; duplicates (by content) are skipped.
    pub fn save_quote(
        &self,
        content: &str,
        author: &str,
        extra: Option<&str>,
    ) -> Result<Option<QuoteId>> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO quotes (content, author, extra, created_at_ms)
             VALUES (?1, ?2, ?3, ?4)",
            params![content, author, extra, Self::now_ms()],
        )?;
        if changed == 0 {
            warn!(quote = content, "frase existente, no insertada");
            return Ok(None);
        }
        Ok(Some(self.conn.last_insert_rowid()))
    }

    // ── Scrape cursor ────────────────────────────────────────────────────

    /// Latest scrape cursor, or the first claringrilla number when the
    /// ledger is still empty.
    pub fn scrape_cursor(&self) -> Result<ScrapeCursor> {
        let result = self.conn.query_row(
            "SELECT last_grid_nbr FROM control ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(next_grid) => Ok(ScrapeCursor { next_grid }),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(ScrapeCursor::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Appends a new cursor version to the ledger.
    pub fn push_scrape_cursor(&self, cursor: ScrapeCursor) -> Result<()> {
        self.conn.execute(
            "INSERT INTO control (last_grid_nbr, created_at_ms) VALUES (?1, ?2)",
            params![cursor.next_grid, Self::now_ms()],
        )?;
        info!(next_grid = cursor.next_grid, "scrape cursor saved");
        Ok(())
    }

    // ── Solutions ────────────────────────────────────────────────────────

    /// The full read model of one grid, or `None` if the id is unknown.
    pub fn find_solution(&self, grid_id: GridId) -> Result<Option<Solution>> {
        let header = self.conn.query_row(
            "SELECT q.content, q.author, g.position1, g.position2
             FROM grids g
             JOIN quotes q ON q.id = g.quote_id
             WHERE g.id = ?1",
            params![grid_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        );
        let (quote, author, position1, position2) = match header {
            Ok(header) => header,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut stmt = self.conn.prepare(
            "SELECT l.row_nbr, w.content, c.content
             FROM grid_lines l
             JOIN words w ON w.id = l.word_id
             JOIN clues c ON c.id = l.clue_id
             WHERE l.grid_id = ?1
             ORDER BY l.row_nbr",
        )?;
        let lines = stmt
            .query_map(params![grid_id], |row| {
                Ok(SolutionLine {
                    row_nbr: row.get::<_, i64>(0)? as usize,
                    word: row.get(1)?,
                    clue: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(Solution {
            grid_id,
            quote,
            author,
            position1: position1 as usize,
            position2: position2 as usize,
            lines,
        }))
    }

    /// Ids of every persisted grid, oldest first.
    pub fn available_grids(&self) -> Result<Vec<GridId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM grids ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn word_pool(&self, sql: &str, length: i64) -> Result<BTreeMap<WordId, String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![length], |row| {
            Ok((row.get::<_, WordId>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut pool = BTreeMap::new();
        for row in rows {
            let (id, content) = row?;
            pool.insert(id, content);
        }
        Ok(pool)
    }
}

impl GrillaStore for SqliteStore {
    fn get_random_quote(&self) -> Result<Quotation> {
        let result = self.conn.query_row(
            "SELECT id, content, author FROM quotes ORDER BY RANDOM() LIMIT 1",
            [],
            |row| {
                Ok(Quotation {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    author: row.get(2)?,
                })
            },
        );
        match result {
            Ok(quote) => Ok(quote),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NoQuotes.into()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_words(&self, min_length: usize) -> Result<BTreeMap<WordId, String>> {
        self.word_pool(
            "SELECT DISTINCT w.id, w.content
             FROM words w
             JOIN clues c ON c.word_id = w.id
             WHERE w.length >= ?1",
            min_length as i64,
        )
    }

    fn get_shorter_words(&self, max_length: usize) -> Result<BTreeMap<WordId, String>> {
        self.word_pool(
            "SELECT DISTINCT w.id, w.content
             FROM words w
             JOIN clues c ON c.word_id = w.id
             WHERE w.length <= ?1",
            max_length as i64,
        )
    }

    fn find_clue(&self, word_id: WordId) -> Result<Option<Clue>> {
        let result = self.conn.query_row(
            "SELECT id, word_id, content FROM clues WHERE word_id = ?1",
            params![word_id],
            |row| {
                Ok(Clue {
                    id: row.get(0)?,
                    word_id: row.get(1)?,
                    content: row.get(2)?,
                })
            },
        );
        match result {
            Ok(clue) => Ok(Some(clue)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_grid(
        &mut self,
        rows: &[GridRow],
        quote_id: QuoteId,
        columns: ColumnPair,
    ) -> Result<GridId> {
        let now = Self::now_ms();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO grids (quote_id, position1, position2, created_at_ms)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                quote_id,
                columns.first as i64,
                columns.second as i64,
                now
            ],
        )?;
        let grid_id = tx.last_insert_rowid();

        for row in rows {
            tx.execute(
                "INSERT INTO grid_lines (grid_id, row_nbr, word_id, clue_id, created_at_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![grid_id, row.row_nbr as i64, row.word_id, row.clue_id, now],
            )?;
            tx.execute(
                "UPDATE words SET times_used = times_used + 1, last_used_ms = ?2 WHERE id = ?1",
                params![row.word_id, now],
            )?;
            tx.execute(
                "UPDATE clues SET times_used = times_used + 1, last_used_ms = ?2 WHERE id = ?1",
                params![row.clue_id, now],
            )?;
        }
        tx.execute(
            "UPDATE quotes SET times_used = times_used + 1, last_used_ms = ?2 WHERE id = ?1",
            params![quote_id, now],
        )?;

        tx.commit()?;
        info!(grid_id, rows = rows.len(), "grid persisted");
        Ok(grid_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SachagrillaError;

    fn temp_store() -> SqliteStore {
        SqliteStore::open_in_memory().expect("in-memory SQLite should open")
    }

    #[test]
    fn test_save_word_and_dedup() {
        let mut store = temp_store();

        let first = store.save_word("gato", "mamífero doméstico").unwrap();
        assert!(first.is_some());

        let duplicate = store.save_word("gato", "otro significado").unwrap();
        assert!(duplicate.is_none());
    }

    #[test]
    fn test_duplicate_clue_rolls_back_the_word() {
        let mut store = temp_store();

        store.save_word("gato", "mamífero doméstico").unwrap();
        // Same clue content, different word: the whole pair is skipped.
        let pair = store.save_word("felino", "mamífero doméstico").unwrap();
        assert!(pair.is_none());

        let pool = store.get_words(1).unwrap();
        assert!(!pool.values().any(|w| w == "felino"));
    }

    #[test]
    fn test_word_pools_filter_by_length_class() {
        let mut store = temp_store();
        store.save_word("sol", "astro rey").unwrap();
        store.save_word("estrella", "cuerpo celeste").unwrap();

        let long = store.get_words(4).unwrap();
        assert_eq!(long.values().collect::<Vec<_>>(), ["estrella"]);

        // Boundary is inclusive on both pools.
        let exact = store.get_words(3).unwrap();
        assert_eq!(exact.len(), 2);

        let short = store.get_shorter_words(3).unwrap();
        assert_eq!(short.values().collect::<Vec<_>>(), ["sol"]);
    }

    #[test]
    fn test_word_length_counts_chars_not_bytes() {
        let mut store = temp_store();
        store.save_word("ñoño", "melindroso").unwrap();

        let pool = store.get_words(4).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(store.get_words(5).unwrap().is_empty());
    }

    #[test]
    fn test_clueless_words_never_enter_a_pool() {
        let mut store = temp_store();
        store.save_word("gato", "mamífero doméstico").unwrap();
        // Sneak in a clueless word behind the ingestion API.
        store
            .conn
            .execute(
                "INSERT INTO words (content, length, created_at_ms) VALUES ('raro', 4, 0)",
                [],
            )
            .unwrap();

        let pool = store.get_words(1).unwrap();
        assert_eq!(pool.values().collect::<Vec<_>>(), ["gato"]);
    }

    #[test]
    fn test_random_quote_on_empty_store_is_an_error() {
        let store = temp_store();
        let err = store.get_random_quote().unwrap_err();
        assert!(matches!(
            err,
            SachagrillaError::Store(StoreError::NoQuotes)
        ));
    }

    #[test]
    fn test_quote_roundtrip_and_dedup() {
        let store = temp_store();
        let id = store
            .save_quote("la vida es sueño", "Calderón", None)
            .unwrap();
        assert!(id.is_some());
        assert!(store
            .save_quote("la vida es sueño", "Calderón", None)
            .unwrap()
            .is_none());

        let quote = store.get_random_quote().unwrap();
        assert_eq!(quote.content, "la vida es sueño");
        assert_eq!(quote.author, "Calderón");
    }

    #[test]
    fn test_find_clue() {
        let mut store = temp_store();
        let (word_id, clue_id) = store.save_word("gato", "mamífero doméstico").unwrap().unwrap();

        let clue = store.find_clue(word_id).unwrap().unwrap();
        assert_eq!(clue.id, clue_id);
        assert_eq!(clue.word_id, word_id);
        assert_eq!(clue.content, "mamífero doméstico");

        assert!(store.find_clue(9999).unwrap().is_none());
    }

    #[test]
    fn test_save_grid_and_solution_roundtrip() {
        let mut store = temp_store();
        let quote_id = store
            .save_quote("frase de prueba", "Anónimo", None)
            .unwrap()
            .unwrap();
        let (w1, c1) = store.save_word("gato", "mamífero doméstico").unwrap().unwrap();
        let (w2, c2) = store.save_word("sol", "astro rey").unwrap().unwrap();

        let rows = [
            GridRow {
                row_nbr: 0,
                word_id: w1,
                clue_id: c1,
            },
            GridRow {
                row_nbr: 1,
                word_id: w2,
                clue_id: c2,
            },
        ];
        let columns = ColumnPair { first: 0, second: 2 };
        let grid_id = store.save_grid(&rows, quote_id, columns).unwrap();

        let solution = store.find_solution(grid_id).unwrap().unwrap();
        assert_eq!(solution.grid_id, grid_id);
        assert_eq!(solution.quote, "frase de prueba");
        assert_eq!(solution.position1, 0);
        assert_eq!(solution.position2, 2);
        assert_eq!(solution.lines.len(), 2);
        assert_eq!(solution.lines[0].word, "gato");
        assert_eq!(solution.lines[0].clue, "mamífero doméstico");
        assert_eq!(solution.lines[1].row_nbr, 1);

        assert_eq!(store.available_grids().unwrap(), vec![grid_id]);
    }

    #[test]
    fn test_save_grid_bumps_usage_counters() {
        let mut store = temp_store();
        let quote_id = store
            .save_quote("frase", "Anónimo", None)
            .unwrap()
            .unwrap();
        let (w1, c1) = store.save_word("gato", "mamífero doméstico").unwrap().unwrap();

        let rows = [GridRow {
            row_nbr: 0,
            word_id: w1,
            clue_id: c1,
        }];
        store
            .save_grid(&rows, quote_id, ColumnPair { first: 0, second: 2 })
            .unwrap();

        let times: i64 = store
            .conn
            .query_row(
                "SELECT times_used FROM words WHERE id = ?1",
                params![w1],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(times, 1);
    }

    #[test]
    fn test_unknown_grid_has_no_solution() {
        let store = temp_store();
        assert!(store.find_solution(123).unwrap().is_none());
    }

    #[test]
    fn test_scrape_cursor_defaults_and_ledger() {
        let store = temp_store();
        assert_eq!(
            store.scrape_cursor().unwrap(),
            ScrapeCursor::default()
        );

        store
            .push_scrape_cursor(ScrapeCursor { next_grid: 18900 })
            .unwrap();
        store
            .push_scrape_cursor(ScrapeCursor { next_grid: 18920 })
            .unwrap();
        // Latest version wins.
        assert_eq!(store.scrape_cursor().unwrap().next_grid, 18920);
    }
}
