//! SQLite cache for ticker to CIK mappings.

use crate::error::Result;
use crate::model::{Cik, Company, normalize_ticker};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// SQLite cache of resolved companies keyed by ticker.
#[derive(Debug)]
pub struct TickerCache {
    conn: Connection,
}

impl TickerCache {
    /// Open (or create) a cache database.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS company_ciks (
                symbol TEXT PRIMARY KEY,
                cik TEXT NOT NULL,
                company_name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get the cached company for a ticker.
    ///
    /// With `max_age`, entries last written longer ago than that are
    /// treated as missing. A zero `max_age` ignores every entry.
    pub fn get(&self, ticker: &str, max_age: Option<Duration>) -> Result<Option<Company>> {
        let symbol = normalize_ticker(ticker);

        let row: Option<(String, String, String)> = self
            .conn
            .query_row(
                "SELECT cik, company_name, updated_at FROM company_ciks WHERE symbol = ?1",
                params![symbol],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((cik, name, updated_at)) = row else {
            return Ok(None);
        };

        if let Some(max_age) = max_age {
            let fresh = DateTime::parse_from_rfc3339(&updated_at)
                .map(|t| Utc::now() - t.with_timezone(&Utc) < max_age)
                .unwrap_or(false);
            if !fresh {
                return Ok(None);
            }
        }

        // A row that no longer parses is as good as a miss.
        let Ok(cik) = cik.parse::<Cik>() else {
            return Ok(None);
        };

        Ok(Some(Company::new(&symbol, cik, name)))
    }

    /// Store the mapping for a company, replacing any existing entry.
    pub fn put(&self, company: &Company) -> Result<()> {
        self.put_at(company, Utc::now())
    }

    fn put_at(&self, company: &Company, updated_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO company_ciks (symbol, cik, company_name, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                normalize_ticker(&company.ticker),
                company.cik.as_str(),
                company.name,
                updated_at.to_rfc3339()
            ],
        )?;

        Ok(())
    }

    /// Remove a single ticker. Returns whether an entry existed.
    pub fn remove(&self, ticker: &str) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM company_ciks WHERE symbol = ?1",
            params![normalize_ticker(ticker)],
        )?;
        Ok(removed > 0)
    }

    /// Clear all cached mappings. Returns the number removed.
    pub fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM company_ciks", [])?)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> Result<CacheStats> {
        let (count, oldest): (i64, Option<String>) = self.conn.query_row(
            "SELECT COUNT(*), MIN(updated_at) FROM company_ciks",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(CacheStats {
            cik_mappings: count as usize,
            oldest_entry: oldest
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|t| t.with_timezone(&Utc)),
        })
    }
}

/// Cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of CIK mappings
    pub cik_mappings: usize,
    /// When the stalest mapping was written
    pub oldest_entry: Option<DateTime<Utc>>,
}
