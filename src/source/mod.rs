//! Trial data source trait and the SQLite mirror implementation
//!
//! A source runs the fixed trial query and hands back raw rows. Nothing here
//! interprets dates or filters records; that is the pipeline's job.

mod schema;

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub use schema::{MIRROR_SCHEMA, TRIAL_QUERY};

/// A date-like column value as the source delivered it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateValue {
    #[default]
    Missing,
    Text(String),
    Date(NaiveDate),
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

/// One joined row of the trial query
#[derive(Debug, Clone, Default)]
pub struct RawTrial {
    pub id: String,
    pub title: Option<String>,
    pub start_date: DateValue,
    pub completion_date: DateValue,
    pub primary_completion_date: DateValue,
    pub status: Option<String>,
    pub phase: Option<String>,
    pub enrollment: Option<i64>,
    pub intervention_type: Option<String>,
    pub condition: String,
    pub sponsor: Option<String>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("trial database not found at {}", path.display())]
    Unavailable { path: PathBuf },

    #[error("failed to open trial database: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("trial query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can produce a fresh set of raw trial rows
pub trait TrialSource {
    /// Human-readable description of where rows come from
    fn describe(&self) -> String;

    /// Run the trial query. Blocks until the full result set is read.
    fn fetch(&self) -> Result<Vec<RawTrial>, SourceError>;
}

/// Local SQLite mirror of the AACT tables
pub struct SqliteSource {
    db_path: PathBuf,
}

impl SqliteSource {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.db_path.exists()
    }

    /// Open database in read-only mode
    fn open_db(&self) -> Result<Connection, SourceError> {
        Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(SourceError::Open)
    }
}

impl TrialSource for SqliteSource {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_path.display())
    }

    fn fetch(&self) -> Result<Vec<RawTrial>, SourceError> {
        if !self.is_available() {
            return Err(SourceError::Unavailable {
                path: self.db_path.clone(),
            });
        }

        let conn = self.open_db()?;
        let mut stmt = conn.prepare(TRIAL_QUERY).map_err(SourceError::Query)?;
        let trials = stmt
            .query_map([], map_row)
            .map_err(SourceError::Query)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(SourceError::Query)?;

        info!(rows = trials.len(), source = %self.describe(), "fetched trial rows");
        Ok(trials)
    }
}

/// Create an empty mirror at `path` (parent directories included)
pub fn create_mirror(path: &Path) -> Result<(), SourceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path).map_err(SourceError::Open)?;
    conn.execute_batch(MIRROR_SCHEMA)
        .map_err(SourceError::Query)?;
    debug!(path = %path.display(), "mirror schema ready");
    Ok(())
}

fn map_row(row: &Row) -> rusqlite::Result<RawTrial> {
    Ok(RawTrial {
        id: row.get(0)?,
        title: row.get(1)?,
        start_date: date_value(row.get(2)?),
        completion_date: date_value(row.get(3)?),
        status: row.get(4)?,
        phase: row.get(5)?,
        enrollment: integer_value(row.get(6)?),
        intervention_type: row.get(7)?,
        condition: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        primary_completion_date: date_value(row.get(9)?),
        sponsor: row.get(10)?,
    })
}

fn date_value(value: Value) -> DateValue {
    match value {
        Value::Text(s) => DateValue::Text(s),
        _ => DateValue::Missing,
    }
}

// Exports sometimes store counts as REAL
fn integer_value(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        Value::Real(f) if f.is_finite() => Some(f as i64),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}
