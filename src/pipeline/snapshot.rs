//! Immutable per-load snapshots and the reload operation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::clean::{active_trials, clean};
use super::normalize::normalize_all;
use super::{CleanTrial, TrialRecord};
use crate::source::{RawTrial, SourceError, TrialSource};

/// The result of one fetch, cleaned and standardized. Never mutated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub loaded_at: DateTime<Utc>,
    pub source: String,
    pub raw_rows: usize,
    pub trials: Vec<CleanTrial>,
    pub active: Vec<TrialRecord>,
}

impl Snapshot {
    pub fn build(source: impl Into<String>, rows: Vec<RawTrial>) -> Self {
        let raw_rows = rows.len();
        let records = normalize_all(rows);
        let active = active_trials(&records);
        let trials = clean(records);

        Self {
            loaded_at: Utc::now(),
            source: source.into(),
            raw_rows,
            trials,
            active,
        }
    }
}

/// A source plus the snapshot most recently fetched from it
pub struct Dataset<S: TrialSource> {
    source: S,
    current: Arc<Snapshot>,
}

impl<S: TrialSource> Dataset<S> {
    /// Fetch the first snapshot; fails if the source does
    pub fn load(source: S) -> Result<Self, SourceError> {
        let current = Arc::new(Self::fetch_snapshot(&source)?);
        Ok(Self { source, current })
    }

    /// The current snapshot. Holders keep their view across reloads.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Re-run the fetch and swap in the result wholesale. On failure the
    /// previous snapshot stays in place.
    pub fn reload(&mut self) -> Result<Arc<Snapshot>, SourceError> {
        match Self::fetch_snapshot(&self.source) {
            Ok(snapshot) => {
                self.current = Arc::new(snapshot);
                info!(trials = self.current.trials.len(), "snapshot reloaded");
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    fn fetch_snapshot(source: &S) -> Result<Snapshot, SourceError> {
        let rows = source.fetch()?;
        Ok(Snapshot::build(source.describe(), rows))
    }
}
