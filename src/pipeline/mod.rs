//! Cleaning, standardization, filtering and aggregation of trial rows
//!
//! Data flows strictly downstream:
//!   RawTrial -> normalize -> TrialRecord -> clean/standardize -> CleanTrial
//!   -> filter -> aggregate
//!
//! Every stage returns new values; nothing reaches back into a snapshot.

pub mod aggregate;
pub mod clean;
pub mod filter;
pub mod normalize;
pub mod snapshot;
pub mod standardize;

pub use aggregate::Dashboard;
pub use filter::{PhaseSelection, TrialFilter, YearRange};
pub use snapshot::{Dataset, Snapshot};

use chrono::NaiveDate;
use serde::Serialize;

/// Intervention type that qualifies a row for the cleaned set
pub const DRUG_INTERVENTION: &str = "DRUG";

/// Phase label the registry uses for "not applicable"
pub const PHASE_NOT_APPLICABLE: &str = "NA";

/// Statuses that make up the active-trials view
pub const ACTIVE_STATUSES: [&str; 3] = ["ACTIVE", "NOT_YET_RECRUITING", "RECRUITING"];

/// A trial row with dates parsed and years derived
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    pub id: String,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub primary_completion_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub phase: Option<String>,
    pub enrollment: Option<i64>,
    pub intervention_type: Option<String>,
    pub condition: String,
    pub sponsor: Option<String>,
    pub start_year: Option<i32>,
    pub completion_year: Option<i32>,
}

/// A drug trial row that passed the required-field filter
///
/// `phase` and `primary_completion_date` are guaranteed present here, so
/// downstream code never re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanTrial {
    pub id: String,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub primary_completion_date: NaiveDate,
    pub status: Option<String>,
    pub phase: String,
    pub enrollment: Option<i64>,
    pub condition: String,
    pub sponsor: Option<String>,
    pub start_year: Option<i32>,
    pub completion_year: Option<i32>,
    pub standardized_sponsor: Option<String>,
    pub standardized_condition: String,
}
