//! Year-range and phase-set filtering

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::CleanTrial;

/// Inclusive year interval. `None` leaves that side open; an inverted
/// range simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// No bound on either side
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Earliest start year to latest completion year in the data
    pub fn spanning(trials: &[CleanTrial]) -> Option<Self> {
        let start = trials.iter().filter_map(|t| t.start_year).min()?;
        let end = trials.iter().filter_map(|t| t.completion_year).max()?;
        Some(Self::new(start, end))
    }

    /// Both years must be present; a missing year never matches
    pub fn contains(&self, start_year: Option<i32>, completion_year: Option<i32>) -> bool {
        match (start_year, completion_year) {
            (Some(s), Some(c)) => {
                self.start.map_or(true, |lo| s >= lo) && self.end.map_or(true, |hi| c <= hi)
            }
            _ => false,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(lo), Some(hi)) => write!(f, "{lo}–{hi}"),
            (Some(lo), None) => write!(f, "from {lo}"),
            (None, Some(hi)) => write!(f, "until {hi}"),
            (None, None) => write!(f, "all years"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSelection {
    /// Every phase present in the cleaned data
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl PhaseSelection {
    pub fn only<I, S>(phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(phases.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, phase: &str) -> bool {
        match self {
            PhaseSelection::All => true,
            PhaseSelection::Only(set) => set.contains(phase),
        }
    }
}

/// The user's year range and phase choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialFilter {
    pub years: YearRange,
    pub phases: PhaseSelection,
}

impl TrialFilter {
    pub fn new(years: YearRange, phases: PhaseSelection) -> Self {
        Self { years, phases }
    }

    pub fn matches(&self, trial: &CleanTrial) -> bool {
        self.years.contains(trial.start_year, trial.completion_year)
            && self.phases.allows(&trial.phase)
    }

    /// A new view over `trials`; the slice itself is untouched
    pub fn apply<'a>(&self, trials: &'a [CleanTrial]) -> Vec<&'a CleanTrial> {
        trials.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Trials restricted by phase only (the time series ignores the year range)
pub fn phase_only<'a>(
    trials: &'a [CleanTrial],
    phases: &PhaseSelection,
) -> Vec<&'a CleanTrial> {
    trials.iter().filter(|t| phases.allows(&t.phase)).collect()
}

/// Distinct phase labels, sorted
pub fn available_phases(trials: &[CleanTrial]) -> Vec<String> {
    trials
        .iter()
        .map(|t| t.phase.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
