//! Required-field filter and the active-trials view

use tracing::{debug, info};

use super::standardize::{standardize_condition, standardize_sponsor};
use super::{CleanTrial, TrialRecord, ACTIVE_STATUSES, DRUG_INTERVENTION, PHASE_NOT_APPLICABLE};

/// Why a record did not make the cleaned set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotDrug,
    NoPhase,
    NoPrimaryCompletion,
}

/// Promote a record to a `CleanTrial`, or report the first clause it fails
pub fn qualify(record: TrialRecord) -> Result<CleanTrial, Rejection> {
    if record.intervention_type.as_deref() != Some(DRUG_INTERVENTION) {
        return Err(Rejection::NotDrug);
    }

    let phase = match record.phase {
        Some(phase) if phase != PHASE_NOT_APPLICABLE => phase,
        _ => return Err(Rejection::NoPhase),
    };

    let primary_completion_date = record
        .primary_completion_date
        .ok_or(Rejection::NoPrimaryCompletion)?;

    let standardized_sponsor = record.sponsor.as_deref().map(standardize_sponsor);
    let standardized_condition = standardize_condition(&record.condition);

    Ok(CleanTrial {
        id: record.id,
        title: record.title,
        start_date: record.start_date,
        completion_date: record.completion_date,
        primary_completion_date,
        status: record.status,
        phase,
        enrollment: record.enrollment,
        condition: record.condition,
        sponsor: record.sponsor,
        start_year: record.start_year,
        completion_year: record.completion_year,
        standardized_sponsor,
        standardized_condition,
    })
}

/// Keep drug trials with a real phase and a primary completion date
pub fn clean(records: Vec<TrialRecord>) -> Vec<CleanTrial> {
    let total = records.len();
    let (mut not_drug, mut no_phase, mut no_primary) = (0usize, 0usize, 0usize);

    let cleaned: Vec<CleanTrial> = records
        .into_iter()
        .filter_map(|record| match qualify(record) {
            Ok(trial) => Some(trial),
            Err(reason) => {
                match reason {
                    Rejection::NotDrug => not_drug += 1,
                    Rejection::NoPhase => no_phase += 1,
                    Rejection::NoPrimaryCompletion => no_primary += 1,
                }
                None
            }
        })
        .collect();

    debug!(not_drug, no_phase, no_primary, "records dropped by required-field filter");
    info!(kept = cleaned.len(), dropped = total - cleaned.len(), "cleaned trial set");
    cleaned
}

/// Records whose status marks the trial as ongoing or about to start
pub fn active_trials(records: &[TrialRecord]) -> Vec<TrialRecord> {
    records
        .iter()
        .filter(|r| {
            r.status
                .as_deref()
                .is_some_and(|s| ACTIVE_STATUSES.contains(&s))
        })
        .cloned()
        .collect()
}
