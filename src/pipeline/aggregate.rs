//! Group-and-count views and the assembled dashboard

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::filter::{phase_only, TrialFilter};
use super::{CleanTrial, Snapshot};

fn count_by<'a, K, I, F>(trials: I, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = &'a CleanTrial>,
    F: Fn(&'a CleanTrial) -> Option<K>,
{
    let mut counts = BTreeMap::new();
    for key in trials.into_iter().filter_map(key) {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// New trials per start year; rows without a start year are skipped
pub fn trials_per_start_year<'a>(
    trials: impl IntoIterator<Item = &'a CleanTrial>,
) -> BTreeMap<i32, usize> {
    count_by(trials, |t| t.start_year)
}

pub fn count_by_phase<'a>(
    trials: impl IntoIterator<Item = &'a CleanTrial>,
) -> BTreeMap<String, usize> {
    count_by(trials, |t| Some(t.phase.clone()))
}

pub fn count_by_sponsor_and_phase<'a>(
    trials: impl IntoIterator<Item = &'a CleanTrial>,
) -> BTreeMap<(String, String), usize> {
    count_by(trials, |t| {
        t.standardized_sponsor
            .clone()
            .map(|sponsor| (sponsor, t.phase.clone()))
    })
}

pub fn count_by_condition<'a>(
    trials: impl IntoIterator<Item = &'a CleanTrial>,
) -> BTreeMap<String, usize> {
    count_by(trials, |t| Some(t.standardized_condition.clone()))
}

/// Largest count first, ties by key
pub fn ranked<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Percentage share of each group, in `ranked` order
pub fn shares<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Vec<(K, f64)> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return vec![];
    }
    ranked(counts)
        .into_iter()
        .map(|(k, n)| (k, n as f64 * 100.0 / total as f64))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SponsorPhaseCount {
    pub sponsor: String,
    pub phase: String,
    pub count: usize,
}

/// Everything the summary view shows for one filter choice
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub filter: TrialFilter,
    pub trial_count: usize,
    pub active_count: usize,
    pub trials_over_time: BTreeMap<i32, usize>,
    pub phase_distribution: Vec<(String, usize)>,
    pub phase_shares: Vec<(String, f64)>,
    pub sponsor_phase: Vec<SponsorPhaseCount>,
    pub conditions: BTreeMap<String, usize>,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, filter: &TrialFilter) -> Self {
        let selected = filter.apply(&snapshot.trials);
        let phases = count_by_phase(selected.iter().copied());

        let sponsor_phase = count_by_sponsor_and_phase(selected.iter().copied())
            .into_iter()
            .map(|((sponsor, phase), count)| SponsorPhaseCount {
                sponsor,
                phase,
                count,
            })
            .collect();

        Self {
            source: snapshot.source.clone(),
            loaded_at: snapshot.loaded_at,
            filter: filter.clone(),
            trial_count: selected.len(),
            active_count: snapshot.active.len(),
            trials_over_time: trials_per_start_year(phase_only(&snapshot.trials, &filter.phases)),
            phase_distribution: ranked(&phases),
            phase_shares: shares(&phases),
            sponsor_phase,
            conditions: count_by_condition(selected.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::filter::tests::trial;

    #[test]
    fn test_phase_distribution_counts() {
        let trials = vec![
            trial("PHASE1", Some(2012), Some(2018)),
            trial("PHASE1", Some(2013), Some(2019)),
            trial("PHASE2", Some(2014), Some(2020)),
        ];
        let counts = count_by_phase(&trials);
        assert_eq!(counts.get("PHASE1"), Some(&2));
        assert_eq!(counts.get("PHASE2"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_time_series_skips_missing_year() {
        let trials = vec![
            trial("PHASE1", Some(2012), None),
            trial("PHASE2", Some(2012), None),
            trial("PHASE2", None, None),
        ];
        let series = trials_per_start_year(&trials);
        assert_eq!(series, BTreeMap::from([(2012, 2)]));
    }

    #[test]
    fn test_sponsor_phase_skips_missing_sponsor() {
        let mut a = trial("PHASE1", None, None);
        a.standardized_sponsor = Some("University".into());
        let mut b = trial("PHASE2", None, None);
        b.standardized_sponsor = Some("University".into());
        let c = trial("PHASE2", None, None);

        let counts = count_by_sponsor_and_phase([&a, &b, &c, &b]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&("University".to_string(), "PHASE2".to_string())], 2);
    }

    #[test]
    fn test_ranked_and_shares() {
        let counts = BTreeMap::from([("PHASE1".to_string(), 1), ("PHASE2".to_string(), 3)]);
        assert_eq!(
            ranked(&counts),
            vec![("PHASE2".to_string(), 3), ("PHASE1".to_string(), 1)]
        );

        let pct = shares(&counts);
        assert_eq!(pct[0].0, "PHASE2");
        assert!((pct[0].1 - 75.0).abs() < 1e-9);
        assert!((pct.iter().map(|(_, p)| p).sum::<f64>() - 100.0).abs() < 1e-9);

        assert!(shares(&BTreeMap::<String, usize>::new()).is_empty());
    }
}
