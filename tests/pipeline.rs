use anyhow::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use tempfile::tempdir;

use adtrials::pipeline::{PhaseSelection, TrialFilter, YearRange};
use adtrials::source::create_mirror;
use adtrials::{Config, Dashboard, Dataset, SqliteSource};

struct Study<'a> {
    id: &'a str,
    start: Option<&'a str>,
    completion: Option<&'a str>,
    primary: Option<&'a str>,
    status: &'a str,
    phase: Option<&'a str>,
    intervention: Option<&'a str>,
    condition: &'a str,
    sponsor: Option<&'a str>,
}

fn insert(conn: &Connection, s: &Study) -> Result<()> {
    conn.execute(
        "INSERT INTO studies (nct_id, brief_title, start_date, completion_date,
                              primary_completion_date, overall_status, phase, enrollment)
         VALUES (?, ?, ?, ?, ?, ?, ?, 100)",
        params![
            s.id,
            format!("Study {}", s.id),
            s.start,
            s.completion,
            s.primary,
            s.status,
            s.phase
        ],
    )?;
    conn.execute(
        "INSERT INTO conditions (nct_id, name) VALUES (?, ?)",
        params![s.id, s.condition],
    )?;
    if let Some(kind) = s.intervention {
        conn.execute(
            "INSERT INTO interventions (nct_id, intervention_type, name) VALUES (?, ?, 'x')",
            params![s.id, kind],
        )?;
    }
    if let Some(name) = s.sponsor {
        conn.execute(
            "INSERT INTO sponsors (nct_id, lead_or_collaborator, name) VALUES (?, 'lead', ?)",
            params![s.id, name],
        )?;
    }
    Ok(())
}

fn seed(path: &Path, studies: &[Study]) -> Result<()> {
    create_mirror(path)?;
    let conn = Connection::open(path)?;
    for study in studies {
        insert(&conn, study)?;
    }
    Ok(())
}

fn base<'a>(id: &'a str) -> Study<'a> {
    Study {
        id,
        start: Some("2012-05-01"),
        completion: Some("2018-09-30"),
        primary: Some("2018-03-31"),
        status: "COMPLETED",
        phase: Some("PHASE2"),
        intervention: Some("DRUG"),
        condition: "Alzheimer Disease",
        sponsor: Some("Acme Pharma Inc."),
    }
}

#[test]
fn test_end_to_end_dashboard() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("aact.db");

    seed(
        &path,
        &[
            Study {
                sponsor: Some("Johns Hopkins University"),
                ..base("NCT01")
            },
            Study {
                phase: Some("PHASE1"),
                start: Some("2015-01"),
                completion: Some("2016-12-31"),
                condition: "Mild Cognitive Impairment (MCI)",
                ..base("NCT02")
            },
            Study {
                phase: Some("PHASE1"),
                start: Some("not recorded"),
                ..base("NCT03")
            },
            Study {
                phase: Some("NA"),
                ..base("NCT04")
            },
            Study {
                intervention: Some("BEHAVIORAL"),
                status: "RECRUITING",
                ..base("NCT05")
            },
            Study {
                primary: None,
                ..base("NCT06")
            },
            Study {
                condition: "Parkinson Disease",
                ..base("NCT07")
            },
        ],
    )?;

    let dataset = Dataset::load(SqliteSource::new(&path))?;
    let snapshot = dataset.snapshot();

    assert_eq!(snapshot.raw_rows, 6);
    let mut ids: Vec<&str> = snapshot.trials.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["NCT01", "NCT02", "NCT03"]);
    assert_eq!(snapshot.active.len(), 1);
    assert_eq!(snapshot.active[0].id, "NCT05");

    let filter = Config::default().resolve_filter(&snapshot.trials, None, None, vec![]);
    assert_eq!(filter.years, YearRange::new(2012, 2018));

    let dashboard = Dashboard::build(&snapshot, &filter);
    // NCT03 has no start year, so the range filter drops it
    assert_eq!(dashboard.trial_count, 2);
    assert_eq!(dashboard.trials_over_time.get(&2012), Some(&1));
    assert_eq!(dashboard.trials_over_time.get(&2015), Some(&1));
    assert_eq!(
        dashboard.conditions.get("Mild Cognitive Impairment"),
        Some(&1)
    );
    assert!(dashboard
        .sponsor_phase
        .iter()
        .any(|row| row.sponsor == "University" && row.phase == "PHASE2" && row.count == 1));

    let json = serde_json::to_value(&dashboard)?;
    assert_eq!(json["trial_count"], 2);

    Ok(())
}

#[test]
fn test_phase_filter_narrows_time_series_only_by_phase() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("aact.db");
    seed(
        &path,
        &[
            base("NCT01"),
            Study {
                start: Some("2001-02-03"),
                completion: Some("2003-01-01"),
                ..base("NCT02")
            },
            Study {
                phase: Some("PHASE3"),
                ..base("NCT03")
            },
        ],
    )?;

    let snapshot = Dataset::load(SqliteSource::new(&path))?.snapshot();
    let filter = TrialFilter::new(
        YearRange::new(2010, 2020),
        PhaseSelection::only(["PHASE2"]),
    );
    let dashboard = Dashboard::build(&snapshot, &filter);

    assert_eq!(dashboard.trial_count, 1);
    // the 2001 trial is outside the year range but still on the time series
    assert_eq!(dashboard.trials_over_time.get(&2001), Some(&1));
    assert_eq!(dashboard.trials_over_time.get(&2012), Some(&1));
    assert_eq!(dashboard.phase_distribution, vec![("PHASE2".to_string(), 1)]);
    Ok(())
}

#[test]
fn test_reload_picks_up_new_rows() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("aact.db");
    seed(&path, &[base("NCT01")])?;

    let mut dataset = Dataset::load(SqliteSource::new(&path))?;
    let before = dataset.snapshot();

    insert(&Connection::open(&path)?, &base("NCT02"))?;
    let after = dataset.reload()?;

    assert_eq!(before.trials.len(), 1);
    assert_eq!(after.trials.len(), 2);
    Ok(())
}

#[test]
fn test_missing_database_surfaces_error() {
    let dir = tempdir().unwrap();
    let result = Dataset::load(SqliteSource::new(dir.path().join("missing.db")));
    let err = result.err().expect("load should fail");
    assert!(err.to_string().contains("missing.db"));
}
