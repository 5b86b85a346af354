//! Summary command implementation

use anyhow::Result;
use std::io::BufRead;

use super::{bar, describe_filter, truncate, FilterArgs};
use crate::pipeline::{Dashboard, Dataset, Snapshot};
use crate::source::TrialSource;
use crate::Config;

/// Render the summary, then re-fetch and re-render after each line read
/// from `input`. Stops on `q` or end of input and returns the number of
/// successful reloads. A failed reload keeps showing the previous data.
pub fn watch<S: TrialSource>(
    dataset: &mut Dataset<S>,
    config: &Config,
    args: &FilterArgs,
    json: bool,
    mut input: impl BufRead,
) -> Result<usize> {
    let mut reloads = 0;
    loop {
        run(&dataset.snapshot(), config, args, json)?;

        eprint!("\n[Enter] refresh data, [q] quit: ");
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().eq_ignore_ascii_case("q") {
            return Ok(reloads);
        }

        match dataset.reload() {
            Ok(_) => reloads += 1,
            Err(e) => eprintln!("Refresh failed, showing previous data: {}", e),
        }
    }
}

pub fn run(snapshot: &Snapshot, config: &Config, args: &FilterArgs, json: bool) -> Result<()> {
    let filter = args.resolve(config, &snapshot.trials);
    let dashboard = Dashboard::build(snapshot, &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let width = config.display.bar_width;

    println!("\n{}", "=".repeat(80));
    println!("Alzheimer's Disease Clinical Trials");
    println!(
        "Source: {} | Loaded: {}",
        dashboard.source,
        dashboard.loaded_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!(
        "Rows: {} fetched | {} cleaned drug trials | {} active",
        snapshot.raw_rows,
        snapshot.trials.len(),
        dashboard.active_count
    );
    println!("Filter: {}", describe_filter(&dashboard.filter));
    println!("{}", "=".repeat(80));

    if snapshot.trials.is_empty() {
        println!("\nNo drug trials in the cleaned set. Check the source database.");
        return Ok(());
    }

    println!("\nTrials in selected range: {}", dashboard.trial_count);

    println!("\n## New trials over time (selected phases, all years)");
    let max = dashboard.trials_over_time.values().copied().max().unwrap_or(0);
    for (year, count) in &dashboard.trials_over_time {
        println!("{:<6} {:>5}  {}", year, count, bar(*count, max, width));
    }

    println!("\n## Trials by phase");
    let max = dashboard.phase_distribution.first().map_or(0, |(_, c)| *c);
    for ((phase, count), (_, share)) in dashboard
        .phase_distribution
        .iter()
        .zip(&dashboard.phase_shares)
    {
        println!(
            "{:<16} {:>5} {:>6.1}%  {}",
            phase,
            count,
            share,
            bar(*count, max, width)
        );
    }

    println!("\n## Sponsor vs. phase");
    println!("{:<40} {:<16} {:>6}", "Sponsor", "Phase", "Count");
    println!("{}", "-".repeat(64));
    for row in &dashboard.sponsor_phase {
        println!(
            "{:<40} {:<16} {:>6}",
            truncate(&row.sponsor, 40),
            row.phase,
            row.count
        );
    }

    println!("\n## Trials by condition");
    let max = dashboard.conditions.values().copied().max().unwrap_or(0);
    for (condition, count) in &dashboard.conditions {
        println!(
            "{:<40} {:>5}  {}",
            truncate(condition, 40),
            count,
            bar(*count, max, width)
        );
    }

    println!("\nData source: ClinicalTrials.gov (AACT)");
    Ok(())
}
