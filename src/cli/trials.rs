//! Trials command implementation

use anyhow::Result;

use super::{describe_filter, truncate, FilterArgs};
use crate::pipeline::Snapshot;
use crate::Config;

pub fn run(
    snapshot: &Snapshot,
    config: &Config,
    args: &FilterArgs,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let filter = args.resolve(config, &snapshot.trials);
    let selected = filter.apply(&snapshot.trials);

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No trials match {}.", describe_filter(&filter));
        return Ok(());
    }

    let limit = limit.unwrap_or(config.display.list_limit);

    println!(
        "{:<12} {:<14} {:<6} {:<6} {:<20} {:<22} {}",
        "NCT ID", "Phase", "Start", "End", "Sponsor", "Condition", "Title"
    );
    println!("{}", "-".repeat(110));

    for trial in selected.iter().take(limit) {
        let year = |y: Option<i32>| y.map_or_else(|| "-".to_string(), |y| y.to_string());

        println!(
            "{:<12} {:<14} {:<6} {:<6} {:<20} {:<22} {}",
            trial.id,
            trial.phase,
            year(trial.start_year),
            year(trial.completion_year),
            truncate(trial.standardized_sponsor.as_deref().unwrap_or("-"), 20),
            truncate(&trial.standardized_condition, 22),
            truncate(trial.title.as_deref().unwrap_or("-"), 35),
        );
    }

    if selected.len() > limit {
        println!("... {} more (use --limit)", selected.len() - limit);
    }
    println!("\n{} rows | {}", selected.len(), describe_filter(&filter));

    Ok(())
}
