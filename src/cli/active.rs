//! Active command implementation

use anyhow::Result;

use super::truncate;
use crate::pipeline::Snapshot;
use crate::Config;

pub fn run(snapshot: &Snapshot, config: &Config, limit: Option<usize>) -> Result<()> {
    if snapshot.active.is_empty() {
        println!("No active, recruiting or not-yet-recruiting trials found.");
        return Ok(());
    }

    let limit = limit.unwrap_or(config.display.list_limit);

    println!(
        "{:<12} {:<20} {:<14} {:<10} {}",
        "NCT ID", "Status", "Phase", "Start", "Condition"
    );
    println!("{}", "-".repeat(90));

    for record in snapshot.active.iter().take(limit) {
        println!(
            "{:<12} {:<20} {:<14} {:<10} {}",
            record.id,
            record.status.as_deref().unwrap_or("-"),
            record.phase.as_deref().unwrap_or("-"),
            record
                .start_date
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            truncate(&record.condition, 40),
        );
    }

    if snapshot.active.len() > limit {
        println!("... {} more (use --limit)", snapshot.active.len() - limit);
    }

    Ok(())
}
