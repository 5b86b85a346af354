//! Phases command implementation

use anyhow::Result;

use crate::pipeline::aggregate::count_by_phase;
use crate::pipeline::filter::available_phases;
use crate::pipeline::{Snapshot, YearRange};

pub fn run(snapshot: &Snapshot) -> Result<()> {
    let phases = available_phases(&snapshot.trials);

    if phases.is_empty() {
        println!("No phases available. The cleaned set is empty.");
        return Ok(());
    }

    match YearRange::spanning(&snapshot.trials) {
        Some(span) => println!("Year range: {}", span),
        None => println!("Year range: - (no trial has both a start and completion year)"),
    }

    let counts = count_by_phase(&snapshot.trials);
    println!("\n{:<16} {:>6}", "Phase", "Trials");
    println!("{}", "-".repeat(23));
    for phase in phases {
        println!("{:<16} {:>6}", phase, counts.get(&phase).copied().unwrap_or(0));
    }

    Ok(())
}
