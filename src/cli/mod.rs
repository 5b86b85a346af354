//! CLI command implementations and shared text rendering

pub mod active;
pub mod init;
pub mod phases;
pub mod summary;
pub mod trials;

use clap::Args;

use crate::pipeline::{CleanTrial, PhaseSelection, TrialFilter};
use crate::Config;

/// Year range and phase controls shared by the reporting commands
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Earliest start year (inclusive)
    #[arg(long)]
    pub from: Option<i32>,

    /// Latest completion year (inclusive)
    #[arg(long)]
    pub to: Option<i32>,

    /// Phase to include; repeat for more (default: all phases)
    #[arg(short, long = "phase")]
    pub phases: Vec<String>,
}

impl FilterArgs {
    pub fn resolve(&self, config: &Config, trials: &[CleanTrial]) -> TrialFilter {
        config.resolve_filter(trials, self.from, self.to, self.phases.clone())
    }
}

/// Horizontal bar scaled so `max` fills `width`
pub(crate) fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(max);
    "█".repeat(len.min(width))
}

/// Cut `text` to `max` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let text = text.lines().next().unwrap_or(text);
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub(crate) fn describe_filter(filter: &TrialFilter) -> String {
    let phases = match &filter.phases {
        PhaseSelection::All => "all".to_string(),
        PhaseSelection::Only(set) => set.iter().cloned().collect::<Vec<_>>().join(", "),
    };
    format!("years: {} | phases: {}", filter.years, phases)
}
