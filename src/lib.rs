pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod source;

pub use config::Config;
pub use pipeline::{CleanTrial, Dashboard, Dataset, Snapshot, TrialFilter, TrialRecord};
pub use source::{RawTrial, SourceError, SqliteSource, TrialSource};
