//! Init command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::source::create_mirror;

pub fn run(db_path: &Path) -> Result<()> {
    create_mirror(db_path)
        .with_context(|| format!("Failed to create trial database at {}", db_path.display()))?;

    println!("✅ Trial database ready at {}", db_path.display());
    println!("   Load the AACT studies, conditions, interventions and sponsors tables into it.");
    Ok(())
}
