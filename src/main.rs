use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use adtrials::cli::{active, init, phases, summary, trials, FilterArgs};
use adtrials::logging::init_logging;
use adtrials::{Config, Dataset, SqliteSource};

#[derive(Parser)]
#[command(name = "adtrials")]
#[command(about = "Alzheimer's disease clinical-trial cleaning, filtering and summary tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "adtrials.yaml", global = true)]
    config: String,

    /// Trial database path (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show trial counts, time series and breakdowns for a year range and phases
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Stay open and reload from the database on each Enter
        #[arg(short, long)]
        interactive: bool,
    },

    /// List trials matching the filter
    Trials {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum rows to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List active, recruiting and not-yet-recruiting trials
    Active {
        /// Maximum rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show available phases and the full year range
    Phases,

    /// Create an empty trial database with the expected tables
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config = Config::load(&cli.config)?;
    let db_path = cli.database.unwrap_or_else(|| config.database_path());

    let load = || {
        Dataset::load(SqliteSource::new(&db_path))
            .with_context(|| format!("Failed to load trials from {}", db_path.display()))
    };

    match cli.command {
        Commands::Summary {
            filter,
            json,
            interactive,
        } => {
            let mut dataset = load()?;
            if interactive {
                let stdin = std::io::stdin();
                summary::watch(&mut dataset, &config, &filter, json, stdin.lock())?;
            } else {
                summary::run(&dataset.snapshot(), &config, &filter, json)?;
            }
        }
        Commands::Trials {
            filter,
            limit,
            json,
        } => {
            let snapshot = load()?.snapshot();
            trials::run(&snapshot, &config, &filter, limit, json)?;
        }
        Commands::Active { limit } => {
            let snapshot = load()?.snapshot();
            active::run(&snapshot, &config, limit)?;
        }
        Commands::Phases => {
            let snapshot = load()?.snapshot();
            phases::run(&snapshot)?;
        }
        Commands::Init => {
            init::run(&db_path)?;
        }
    }

    Ok(())
}
