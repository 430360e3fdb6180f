use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use affinity_core::{
    AffinityEngine, AffinityMatrix, Category, EngineConfig, InMemoryDirectory, MemberDirectory,
    MemberId,
};

mod render;

/// Affinity CLI - profile compatibility and team building
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (TOML). Falls back to $AFFINITY_CONFIG
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 12x12 overall-score grid
    Matrix,

    /// Show the affinity between two categories
    Pair {
        category1: Category,
        category2: Category,
    },

    /// Show the category assigned to a birth date (YYYY-MM-DD)
    Sign { date: NaiveDate },

    /// Aggregate a team from a roster
    Team {
        /// Roster file (JSON array of members)
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Member ids forming the team
        #[arg(required = true, num_args = 2..)]
        ids: Vec<MemberId>,
    },

    /// List conflict-prone pairs among a roster's active members
    Scan {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,
    },

    /// Greedily assemble a high-affinity team
    Optimize {
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Target team size
        #[arg(short, long)]
        size: usize,

        /// Candidate pool (defaults to every active member)
        ids: Vec<MemberId>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Matrix => {
            let matrix = AffinityMatrix::build();
            if cli.json {
                let entries: Vec<_> = matrix.entries().collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", render::grid(&matrix.grid()));
            }
        }
        Commands::Pair {
            category1,
            category2,
        } => {
            let matrix = AffinityMatrix::build();
            let entry = matrix.lookup(category1, category2)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(entry)?);
            } else {
                print!("{}", render::entry(entry));
            }
        }
        Commands::Sign { date } => {
            let category = Category::from_birth_date(date);
            if cli.json {
                let value = serde_json::json!({
                    "date": date,
                    "category": category,
                    "element": category.element(),
                    "symbol": category.symbol().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "{} {} ({})",
                    category.symbol(),
                    category,
                    category.element()
                );
            }
        }
        Commands::Team { roster, ids } => {
            let engine = open_engine(&roster, config)?;
            let result = engine.aggregate_team(&ids)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::team(&result, engine.directory()));
            }
        }
        Commands::Scan { roster } => {
            let engine = open_engine(&roster, config)?;
            let alerts = engine.scan_organization()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                print!("{}", render::alerts(&alerts));
            }
        }
        Commands::Optimize { roster, size, ids } => {
            let engine = open_engine(&roster, config)?;
            let pool: Vec<MemberId> = if ids.is_empty() {
                engine.directory().active_members().iter().map(|m| m.id).collect()
            } else {
                ids
            };

            let result = engine.optimize_team(size, &pool)?;
            tracing::debug!(selected = result.team_size, "optimized team");

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render::team(&result, engine.directory()));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::var_os("AFFINITY_CONFIG").map(PathBuf::from),
    };

    match path {
        Some(path) => EngineConfig::from_file(&path)
            .with_context(|| format!("Loading config '{}'", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn open_engine(
    roster: &Path,
    config: EngineConfig,
) -> anyhow::Result<AffinityEngine<InMemoryDirectory>> {
    let directory = InMemoryDirectory::from_file(roster)?;
    let engine = AffinityEngine::with_config(directory, config)?;
    Ok(engine)
}
