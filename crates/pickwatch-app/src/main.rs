// Pickwatch entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file; stdout carries command output)
// 4. Dispatch the subcommand and print its output

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pickwatch_app::commands::{self, Session, SimulateOptions};
use pickwatch_app::config::{self, Config};
use tracing::info;

#[derive(Parser)]
#[command(name = "pickwatch")]
#[command(about = "Track who owns traded draft picks and simulate the lottery")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a protection description and print the structured rule
    Parse {
        /// Protection text, e.g. "Protected 1-4 only; if 5-30 goes to BOS"
        text: String,
    },
    /// Print the current owner of every traded pick
    Resolve {
        #[arg(long)]
        json: bool,
    },
    /// Print the lottery odds table
    Odds,
    /// Seed the lottery from current records and simulate draws
    Simulate {
        /// Number of draws; 1 prints a single draw with pick ownership
        #[arg(long)]
        runs: Option<usize>,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// List registered complex multi-team scenarios
    Scenarios,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(&cwd, &config)?;
    info!(
        "Config loaded: standings={}, picks={}, runs={}",
        config.data.standings, config.data.picks, config.lottery.runs
    );

    let session = Session::new(&cwd, config);
    let output = match cli.command {
        Command::Parse { text } => commands::parse_command(&text)?,
        Command::Resolve { json } => commands::resolve_command(&session, json).await?,
        Command::Odds => commands::odds_command(),
        Command::Simulate { runs, seed, json } => {
            commands::simulate_command(&session, SimulateOptions { runs, seed, json }).await?
        }
        Command::Scenarios => commands::scenarios_command(&session.registry),
    };
    println!("{}", output.trim_end());

    Ok(())
}

/// Initialize tracing to log to a file under the configured directory.
fn init_tracing(base_dir: &Path, config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("pickwatch.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
