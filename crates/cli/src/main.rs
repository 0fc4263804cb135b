//! Heritage Showcase CLI - browse the catalogs, take the quiz, replay sessions.
//!
//! # Usage
//!
//! ```bash
//! # List textile products
//! heritage catalog products --category textiles
//!
//! # Search the archive, one item per block
//! heritage catalog archive --search axum --view list
//!
//! # Take the bundled quiz with the given answers
//! heritage quiz --answers 0,2,0,2,1
//!
//! # Replay a JSON-lines script of store actions
//! heritage session actions.jsonl
//!
//! # Show the profile page summary
//! heritage profile
//! ```
//!
//! # Commands
//!
//! - `catalog` - Filter and print one catalog
//! - `quiz` - Play the quiz and record the result
//! - `session` - Apply scripted favorites/cart/profile actions
//! - `profile` - Print the user profile and statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use heritage_showcase::AppState;
use heritage_showcase::config::ShowcaseConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::catalog::CatalogArgs;

#[derive(Parser)]
#[command(name = "heritage")]
#[command(author, version, about = "Heritage Showcase CLI")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and print a catalog
    Catalog(CatalogArgs),
    /// Take the quiz with a fixed list of answers
    Quiz {
        /// Selected option index per question, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
    },
    /// Replay a JSON-lines script of store actions
    Session {
        /// Script path, or `-` for stdin
        script: String,

        /// Print the final store state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the user profile and statistics
    Profile,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only carries command output.
fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "heritage_showcase=info,heritage_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ShowcaseConfig::from_env()?;
    let state = AppState::load(config)?;

    match cli.command {
        Commands::Catalog(args) => commands::catalog::run(&state, &args).await?,
        Commands::Quiz { answers } => commands::quiz::run(&state, &answers)?,
        Commands::Session { script, json } => commands::session::run(&state, &script, json)?,
        Commands::Profile => commands::profile::run(&state),
    }
    Ok(())
}
