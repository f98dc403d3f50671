//! Stayfolio CLI
//!
//! Browse, create, update, delete and share apartment listings from the
//! terminal. Configuration comes from `STAYFOLIO_*` environment variables
//! (a `.env` file is honoured); the session persists between runs.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

/// Command line interface for Stayfolio
#[derive(Parser, Debug)]
#[command(name = "stayfolio")]
#[command(about = "Stayfolio - apartment catalog client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "STAYFOLIO_PASSWORD", hide_env_values = true)]
        password: String,

        /// View that required the login; shown as the next step
        #[arg(long)]
        from: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the current session and what it unlocks
    Whoami,

    /// List apartments
    List,

    /// Show one apartment
    Show {
        /// Apartment id
        id: String,
    },

    /// Create an apartment (login required)
    Create {
        #[command(flatten)]
        fields: FormArgs,
    },

    /// Update an apartment; omitted fields keep their current value (login required)
    Update {
        /// Apartment id
        id: String,

        #[command(flatten)]
        fields: FormArgs,
    },

    /// Delete an apartment
    Delete {
        /// Apartment id
        id: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the public share link of an apartment
    Share {
        /// Apartment id
        id: String,
    },
}

/// Apartment form fields. Empty values clear optional fields.
#[derive(Args, Debug, Default)]
struct FormArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    address: Option<String>,

    /// Surface area in square meters
    #[arg(long)]
    surface: Option<String>,

    #[arg(long)]
    rooms: Option<String>,

    #[arg(long)]
    price_per_night: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    image_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    stayfolio_client::metrics::describe_metrics();

    commands::run(cli.command).await
}
