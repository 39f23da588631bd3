// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! liftwire CLI - PulseTrack from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in (credentials from env: LIFTWIRE_USERNAME / LIFTWIRE_PASSWORD)
//! liftwire login
//!
//! # Log in with a visible browser window, for debugging the flow
//! liftwire login --headful
//!
//! # Show the authenticated user's profile
//! liftwire profile
//!
//! # Workouts
//! liftwire workouts list
//! liftwire workouts show w1
//! liftwire workouts add --title "Morning run" --activity running --duration-mins 30
//! liftwire workouts delete w1
//!
//! # JSON output
//! liftwire profile --format json --pretty
//!
//! # Log out (clears the stored session)
//! liftwire logout
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{login, logout, profile, workouts};

// ============================================================================
// CLI Definition
// ============================================================================

/// liftwire CLI - unofficial PulseTrack client.
#[derive(Parser)]
#[command(name = "liftwire")]
#[command(about = "Unofficial PulseTrack fitness platform client")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Session file path (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in through the browser flow and store the session.
    Login(login::LoginArgs),
    /// Clear the stored session.
    Logout,
    /// Show the authenticated user's profile.
    Profile,
    /// Inspect and manage workouts.
    Workouts(workouts::WorkoutsArgs),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON, optionally pretty-printed.
    Json,
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Login(args) => login::run(args, &cli).await,
        Commands::Logout => logout::run(&cli).await,
        Commands::Profile => profile::run(&cli).await,
        Commands::Workouts(args) => workouts::run(args, &cli).await,
    }
}
