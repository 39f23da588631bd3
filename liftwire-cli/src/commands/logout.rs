//! Logout command - clear the stored session.

use anyhow::{Context, Result};
use tracing::info;

use crate::commands::session_store;
use crate::output;
use crate::{Cli, OutputFormat};

/// Runs the logout command.
pub async fn run(cli: &Cli) -> Result<()> {
    let store = session_store(cli)?;
    store.clear().await.context("Could not clear session")?;
    info!("Session cleared");

    match cli.format {
        OutputFormat::Text => println!("Logged out."),
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({ "logged_out": true }), cli.pretty)?;
        }
    }
    Ok(())
}
