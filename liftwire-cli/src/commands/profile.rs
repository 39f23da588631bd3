//! Profile command - show the authenticated user.

use anyhow::{Context, Result};

use crate::commands::api_client;
use crate::output;
use crate::{Cli, OutputFormat};

/// Runs the profile command.
pub async fn run(cli: &Cli) -> Result<()> {
    let api = api_client(cli)?;
    let user = api.profile().await.context("Could not fetch profile")?;

    match cli.format {
        OutputFormat::Text => print!("{}", output::render_user(&user)),
        OutputFormat::Json => output::print_json(&user, cli.pretty)?,
    }
    Ok(())
}
