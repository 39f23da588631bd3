//! Login command - run the browser flow and store the session.

use anyhow::{bail, Context, Result};
use clap::Args;
use liftwire_auth::{LoginFlow, WebAuthConfig};
use liftwire_core::Credentials;
use tracing::info;

use crate::commands::session_store;
use crate::output;
use crate::{Cli, OutputFormat};

/// Environment variable for the account username.
const USERNAME_ENV: &str = "LIFTWIRE_USERNAME";

/// Environment variable for the account password.
const PASSWORD_ENV: &str = "LIFTWIRE_PASSWORD";

/// Arguments for the login command.
#[derive(Args, Default)]
pub struct LoginArgs {
    /// Account username (falls back to LIFTWIRE_USERNAME).
    #[arg(long, short)]
    pub username: Option<String>,

    /// Account password (falls back to LIFTWIRE_PASSWORD; prefer the
    /// environment variable so the password stays out of shell history).
    #[arg(long)]
    pub password: Option<String>,

    /// Show the browser window while the flow runs.
    #[arg(long)]
    pub headful: bool,

    /// Override the login page URL.
    #[arg(long)]
    pub login_url: Option<String>,

    /// Explicit Chromium executable.
    #[arg(long)]
    pub chrome: Option<std::path::PathBuf>,
}

fn env_credential(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn resolve_credentials(args: &LoginArgs) -> Result<Credentials> {
    let username = args
        .username
        .clone()
        .or_else(|| env_credential(USERNAME_ENV));
    let password = args
        .password
        .clone()
        .or_else(|| env_credential(PASSWORD_ENV));

    match (username, password) {
        (Some(u), Some(p)) => Ok(Credentials::new(u, p)),
        _ => bail!(
            "No credentials. Pass --username/--password or set {USERNAME_ENV} and {PASSWORD_ENV}."
        ),
    }
}

/// Runs the login command.
pub async fn run(args: &LoginArgs, cli: &Cli) -> Result<()> {
    let credentials = resolve_credentials(args)?;

    let mut config = WebAuthConfig::default();
    if args.headful {
        config = config.with_headful();
    }
    if let Some(url) = &args.login_url {
        config = config.with_login_url(url.clone());
    }
    if let Some(chrome) = &args.chrome {
        config = config.with_chrome_executable(chrome);
    }

    info!(username = %credentials.username, "Starting browser login");
    let session = LoginFlow::new(config)
        .login(&credentials)
        .await
        .context("Login failed")?;

    let store = session_store(cli)?;
    let user_id = session.user.id.clone();
    let expires_at = session.token.expires_at;
    store
        .set(session)
        .await
        .context("Could not persist session")?;

    match cli.format {
        OutputFormat::Text => {
            println!("Logged in as user {user_id} (token valid until {expires_at})");
        }
        OutputFormat::Json => output::print_json(
            &serde_json::json!({ "user_id": user_id, "expires_at": expires_at }),
            cli.pretty,
        )?,
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_credentials_take_priority() {
        let args = LoginArgs {
            username: Some("flag-user".to_string()),
            password: Some("flag-pass".to_string()),
            ..LoginArgs::default()
        };
        let creds = resolve_credentials(&args).unwrap();
        assert_eq!(creds.username, "flag-user");
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        let args = LoginArgs::default();
        if env_credential(USERNAME_ENV).is_none() || env_credential(PASSWORD_ENV).is_none() {
            assert!(resolve_credentials(&args).is_err());
        }
    }
}
