//! CLI subcommands.

pub mod login;
pub mod logout;
pub mod profile;
pub mod workouts;

use std::sync::Arc;

use anyhow::Result;
use liftwire_client::{ApiClient, ClientConfig, HttpEngine};
use liftwire_core::SessionStore;
use liftwire_store::FileSessionStore;

use crate::Cli;

/// Opens the session store the CLI persists sessions in.
pub fn session_store(cli: &Cli) -> Result<Arc<dyn SessionStore>> {
    let store = match &cli.session_file {
        Some(path) => FileSessionStore::new(path),
        None => FileSessionStore::at_default_path()?,
    };
    Ok(Arc::new(store))
}

/// Builds an API client reading bearer tokens from the CLI's store.
pub fn api_client(cli: &Cli) -> Result<ApiClient> {
    let engine = HttpEngine::new(ClientConfig::default())?.with_session_store(session_store(cli)?);
    Ok(ApiClient::new(engine))
}
