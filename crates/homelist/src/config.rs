//! CLI-aware configuration: file + env from `homelist-config`, then
//! global flag overrides, then service construction.

use std::path::PathBuf;
use std::sync::Arc;

use homelist_config::Config;
use homelist_core::{JsonFileStore, ListingService};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` or the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(homelist_config::config_path)
}

/// Load file + env config and apply global flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = homelist_config::load_config_from(&config_path(global))?;
    if let Some(ref url) = global.api_url {
        cfg.api_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if let Some(ref path) = global.favorites_file {
        cfg.favorites_path = Some(path.clone());
    }
    Ok(cfg)
}

/// Build the listing service for a resolved config.
pub fn build_service(cfg: &Config) -> Result<ListingService, CliError> {
    let listing = cfg.to_listing_config()?;
    let favorites_path = cfg.favorites_path();
    tracing::debug!(
        api_url = %listing.api_url,
        favorites = %favorites_path.display(),
        ordering = %listing.fetch_ordering,
        "building listing service"
    );
    let store = Arc::new(JsonFileStore::new(favorites_path));
    Ok(ListingService::new(listing, store)?)
}
