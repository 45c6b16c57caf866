//! Command dispatch: bridges CLI args -> listing service -> output formatting.

pub mod cities;
pub mod config_cmd;
pub mod favorites;
pub mod homes;
pub mod util;

use homelist_core::ListingService;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &ListingService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Homes(args) => homes::handle(service, args, global).await,
        Command::Favorites(args) => favorites::handle(service, args, global).await,
        // Handled before a service is built
        Command::Cities | Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not use the listing service".into(),
        )),
    }
}
