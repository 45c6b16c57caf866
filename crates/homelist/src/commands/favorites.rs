//! Favorites command handlers.

use homelist_core::ListingService;

use crate::cli::{FavoritesArgs, FavoritesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    service: &ListingService,
    args: FavoritesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FavoritesCommand::List { filter } => {
            service.set_filter(filter.to_filter());
            let homes = service.favorites_homes();
            let out = util::render_homes(&homes, global)?;
            output::print_output(&out, global.quiet);

            if global.output == OutputFormat::Table {
                let total = service.favorites().len();
                let footer = if homes.len() == total {
                    format!("{total} favorites")
                } else {
                    format!("{} of {total} favorites match", homes.len())
                };
                output::print_output(&footer, global.quiet);
            }
            Ok(())
        }

        FavoritesCommand::Toggle { id } => {
            // A saved favorite can be removed without asking the server.
            let home = match service.favorites().into_iter().find(|h| h.id == id) {
                Some(home) => home,
                None => service
                    .get_home_by_id(&id)
                    .await
                    .map_err(CliError::for_home(&id))?,
            };

            let now_favorite = service.toggle_favorite(&home)?;
            let message = if now_favorite {
                let star = output::star(true, output::should_color(global.color));
                format!("{star} Added '{}' to favorites", home.title)
            } else {
                format!("Removed '{}' from favorites", home.title)
            };

            match global.output {
                OutputFormat::Table => output::print_output(&message, global.quiet),
                _ => {
                    let out = util::render_home(&home.with_favorite(now_favorite), global)?;
                    output::print_output(&out, global.quiet);
                }
            }
            Ok(())
        }
    }
}
