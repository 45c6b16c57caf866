//! Home command handlers.

use homelist_core::{HomeForm, ListingService};

use crate::cli::{GlobalOpts, HomesArgs, HomesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    service: &ListingService,
    args: HomesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        HomesCommand::List {
            page,
            limit,
            filter,
        } => {
            service.set_filter(filter.to_filter());
            let limit = limit.unwrap_or(service.config().page_size);
            {
                let _spinner = util::LoadingSpinner::attach(service, global, "Loading homes");
                service.fetch_homes(page, limit).await?;
            }

            let homes = service.paginated_homes();
            let out = util::render_homes(&homes, global)?;
            output::print_output(&out, global.quiet);

            if global.output == OutputFormat::Table {
                let filter = service.active_filter();
                let footer = format!(
                    "page {} of {} ({} homes{})",
                    page.max(1),
                    service.total_pages(),
                    service.total_items(),
                    if filter.is_empty() {
                        String::new()
                    } else {
                        format!(", {}", filter.describe())
                    }
                );
                output::print_output(&footer, global.quiet);
            }
            Ok(())
        }

        HomesCommand::Show { id } => {
            let home = service
                .get_home_by_id(&id)
                .await
                .map_err(CliError::for_home(&id))?;
            let out = util::render_home(&home, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HomesCommand::Create(form_args) => {
            let form = util::fill_form(HomeForm::default(), &form_args)?;
            let home = service.create_home(&form).await?;
            tracing::info!(id = %home.id, "created listing");
            let out = util::render_home(&home, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HomesCommand::Update { id, form } => {
            let existing = service
                .get_home_by_id(&id)
                .await
                .map_err(CliError::for_home(&id))?;
            let form = util::fill_form(HomeForm::from(&existing), &form)?;
            let home = service
                .update_home(&id, &form)
                .await
                .map_err(CliError::for_home(&id))?;
            let out = util::render_home(&home, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
