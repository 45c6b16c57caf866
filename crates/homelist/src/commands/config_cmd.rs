//! Config subcommand handlers.

use serde::Serialize;

use homelist_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Resolved settings plus where they came from.
#[derive(Serialize)]
struct ConfigView<'a> {
    config_file: String,
    favorites_file: String,
    #[serde(flatten)]
    settings: &'a Config,
}

fn detail(view: &ConfigView<'_>) -> String {
    let body = toml::to_string_pretty(view.settings).unwrap_or_default();
    format!(
        "# config file:    {}\n# favorites file: {}\n\n{body}",
        view.config_file, view.favorites_file
    )
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);

    match args.command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let cfg = config::resolve(global)?;
            cfg.to_listing_config()?;
            homelist_config::save_config_to(&cfg, &path)?;

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  API: {}", cfg.api_url);
                eprintln!("\n  Try it: homelist homes list");
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let view = ConfigView {
                config_file: path.display().to_string(),
                favorites_file: cfg.favorites_path().display().to_string(),
                settings: &cfg,
            };
            let out = output::render_single(global.output, &view, detail, |v| {
                v.settings.api_url.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}
