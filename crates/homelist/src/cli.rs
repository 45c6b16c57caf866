//! Clap derive structures for the `homelist` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use homelist_core::model::filter::{BATHROOM_OPTIONS, ROOM_OPTIONS};
use homelist_core::{City, HomeFilter, HomeId};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// homelist -- browse and favorite property listings
#[derive(Debug, Parser)]
#[command(
    name = "homelist",
    version,
    about = "Browse, filter, and favorite property listings",
    long_about = "A command-line client for a paginated property listings API.\n\n\
        Lists homes page by page, narrows them by city, rooms, bathrooms and pool,\n\
        creates and edits listings, and keeps a local set of favorites.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Listings API base URL (overrides config)
    #[arg(long, short = 'u', global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Favorites file (overrides config)
    #[arg(long = "favorites", value_name = "FILE", global = true)]
    pub favorites_file: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse, create, and edit listings
    #[command(alias = "h")]
    Homes(HomesArgs),

    /// Manage locally saved favorites
    #[command(alias = "fav")]
    Favorites(FavoritesArgs),

    /// List the cities a listing can be created in
    Cities,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Filter Arguments ──────────────────────────────────────────

/// Filter flags shared by `homes list` and `favorites list`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Only homes in this city
    #[arg(long, value_parser = parse_city)]
    pub city: Option<City>,

    /// At least this many rooms
    #[arg(long, value_parser = parse_min_rooms)]
    pub min_rooms: Option<u32>,

    /// At least this many bathrooms
    #[arg(long, value_parser = parse_min_bathrooms)]
    pub min_bathrooms: Option<u32>,

    /// Only homes with a pool
    #[arg(long, conflicts_with = "no_pool")]
    pub pool: bool,

    /// Only homes without a pool
    #[arg(long)]
    pub no_pool: bool,
}

impl FilterArgs {
    pub fn to_filter(&self) -> HomeFilter {
        HomeFilter::default()
            .with_city(self.city)
            .with_min_rooms(self.min_rooms)
            .with_min_bathrooms(self.min_bathrooms)
            .with_pool(pool_flag(self.pool, self.no_pool))
    }
}

fn pool_flag(pool: bool, no_pool: bool) -> Option<bool> {
    match (pool, no_pool) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn parse_city(s: &str) -> Result<City, String> {
    s.parse()
        .map_err(|_| format!("unknown city '{s}' (expected one of: {})", City::catalogue()))
}

fn parse_threshold(s: &str, options: &[u32]) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if options.contains(&n) {
        Ok(n)
    } else {
        let (min, max) = (options.first().copied(), options.last().copied());
        Err(format!(
            "must be between {} and {}",
            min.unwrap_or_default(),
            max.unwrap_or_default()
        ))
    }
}

fn parse_min_rooms(s: &str) -> Result<u32, String> {
    parse_threshold(s, &ROOM_OPTIONS)
}

fn parse_min_bathrooms(s: &str) -> Result<u32, String> {
    parse_threshold(s, &BATHROOM_OPTIONS)
}

// ── Homes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HomesArgs {
    #[command(subcommand)]
    pub command: HomesCommand,
}

#[derive(Debug, Subcommand)]
pub enum HomesCommand {
    /// List one page of homes
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, short = 'p', default_value = "1")]
        page: u32,

        /// Homes per page (defaults to the configured page size)
        #[arg(long, short = 'l')]
        limit: Option<u32>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show a single home
    #[command(alias = "get")]
    Show {
        /// Home ID
        id: HomeId,
    },

    /// Create a new listing
    Create(HomeFormArgs),

    /// Edit an existing listing
    Update {
        /// Home ID
        id: HomeId,

        #[command(flatten)]
        form: HomeFormArgs,
    },
}

/// Listing fields. Unset flags keep the form's current value.
#[derive(Debug, Default, Args)]
pub struct HomeFormArgs {
    /// Listing title (5-100 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Listing description (10-500 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// City (see `homelist cities`)
    #[arg(long)]
    pub city: Option<String>,

    /// Number of rooms (1-10)
    #[arg(long, allow_negative_numbers = true)]
    pub rooms: Option<i64>,

    /// Number of bathrooms (1-10)
    #[arg(long, allow_negative_numbers = true)]
    pub bathrooms: Option<i64>,

    /// The home has a pool
    #[arg(long, conflicts_with = "no_pool")]
    pub pool: bool,

    /// The home has no pool
    #[arg(long)]
    pub no_pool: bool,

    /// Picture URL (http:// or https://)
    #[arg(long)]
    pub picture: Option<String>,

    /// Read fields from a JSON file before applying flags
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

impl HomeFormArgs {
    pub fn has_pool(&self) -> Option<bool> {
        pool_flag(self.pool, self.no_pool)
    }
}

// ── Favorites ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List saved favorites, optionally filtered
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add a home to favorites, or remove it if already saved
    Toggle {
        /// Home ID
        id: HomeId,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with current settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
