//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tabled::Tabled;
use tokio::task::JoinHandle;

use homelist_core::{Home, HomeForm, ListingService};

use crate::cli::{GlobalOpts, HomeFormArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Home rendering ──────────────────────────────────────────────────

#[derive(Tabled)]
pub struct HomeRow {
    #[tabled(rename = "")]
    star: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Rooms")]
    rooms: u32,
    #[tabled(rename = "Baths")]
    bathrooms: u32,
    #[tabled(rename = "Pool")]
    pool: String,
}

impl HomeRow {
    pub fn new(home: &Home, color: bool) -> Self {
        Self {
            star: output::star(home.is_favorite, color),
            id: home.id.to_string(),
            title: home.title.clone(),
            city: home.city.clone(),
            rooms: home.rooms,
            bathrooms: home.bathrooms,
            pool: yes_no(home.has_pool).into(),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

pub fn home_detail(home: &Home) -> String {
    [
        format!("ID:          {}", home.id),
        format!("Title:       {}", home.title),
        format!("City:        {}", home.city),
        format!("Rooms:       {}", home.rooms),
        format!("Bathrooms:   {}", home.bathrooms),
        format!("Pool:        {}", yes_no(home.has_pool)),
        format!("Picture:     {}", home.picture),
        format!("Favorite:    {}", yes_no(home.is_favorite)),
        String::new(),
        home.description.clone(),
    ]
    .join("\n")
}

/// Render a list of homes in the selected format.
pub fn render_homes(homes: &[Home], global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(global.color);
    output::render_list(
        global.output,
        homes,
        |h| HomeRow::new(h, color),
        |h| h.id.to_string(),
    )
}

pub fn render_home(home: &Home, global: &GlobalOpts) -> Result<String, CliError> {
    output::render_single(global.output, home, home_detail, |h| h.id.to_string())
}

// ── Loading spinner ─────────────────────────────────────────────────

/// Terminal spinner that follows the service's `is_loading` cell.
///
/// Cleared when dropped.
pub struct LoadingSpinner {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl LoadingSpinner {
    /// Attach to `service`, or `None` when stderr is not a terminal or
    /// the output is meant for scripts.
    pub fn attach(service: &ListingService, global: &GlobalOpts, message: &str) -> Option<Self> {
        if global.quiet || global.output != OutputFormat::Table || !io::stderr().is_terminal() {
            return None;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_owned());

        let mut loading = service.subscribe_is_loading();
        let task_bar = bar.clone();
        let task = tokio::spawn(async move {
            while let Some(is_loading) = loading.changed().await {
                if is_loading {
                    task_bar.enable_steady_tick(Duration::from_millis(80));
                } else {
                    task_bar.disable_steady_tick();
                    task_bar.finish_and_clear();
                }
            }
        });

        Some(Self { bar, task })
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.task.abort();
        self.bar.finish_and_clear();
    }
}

// ── Form input ──────────────────────────────────────────────────────

/// Field set accepted by `--from-file`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FormFile {
    title: Option<String>,
    description: Option<String>,
    city: Option<String>,
    rooms: Option<i64>,
    bathrooms: Option<i64>,
    has_pool: Option<bool>,
    picture: Option<String>,
}

fn read_form_file(path: &Path) -> Result<FormFile, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Overlay `--from-file` contents, then flags, onto `form`.
pub fn fill_form(mut form: HomeForm, args: &HomeFormArgs) -> Result<HomeForm, CliError> {
    if let Some(ref path) = args.from_file {
        let file = read_form_file(path)?;
        overlay(&mut form, file);
    }
    overlay(
        &mut form,
        FormFile {
            title: args.title.clone(),
            description: args.description.clone(),
            city: args.city.clone(),
            rooms: args.rooms,
            bathrooms: args.bathrooms,
            has_pool: args.has_pool(),
            picture: args.picture.clone(),
        },
    );
    Ok(form)
}

fn overlay(form: &mut HomeForm, values: FormFile) {
    if let Some(title) = values.title {
        form.title = title;
    }
    if let Some(description) = values.description {
        form.description = description;
    }
    if let Some(city) = values.city {
        form.city = city;
    }
    if values.rooms.is_some() {
        form.rooms = values.rooms;
    }
    if values.bathrooms.is_some() {
        form.bathrooms = values.bathrooms;
    }
    if let Some(has_pool) = values.has_pool {
        form.has_pool = has_pool;
    }
    if let Some(picture) = values.picture {
        form.picture = picture;
    }
}
