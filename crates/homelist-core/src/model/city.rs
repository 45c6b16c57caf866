// ── City catalogue ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The fixed list of cities a listing can be created in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum City {
    #[serde(rename = "New York")]
    #[strum(serialize = "New York")]
    NewYork,
    #[serde(rename = "Los Angeles")]
    #[strum(serialize = "Los Angeles")]
    LosAngeles,
    Miami,
    Chicago,
    #[serde(rename = "San Francisco")]
    #[strum(serialize = "San Francisco")]
    SanFrancisco,
    Philadelphia,
    Seattle,
    Phoenix,
    Austin,
    Boston,
    Portland,
    Denver,
}

impl City {
    /// Canonical spelling, as stored on the server.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewYork => "New York",
            Self::LosAngeles => "Los Angeles",
            Self::Miami => "Miami",
            Self::Chicago => "Chicago",
            Self::SanFrancisco => "San Francisco",
            Self::Philadelphia => "Philadelphia",
            Self::Seattle => "Seattle",
            Self::Phoenix => "Phoenix",
            Self::Austin => "Austin",
            Self::Boston => "Boston",
            Self::Portland => "Portland",
            Self::Denver => "Denver",
        }
    }

    /// All cities in catalogue order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Comma-separated catalogue, for error and help text.
    pub fn catalogue() -> String {
        Self::iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
