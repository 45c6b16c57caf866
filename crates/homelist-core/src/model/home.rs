// ── Home domain types ──

use std::fmt;
use std::str::FromStr;

use homelist_api::RecordId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::city::City;

// ── HomeId ──────────────────────────────────────────────────────────

/// Server-assigned listing identifier.
///
/// Opaque: numbers and strings both round-trip unchanged, so favorites
/// written to disk keep the id the server handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeId(RecordId);

impl HomeId {
    /// The wire id used to address this home on the server.
    pub fn as_record(&self) -> &RecordId {
        &self.0
    }
}

impl fmt::Display for HomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rejected home id text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("home id must not be empty")]
pub struct EmptyHomeId;

impl FromStr for HomeId {
    type Err = EmptyHomeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmptyHomeId);
        }
        Ok(Self(RecordId::from(s)))
    }
}

impl From<u64> for HomeId {
    fn from(id: u64) -> Self {
        Self(RecordId::Number(id))
    }
}

impl From<RecordId> for HomeId {
    fn from(id: RecordId) -> Self {
        Self(id)
    }
}

// ── Home ────────────────────────────────────────────────────────────

/// A property listing as held by the listing service.
///
/// `is_favorite` is derived: the service recomputes it from the favorites
/// set on every fetch and every toggle. It is persisted only inside the
/// local favorites entry, never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub id: HomeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Kept as free text: the server is the source of truth and may hold
    /// cities outside the form's catalogue.
    pub city: String,
    pub rooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Home {
    /// The city, if it belongs to the known catalogue.
    pub fn known_city(&self) -> Option<City> {
        self.city.parse().ok()
    }

    /// A copy carrying the given favorite flag.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            is_favorite,
            ..self.clone()
        }
    }
}

// ── HomeDraft ───────────────────────────────────────────────────────

/// A validated listing without server identity: the body of create and
/// update requests. Only `HomeForm::validate` produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDraft {
    pub title: String,
    pub description: String,
    pub city: City,
    pub rooms: u32,
    pub bathrooms: u32,
    pub has_pool: bool,
    pub picture: String,
}
