// ── Wire types for the listings API ──
//
// These mirror the JSON exactly as the server speaks it. The core crate
// converts `HomeRecord` into its domain `Home`; nothing here knows about
// favorites.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A listing as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRecord {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub city: String,
    pub rooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub has_pool: bool,
    #[serde(default)]
    pub picture: String,
}

/// Body of `POST /homes`. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePayload {
    pub title: String,
    pub description: String,
    pub city: String,
    pub rooms: u32,
    pub bathrooms: u32,
    pub has_pool: bool,
    pub picture: String,
}

/// Body of `PUT /homes/{id}`. Unset fields are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_pool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<HomePayload> for HomePatch {
    fn from(p: HomePayload) -> Self {
        Self {
            title: Some(p.title),
            description: Some(p.description),
            city: Some(p.city),
            rooms: Some(p.rooms),
            bathrooms: Some(p.bathrooms),
            has_pool: Some(p.has_pool),
            picture: Some(p.picture),
        }
    }
}

/// The `{ data, pages, items }` envelope of a paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub items: u32,
}

/// Query string of `GET /homes`.
///
/// Filter parameters are only emitted when set; rooms and bathrooms are
/// lower bounds (`_gte`), city and pool are exact matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeQuery {
    pub page: u32,
    pub per_page: u32,
    pub city: Option<String>,
    pub rooms_gte: Option<u32>,
    pub bathrooms_gte: Option<u32>,
    pub has_pool: Option<bool>,
}

impl HomeQuery {
    /// Render as `(name, value)` pairs in the order they hit the wire.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("_page", self.page.to_string()),
            ("_per_page", self.per_page.to_string()),
        ];
        if let Some(ref city) = self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(rooms) = self.rooms_gte {
            pairs.push(("rooms_gte", rooms.to_string()));
        }
        if let Some(bathrooms) = self.bathrooms_gte {
            pairs.push(("bathrooms_gte", bathrooms.to_string()));
        }
        if let Some(pool) = self.has_pool {
            pairs.push(("hasPool", pool.to_string()));
        }
        pairs
    }
}

/// Server-assigned record id.
///
/// Seeded fixtures carry plain numbers while json-server gives records it
/// creates itself short string ids such as `"3f1a"`. Both are kept
/// verbatim. A string holding a canonical integer (`"7"`, not `"007"`)
/// reads as `Number`, so `7` and `"7"` name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    /// The id as a number, if it is one.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self::Number(n)),
            RawId::Text(s) if s.trim().is_empty() => {
                Err(de::Error::custom("home id must not be empty"))
            }
            RawId::Text(s) => Ok(Self::from(s)),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => Self::Number(n),
            _ => Self::Text(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl PartialEq<u64> for RecordId {
    fn eq(&self, other: &u64) -> bool {
        self.as_number() == Some(*other)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
