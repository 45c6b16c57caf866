// ── Listing filter ──
//
// One predicate shared by the favorites view and the server query, so
// "filtered all homes" and "filtered favorites" never diverge: rooms and
// bathrooms are lower bounds on both sides, city and pool exact matches.

use serde::{Deserialize, Serialize};

use super::city::City;
use super::home::Home;

/// Room thresholds offered by the filter panel.
pub const ROOM_OPTIONS: [u32; 6] = [1, 2, 3, 4, 5, 6];

/// Bathroom thresholds offered by the filter panel.
pub const BATHROOM_OPTIONS: [u32; 5] = [1, 2, 3, 4, 5];

/// Active filter criteria. An unset field is no constraint.
///
/// Treated as a value: every change builds a new filter, which the
/// service swaps in wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    /// Minimum number of rooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    /// Minimum number of bathrooms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pool: Option<bool>,
}

impl HomeFilter {
    /// `true` iff no field is set.
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.rooms.is_none()
            && self.bathrooms.is_none()
            && self.has_pool.is_none()
    }

    pub fn with_city(self, city: Option<City>) -> Self {
        Self { city, ..self }
    }

    pub fn with_min_rooms(self, rooms: Option<u32>) -> Self {
        Self { rooms, ..self }
    }

    pub fn with_min_bathrooms(self, bathrooms: Option<u32>) -> Self {
        Self { bathrooms, ..self }
    }

    pub fn with_pool(self, has_pool: Option<bool>) -> Self {
        Self { has_pool, ..self }
    }

    /// Does `home` satisfy every set constraint?
    pub fn matches(&self, home: &Home) -> bool {
        if let Some(city) = self.city {
            if home.city != city.as_str() {
                return false;
            }
        }
        if let Some(rooms) = self.rooms {
            if home.rooms < rooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms {
            if home.bathrooms < bathrooms {
                return false;
            }
        }
        if let Some(has_pool) = self.has_pool {
            if home.has_pool != has_pool {
                return false;
            }
        }
        true
    }

    /// Order-preserving filter. An empty filter keeps everything.
    pub fn apply(&self, homes: &[Home]) -> Vec<Home> {
        if self.is_empty() {
            return homes.to_vec();
        }
        homes.iter().filter(|h| self.matches(h)).cloned().collect()
    }

    /// Short human summary, e.g. `Miami, 2+ rooms, pool`.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "no filter".into();
        }
        let mut parts = Vec::new();
        if let Some(city) = self.city {
            parts.push(city.to_string());
        }
        if let Some(rooms) = self.rooms {
            parts.push(format!("{rooms}+ rooms"));
        }
        if let Some(bathrooms) = self.bathrooms {
            parts.push(format!("{bathrooms}+ bathrooms"));
        }
        match self.has_pool {
            Some(true) => parts.push("pool".into()),
            Some(false) => parts.push("no pool".into()),
            None => {}
        }
        parts.join(", ")
    }
}
