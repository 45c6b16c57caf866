// ── Runtime service configuration ──
//
// These types describe *how* the listing service talks to the API.
// They never touch disk: the CLI builds a `ListingConfig` (usually via
// `homelist-config`) and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// How overlapping `fetch_homes` calls are reconciled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FetchOrdering {
    /// Every response overwrites the page when it arrives; the last one
    /// to resolve wins, whichever was issued last.
    #[default]
    LastResolved,
    /// Responses older than the most recently issued request are dropped.
    LatestIssued,
}

/// Configuration for a single listing session.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// API base URL (e.g., `http://localhost:3000`).
    pub api_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Default page size for `fetch_page` / `apply_filter`.
    pub page_size: u32,
    /// Overlapping fetch policy.
    pub fetch_ordering: FetchOrdering,
}

impl ListingConfig {
    /// A session against `api_url` with default timeout, page size and
    /// ordering.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_ordering: FetchOrdering::default(),
        }
    }

    /// [`ListingConfig::new`] against [`DEFAULT_API_URL`].
    pub fn local() -> Result<Self, url::ParseError> {
        Url::parse(DEFAULT_API_URL).map(Self::new)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_listing_view() {
        let cfg = ListingConfig::local().unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://localhost:3000/");
        assert_eq!(cfg.page_size, 6);
        assert_eq!(cfg.fetch_ordering, FetchOrdering::LastResolved);
    }

    #[test]
    fn new_keeps_url_and_fills_defaults() {
        let url = Url::parse("https://listings.example.com/api/").unwrap();
        let cfg = ListingConfig::new(url.clone());
        assert_eq!(cfg.api_url, url);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn fetch_ordering_parses_kebab_case() {
        assert_eq!(
            "latest-issued".parse::<FetchOrdering>().unwrap(),
            FetchOrdering::LatestIssued
        );
        assert_eq!(FetchOrdering::LastResolved.to_string(), "last-resolved");
    }
}
