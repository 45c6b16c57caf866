//! Reactive listing state between `homelist-api` and UI consumers.
//!
//! This crate owns the business logic and domain model of homelist:
//!
//! - **[`ListingService`]**: the single mutable state owner. Fetches pages,
//!   keeps the active [`HomeFilter`], and maintains the favorites set so
//!   that page flags, the filtered favorites view, and local persistence
//!   never disagree.
//!
//! - **[`StateCell`] / [`StateStream`]**: published values built on
//!   `tokio::sync::watch`. Views subscribe and re-render on change; they
//!   never hold authoritative state themselves.
//!
//! - **[`FavoritesStore`]**: whole-collection persistence of favorited homes
//!   ([`JsonFileStore`] on disk, [`MemoryStore`] in process).
//!
//! - **[`HomeForm`]**: create/edit form values with per-field validation.
//!
//! - **Domain model** ([`model`]): [`Home`], [`HomeId`], [`City`],
//!   [`HomeFilter`].

pub mod config;
pub mod convert;
pub mod error;
pub mod favorites;
pub mod form;
pub mod model;
pub mod service;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{FetchOrdering, ListingConfig};
pub use error::CoreError;
pub use favorites::{FAVORITES_ENTRY, FavoritesStore, JsonFileStore, MemoryStore};
pub use form::{FieldError, FormErrors, FormField, HomeForm};
pub use model::{City, EmptyHomeId, Home, HomeDraft, HomeFilter, HomeId};
pub use service::ListingService;
pub use store::StateCell;
pub use stream::StateStream;
