//! Async client for the homelist listings API.
//!
//! The backend is a plain JSON-over-HTTP resource server exposing a single
//! `homes` collection:
//!
//! - `GET /homes?_page=&_per_page=&...` returns one page plus totals
//! - `POST /homes` creates a listing
//! - `PUT /homes/{id}` updates a listing
//! - `GET /homes/{id}` reads a single listing
//!
//! [`HomesClient`] owns transport mechanics (URL construction, status
//! mapping, body decoding). Wire types live in [`models`]; they are
//! converted into domain types by `homelist-core`.

pub mod client;
pub mod error;
pub mod homes;
pub mod models;
pub mod transport;

pub use client::HomesClient;
pub use error::Error;
pub use models::{HomePatch, HomePayload, HomeQuery, HomeRecord, Paginated, RecordId};
pub use transport::TransportConfig;
