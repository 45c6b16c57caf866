// ── Domain model ──
//
// Canonical homelist types. Wire shapes live in `homelist_api::models`;
// `crate::convert` bridges the two.

pub mod city;
pub mod filter;
pub mod home;

pub use city::City;
pub use filter::HomeFilter;
pub use home::{EmptyHomeId, Home, HomeDraft, HomeId};
