// ── Reactive state store ──
//
// Published listing state, one `watch` channel per value.

mod cell;
mod state;

pub use cell::StateCell;
pub(crate) use state::ListingState;
