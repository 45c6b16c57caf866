use std::sync::Arc;

use super::cell::StateCell;
use crate::model::{Home, HomeFilter};

/// Every value the listing service publishes.
#[derive(Debug, Default)]
pub(crate) struct ListingState {
    pub(crate) paginated_homes: StateCell<Arc<Vec<Home>>>,
    pub(crate) total_pages: StateCell<u32>,
    pub(crate) total_items: StateCell<u32>,
    pub(crate) is_loading: StateCell<bool>,
    pub(crate) error: StateCell<Option<String>>,
    pub(crate) favorites_homes: StateCell<Arc<Vec<Home>>>,
    pub(crate) active_filter: StateCell<HomeFilter>,
}
