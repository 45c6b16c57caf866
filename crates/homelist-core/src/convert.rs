// ── Wire ↔ domain conversions ──
//
// `HomeRecord` → `Home` (favorite flag starts false; the service sets it),
// `HomeDraft` → request bodies, and `HomeFilter` → list query.

use homelist_api::{HomePatch, HomePayload, HomeQuery, HomeRecord};

use crate::model::{Home, HomeDraft, HomeFilter, HomeId};

impl From<HomeRecord> for Home {
    fn from(r: HomeRecord) -> Self {
        Self {
            id: HomeId::from(r.id),
            title: r.title,
            description: r.description,
            city: r.city,
            rooms: r.rooms,
            bathrooms: r.bathrooms,
            has_pool: r.has_pool,
            picture: r.picture,
            is_favorite: false,
        }
    }
}

impl From<&HomeDraft> for HomePayload {
    fn from(d: &HomeDraft) -> Self {
        Self {
            title: d.title.clone(),
            description: d.description.clone(),
            city: d.city.as_str().to_owned(),
            rooms: d.rooms,
            bathrooms: d.bathrooms,
            has_pool: d.has_pool,
            picture: d.picture.clone(),
        }
    }
}

impl From<&HomeDraft> for HomePatch {
    fn from(d: &HomeDraft) -> Self {
        HomePayload::from(d).into()
    }
}

impl HomeFilter {
    /// Translate into the list query for one page.
    pub fn to_query(&self, page: u32, per_page: u32) -> HomeQuery {
        HomeQuery {
            page,
            per_page,
            city: self.city.map(|c| c.as_str().to_owned()),
            rooms_gte: self.rooms,
            bathrooms_gte: self.bathrooms,
            has_pool: self.has_pool,
        }
    }
}
