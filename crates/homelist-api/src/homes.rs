// Listings API home endpoints
//
// One resource collection (`/homes`), four operations. Filtering and
// pagination ride on the list query string.

use tracing::debug;
use url::Url;

use crate::client::HomesClient;
use crate::error::Error;
use crate::models::{HomePatch, HomePayload, HomeQuery, HomeRecord, Paginated, RecordId};

impl HomesClient {
    /// List one page of homes.
    ///
    /// `GET /homes?_page={p}&_per_page={n}[&city=][&rooms_gte=][&bathrooms_gte=][&hasPool=]`
    pub async fn list_homes(&self, query: &HomeQuery) -> Result<Paginated<HomeRecord>, Error> {
        let url = self.url("homes")?;
        debug!(page = query.page, per_page = query.per_page, "listing homes");
        self.get(url, &query.to_pairs()).await
    }

    /// Read a single home.
    ///
    /// `GET /homes/{id}`
    pub async fn get_home(&self, id: &RecordId) -> Result<HomeRecord, Error> {
        let url = self.home_url(id)?;
        debug!(%id, "fetching home");
        self.get(url, &[]).await
    }

    /// Create a home. The server assigns and returns the id.
    ///
    /// `POST /homes`
    pub async fn create_home(&self, home: &HomePayload) -> Result<HomeRecord, Error> {
        let url = self.url("homes")?;
        debug!(title = %home.title, "creating home");
        self.post(url, home).await
    }

    /// Update a home. Only the fields set on `patch` are sent.
    ///
    /// `PUT /homes/{id}`
    pub async fn update_home(
        &self,
        id: &RecordId,
        patch: &HomePatch,
    ) -> Result<HomeRecord, Error> {
        let url = self.home_url(id)?;
        debug!(%id, "updating home");
        self.put(url, patch).await
    }

    /// `{base}/homes/{id}` with the id percent-encoded as one path segment.
    fn home_url(&self, id: &RecordId) -> Result<Url, Error> {
        let mut url = self.url("homes")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&id.to_string());
        Ok(url)
    }
}
