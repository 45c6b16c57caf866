#![allow(clippy::unwrap_used)]
// Integration tests for `ListingService` against a wiremock listings API.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homelist_api::HomesClient;
use homelist_core::{
    City, CoreError, FavoritesStore, FetchOrdering, FormField, HomeFilter, HomeForm, HomeId,
    JsonFileStore, ListingConfig, ListingService, MemoryStore,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn home_json(id: u64, rooms: u32) -> serde_json::Value {
    json!({
        "id": id.to_string(),
        "title": format!("Home {id}"),
        "description": "A sunny place to live",
        "city": "Miami",
        "rooms": rooms,
        "bathrooms": 1,
        "hasPool": false,
        "picture": format!("https://img.example.com/{id}.jpg")
    })
}

fn page_json(ids: &[u64], pages: u32, items: u32) -> serde_json::Value {
    json!({
        "first": 1,
        "pages": pages,
        "items": items,
        "data": ids.iter().map(|id| home_json(*id, 2)).collect::<Vec<_>>()
    })
}

fn config_for(server: &MockServer, fetch_ordering: FetchOrdering) -> ListingConfig {
    ListingConfig {
        fetch_ordering,
        ..ListingConfig::new(Url::parse(&server.uri()).unwrap())
    }
}

fn service_with(
    server: &MockServer,
    store: Arc<dyn FavoritesStore>,
    fetch_ordering: FetchOrdering,
) -> ListingService {
    let config = config_for(server, fetch_ordering);
    let api = HomesClient::with_client(reqwest::Client::new(), config.api_url.clone());
    ListingService::with_client(api, store, config)
}

async fn setup() -> (MockServer, ListingService, Arc<MemoryStore>) {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let svc = service_with(&server, store.clone(), FetchOrdering::LastResolved);
    (server, svc, store)
}

fn valid_form() -> HomeForm {
    HomeForm {
        title: "Sunny loft".into(),
        description: "Bright open space downtown".into(),
        city: "miami".into(),
        rooms: Some(2),
        bathrooms: Some(1),
        has_pool: true,
        picture: "https://img.example.com/loft.jpg".into(),
    }
}

// ── Fetch tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_publishes_page_and_totals() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "1"))
        .and(query_param("_per_page", "6"))
        .and(query_param_is_missing("city"))
        .and(query_param_is_missing("rooms_gte"))
        .and(query_param_is_missing("bathrooms_gte"))
        .and(query_param_is_missing("hasPool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            &[1, 2, 3, 4, 5, 6],
            3,
            13,
        )))
        .expect(1)
        .mount(&server)
        .await;

    svc.fetch_homes(1, 6).await.unwrap();

    assert_eq!(svc.paginated_homes().len(), 6);
    assert_eq!(svc.total_pages(), 3);
    assert_eq!(svc.total_items(), 13);
    assert_eq!(svc.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(!svc.is_loading());
    assert_eq!(svc.error(), None);
}

#[tokio::test]
async fn test_fetch_sends_exactly_the_set_filter_fields() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "2"))
        .and(query_param("city", "San Francisco"))
        .and(query_param("rooms_gte", "3"))
        .and(query_param("hasPool", "true"))
        .and(query_param_is_missing("bathrooms_gte"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[9], 1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    svc.set_filter(
        HomeFilter::default()
            .with_city(Some(City::SanFrancisco))
            .with_min_rooms(Some(3))
            .with_pool(Some(true)),
    );
    svc.fetch_homes(2, 6).await.unwrap();

    assert_eq!(svc.paginated_homes()[0].id, HomeId::from(9));
}

#[tokio::test]
async fn test_apply_filter_resets_to_first_page() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "1"))
        .and(query_param("bathrooms_gte", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[4], 1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    svc.apply_filter(HomeFilter::default().with_min_bathrooms(Some(2)))
        .await
        .unwrap();
    assert_eq!(svc.active_filter().bathrooms, Some(2));
    assert_eq!(svc.total_items(), 1);
}

#[tokio::test]
async fn test_clear_filter_refetches_unfiltered_first_page() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    store
        .save(&[
            serde_json::from_value(home_json(1, 1)).unwrap(),
            serde_json::from_value(home_json(2, 3)).unwrap(),
        ])
        .unwrap();
    let svc = service_with(&server, store, FetchOrdering::LastResolved);

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("rooms_gte", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[2], 1, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "1"))
        .and(query_param("_per_page", "6"))
        .and(query_param_is_missing("city"))
        .and(query_param_is_missing("rooms_gte"))
        .and(query_param_is_missing("bathrooms_gte"))
        .and(query_param_is_missing("hasPool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[1, 2, 3], 1, 3)))
        .expect(1)
        .mount(&server)
        .await;

    svc.apply_filter(HomeFilter::default().with_min_rooms(Some(2)))
        .await
        .unwrap();
    assert_eq!(svc.favorites_homes().len(), 1);

    svc.clear_filter().await.unwrap();
    assert!(svc.active_filter().is_empty());
    assert_eq!(svc.favorites_homes().len(), 2);
    assert_eq!(svc.total_items(), 3);
}

#[tokio::test]
async fn test_fetch_page_uses_configured_page_size() {
    let server = MockServer::start().await;
    let config = ListingConfig {
        page_size: 4,
        ..config_for(&server, FetchOrdering::LastResolved)
    };
    let api = HomesClient::with_client(reqwest::Client::new(), config.api_url.clone());
    let svc = ListingService::with_client(api, Arc::new(MemoryStore::new()), config);

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "3"))
        .and(query_param("_per_page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[9, 10], 3, 10)))
        .expect(1)
        .mount(&server)
        .await;

    svc.fetch_page(3).await.unwrap();
    assert_eq!(svc.paginated_homes().len(), 2);
    assert_eq!(svc.total_pages(), 3);
}

#[tokio::test]
async fn test_generated_string_ids_are_kept() {
    let (server, svc, store) = setup().await;

    let mut generated = home_json(0, 2);
    generated["id"] = json!("3f1a");

    Mock::given(method("POST"))
        .and(path("/homes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(generated.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/homes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pages": 1,
            "items": 2,
            "data": [home_json(1, 2), generated]
        })))
        .mount(&server)
        .await;

    let created = svc.create_home(&valid_form()).await.unwrap();
    assert_eq!(created.id, "3f1a".parse::<HomeId>().unwrap());

    svc.fetch_homes(1, 6).await.unwrap();
    let ids: Vec<String> = svc.paginated_homes().iter().map(|h| h.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "3f1a"]);

    svc.toggle_favorite(&created).unwrap();
    let flags: Vec<bool> = svc.paginated_homes().iter().map(|h| h.is_favorite).collect();
    assert_eq!(flags, vec![false, true]);
    assert!(store.blob().unwrap().contains(r#""id":"3f1a""#));
}

#[tokio::test]
async fn test_page_flags_follow_favorites_set() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    store
        .save(&[serde_json::from_value(home_json(2, 2)).unwrap()])
        .unwrap();
    let svc = service_with(&server, store, FetchOrdering::LastResolved);

    Mock::given(method("GET"))
        .and(path("/homes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[1, 2, 3], 1, 3)))
        .mount(&server)
        .await;

    svc.fetch_homes(1, 6).await.unwrap();
    let flags: Vec<bool> = svc.paginated_homes().iter().map(|h| h.is_favorite).collect();
    assert_eq!(flags, vec![false, true, false]);

    let third = svc.paginated_homes()[2].clone();
    assert!(svc.toggle_favorite(&third).unwrap());
    let flags: Vec<bool> = svc.paginated_homes().iter().map(|h| h.is_favorite).collect();
    assert_eq!(flags, vec![false, true, true]);

    // Toggling twice restores both the set and the page flags.
    assert!(!svc.toggle_favorite(&third).unwrap());
    let flags: Vec<bool> = svc.paginated_homes().iter().map(|h| h.is_favorite).collect();
    assert_eq!(flags, vec![false, true, false]);
    assert_eq!(svc.favorites().len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_page() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[1, 2], 2, 8)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
        .mount(&server)
        .await;

    svc.fetch_homes(1, 6).await.unwrap();
    let err = svc.fetch_homes(2, 6).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert_eq!(svc.paginated_homes().len(), 2);
    assert_eq!(svc.total_items(), 8);
    assert!(svc.error().unwrap().contains("database offline"));
    assert!(!svc.is_loading());

    // A later successful fetch clears the error.
    svc.fetch_homes(1, 6).await.unwrap();
    assert_eq!(svc.error(), None);
}

#[tokio::test]
async fn test_loading_cell_reports_in_flight_fetch() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(&[1], 1, 1))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut loading = svc.subscribe_is_loading();
    let fetch = tokio::spawn({
        let svc = svc.clone();
        async move { svc.fetch_homes(1, 6).await }
    });

    assert_eq!(loading.changed().await, Some(true));
    assert_eq!(loading.changed().await, Some(false));
    fetch.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_dropped_fetch_resets_loading() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(&[1], 1, 1))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let result = tokio::time::timeout(Duration::from_millis(100), svc.fetch_homes(1, 6)).await;
    assert!(result.is_err());
    assert!(!svc.is_loading());
    assert!(svc.paginated_homes().is_empty());
}

// ── Ordering race ───────────────────────────────────────────────────

async fn race(fetch_ordering: FetchOrdering) -> ListingService {
    let server = MockServer::start().await;
    let svc = service_with(&server, Arc::new(MemoryStore::new()), fetch_ordering);

    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(&[1], 2, 2))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/homes"))
        .and(query_param("_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(&[2], 2, 2)))
        .mount(&server)
        .await;

    let (first, second) = tokio::join!(svc.fetch_homes(1, 1), svc.fetch_homes(2, 1));
    first.unwrap();
    second.unwrap();
    assert!(!svc.is_loading());
    svc
}

#[tokio::test]
async fn test_last_resolved_response_wins() {
    let svc = race(FetchOrdering::LastResolved).await;
    assert_eq!(svc.paginated_homes()[0].id, HomeId::from(1));
}

#[tokio::test]
async fn test_latest_issued_discards_stale_response() {
    let svc = race(FetchOrdering::LatestIssued).await;
    assert_eq!(svc.paginated_homes()[0].id, HomeId::from(2));
}

// ── Favorites persistence ───────────────────────────────────────────

#[tokio::test]
async fn test_toggle_persists_to_file_and_reloads() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn FavoritesStore> = Arc::new(JsonFileStore::in_dir(dir.path()));
    let svc = service_with(&server, store, FetchOrdering::LastResolved);

    let home = serde_json::from_value(home_json(5, 3)).unwrap();
    assert!(svc.toggle_favorite(&home).unwrap());

    let reloaded = service_with(
        &server,
        Arc::new(JsonFileStore::in_dir(dir.path())),
        FetchOrdering::LastResolved,
    );
    assert!(reloaded.is_favorite(&HomeId::from(5)));
    assert!(reloaded.favorites()[0].is_favorite);
}

#[tokio::test]
async fn test_persistence_failure_is_returned_but_state_updates() {
    let (_server, svc, store) = setup().await;
    store.set_fail_writes(true);

    let mut favorites = svc.subscribe_favorites_homes();
    let home = serde_json::from_value(home_json(8, 2)).unwrap();
    let err = svc.toggle_favorite(&home).unwrap_err();

    assert!(matches!(err, CoreError::Persistence { .. }));
    assert!(svc.is_favorite(&HomeId::from(8)));
    assert_eq!(favorites.changed().await.unwrap().len(), 1);
    assert_eq!(store.blob(), None);
}

// ── Single listings ─────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let (server, svc, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/homes"))
        .respond_with(ResponseTemplate::new(201).set_body_json(home_json(1, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = valid_form();
    form.title = "Hi".into();
    form.picture = "not-a-url".into();
    let err = svc.create_home(&form).await.unwrap_err();

    let errors = err.form_errors().unwrap();
    assert!(errors.for_field(FormField::Title).is_some());
    assert!(errors.for_field(FormField::Picture).is_some());
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn test_create_sends_canonical_payload() {
    let (server, svc, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/homes"))
        .and(body_json(json!({
            "title": "Sunny loft",
            "description": "Bright open space downtown",
            "city": "Miami",
            "rooms": 2,
            "bathrooms": 1,
            "hasPool": true,
            "picture": "https://img.example.com/loft.jpg"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(home_json(42, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let created = svc.create_home(&valid_form()).await.unwrap();
    assert_eq!(created.id, HomeId::from(42));
    assert!(!created.is_favorite);
    // Creating does not touch the current page.
    assert!(svc.paginated_homes().is_empty());
}

#[tokio::test]
async fn test_update_puts_full_draft() {
    let (server, svc, _) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/homes/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(home_json(42, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let updated = svc.update_home(&HomeId::from(42), &valid_form()).await.unwrap();
    assert_eq!(updated.id, HomeId::from(42));
}

#[tokio::test]
async fn test_get_home_sets_favorite_flag() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(home_json(3, 4)))
        .mount(&server)
        .await;

    assert!(!svc.get_home_by_id(&HomeId::from(3)).await.unwrap().is_favorite);
    let home = svc.get_home_by_id(&HomeId::from(3)).await.unwrap();
    svc.toggle_favorite(&home).unwrap();
    assert!(svc.get_home_by_id(&HomeId::from(3)).await.unwrap().is_favorite);
}

#[tokio::test]
async fn test_get_missing_home_is_not_found() {
    let (server, svc, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/homes/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = svc.get_home_by_id(&HomeId::from(99)).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}
