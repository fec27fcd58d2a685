use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use cityscout::api::AppState;
use cityscout::config::Config;
use cityscout::models::WeatherDay;

/// Canned upstream shared by all provider routes. Counters let tests assert
/// exactly how many provider calls a lookup produced.
#[derive(Clone, Default)]
struct MockUpstream {
    calls: Arc<Calls>,
    events_empty: bool,
    yelp_fail: bool,
}

#[derive(Default)]
struct Calls {
    geocode: AtomicUsize,
    weather: AtomicUsize,
    events: AtomicUsize,
    movies: AtomicUsize,
    yelp: AtomicUsize,
}

async fn mock_geocode(State(mock): State<MockUpstream>) -> Json<Value> {
    mock.calls.geocode.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "results": [{
            "formatted_address": "Seattle, WA, USA",
            "geometry": { "location": { "lat": 47.6062, "lng": -122.3321 } }
        }]
    }))
}

async fn mock_weather(State(mock): State<MockUpstream>) -> Json<Value> {
    mock.calls.weather.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "daily": {
            "data": [
                { "summary": "Clear throughout the day.", "time": 1_577_836_800 },
                { "summary": "Light rain in the morning.", "time": 1_577_923_200 }
            ]
        }
    }))
}

async fn mock_events(State(mock): State<MockUpstream>) -> Json<Value> {
    mock.calls.events.fetch_add(1, Ordering::SeqCst);
    if mock.events_empty {
        return Json(json!({ "events": [] }));
    }
    Json(json!({
        "events": [{
            "url": "https://example.com/e/1",
            "name": { "text": "Night Market" },
            "start": { "local": "2020-01-15T19:00:00" },
            "summary": "Food and crafts."
        }]
    }))
}

async fn mock_movies(State(mock): State<MockUpstream>) -> Json<Value> {
    mock.calls.movies.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "results": [{
            "original_title": "X",
            "overview": "A film.",
            "vote_average": 7.2,
            "vote_count": 100,
            "poster_path": "/a.jpg",
            "popularity": 12.3,
            "release_date": "2020-01-01"
        }]
    }))
}

async fn mock_yelp(State(mock): State<MockUpstream>) -> Result<Json<Value>, StatusCode> {
    mock.calls.yelp.fetch_add(1, Ordering::SeqCst);
    if mock.yelp_fail {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(json!({
        "businesses": [{
            "name": "Pike Place Chowder",
            "image_url": "https://example.com/c.jpg",
            "price": "$$",
            "rating": 4.5,
            "url": "https://yelp.example/pike"
        }]
    })))
}

/// Serve the mock upstream on an ephemeral port and return its base URL.
async fn spawn_upstream(mock: MockUpstream) -> String {
    let app = Router::new()
        .route("/json", get(mock_geocode))
        .route("/events/search", get(mock_events))
        .route("/search/movie", get(mock_movies))
        .route("/businesses/search", get(mock_yelp))
        .route("/{key}/{coords}", get(mock_weather))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn spawn_app(mock: MockUpstream) -> (Router, Arc<AppState>) {
    let upstream = spawn_upstream(mock).await;

    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    // One pooled connection so the in-memory database is shared.
    config.database.max_connections = 1;
    config.database.min_connections = 1;

    let providers = &mut config.providers;
    for provider in [
        &mut providers.geocode,
        &mut providers.weather,
        &mut providers.events,
        &mut providers.movies,
        &mut providers.yelp,
    ] {
        provider.base_url = upstream.clone();
        provider.api_key = "test-key".to_string();
    }

    let state = cityscout::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    (cityscout::api::router(state.clone()), state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn resolve_seattle(app: &Router) -> i64 {
    let (status, body) = get_json(app, "/location?data=seattle").await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn location_resolution_is_idempotent() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, _state) = spawn_app(mock).await;

    let (status, first) = get_json(&app, "/location?data=seattle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["search_query"], "seattle");
    assert_eq!(first["formatted_query"], "Seattle, WA, USA");
    assert_eq!(first["latitude"], 47.6062);
    assert_eq!(first["longitude"], -122.3321);
    let id = first["id"].as_i64().unwrap();

    let (status, second) = get_json(&app, "/location?data=seattle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["id"].as_i64().unwrap(), id);

    // One provider call and one insert in total.
    assert_eq!(calls.geocode.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_search_text_is_rejected() {
    let (app, _state) = spawn_app(MockUpstream::default()).await;

    let (status, body) = get_json(&app, "/location?data=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn fresh_weather_is_served_without_a_provider_call() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let uri = format!("/weather?id={id}&latitude=47.6062&longitude=-122.3321");
    let (status, first) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert_eq!(first[0]["forecast"], "Clear throughout the day.");
    assert_eq!(first[0]["time"], "Wed Jan 01 2020");
    assert_eq!(first[0]["location_id"].as_i64().unwrap(), id);
    assert_eq!(calls.weather.load(Ordering::SeqCst), 1);

    // Second lookup inside the TTL: every field comes back unchanged and the
    // provider is not consulted again.
    let (status, second) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(calls.weather.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn young_seeded_weather_needs_no_provider_call() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await as i32;

    let created_at = chrono::Utc::now().timestamp_millis() - 5_000;
    state
        .store()
        .insert_weather(&[WeatherDay {
            forecast: "Seeded forecast".to_string(),
            time: "Mon Jan 06 2020".to_string(),
            created_at,
            location_id: id,
        }])
        .await
        .unwrap();

    let uri = format!("/weather?id={id}&latitude=47.6062&longitude=-122.3321");
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["forecast"], "Seeded forecast");
    assert_eq!(body[0]["created_at"].as_i64().unwrap(), created_at);
    assert_eq!(calls.weather.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stale_weather_is_evicted_and_refetched() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await as i32;

    // 20 s old against a 15 s TTL.
    let created_at = chrono::Utc::now().timestamp_millis() - 20_000;
    state
        .store()
        .insert_weather(&[WeatherDay {
            forecast: "Stale forecast".to_string(),
            time: "Mon Jan 06 2020".to_string(),
            created_at,
            location_id: id,
        }])
        .await
        .unwrap();

    let uri = format!("/weather?id={id}&latitude=47.6062&longitude=-122.3321");
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls.weather.load(Ordering::SeqCst), 1);

    // The stale row is gone from the response and from storage.
    let forecasts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["forecast"].as_str().unwrap())
        .collect();
    assert!(!forecasts.contains(&"Stale forecast"));

    let stored = state.store().weather_for_location(id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.forecast != "Stale forecast"));
}

#[tokio::test]
async fn empty_upstream_yields_no_data_response() {
    let mock = MockUpstream {
        events_empty: true,
        ..MockUpstream::default()
    };
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let uri = format!("/events?id={id}&formatted_query=Seattle%2C%20WA%2C%20USA");
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No events results for that location");
}

#[tokio::test]
async fn events_round_trip_through_storage() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let uri = format!("/events?id={id}&formatted_query=Seattle%2C%20WA%2C%20USA");
    let (status, first) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first[0]["name"], "Night Market");
    assert_eq!(first[0]["event_date"], "Wed Jan 15 2020");

    let (status, second) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(calls.events.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn movies_are_normalized_and_round_trip() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let uri = format!("/movies?id={id}&search_query=Seattle");
    let (status, first) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);

    let movie = &first[0];
    assert_eq!(movie["title"], "X");
    assert_eq!(movie["overview"], "A film.");
    assert_eq!(movie["average_votes"], 7.2);
    assert_eq!(movie["total_votes"], 100);
    assert_eq!(movie["image_url"], "https://image.tmdb.org/t/p/w500/a.jpg");
    assert_eq!(movie["popularity"], 12.3);
    assert_eq!(movie["released_on"], "2020-01-01");

    // Fresh for 30 days: the second read is storage-only and field-identical.
    let (status, second) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(calls.movies.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn business_failure_does_not_affect_weather() {
    let mock = MockUpstream {
        yelp_fail: true,
        ..MockUpstream::default()
    };
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let weather_uri = format!("/weather?id={id}&latitude=47.6062&longitude=-122.3321");
    let yelp_uri = format!("/yelp?id={id}&latitude=47.6062&longitude=-122.3321");

    let (weather, yelp) = tokio::join!(
        get_json(&app, &weather_uri),
        get_json(&app, &yelp_uri)
    );

    assert_eq!(weather.0, StatusCode::OK);
    assert_eq!(weather.1.as_array().unwrap().len(), 2);

    assert_eq!(yelp.0, StatusCode::BAD_GATEWAY);
    assert_eq!(yelp.1["error"], "businesses service is unavailable");
}

#[tokio::test]
async fn businesses_round_trip_through_storage() {
    let mock = MockUpstream::default();
    let calls = mock.calls.clone();
    let (app, _state) = spawn_app(mock).await;
    let id = resolve_seattle(&app).await;

    let uri = format!("/yelp?id={id}&latitude=47.6062&longitude=-122.3321");
    let (status, first) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first[0]["name"], "Pike Place Chowder");
    assert_eq!(first[0]["price"], "$$");
    assert_eq!(first[0]["rating"], 4.5);

    let (status, second) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);
    assert_eq!(calls.yelp.load(Ordering::SeqCst), 1);
}
