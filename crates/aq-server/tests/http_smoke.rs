use std::sync::Arc;

use aq_core::{DataProvider, GeoPoint, Pollutant, Reading, Site, StaticProvider};
use aq_server::ServiceSettings;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

fn site(id: &str, location: Option<GeoPoint>, value: Option<f64>) -> Site {
    Site {
        id: id.to_string(),
        name: format!("{id} station"),
        location,
        division: Some("Makindye".to_string()),
        parish: Some("Kibuye".to_string()),
        latest: Some(Reading {
            site_id: id.to_string(),
            pollutant: Pollutant::Pm2_5,
            value,
            time: Some(Utc.with_ymd_and_hms(2024, 9, 1, 6, 45, 0).unwrap()),
        }),
    }
}

fn app() -> (Router, Arc<aq_server::AppState>) {
    let here = Some(GeoPoint {
        latitude: 0.29,
        longitude: 32.58,
    });
    let provider = StaticProvider::new(vec![
        site("k1", here, Some(12.0)),
        site("k2", None, Some(80.0)),
        site("k3", here, Some(0.0)),
    ]);
    aq_server::build_app(Arc::new(provider), ServiceSettings::default()).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let res = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn health_ready_metrics_endpoints() {
    let (app, state) = app();

    let (status, _) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);

    // /readyz initially 503
    let (status, _) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    aq_server::set_ready(&state, true);
    let (status, _) = get(&app, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("aq_requests_total"));
}

#[tokio::test]
async fn classify_endpoint() {
    let (app, _) = app();

    let (status, body) = get(&app, "/api/v1/classify?value=40&pollutant=pm2_5").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["category"], "unhealthy-sensitive-groups");
    assert_eq!(json["css_class"], "aq-unhealthy-sensitive-groups");
    assert_eq!(json["color"], "#FF851F");

    let (status, body) = get(&app, "/api/v1/classify").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["category"], "no-value");
    assert_eq!(json["label"], "No Data");

    let (status, body) = get(&app, "/api/v1/classify?value=&pollutant=pm10").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["category"], "no-value");
    assert_eq!(json["value"], serde_json::Value::Null);

    let (status, body) = get(&app, "/api/v1/classify?value=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("invalid value \"abc\""));

    let (status, body) = get(&app, "/api/v1/classify?value=5&pollutant=radon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown pollutant: radon"));
}

#[tokio::test]
async fn markers_skip_unplaceable_sites() {
    let (app, _) = app();

    let (status, body) = get(&app, "/api/v1/markers").await;
    assert_eq!(status, StatusCode::OK);
    let markers: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0]["site_id"], "k1");
    assert_eq!(markers[0]["category"], "moderate");
    assert_eq!(markers[1]["label"], "0");
    assert_eq!(markers[1]["category"], "good");
    assert_eq!(markers[1]["route"], "/sites/k3");
}

#[tokio::test]
async fn legend_and_settings() {
    let (app, _) = app();

    let (status, body) = get(&app, "/api/v1/legend?pollutant=pm10").await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["range"], "0 - 54.1");

    let (status, body) = get(&app, "/api/v1/map/settings").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["node_type"], "emoji");
    assert_eq!(json["popup_offset"], 58);
    assert_eq!(json["standards"], "WHO");
    assert_eq!(json["reference_lines"]["pm2_5_annual"], 5.0);
}

#[tokio::test]
async fn site_fragments() {
    let (app, _) = app();

    let (status, html) = get(&app, "/api/v1/sites/k1/popup?theme=dark").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("k1 station"));
    assert!(html.contains("Makindye, Kibuye"));
    assert!(html.contains("September 01, 2024 06:45"));
    assert!(html.contains("#23272f"));

    let (status, html) = get(&app, "/api/v1/sites/k1/node?selected=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("ModerateAir"));
    assert!(html.contains(" active"));

    // present in the feed but has no location
    let (status, body) = get(&app, "/api/v1/sites/k2/popup").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("no placeable site k2"));
}

struct BrokenProvider;

#[async_trait::async_trait]
impl DataProvider for BrokenProvider {
    async fn sites(&self, _pollutant: Pollutant) -> anyhow::Result<Vec<Site>> {
        anyhow::bail!("feed offline")
    }
}

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let (app, _) =
        aq_server::build_app(Arc::new(BrokenProvider), ServiceSettings::default()).unwrap();

    let (status, body) = get(&app, "/api/v1/markers").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("feed offline"));

    // classification does not touch the provider
    let (status, _) = get(&app, "/api/v1/classify?value=3").await;
    assert_eq!(status, StatusCode::OK);
}
