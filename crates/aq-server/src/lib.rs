use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Result;
use aq_core::{
    info_for, reference_lines, DataProvider, Organization, Pollutant, ReferenceLines, ZeroReading,
};
use aq_map::{
    build_markers, cluster_radius, legend, popup_offset, render_node_html, render_popup_html,
    Marker, MarkerOptions, NodeType, PopupTheme,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::{Deserialize, Serialize};

/// Render settings fixed at startup
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceSettings {
    pub pollutant: Pollutant,
    pub zero_reading: ZeroReading,
    pub organization: Organization,
    pub node_type: NodeType,
}

impl ServiceSettings {
    fn marker_options(&self, pollutant: Pollutant) -> MarkerOptions {
        MarkerOptions {
            pollutant,
            zero_reading: self.zero_reading,
        }
    }
}

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    meter_provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    provider: Arc<dyn DataProvider>,
    settings: ServiceSettings,
}

pub fn build_app(
    provider: Arc<dyn DataProvider>,
    settings: ServiceSettings,
) -> Result<(Router, Arc<AppState>)> {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter().with_registry(registry.clone()).build()?;
    let meter_provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = meter_provider.meter("aq-server");

    let requests_total = meter
        .u64_counter("aq_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        meter_provider,
        requests_total,
        provider,
        settings,
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/classify", get(classify))
        .route("/api/v1/markers", get(markers))
        .route("/api/v1/legend", get(legend_rows))
        .route("/api/v1/map/settings", get(map_settings))
        .route("/api/v1/sites/:id/popup", get(site_popup))
        .route("/api/v1/sites/:id/node", get(site_node))
        .with_state(Arc::clone(&state));

    Ok((router, state))
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

/// Error responses, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Upstream(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Upstream(e) => {
                tracing::warn!(error = ?e, "data provider failed");
                (StatusCode::BAD_GATEWAY, format!("site data unavailable: {e}"))
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

fn resolve_pollutant(raw: Option<&str>, default: Pollutant) -> Result<Pollutant, ApiError> {
    match raw {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|e: aq_core::PollutantParseError| ApiError::BadRequest(e.to_string())),
    }
}

/// Concentration from the query string; absent or blank means no data
fn parse_value(raw: Option<&str>) -> Result<Option<f64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ApiError::BadRequest(format!("invalid value {s:?}: {e}"))),
    }
}

async fn load_markers(state: &AppState, pollutant: Pollutant) -> Result<Vec<Marker>, ApiError> {
    let sites = state
        .provider
        .sites(pollutant)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(build_markers(&sites, &state.settings.marker_options(pollutant)))
}

async fn find_marker(state: &AppState, site_id: &str) -> Result<Marker, ApiError> {
    load_markers(state, state.settings.pollutant)
        .await?
        .into_iter()
        .find(|m| m.site_id == site_id)
        .ok_or_else(|| ApiError::NotFound(format!("no placeable site {site_id}")))
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

#[derive(Deserialize)]
struct ClassifyQuery {
    value: Option<String>,
    pollutant: Option<String>,
    period: Option<String>,
}

#[derive(Serialize)]
struct ClassifyResponse {
    pollutant: Pollutant,
    value: Option<f64>,
    category: aq_core::Category,
    label: &'static str,
    color: &'static str,
    css_class: &'static str,
    description: Option<&'static str>,
    advice: String,
}

async fn classify(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ClassifyQuery>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    state.requests_total.add(1, &[]);
    let pollutant = resolve_pollutant(q.pollutant.as_deref(), state.settings.pollutant)?;
    let value = parse_value(q.value.as_deref())?;
    let value = state.settings.zero_reading.apply(value);
    let info = info_for(value, pollutant, state.settings.organization);

    Ok(Json(ClassifyResponse {
        pollutant,
        value,
        category: info.category,
        label: info.label,
        color: info.color.hex,
        css_class: info.color.css_class,
        description: info.description,
        advice: info.category.advice(q.period.as_deref().unwrap_or("today")),
    }))
}

#[derive(Deserialize)]
struct PollutantQuery {
    pollutant: Option<String>,
}

async fn markers(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PollutantQuery>,
) -> Result<Json<Vec<Marker>>, ApiError> {
    state.requests_total.add(1, &[]);
    let pollutant = resolve_pollutant(q.pollutant.as_deref(), state.settings.pollutant)?;
    Ok(Json(load_markers(&state, pollutant).await?))
}

async fn legend_rows(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PollutantQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state.requests_total.add(1, &[]);
    let pollutant = resolve_pollutant(q.pollutant.as_deref(), state.settings.pollutant)?;
    Ok(Json(legend(pollutant)))
}

#[derive(Serialize)]
struct MapSettings {
    pollutant: Pollutant,
    node_type: NodeType,
    popup_offset: u32,
    cluster_radius: u32,
    standards: Organization,
    reference_lines: ReferenceLines,
}

async fn map_settings(State(state): State<Arc<AppState>>) -> Json<MapSettings> {
    state.requests_total.add(1, &[]);
    let settings = state.settings;
    Json(MapSettings {
        pollutant: settings.pollutant,
        node_type: settings.node_type,
        popup_offset: popup_offset(settings.node_type),
        cluster_radius: cluster_radius(settings.node_type),
        standards: settings.organization,
        reference_lines: reference_lines(settings.organization),
    })
}

#[derive(Deserialize)]
struct RenderQuery {
    theme: Option<PopupTheme>,
    #[serde(default)]
    selected: bool,
}

async fn site_popup(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
    Query(q): Query<RenderQuery>,
) -> Result<Html<String>, ApiError> {
    state.requests_total.add(1, &[]);
    let marker = find_marker(&state, &site_id).await?;
    Ok(Html(render_popup_html(
        &marker.popup,
        &marker.color,
        q.theme.unwrap_or_default(),
    )))
}

async fn site_node(
    State(state): State<Arc<AppState>>,
    Path(site_id): Path<String>,
    Query(q): Query<RenderQuery>,
) -> Result<Html<String>, ApiError> {
    state.requests_total.add(1, &[]);
    let marker = find_marker(&state, &site_id).await?;
    Ok(Html(render_node_html(
        &marker,
        state.settings.node_type,
        q.selected,
        q.theme.unwrap_or_default(),
    )))
}
