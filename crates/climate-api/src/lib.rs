use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use climate_core::Dataset;
use climate_query::{QueryEngine, QueryError};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    engine: QueryEngine,
}

pub fn build_app(dataset: Arc<Dataset>) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("climate-api");

    let requests_total = meter
        .u64_counter("climate_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        engine: QueryEngine::new(dataset),
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/temp/:start", get(temp_stats_open))
        .route("/api/v1.0/temp/:start/:end", get(temp_stats_bounded))
        .with_state(Arc::clone(&state));

    (router, state)
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

fn error_response(err: QueryError) -> Response {
    let status = match err {
        QueryError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
        QueryError::NoData | QueryError::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    Json(serde_json::json!({
        "routes": [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs",
            "/api/v1.0/temp/{start}",
            "/api/v1.0/temp/{start}/{end}",
        ]
    }))
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

async fn precipitation(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    Json(state.engine.recent_precipitation())
}

async fn stations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    Json(state.engine.list_stations())
}

async fn tobs(State(state): State<Arc<AppState>>) -> Response {
    state.requests_total.add(1, &[]);
    match state.engine.recent_temperature_observations() {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn temp_stats_open(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    temp_stats(&state, &start, None)
}

async fn temp_stats_bounded(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    temp_stats(&state, &start, Some(&end))
}

fn temp_stats(state: &Arc<AppState>, start: &str, end: Option<&str>) -> Response {
    state.requests_total.add(1, &[]);
    match state.engine.temperature_stats(start, end) {
        Ok(summary) => {
            let end_label = summary
                .end
                .map(|d| d.to_string())
                .unwrap_or_else(|| "latest available".to_string());
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "start": summary.start.to_string(),
                    "end": end_label,
                    "min": summary.min,
                    "max": summary.max,
                    "avg": summary.avg,
                })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}
