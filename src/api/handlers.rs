//! HTTP API handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

use super::middleware::fault_delay;
use crate::calc;
use crate::config::Config;
use crate::error::AppError;
use crate::metrics;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "devops-lab";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// In-memory visit counter for `/`. Reset on restart.
    pub visits: Arc<AtomicU64>,
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Handle for rendering the Prometheus text exposition.
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: Config, prometheus: PrometheusHandle) -> Self {
        Self {
            visits: Arc::new(AtomicU64::new(0)),
            config: Arc::new(config),
            prometheus,
        }
    }
}

/// Greeting response from `/`.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    /// Greeting text.
    pub message: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Environment name from configuration.
    pub environment: String,
    /// Visits to `/` since process start.
    pub visits: u64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
}

/// Application metadata response.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Human-readable application name.
    pub app_name: &'static str,
    /// Minimum supported Rust version.
    pub rust_version: &'static str,
    /// Web framework in use.
    pub framework: &'static str,
}

/// Query parameters for `/calculate`.
///
/// Raw strings so that absence and malformed values can be told apart:
/// an absent parameter falls back to its default, a malformed one is an
/// error.
#[derive(Debug, Deserialize)]
pub struct CalculateParams {
    /// Raw `x` value.
    pub x: Option<String>,
    /// Raw `y` value.
    pub y: Option<String>,
}

/// Calculation response.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// Computed result.
    pub result: i64,
}

/// Greeting handler - bumps the visit counter on every call.
pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    let visits = state.visits.fetch_add(1, Ordering::SeqCst) + 1;

    Json(HelloResponse {
        message: "Hello from DevOps Lab!",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        visits,
    })
}

/// Health check handler for load balancers - always healthy.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

/// Application metadata handler.
pub async fn info() -> Json<InfoResponse> {
    Json(InfoResponse {
        app_name: "DevOps Lab App",
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        framework: "Axum",
    })
}

/// Calculation handler.
///
/// Sleeps the configured artificial delay before recording its duration, so
/// the `calculate_duration_seconds` histogram is deliberately inflated the
/// same way request latencies are.
pub async fn calculate(
    State(state): State<AppState>,
    Query(params): Query<CalculateParams>,
) -> Result<Json<CalculateResponse>, AppError> {
    let start = Instant::now();

    let x = parse_param("x", params.x, calc::DEFAULT_X)?;
    let y = parse_param("y", params.y, calc::DEFAULT_Y)?;
    let result = calc::compute_result(x, y);

    if let Some(delay) = fault_delay(&state.config) {
        tokio::time::sleep(delay).await;
    }
    metrics::record_calc_duration(start);

    Ok(Json(CalculateResponse { result }))
}

/// Prometheus exposition handler.
pub async fn expose_metrics(State(state): State<AppState>) -> impl IntoResponse {
    state.prometheus.render()
}

/// Parse an optional integer query parameter, falling back to `default`
/// when absent. A present but malformed value is an error.
fn parse_param(name: &'static str, raw: Option<String>, default: i64) -> Result<i64, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::InvalidParam { name, value }),
    }
}
