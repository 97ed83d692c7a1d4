//! Request middleware: visit counting, latency recording, fault injection.

use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;

use super::handlers::AppState;
use crate::config::Config;
use crate::metrics;

/// Middleware composed around every route.
///
/// Before the handler: capture a start timestamp and bump the total visits
/// counter. After the handler (success or error): sleep the injected delay,
/// then record elapsed time into the per-endpoint latency histogram. The
/// endpoint label is the matched route pattern, or the raw request path when
/// no route matched.
pub async fn track_request_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    metrics::inc_visits();

    let response = next.run(request).await;

    // The delay runs before the latency is read, so every observation is
    // inflated by it. Intentional: the lab's latency dashboards need data.
    if let Some(delay) = fault_delay(&state.config) {
        tokio::time::sleep(delay).await;
    }
    metrics::record_request_latency(start, &endpoint);

    response
}

/// Sample the artificial delay for one request, if fault injection is on.
pub fn fault_delay(config: &Config) -> Option<Duration> {
    if !config.fault_injection {
        return None;
    }

    let millis = rand::thread_rng()
        .gen_range(config.fault_latency_min_ms..=config.fault_latency_max_ms);
    Some(Duration::from_millis(millis))
}
