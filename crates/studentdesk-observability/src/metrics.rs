use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Check if metrics are enabled via METRICS_ENABLED env var (default: true)
pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `None` when metrics are disabled or a recorder is already
/// installed. Must be called from within a Tokio runtime.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_metrics_enabled() {
        return None;
    }

    let builder = match PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        LATENCY_BUCKETS,
    ) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid metric buckets; metrics disabled");
            return None;
        }
    };

    let handle = match builder.install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder; metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    tracing::info!("Prometheus metrics enabled at /metrics");
    Some(handle)
}

/// Records count, latency and in-flight gauge for every request.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

// Business metrics

/// `method` is `local` or `google`.
pub fn track_login_success(method: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("logins_total", "method" => method, "status" => "success").increment(1);
}

pub fn track_login_failure(method: &'static str, reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("logins_total", "method" => method, "status" => "failure", "reason" => reason)
        .increment(1);
}

pub fn track_session_issued() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("session_tokens_issued_total").increment(1);
}

pub fn track_student_created() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("students_created_total").increment(1);
}

pub fn track_student_updated() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("students_updated_total").increment(1);
}

pub fn track_student_deleted() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("students_deleted_total").increment(1);
}
