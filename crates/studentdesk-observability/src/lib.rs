//! studentdesk Observability
//!
//! - Structured logging via `tracing` (compact or JSON console output, plus an
//!   optional daily-rolling JSON file)
//! - Prometheus metrics for HTTP traffic and authentication events
//! - Per-request logging middleware
//!
//! # Examples
//!
//! ```no_run
//! use studentdesk_observability::{LoggingConfig, init_logging, init_metrics};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_logging(&LoggingConfig::from_env());
//!     let metrics = init_metrics();
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{LogFormat, LoggingConfig, init_logging, logging_middleware};
pub use metrics::{
    init_metrics, is_metrics_enabled, metrics_middleware, track_login_failure,
    track_login_success, track_session_issued, track_student_created, track_student_deleted,
    track_student_updated,
};
