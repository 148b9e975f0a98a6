//! # Structured Logging Module
//!
//! Environment-aware console logging for suite runs. Level comes from
//! `RUST_LOG` when set, otherwise from the suite environment (`SUITE_ENV`).
//! `SUITE_LOG_FORMAT=json` switches the console layer to JSON lines.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let console_layer = if json_output_requested() {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_test_writer()
                .with_filter(filter)
                .boxed()
        };

        // Test harnesses and host processes may already own the global subscriber
        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("SUITE_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "test".to_string())
        .to_lowercase()
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn json_output_requested() -> bool {
    std::env::var("SUITE_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Log structured data for a lifecycle step of a chained resource
pub fn log_resource_operation(resource: &str, phase: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        resource = %resource,
        phase = %phase,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "RESOURCE_OPERATION"
    );
}

/// Log structured data for an artifact provisioning step
pub fn log_provisioning_operation(operation: &str, local_path: &str, remote_path: &str, status: &str) {
    tracing::info!(
        operation = %operation,
        local_path = %local_path,
        remote_path = %remote_path,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "PROVISIONING_OPERATION"
    );
}
