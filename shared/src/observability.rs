use anyhow::{Context, Result};
use std::net::SocketAddr;

// Counters and histograms recorded per request.

/// Counter: entries admitted into a space.
pub const SPACE_ENTRIES_TOTAL: &str = "space_entry_total";

/// Counter: exits registered.
pub const SPACE_EXITS_TOTAL: &str = "space_exit_total";

/// Histogram: entry registration latency in seconds, rejected attempts included.
pub const SPACE_ENTRY_REGISTRATION_SECONDS: &str = "space_entry_registration_seconds";

/// Histogram: exit registration latency in seconds.
pub const SPACE_EXIT_REGISTRATION_SECONDS: &str = "space_exit_registration_seconds";

pub const AUTH_LOGIN_SUCCESS_TOTAL: &str = "auth_login_success_total";
pub const AUTH_LOGIN_FAILURE_TOTAL: &str = "auth_login_failure_total";

// Gauges refreshed from the store.

pub const STUDENTS_ACTIVE: &str = "students_active";
pub const SPACES_TOTAL: &str = "spaces_total";
pub const SPACES_AVAILABLE: &str = "spaces_available";
pub const SPACES_OCCUPIED: &str = "spaces_occupied";
pub const ACCESS_ACTIVE: &str = "access_active_current";
pub const ACCESS_COMPLETED: &str = "access_completed";

/// Installs the Prometheus exporter on `port`. No-op if `port` is None.
pub fn init(port: Option<u16>) -> Result<()> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install Prometheus metrics exporter")?;
    describe();
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

fn describe() {
    metrics::describe_counter!(SPACE_ENTRIES_TOTAL, "Total number of space entries");
    metrics::describe_counter!(SPACE_EXITS_TOTAL, "Total number of space exits");
    metrics::describe_histogram!(
        SPACE_ENTRY_REGISTRATION_SECONDS,
        metrics::Unit::Seconds,
        "Time taken to register an entry"
    );
    metrics::describe_histogram!(
        SPACE_EXIT_REGISTRATION_SECONDS,
        metrics::Unit::Seconds,
        "Time taken to register an exit"
    );
    metrics::describe_counter!(AUTH_LOGIN_SUCCESS_TOTAL, "Successful login attempts");
    metrics::describe_counter!(AUTH_LOGIN_FAILURE_TOTAL, "Failed login attempts");
    metrics::describe_gauge!(STUDENTS_ACTIVE, "Number of active students");
    metrics::describe_gauge!(SPACES_TOTAL, "Number of spaces");
    metrics::describe_gauge!(SPACES_AVAILABLE, "Number of available spaces");
    metrics::describe_gauge!(SPACES_OCCUPIED, "Number of occupied spaces");
    metrics::describe_gauge!(ACCESS_ACTIVE, "Current number of active accesses");
    metrics::describe_gauge!(ACCESS_COMPLETED, "Number of completed accesses");
}
