use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log format (`json` or text).
pub const LOG_FORMAT_ENV: &str = "QBO_LOG_FORMAT";

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Setting
/// `QBO_LOG_FORMAT=json` switches to one JSON object per line.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json =
        std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if json { builder.json().try_init() } else { builder.try_init() };

    installed.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Log the outcome of a request with structured fields.
///
/// Server errors are logged at `warn`; everything else at `info`. Callers
/// must pass the path only, never the query string, which can carry the
/// OAuth code.
#[inline]
pub fn log_request_outcome(method: &str, path: &str, status: u16, elapsed: Duration) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if status >= 500 {
        warn!(method, path, status, duration_ms, "request_failure");
    } else {
        info!(method, path, status, duration_ms, "request_complete");
    }
}
