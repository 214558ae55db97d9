//! Wall-clock instrumentation for database operations.
//!
//! Every public operation of the table facade runs through [`timed`], which
//! reports the elapsed time of the wrapped future as a single log line and
//! hands the result back unchanged. The wrapper is purely observational:
//! no retry, no timeout, no result inspection.

use std::future::Future;
use std::time::{Duration, Instant};

use log::info;

/// Runs `op`, reports its wall-clock duration, and returns its output
/// unmodified. Failures inside `op` propagate through untouched; the
/// duration is reported either way.
pub async fn timed<F, T>(label: &str, op: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = op.await;
    info!("{} completed in {}", label, format_hms(start.elapsed()));
    result
}

/// Formats a duration as `H:MM:SS`.
///
/// The hours field is unbounded, so durations of a day or more render as
/// e.g. `25:01:01` instead of wrapping back to zero.
pub fn format_hms(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
