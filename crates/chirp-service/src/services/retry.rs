//! Retry for feed-layer reads
//!
//! Only transient failures (database errors) are retried. Backoff doubles
//! each attempt with ±30% jitter and is capped at [`MAX_BACKOFF`].

use std::future::Future;
use std::time::Duration;

use chirp_common::QueryConfig;
use rand::Rng;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

const BACKOFF_MULTIPLIER: u32 = 2;
const MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Run `op` until it succeeds, fails permanently, or `retry_attempts` total
/// attempts have been made.
pub async fn with_read_retry<F, Fut, T, E>(config: &QueryConfig, op_name: &str, mut op: F) -> ServiceResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<ServiceError>,
{
    let max_attempts = config.retry_attempts.max(1);
    let mut backoff = config.initial_backoff();
    let mut attempt = 1;

    loop {
        match op().await.map_err(Into::into) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = jittered(backoff);
                warn!(
                    op = op_name,
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Transient read failure, retrying"
                );
                tokio::time::sleep(delay).await;

                backoff = (backoff * BACKOFF_MULTIPLIER).min(MAX_BACKOFF);
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(op = op_name, attempts = attempt, error = %e, "Read retries exhausted");
                }
                return Err(e);
            }
        }
    }
}

fn jittered(base: Duration) -> Duration {
    if base.is_zero() {
        return base;
    }
    let factor = 1.0 + rand::thread_rng().gen_range(-0.3..0.3);
    base.mul_f64(factor)
}
