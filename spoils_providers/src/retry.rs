use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation with exponential backoff.
///
/// # Arguments
/// * `operation` - The async operation to retry
/// * `base_delays` - Delays in seconds between the first attempts
/// * `final_retries` - Number of additional retries at the last base delay
///
/// The operation always runs at least once.
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail
pub async fn retry_with_backoff<F, Fut, T, E>(
    mut operation: F,
    base_delays: &[u64],
    final_retries: usize,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = (base_delays.len() + final_retries).max(1);
    let final_delay = base_delays.last().copied().unwrap_or_default();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < attempts => {
                let delay_secs = base_delays
                    .get(attempt - 1)
                    .copied()
                    .unwrap_or(final_delay);
                warn!(
                    "Request failed (attempt {}/{}): {e}. Retrying after {}s...",
                    attempt, attempts, delay_secs
                );
                sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
