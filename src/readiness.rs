use crate::app_config::Startup;
use std::fmt::Display;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info, instrument, warn};

/// Runs `check` until it succeeds, backing off exponentially between attempts. Gives up after
/// `max_attempts` attempts and returns the last error.
#[instrument(skip(config, check))]
pub async fn wait_until_ready<T, E, F, Fut>(name: &str, config: &Startup, mut check: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let strategy = ExponentialBackoff::from_millis(config.retry_ms())
        .factor(2)
        .max_delay(config.retry_max_delay())
        .map(jitter)
        .take(config.max_attempts().saturating_sub(1));

    info!("Waiting for {}...", name);
    let result = Retry::start(strategy, || {
        let attempt = check();
        async move {
            attempt.await.inspect_err(|e| {
                warn!("⚠️ {} is not ready: {}. Retrying...", name, e);
            })
        }
    })
    .await;

    match &result {
        Ok(_) => info!("Waiting for {}... OK", name),
        Err(e) => error!("❌ Gave up waiting for {} after {} attempt(s): {}", name, config.max_attempts(), e),
    }

    result
}
