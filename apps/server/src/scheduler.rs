//! Keep-alive self-pinger.
//!
//! Free-tier hosts put idle services to sleep; a periodic request against
//! our own health endpoint keeps the instance warm. Off unless a base URL
//! is configured.

use tokio::time::{interval, sleep, Duration};
use tracing::{debug, info, warn};

/// Ping interval: 14 minutes, just under the common 15-minute idle cutoff.
const PING_INTERVAL_SECS: u64 = 14 * 60;

/// Delay before the first ping so the listener is up.
const INITIAL_DELAY_SECS: u64 = 5;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_SECS: u64 = 30;

/// Starts the background pinger against `<base_url>/api/health`.
pub fn start_keep_alive(base_url: String) {
    tokio::spawn(async move {
        let url = format!("{}/api/health", base_url.trim_end_matches('/'));
        info!("Keep-alive pinger started for {}", url);
        let client = reqwest::Client::new();

        sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut tick = interval(Duration::from_secs(PING_INTERVAL_SECS));
        loop {
            tick.tick().await;
            ping(&client, &url).await;
        }
    });
}

async fn ping(client: &reqwest::Client, url: &str) {
    for attempt in 1..=MAX_RETRIES {
        match client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Keep-alive ping ok");
                return;
            }
            Ok(response) => {
                warn!(
                    "Keep-alive ping returned {} (attempt {})",
                    response.status(),
                    attempt
                );
            }
            Err(e) => {
                warn!("Keep-alive ping failed (attempt {}): {}", attempt, e);
            }
        }
        if attempt < MAX_RETRIES {
            sleep(Duration::from_secs(RETRY_DELAY_SECS)).await;
        }
    }
    warn!("Keep-alive ping gave up after {} attempts", MAX_RETRIES);
}
