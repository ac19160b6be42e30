use std::time::Duration;

use crate::error::{AppError, AppResult};

const USER_AGENT: &str = concat!("todo-rs/", env!("CARGO_PKG_VERSION"));

/// Builds the shared outbound HTTP client.
///
/// One client is built at startup and cloned into every provider so
/// connections are pooled across calls.
pub fn build_http_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to build HTTP client: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(build_http_client(Duration::from_secs(5)).is_ok());
    }
}
