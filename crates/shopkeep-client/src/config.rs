//! # Client Configuration
//!
//! Timeout and retry policy for remote calls.
//!
//! ## Retry Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Remote Call Policy                                   │
//! │                                                                         │
//! │  Reads (fetch_products, tier lookup, listings)                         │
//! │  ├── bounded timeout per attempt                                       │
//! │  └── retry with exponential backoff (idempotent, safe to repeat)       │
//! │                                                                         │
//! │  Writes (insert/update/delete/upsert)                                  │
//! │  ├── bounded timeout                                                   │
//! │  └── NO automatic retry — repeating a sale insert would double-charge  │
//! │      stock; the user retries explicitly                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::warn;

use shopkeep_store::StoreResult;

use crate::error::{ClientError, ClientResult};

/// Timeout/retry configuration for client operations.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for a single remote call.
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// How many times an idempotent read is retried after the first attempt.
    /// Default: 2
    pub read_retries: u32,

    /// Base delay between read retries; doubles per attempt.
    /// Default: 200 milliseconds
    pub retry_base_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout: Duration::from_secs(10),
            read_retries: 2,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

impl ClientConfig {
    /// A configuration with no retries and tiny timeouts, for tests.
    pub fn fail_fast() -> Self {
        ClientConfig {
            request_timeout: Duration::from_secs(5),
            read_retries: 0,
            retry_base_delay: Duration::from_millis(1),
        }
    }
}

/// Runs an idempotent read with timeout and exponential backoff.
pub(crate) async fn retry_read<T, F, Fut>(config: &ClientConfig, mut op: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = StoreResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        let outcome = match timeout(config.request_timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => ClientError::from(e),
            Err(_) => ClientError::Timeout(config.request_timeout),
        };

        if attempt >= config.read_retries {
            return Err(outcome);
        }

        warn!(error = %outcome, attempt = attempt + 1, "Read failed, retrying");
        sleep(config.retry_base_delay * 2u32.saturating_pow(attempt)).await;
        attempt += 1;
    }
}

/// Runs a write with a bounded timeout and no automatic retry.
pub(crate) async fn write_once<T, Fut>(config: &ClientConfig, fut: Fut) -> ClientResult<T>
where
    Fut: Future<Output = StoreResult<T>>,
{
    match timeout(config.request_timeout, fut).await {
        Ok(result) => result.map_err(ClientError::from),
        Err(_) => Err(ClientError::Timeout(config.request_timeout)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
