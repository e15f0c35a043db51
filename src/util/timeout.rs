//! Request deadline for completion calls.

use std::future::Future;
use std::time::Duration;

use crate::error::CompletionError;

/// Run a completion request, failing with [`CompletionError::Timeout`] once
/// `limit` elapses. The pending request is dropped at that point.
pub async fn with_timeout<T>(
    limit: Duration,
    request: impl Future<Output = Result<T, CompletionError>>,
) -> Result<T, CompletionError> {
    tokio::time::timeout(limit, request)
        .await
        .unwrap_or_else(|_| Err(CompletionError::Timeout(saturating_millis(limit))))
}

/// Milliseconds in `limit`, clamped to `u64::MAX`.
pub fn saturating_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}
