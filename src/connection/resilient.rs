use crate::connection::{ApiPath, Connection};
use crate::errors::ApiError;
use async_trait::async_trait;
use std::future::Future;

/// Total attempts, including the first. Retries are immediate; empirically
/// the false-error responses clear on the next request.
pub const MAX_ATTEMPTS: u32 = 3;

/// Classifies a completed response body as a mis-reported transient failure.
///
/// The API sometimes returns these phrases with a 200 or 400 for requests
/// that are otherwise valid. Only these two prefixes are retryable; any other
/// error text passes through and fails downstream when decoded.
#[must_use]
pub fn is_transient_body(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.starts_with("internal error") || lower.starts_with("internal server error")
}

/// Re-invokes `op` while it fails with the designated transient condition,
/// up to `max_attempts` total attempts. The final failure propagates
/// unchanged. Non-transient errors are never retried.
pub async fn with_retry<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Err(e) if e.is_transient() && attempt < max_attempts => {
                log::debug!("transient server error on attempt {attempt}/{max_attempts}, retrying");
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Decorates an inner connection with the bounded retry policy.
pub struct ResilientConnection<C> {
    inner: C,
}

impl<C> ResilientConnection<C> {
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Connection> Connection for ResilientConnection<C> {
    async fn fetch(&self, path: &ApiPath) -> Result<String, ApiError> {
        with_retry(MAX_ATTEMPTS, || async {
            let text = self.inner.fetch(path).await?;
            if is_transient_body(&text) {
                return Err(ApiError::TransientServerError(format!(
                    "false-error body from {path}"
                )));
            }
            Ok(text)
        })
        .await
    }
}
