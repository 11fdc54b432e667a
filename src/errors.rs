use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The API reported an internal error in an otherwise completed response.
    /// Recovered by immediate retry; surfaced only after retries are exhausted.
    #[error("transient server error: {0}")]
    TransientServerError(String),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// The response violates a structural assumption of the mapping layer.
    /// Carries the offending value for diagnosis.
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// A previously observed, irrecoverable data anomaly in a single record.
    /// Swallowed at record granularity inside the match history reconciler.
    #[error("unreconcilable record: {0}")]
    UnreconcilableRecord(String),

    #[error("HTTP transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    /// True for the one failure class the retry policy is allowed to intercept.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::TransientServerError(_))
    }
}
