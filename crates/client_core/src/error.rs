use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a dashboard read. Terminal at the UI boundary: surfaced to
/// the user, never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Status { status: StatusCode },
    #[error("malformed response payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failure of a create or update, carrying the backend-supplied detail
/// message when one decodes from the error body.
#[derive(Debug, Error)]
#[error("failed to save symptoms: {detail}")]
pub struct SubmitError {
    pub status: Option<StatusCode>,
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    /// Local form validation; a submit rejected here never reaches the
    /// network.
    #[error("log at least one symptom or cervical mucus observation")]
    NothingToLog,
}
