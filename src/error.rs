use std::time::Duration;

use reqwest::StatusCode;

/// Failure kinds surfaced by the catalog operations.
///
/// List-shaped operations absorb all of these and degrade to an empty
/// result; the single-entity operations return them so callers can branch
/// into a not-found or error-page state.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("unexpected HTTP status {status} from {path}")]
    Status { status: StatusCode, path: String },
    #[error("response did not match the expected shape: {0}")]
    InvalidData(#[source] serde_json::Error),
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the api_key query parameter; strip it
        // before the error can reach a log line or an error chain.
        TmdbError::Transport(err.without_url())
    }
}

pub type TmdbResult<T> = Result<T, TmdbError>;
