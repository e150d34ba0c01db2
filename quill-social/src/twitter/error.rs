use crate::twitter::types::ApiFailure;
use quill_http::HttpError;
use thiserror::Error;

/// Failure of the single create-post attempt.
///
/// `Api` carries the structured problem payload and renders the multi-line
/// `Status:`/`Title:`/`Detail:`/`Errors:` report; everything else falls back
/// to the generic `Error:` line.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("{0}")]
    Api(ApiFailure),

    #[error("Error: {0}")]
    Other(#[from] HttpError),
}
