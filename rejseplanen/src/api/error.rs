//! Rejseplanen client error types.

use crate::domain::Coordinate;

use super::convert::ConversionError;

/// Errors from a Rejseplanen request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-HTTP transport failed to deliver a response
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured base URL cannot be used to build request URLs
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A query coordinate cannot be encoded as micro-degrees
    #[error("coordinate {0} is not finite")]
    InvalidCoordinate(Coordinate),

    /// API returned a status other than 200
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body is not the expected JSON envelope
    #[error("JSON decode error: {message}")]
    Decoding {
        message: String,
        body: Option<String>,
    },
}

impl ApiError {
    /// Build a decoding error, keeping a short excerpt of the offending body.
    pub(crate) fn decoding(message: impl Into<String>, body: &[u8]) -> Self {
        ApiError::Decoding {
            message: message.into(),
            body: Some(String::from_utf8_lossy(body).chars().take(500).collect()),
        }
    }

    /// True for failures to obtain a successful response at all.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Http(_) | ApiError::Transport(_) | ApiError::Status { .. }
        )
    }

    /// True when a response arrived but its envelope could not be decoded.
    pub fn is_decoding_failure(&self) -> bool {
        matches!(self, ApiError::Decoding { .. })
    }
}

// The envelope was valid JSON but its contents did not convert; there is no
// body excerpt worth keeping at that point.
impl From<ConversionError> for ApiError {
    fn from(e: ConversionError) -> Self {
        ApiError::Decoding {
            message: e.to_string(),
            body: None,
        }
    }
}
