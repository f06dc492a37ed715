use thiserror::Error;

/// Errors raised while talking to the Wild Trails backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token could be found in the configured credential source.
    #[error("Authentication required")]
    MissingToken,

    /// The bearer token has expired or cannot be decoded.
    #[error("Authentication required: session expired")]
    ExpiredToken,

    /// Transport failure or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("API error ({status}) on {endpoint}")]
    Status { status: u16, endpoint: String },
}

impl ApiError {
    /// Authentication failures block the map panel; everything else is a
    /// transient error shown next to stale data.
    pub const fn is_auth(&self) -> bool {
        match self {
            Self::MissingToken | Self::ExpiredToken => true,
            Self::Status { status, .. } => *status == 401,
            Self::Http(_) => false,
        }
    }
}
