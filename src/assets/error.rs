//! Delivery failure kinds

use hyper::StatusCode;
use thiserror::Error;

/// Why an asset could not be fetched or stored
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("asset not found: {path}")]
    NotFound { path: String },

    #[error("asset store unavailable for {path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("asset path rejected: {path}")]
    InvalidPath { path: String },
}

impl DeliveryError {
    /// Status code answered alongside the `false` body
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::InvalidPath { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Unavailable { .. } => "unavailable",
            Self::InvalidPath { .. } => "invalid_path",
        }
    }
}
