//! Cluster client error types.
//!
//! The provider layer classifies failures by the HTTP-like status code and
//! the error reason the cluster reports, so both are preserved here exactly
//! as they arrive.

use serde::Deserialize;
use thiserror::Error;

/// Result type for cluster operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Error payload the cluster attaches to non-success responses.
///
/// Only the fields the security layer reads are modelled; everything else in
/// the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// The error cause, when the cluster reports one.
    #[serde(default)]
    pub error: Option<ApiErrorCause>,
}

/// The `error` object inside an [`ApiErrorBody`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorCause {
    /// Machine-readable error type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Human-readable error reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl ApiErrorBody {
    /// Creates an error body with the given reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            error: Some(ApiErrorCause {
                kind: None,
                reason: Some(reason.into()),
            }),
        }
    }
}

/// Errors that can occur when calling the cluster.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Client configuration is not usable.
    #[error("cluster configuration error: {0}")]
    Configuration(String),

    /// The cluster answered with a non-success status.
    #[error("cluster responded with status {status}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Parsed error body, when the response carried one.
        body: Option<ApiErrorBody>,
    },

    /// The request never produced a response.
    #[error("cluster transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("unexpected cluster response: {0}")]
    Response(String),
}

impl ClusterError {
    /// Creates an API error with the given status and no body.
    #[must_use]
    pub const fn api(status: u16) -> Self {
        Self::Api { status, body: None }
    }

    /// Creates an API error with the given status and reason.
    #[must_use]
    pub fn api_with_reason(status: u16, reason: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: Some(ApiErrorBody::with_reason(reason)),
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            Self::Configuration(_) | Self::Response(_) => None,
        }
    }

    /// Returns the error reason reported by the cluster, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Api {
                body: Some(body), ..
            } => body.error.as_ref()?.reason.as_deref(),
            _ => None,
        }
    }
}
