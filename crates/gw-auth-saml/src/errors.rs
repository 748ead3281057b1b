//! Authentication error types and failure classification.

use thiserror::Error;

use gw_cluster::ClusterError;

/// Reason string the cluster reports when the backing token document has
/// been deleted but the token itself has not yet hit its expiry. The cluster
/// answers 500 in that case; it is treated as an expired token so the
/// refresh flow can recover.
pub const MISSING_TOKEN_REASON: &str = "token document is missing and must be present";

/// A definite authentication failure, as surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// User-visible 400 with a clear message.
    #[error("{0}")]
    BadRequest(String),

    /// Cluster error, propagated unchanged.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl AuthenticationError {
    /// Creates a user-visible bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Returns the HTTP status code the HTTP layer should answer with.
    ///
    /// Cluster errors without a status (transport failures) translate to
    /// 502, the gateway having failed to reach the backend.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Cluster(error) => error.status_code().unwrap_or(502),
        }
    }
}

/// Classification of a cluster failure, driving the provider's recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The access token is expired; a refresh may recover the session.
    TokenExpired,
    /// The refresh token was rejected; only a new handshake can recover.
    RefreshRejected,
    /// Everything else; no recovery, the failure is final.
    Other,
}

impl ErrorCategory {
    /// Classifies a cluster error.
    #[must_use]
    pub fn of(error: &ClusterError) -> Self {
        match error.status_code() {
            Some(401) => Self::TokenExpired,
            Some(500) if error.reason() == Some(MISSING_TOKEN_REASON) => Self::TokenExpired,
            Some(400) => Self::RefreshRejected,
            _ => Self::Other,
        }
    }
}
