//! Per-session provider state.

use serde::{Deserialize, Serialize};

/// State the caller's session layer persists for this provider between
/// requests.
///
/// The state moves through two phases:
/// 1. *Handshake*: `request_id` + `next_url`, written when an SP-initiated
///    handshake is prepared and consumed exactly once when the matching
///    `SAMLResponse` arrives.
/// 2. *Established*: `access_token` + `refresh_token`, written when the
///    cluster exchanges an assertion (or a refresh token) for a token pair.
///
/// A state carrying `request_id` without `next_url` (or vice versa) is a
/// protocol error and fails the next `SAMLResponse` it meets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderState {
    /// Identifier of the prepared authentication request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// URL the user was trying to reach when the handshake began.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,

    /// Bearer credential presented to the cluster on behalf of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Single-use credential exchangeable for a new token pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl ProviderState {
    /// Creates the handshake-phase state.
    #[must_use]
    pub fn handshake(request_id: impl Into<String>, next_url: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            next_url: Some(next_url.into()),
            access_token: None,
            refresh_token: None,
        }
    }

    /// Creates the established-phase state.
    #[must_use]
    pub fn established(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            request_id: None,
            next_url: None,
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }
}
