//! Wire types for the cluster's security API.
//!
//! Field names are preserved exactly as the cluster expects them on the
//! wire (`queryString`, `grant_type`, `access_token`, ...), so these structs
//! serialize straight into request bodies.

use serde::{Deserialize, Serialize};

/// A user as reported by the cluster's as-user `authenticate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Username the credential resolved to.
    pub username: String,
    /// Roles granted to the user.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Full display name, when the realm provides one.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Email address, when the realm provides one.
    #[serde(default)]
    pub email: Option<String>,
    /// Realm-specific metadata attached to the user.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl AuthenticatedUser {
    /// Creates a user with the given name and no roles.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            roles: Vec::new(),
            full_name: None,
            email: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Checks whether the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|candidate| candidate == role)
    }
}

/// Body of the internal `saml_prepare` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamlPrepareRequest {
    /// Assertion Consumer Service URL identifying this service provider.
    pub acs: String,
}

/// Response of the internal `saml_prepare` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamlPrepareResponse {
    /// Identifier of the prepared authentication request; consumed exactly
    /// once when the matching `SAMLResponse` arrives.
    pub id: String,
    /// Identity Provider URL to redirect the user to.
    pub redirect: String,
}

/// Body of the internal `saml_authenticate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamlAuthenticateRequest {
    /// Identifiers of the authentication requests this response may answer.
    /// Empty for IdP-initiated logins.
    pub ids: Vec<String>,
    /// The base64-encoded `SAMLResponse` exactly as it arrived.
    pub content: String,
}

/// An access/refresh token pair issued by the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Single-use credential exchangeable for a new pair.
    pub refresh_token: String,
}

/// Body of the internal `get_access_token` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenRequest {
    /// OAuth-style grant type.
    pub grant_type: String,
    /// The refresh token to exchange.
    pub refresh_token: String,
}

impl AccessTokenRequest {
    /// Creates a `refresh_token` grant request.
    #[must_use]
    pub fn refresh(refresh_token: impl Into<String>) -> Self {
        Self {
            grant_type: "refresh_token".to_string(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Body of the internal `saml_logout` call (user-initiated logout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamlLogoutRequest {
    /// The access token of the session being terminated.
    pub token: String,
    /// The matching refresh token, when the session still has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Body of the internal `saml_invalidate` call (IdP-initiated logout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamlInvalidateRequest {
    /// The raw query string of the logout request, without the leading `?`.
    #[serde(rename = "queryString")]
    pub query_string: String,
    /// Assertion Consumer Service URL identifying this service provider.
    pub acs: String,
}

/// Response of the `saml_logout` and `saml_invalidate` calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// IdP URL that completes Single Logout, when the IdP requires it.
    #[serde(default)]
    pub redirect: Option<String>,
}
