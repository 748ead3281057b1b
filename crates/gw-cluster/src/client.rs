//! Cluster client trait.

use async_trait::async_trait;

use gw_core::request::GatewayRequest;

use crate::error::ClusterResult;
use crate::types::{
    AccessTokenRequest, AuthenticatedUser, LogoutResponse, SamlAuthenticateRequest,
    SamlInvalidateRequest, SamlLogoutRequest, SamlPrepareRequest, SamlPrepareResponse, TokenPair,
};

/// Capability interface over the cluster's security API.
///
/// `authenticate` runs *as-user*: it forwards the `Authorization` header of
/// the given request, so the cluster validates the caller's own credential.
/// Every other call runs *as-internal* with the privileged service account.
///
/// Implementations must be thread-safe; a single client is shared across
/// concurrent requests.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Validates the credential carried by the request's `Authorization`
    /// header and resolves it to a user.
    async fn authenticate(&self, request: &GatewayRequest) -> ClusterResult<AuthenticatedUser>;

    /// Prepares an SP-initiated SAML handshake.
    ///
    /// The cluster builds the `AuthnRequest` for the configured IdP and
    /// returns its id together with the IdP URL to redirect the user to.
    async fn saml_prepare(
        &self,
        request: &SamlPrepareRequest,
    ) -> ClusterResult<SamlPrepareResponse>;

    /// Exchanges a `SAMLResponse` for an access/refresh token pair.
    ///
    /// The cluster performs all XML parsing and cryptographic validation of
    /// the assertion.
    async fn saml_authenticate(
        &self,
        request: &SamlAuthenticateRequest,
    ) -> ClusterResult<TokenPair>;

    /// Exchanges a refresh token for a new access/refresh token pair.
    ///
    /// Refresh tokens are single-use: a concurrent exchange of the same
    /// token fails with status 400.
    async fn get_access_token(&self, request: &AccessTokenRequest) -> ClusterResult<TokenPair>;

    /// Invalidates the session tokens for a user-initiated logout.
    async fn saml_logout(&self, request: &SamlLogoutRequest) -> ClusterResult<LogoutResponse>;

    /// Handles an IdP-initiated logout request.
    async fn saml_invalidate(
        &self,
        request: &SamlInvalidateRequest,
    ) -> ClusterResult<LogoutResponse>;
}
