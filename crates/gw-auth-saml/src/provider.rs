//! The SAML provider state machine.
//!
//! `authenticate` tries a chain of credential-extraction strategies in a
//! strict order and short-circuits on the first one that does not decline:
//!
//! 1. via the `Authorization` header
//! 2. via the persisted access token
//! 3. via the refresh token (only after the access token proved expired)
//! 4. via a `SAMLResponse` payload (the ACS callback)
//! 5. via a new handshake with the Identity Provider
//!
//! `deauthenticate` drives user-initiated logout and IdP-initiated Single
//! Logout. The provider is immutable after construction and safe to share
//! across concurrent requests; the request is treated as exclusively owned
//! for the duration of a call. A call cancelled between the token exchange
//! and the follow-up authentication leaks the rotated pair; the caller must
//! not persist partial state.

use std::sync::Arc;

use async_trait::async_trait;

use gw_cluster::{
    AccessTokenRequest, ClusterClient, SamlAuthenticateRequest, SamlInvalidateRequest,
    SamlLogoutRequest, SamlPrepareRequest,
};
use gw_core::config::PublicConfig;
use gw_core::event::{Event, EventType};
use gw_core::request::GatewayRequest;

use crate::errors::{AuthenticationError, ErrorCategory};
use crate::result::{AuthenticationResult, DeauthenticationResult};
use crate::state::ProviderState;

/// Log target for provider decision points. Log output never includes token
/// material or SAML payloads.
const LOG_TARGET: &str = "security::saml";

/// Path of the Assertion Consumer Service endpoint, relative to the base
/// path. The cluster and the IdP are configured against this URL.
const ACS_PATH: &str = "/api/security/v1/saml";

/// Redirect target after a logout the IdP does not complete.
const LOGGED_OUT_URL: &str = "/logged_out";

/// An authentication provider the gateway's provider chain can call.
///
/// Providers are stateless; per-session state is owned by the caller and
/// passed in with each request. A provider that returns
/// [`AuthenticationResult::NotHandled`] leaves the request untouched for the
/// next provider in the chain.
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Returns the provider type identifier.
    fn name(&self) -> &'static str;

    /// Attempts to authenticate the request.
    async fn authenticate(
        &self,
        request: &mut GatewayRequest,
        state: Option<&ProviderState>,
    ) -> AuthenticationResult;

    /// Attempts to log the request's session out.
    async fn deauthenticate(
        &self,
        request: &GatewayRequest,
        state: Option<&ProviderState>,
    ) -> DeauthenticationResult;
}

/// Configuration handed to [`SamlProvider::new`].
#[derive(Clone)]
pub struct SamlProviderOptions {
    /// Externally visible address of the gateway, used to build the ACS URL.
    pub public: PublicConfig,
    /// Client for the backend cluster's security API.
    pub client: Arc<dyn ClusterClient>,
}

/// SAML 2.0 Web-SSO authentication provider.
pub struct SamlProvider {
    public: PublicConfig,
    client: Arc<dyn ClusterClient>,
}

/// Outcome of the header strategy.
///
/// A missing header lets the chain continue; an unrecognised scheme stops
/// the chain entirely, since another provider may understand the scheme and
/// this provider must not steal the request.
enum HeaderAuthentication {
    /// No `Authorization` header on the request.
    Missing,
    /// The header exists but its scheme is not `bearer`.
    UnrecognizedScheme,
    /// The strategy produced a definite result.
    Finished(AuthenticationResult),
}

impl SamlProvider {
    /// Provider type identifier.
    pub const NAME: &'static str = "saml";

    /// Creates a provider from the given options.
    #[must_use]
    pub fn new(options: SamlProviderOptions) -> Self {
        Self {
            public: options.public,
            client: options.client,
        }
    }

    /// Returns the Assertion Consumer Service URL identifying this service
    /// provider to the cluster and the IdP.
    #[must_use]
    pub fn acs_url(&self) -> String {
        format!("{}{}{}", self.public.origin(), self.public.base_path, ACS_PATH)
    }

    /// Strategy 1: authenticate via the request's own `Authorization` header.
    async fn authenticate_via_header(&self, request: &GatewayRequest) -> HeaderAuthentication {
        tracing::debug!(target: LOG_TARGET, "Trying to authenticate via header.");

        let Some(scheme) = request.authorization_scheme() else {
            tracing::debug!(target: LOG_TARGET, "Authorization header is not presented.");
            return HeaderAuthentication::Missing;
        };

        if !scheme.eq_ignore_ascii_case("bearer") {
            tracing::debug!(target: LOG_TARGET, scheme, "Unsupported authentication scheme.");
            return HeaderAuthentication::UnrecognizedScheme;
        }

        match self.client.authenticate(request).await {
            Ok(user) => {
                tracing::debug!(target: LOG_TARGET, "Request has been authenticated via header.");
                HeaderAuthentication::Finished(AuthenticationResult::succeeded(user))
            }
            Err(error) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    %error,
                    "Failed to authenticate request via header."
                );
                HeaderAuthentication::Finished(AuthenticationResult::failed(error))
            }
        }
    }

    /// Strategy 2: authenticate via the access token from the persisted
    /// state.
    ///
    /// The token is injected into the request's `Authorization` header for
    /// the duration of the backend call only; strategy 1 already proved the
    /// header absent.
    async fn authenticate_via_state(
        &self,
        request: &mut GatewayRequest,
        state: &ProviderState,
    ) -> AuthenticationResult {
        tracing::debug!(target: LOG_TARGET, "Trying to authenticate via state.");

        let Some(access_token) = state.access_token.as_deref() else {
            tracing::debug!(target: LOG_TARGET, "Access token is not found in state.");
            return AuthenticationResult::not_handled();
        };

        request.set_authorization(&format!("Bearer {access_token}"));
        let outcome = self.client.authenticate(request).await;
        request.remove_authorization();

        match outcome {
            Ok(user) => {
                tracing::debug!(target: LOG_TARGET, "Request has been authenticated via state.");
                AuthenticationResult::succeeded(user)
            }
            Err(error) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    %error,
                    "Failed to authenticate request via state."
                );
                AuthenticationResult::failed(error)
            }
        }
    }

    /// Strategy 3: exchange the refresh token for a new pair and retry.
    ///
    /// Refresh tokens are single-use. When two concurrent requests race
    /// here, the loser sees the cluster reject its token with 400; it must
    /// re-initiate the handshake (or answer 400 when it cannot redirect),
    /// never retry the exchange.
    async fn authenticate_via_refresh_token(
        &self,
        request: &mut GatewayRequest,
        state: &ProviderState,
    ) -> AuthenticationResult {
        tracing::debug!(target: LOG_TARGET, "Trying to refresh the expired access token.");

        let Some(refresh_token) = state.refresh_token.as_deref() else {
            tracing::debug!(target: LOG_TARGET, "Refresh token is not found in state.");
            return AuthenticationResult::not_handled();
        };

        let tokens = match self
            .client
            .get_access_token(&AccessTokenRequest::refresh(refresh_token))
            .await
        {
            Ok(tokens) => tokens,
            Err(error) => {
                tracing::debug!(target: LOG_TARGET, %error, "Failed to refresh access token.");
                Event::builder(EventType::RefreshTokenError, Self::NAME)
                    .failure(error.to_string())
                    .build()
                    .emit();

                if ErrorCategory::of(&error) != ErrorCategory::RefreshRejected {
                    return AuthenticationResult::failed(error);
                }

                if request.can_redirect() {
                    tracing::debug!(
                        target: LOG_TARGET,
                        "Both access and refresh tokens are expired, re-initiating handshake."
                    );
                    return self.authenticate_via_handshake(request).await;
                }

                return AuthenticationResult::failed(AuthenticationError::bad_request(
                    "Both access and refresh tokens are expired.",
                ));
            }
        };

        request.set_authorization(&format!("Bearer {}", tokens.access_token));
        let outcome = self.client.authenticate(request).await;
        request.remove_authorization();

        match outcome {
            Ok(user) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    "Request has been authenticated via refreshed token."
                );
                Event::builder(EventType::RefreshToken, Self::NAME)
                    .success()
                    .username(user.username.as_str())
                    .build()
                    .emit();
                AuthenticationResult::succeeded_with_state(
                    user,
                    ProviderState::established(tokens.access_token, tokens.refresh_token),
                )
            }
            Err(error) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    %error,
                    "Failed to authenticate request via refreshed token."
                );
                AuthenticationResult::failed(error)
            }
        }
    }

    /// Strategy 4: exchange a `SAMLResponse` payload (the ACS callback) for
    /// a token pair.
    async fn authenticate_via_payload(
        &self,
        saml_response: &str,
        state: Option<&ProviderState>,
    ) -> AuthenticationResult {
        tracing::debug!(target: LOG_TARGET, "Trying to authenticate via SAML response payload.");

        let (ids, redirect_url) = match state {
            Some(state) => match (&state.request_id, &state.next_url) {
                // SP-initiated: the response must answer our prepared request.
                (Some(request_id), Some(next_url)) => {
                    (vec![request_id.clone()], next_url.clone())
                }
                // IdP-initiated: no handshake was prepared on this side.
                (None, None) => (Vec::new(), format!("{}/", self.public.base_path)),
                _ => {
                    tracing::debug!(
                        target: LOG_TARGET,
                        "SAML response arrived with an inconsistent handshake state."
                    );
                    return AuthenticationResult::failed(AuthenticationError::bad_request(
                        "SAML response state does not have corresponding request id or redirect URL.",
                    ));
                }
            },
            None => (Vec::new(), format!("{}/", self.public.base_path)),
        };

        let exchange = SamlAuthenticateRequest {
            ids,
            content: saml_response.to_string(),
        };

        match self.client.saml_authenticate(&exchange).await {
            Ok(tokens) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    "SAML response has been validated by the cluster."
                );
                Event::builder(EventType::Login, Self::NAME).success().build().emit();
                AuthenticationResult::redirect_to_with_state(
                    redirect_url,
                    ProviderState::established(tokens.access_token, tokens.refresh_token),
                )
            }
            Err(error) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    %error,
                    "Failed to exchange SAML response for an access token."
                );
                Event::builder(EventType::LoginError, Self::NAME)
                    .failure(error.to_string())
                    .build()
                    .emit();
                AuthenticationResult::failed(error)
            }
        }
    }

    /// Strategy 5: initiate a new SP-initiated handshake.
    ///
    /// XHR clients cannot follow a redirect to the IdP; they receive the
    /// pending error from an earlier strategy instead.
    async fn authenticate_via_handshake(&self, request: &GatewayRequest) -> AuthenticationResult {
        tracing::debug!(target: LOG_TARGET, "Trying to initiate SAML handshake.");

        if !request.can_redirect() {
            tracing::debug!(
                target: LOG_TARGET,
                "SAML handshake can not be initiated by AJAX requests."
            );
            return AuthenticationResult::not_handled();
        }

        let prepare = SamlPrepareRequest { acs: self.acs_url() };
        match self.client.saml_prepare(&prepare).await {
            Ok(prepared) => {
                tracing::debug!(
                    target: LOG_TARGET,
                    "Redirecting to the Identity Provider to complete the handshake."
                );
                let next_url = format!(
                    "{}{}{}",
                    request.base_path(),
                    request.path(),
                    request.search()
                );
                AuthenticationResult::redirect_to_with_state(
                    prepared.redirect,
                    ProviderState::handshake(prepared.id, next_url),
                )
            }
            Err(error) => {
                tracing::debug!(target: LOG_TARGET, %error, "Failed to initiate SAML handshake.");
                AuthenticationResult::failed(error)
            }
        }
    }
}

#[async_trait]
impl AuthenticationProvider for SamlProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn authenticate(
        &self,
        request: &mut GatewayRequest,
        state: Option<&ProviderState>,
    ) -> AuthenticationResult {
        tracing::debug!(
            target: LOG_TARGET,
            path = request.path(),
            "Trying to authenticate request."
        );

        let mut result = match self.authenticate_via_header(request).await {
            HeaderAuthentication::Missing => AuthenticationResult::not_handled(),
            HeaderAuthentication::UnrecognizedScheme => {
                return AuthenticationResult::not_handled()
            }
            HeaderAuthentication::Finished(result) => return result,
        };

        if let Some(state) = state {
            result = self.authenticate_via_state(request, state).await;
            if is_expired_token_failure(&result) {
                result = self.authenticate_via_refresh_token(request, state).await;
            }
        }

        if result.is_not_handled() {
            if let Some(saml_response) = saml_response_payload(request).map(str::to_owned) {
                result = self.authenticate_via_payload(&saml_response, state).await;
            }
        }

        if result.is_not_handled() {
            result = self.authenticate_via_handshake(request).await;
        }

        result
    }

    async fn deauthenticate(
        &self,
        request: &GatewayRequest,
        state: Option<&ProviderState>,
    ) -> DeauthenticationResult {
        tracing::debug!(
            target: LOG_TARGET,
            path = request.path(),
            "Trying to deauthenticate request."
        );

        let access_token = state.and_then(|state| state.access_token.as_deref());
        let idp_initiated = saml_request_query(request).is_some();

        if access_token.is_none() && !idp_initiated {
            tracing::debug!(
                target: LOG_TARGET,
                "There is neither access token nor SAML logout request to handle."
            );
            return DeauthenticationResult::not_handled();
        }

        let outcome = if idp_initiated {
            tracing::debug!(
                target: LOG_TARGET,
                "Logout has been initiated by the Identity Provider."
            );
            self.client
                .saml_invalidate(&SamlInvalidateRequest {
                    query_string: request.query_string().to_string(),
                    acs: self.acs_url(),
                })
                .await
        } else {
            let Some(token) = access_token else {
                return DeauthenticationResult::not_handled();
            };
            tracing::debug!(target: LOG_TARGET, "Logout has been initiated by the user.");
            self.client
                .saml_logout(&SamlLogoutRequest {
                    token: token.to_string(),
                    refresh_token: state.and_then(|state| state.refresh_token.clone()),
                })
                .await
        };

        match outcome {
            Ok(response) => {
                Event::builder(EventType::Logout, Self::NAME).success().build().emit();
                match response.redirect {
                    Some(url) => {
                        tracing::debug!(
                            target: LOG_TARGET,
                            "Redirecting to complete Single Logout at the Identity Provider."
                        );
                        DeauthenticationResult::redirect_to(url)
                    }
                    None => DeauthenticationResult::redirect_to(LOGGED_OUT_URL),
                }
            }
            Err(error) => {
                tracing::debug!(target: LOG_TARGET, %error, "Failed to deauthenticate request.");
                Event::builder(EventType::LogoutError, Self::NAME)
                    .failure(error.to_string())
                    .build()
                    .emit();
                DeauthenticationResult::failed(error)
            }
        }
    }
}

/// Checks whether a result is a failure the refresh flow can recover from.
fn is_expired_token_failure(result: &AuthenticationResult) -> bool {
    match result {
        AuthenticationResult::Failed {
            error: AuthenticationError::Cluster(error),
        } => ErrorCategory::of(error) == ErrorCategory::TokenExpired,
        _ => false,
    }
}

/// Extracts a non-empty `SAMLResponse` field from the request body.
fn saml_response_payload(request: &GatewayRequest) -> Option<&str> {
    let value = request.payload()?.get("SAMLResponse")?.as_str()?;
    (!value.is_empty()).then_some(value)
}

/// Extracts a non-empty `SAMLRequest` field from the request query.
fn saml_request_query(request: &GatewayRequest) -> Option<&str> {
    let value = request.query()?.get("SAMLRequest")?.as_str()?;
    (!value.is_empty()).then_some(value)
}
