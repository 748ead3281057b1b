//! HTTP implementation of the cluster client.
//!
//! Talks to the cluster's security API over reqwest. Internal calls
//! authenticate with the configured service account; as-user calls forward
//! the caller's `Authorization` header verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;

use gw_core::config::ClusterConfig;
use gw_core::request::GatewayRequest;

use crate::client::ClusterClient;
use crate::error::{ApiErrorBody, ClusterError, ClusterResult};
use crate::types::{
    AccessTokenRequest, AuthenticatedUser, LogoutResponse, SamlAuthenticateRequest,
    SamlInvalidateRequest, SamlLogoutRequest, SamlPrepareRequest, SamlPrepareResponse, TokenPair,
};

/// Security API paths.
const AUTHENTICATE_PATH: &str = "/_security/_authenticate";
const SAML_PREPARE_PATH: &str = "/_security/saml/prepare";
const SAML_AUTHENTICATE_PATH: &str = "/_security/saml/authenticate";
const OAUTH_TOKEN_PATH: &str = "/_security/oauth2/token";
const SAML_LOGOUT_PATH: &str = "/_security/saml/logout";
const SAML_INVALIDATE_PATH: &str = "/_security/saml/invalidate";

/// Cluster client backed by the cluster's HTTP security API.
#[derive(Debug, Clone)]
pub struct HttpClusterClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClusterClient {
    /// Creates a client for the given cluster settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the settings fail validation or the underlying
    /// HTTP client cannot be built.
    pub fn new(config: &ClusterConfig) -> ClusterResult<Self> {
        config
            .validate()
            .map_err(|error| ClusterError::Configuration(error.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Makes an internal POST request authenticated as the service account.
    async fn internal_post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClusterResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Decodes a response, mapping non-success statuses to [`ClusterError::Api`].
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClusterResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.ok();
            tracing::debug!(status = status.as_u16(), "cluster call failed");
            return Err(ClusterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|error| ClusterError::Response(error.to_string()))
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn authenticate(&self, request: &GatewayRequest) -> ClusterResult<AuthenticatedUser> {
        let mut call = self.http.get(self.url(AUTHENTICATE_PATH));
        if let Some(authorization) = request.authorization() {
            call = call.header(AUTHORIZATION, authorization);
        }

        Self::decode(call.send().await?).await
    }

    async fn saml_prepare(
        &self,
        request: &SamlPrepareRequest,
    ) -> ClusterResult<SamlPrepareResponse> {
        self.internal_post(SAML_PREPARE_PATH, request).await
    }

    async fn saml_authenticate(
        &self,
        request: &SamlAuthenticateRequest,
    ) -> ClusterResult<TokenPair> {
        self.internal_post(SAML_AUTHENTICATE_PATH, request).await
    }

    async fn get_access_token(&self, request: &AccessTokenRequest) -> ClusterResult<TokenPair> {
        self.internal_post(OAUTH_TOKEN_PATH, request).await
    }

    async fn saml_logout(&self, request: &SamlLogoutRequest) -> ClusterResult<LogoutResponse> {
        self.internal_post(SAML_LOGOUT_PATH, request).await
    }

    async fn saml_invalidate(
        &self,
        request: &SamlInvalidateRequest,
    ) -> ClusterResult<LogoutResponse> {
        self.internal_post(SAML_INVALIDATE_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = gw_core::Config::default().cluster;
        config.url = "not-a-url".to_string();

        let error = HttpClusterClient::new(&config).unwrap_err();
        assert!(matches!(error, ClusterError::Configuration(_)));
    }

    #[test]
    fn base_url_is_normalized() {
        let mut config = gw_core::Config::default().cluster;
        config.url = "http://cluster:9200/".to_string();

        let client = HttpClusterClient::new(&config).unwrap();
        assert_eq!(
            client.url(SAML_PREPARE_PATH),
            "http://cluster:9200/_security/saml/prepare"
        );
    }
}
