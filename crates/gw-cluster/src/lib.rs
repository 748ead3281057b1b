//! Backend cluster RPC contract for the gatewarden security layer.
//!
//! The cluster owns credential validation: it verifies bearer tokens,
//! exchanges SAML assertions for token pairs and rotates refresh tokens.
//! This crate models that surface as a narrow capability trait,
//! [`ClusterClient`], plus a reqwest-based implementation,
//! [`HttpClusterClient`], that talks to the cluster's security API.
//!
//! Calls run in one of two modes:
//! - *as-user*: the caller's `Authorization` header is forwarded verbatim
//! - *as-internal*: the configured service account authenticates the call

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ClusterClient;
pub use error::{ApiErrorBody, ClusterError, ClusterResult};
pub use self::http::HttpClusterClient;
pub use types::{
    AccessTokenRequest, AuthenticatedUser, LogoutResponse, SamlAuthenticateRequest,
    SamlInvalidateRequest, SamlLogoutRequest, SamlPrepareRequest, SamlPrepareResponse, TokenPair,
};
