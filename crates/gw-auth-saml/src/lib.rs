//! SAML 2.0 Web-SSO authentication provider.
//!
//! Decides, for every incoming request, whether the request carries (or can
//! be upgraded to carry) a bearer credential the backend cluster recognises,
//! and orchestrates the SAML handshake with the external Identity Provider
//! when it cannot.
//!
//! The provider itself is stateless; all per-session state lives in
//! [`ProviderState`], owned by the caller's session layer and passed in with
//! each request. Each call returns an [`AuthenticationResult`] or
//! [`DeauthenticationResult`] the caller acts on.

pub mod errors;
pub mod provider;
pub mod result;
pub mod state;

pub use errors::{AuthenticationError, ErrorCategory};
pub use provider::{AuthenticationProvider, SamlProvider, SamlProviderOptions};
pub use result::{AuthenticationResult, DeauthenticationResult};
pub use state::ProviderState;
