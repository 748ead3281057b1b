//! Request model the authentication providers operate on.
//!
//! The gateway's HTTP framework is an external collaborator; providers only
//! see this narrow view of the incoming request. The `Authorization` header
//! is the single field providers may write, and only transiently: a provider
//! that injects a credential for a backend call removes the header again
//! before returning, so the request stays usable by other providers.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue};
use serde_json::Value;

/// Narrow view of an incoming HTTP request.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    headers: HeaderMap,
    payload: Option<Value>,
    query: Option<Value>,
    path: String,
    search: String,
    base_path: String,
    can_redirect: bool,
}

impl GatewayRequest {
    /// Creates a request for the given URL path.
    ///
    /// The request starts with no headers, no payload, an empty query string
    /// and is considered redirect-capable (a regular browser navigation).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            headers: HeaderMap::new(),
            payload: None,
            query: None,
            path: path.into(),
            search: String::new(),
            base_path: String::new(),
            can_redirect: true,
        }
    }

    /// Sets a header.
    ///
    /// Values that are not valid header values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the `Authorization` header.
    #[must_use]
    pub fn with_authorization(self, value: &str) -> Self {
        self.with_header(AUTHORIZATION, value)
    }

    /// Sets the parsed request body.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the parsed query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the raw query string, including the leading `?`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the path prefix the gateway is served under.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Marks whether the client can follow a redirect response.
    ///
    /// XHR/AJAX probes cannot; the determination itself belongs to the HTTP
    /// layer and is carried here as a plain flag.
    #[must_use]
    pub const fn with_can_redirect(mut self, can_redirect: bool) -> Self {
        self.can_redirect = can_redirect;
        self
    }

    /// Returns the `Authorization` header value, if it is present and valid.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION)?.to_str().ok()
    }

    /// Returns the authentication scheme of the `Authorization` header: its
    /// first whitespace-separated token.
    #[must_use]
    pub fn authorization_scheme(&self) -> Option<&str> {
        self.authorization()?.split_whitespace().next()
    }

    /// Replaces the `Authorization` header.
    ///
    /// A value that is not a valid header value leaves the request without
    /// an `Authorization` header; the backend call then fails as
    /// unauthenticated instead of carrying a mangled credential.
    pub fn set_authorization(&mut self, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                self.headers.remove(AUTHORIZATION);
            }
        }
    }

    /// Removes the `Authorization` header entirely.
    pub fn remove_authorization(&mut self) {
        self.headers.remove(AUTHORIZATION);
    }

    /// Returns the parsed request body, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns the parsed query parameters, if any.
    #[must_use]
    pub const fn query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    /// Returns the URL path, without the base path prefix.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string, including the leading `?` when present.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the raw query string without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> &str {
        self.search.strip_prefix('?').unwrap_or(&self.search)
    }

    /// Returns the path prefix the gateway is served under.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns whether the client can follow a redirect response.
    #[must_use]
    pub const fn can_redirect(&self) -> bool {
        self.can_redirect
    }
}
