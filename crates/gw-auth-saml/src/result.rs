//! Authentication and deauthentication result values.
//!
//! Providers communicate with the caller exclusively through these values.
//! Exactly one variant is active, values are constructed fully formed, and
//! the caller's handling is exhaustive by construction.

use gw_cluster::AuthenticatedUser;

use crate::errors::AuthenticationError;
use crate::state::ProviderState;

/// Result of an authentication attempt.
#[derive(Debug)]
pub enum AuthenticationResult {
    /// This provider declines; the caller should try the next provider.
    NotHandled,
    /// User identified; `state` optionally rotates the persisted state.
    Succeeded {
        /// The authenticated user.
        user: AuthenticatedUser,
        /// Replacement provider state, when the credential changed.
        state: Option<ProviderState>,
    },
    /// The caller must respond with a redirect.
    Redirect {
        /// Target URL.
        url: String,
        /// Replacement provider state, when the flow advanced.
        state: Option<ProviderState>,
    },
    /// The attempt resolved to a definite failure.
    Failed {
        /// The failure.
        error: AuthenticationError,
    },
}

impl AuthenticationResult {
    /// Creates a not-handled result.
    #[must_use]
    pub const fn not_handled() -> Self {
        Self::NotHandled
    }

    /// Creates a success result without a state change.
    #[must_use]
    pub const fn succeeded(user: AuthenticatedUser) -> Self {
        Self::Succeeded { user, state: None }
    }

    /// Creates a success result that rotates the persisted state.
    #[must_use]
    pub const fn succeeded_with_state(user: AuthenticatedUser, state: ProviderState) -> Self {
        Self::Succeeded {
            user,
            state: Some(state),
        }
    }

    /// Creates a redirect result without a state change.
    #[must_use]
    pub fn redirect_to(url: impl Into<String>) -> Self {
        Self::Redirect {
            url: url.into(),
            state: None,
        }
    }

    /// Creates a redirect result that rotates the persisted state.
    #[must_use]
    pub fn redirect_to_with_state(url: impl Into<String>, state: ProviderState) -> Self {
        Self::Redirect {
            url: url.into(),
            state: Some(state),
        }
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failed(error: impl Into<AuthenticationError>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Checks if this is a not-handled result.
    #[must_use]
    pub const fn is_not_handled(&self) -> bool {
        matches!(self, Self::NotHandled)
    }

    /// Checks if this is a success result.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Checks if this is a redirect result.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Checks if this is a failure result.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the authenticated user, on success.
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::Succeeded { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Returns the failure, on failure.
    #[must_use]
    pub const fn error(&self) -> Option<&AuthenticationError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Returns the replacement provider state, when the result carries one.
    ///
    /// Only success and redirect results can carry state.
    #[must_use]
    pub const fn state(&self) -> Option<&ProviderState> {
        match self {
            Self::Succeeded { state, .. } | Self::Redirect { state, .. } => state.as_ref(),
            _ => None,
        }
    }

    /// Returns the redirect target, on redirect.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Result of a deauthentication attempt.
#[derive(Debug)]
pub enum DeauthenticationResult {
    /// This provider has nothing to do for the request.
    NotHandled,
    /// The caller must respond with a redirect.
    Redirect {
        /// Target URL.
        url: String,
    },
    /// The attempt resolved to a definite failure.
    Failed {
        /// The failure.
        error: AuthenticationError,
    },
}

impl DeauthenticationResult {
    /// Creates a not-handled result.
    #[must_use]
    pub const fn not_handled() -> Self {
        Self::NotHandled
    }

    /// Creates a redirect result.
    #[must_use]
    pub fn redirect_to(url: impl Into<String>) -> Self {
        Self::Redirect { url: url.into() }
    }

    /// Creates a failure result.
    #[must_use]
    pub fn failed(error: impl Into<AuthenticationError>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// Checks if this is a not-handled result.
    #[must_use]
    pub const fn is_not_handled(&self) -> bool {
        matches!(self, Self::NotHandled)
    }

    /// Checks if this is a redirect result.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Checks if this is a failure result.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the redirect target, on redirect.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect { url } => Some(url),
            _ => None,
        }
    }

    /// Returns the failure, on failure.
    #[must_use]
    pub const fn error(&self) -> Option<&AuthenticationError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}
