//! Security event logging.
//!
//! Structured events for security-relevant outcomes: logins, token
//! refreshes, logouts. Events carry the acting username and the failure
//! message when there is one, never credential material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Log target security events are emitted under.
const AUDIT_TARGET: &str = "security::audit";

/// Event type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// User login completed.
    Login,
    /// User login failed.
    LoginError,
    /// Access token refreshed.
    RefreshToken,
    /// Access token refresh failed.
    RefreshTokenError,
    /// User logout completed.
    Logout,
    /// User logout failed.
    LogoutError,
}

/// Outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Failure,
}

/// A security event for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Type of event.
    pub event_type: EventType,
    /// Outcome of the event.
    pub outcome: EventOutcome,
    /// Authentication provider that produced the event.
    pub provider: String,
    /// Username associated with the event, when known.
    pub username: Option<String>,
    /// Error message (for failure events).
    pub error: Option<String>,
}

impl Event {
    /// Creates a new event builder.
    #[must_use]
    pub fn builder(event_type: EventType, provider: impl Into<String>) -> EventBuilder {
        EventBuilder::new(event_type, provider)
    }

    /// Emits the event to the audit log.
    pub fn emit(&self) {
        tracing::info!(
            target: AUDIT_TARGET,
            event_type = ?self.event_type,
            outcome = ?self.outcome,
            provider = %self.provider,
            username = self.username.as_deref(),
            error = self.error.as_deref(),
            "security event"
        );
    }
}

/// Builder for creating events.
pub struct EventBuilder {
    event_type: EventType,
    outcome: EventOutcome,
    provider: String,
    username: Option<String>,
    error: Option<String>,
}

impl EventBuilder {
    /// Creates a new event builder.
    #[must_use]
    pub fn new(event_type: EventType, provider: impl Into<String>) -> Self {
        Self {
            event_type,
            outcome: EventOutcome::Success,
            provider: provider.into(),
            username: None,
            error: None,
        }
    }

    /// Sets the outcome to success.
    #[must_use]
    pub fn success(mut self) -> Self {
        self.outcome = EventOutcome::Success;
        self
    }

    /// Sets the outcome to failure with an error message.
    #[must_use]
    pub fn failure(mut self, error: impl Into<String>) -> Self {
        self.outcome = EventOutcome::Failure;
        self.error = Some(error.into());
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> Event {
        Event {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            event_type: self.event_type,
            outcome: self.outcome,
            provider: self.provider,
            username: self.username,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_creates_success_event() {
        let event = Event::builder(EventType::Login, "saml")
            .success()
            .username("jdoe")
            .build();

        assert_eq!(event.event_type, EventType::Login);
        assert_eq!(event.outcome, EventOutcome::Success);
        assert_eq!(event.provider, "saml");
        assert_eq!(event.username, Some("jdoe".to_string()));
        assert!(event.error.is_none());
    }

    #[test]
    fn builder_creates_failure_event() {
        let event = Event::builder(EventType::RefreshTokenError, "saml")
            .failure("cluster responded with status 400")
            .build();

        assert_eq!(event.outcome, EventOutcome::Failure);
        assert_eq!(
            event.error,
            Some("cluster responded with status 400".to_string())
        );
    }

    #[test]
    fn event_has_timestamp() {
        let before = Utc::now();
        let event = Event::builder(EventType::Logout, "saml").build();
        let after = Utc::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }
}
