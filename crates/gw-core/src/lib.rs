//! Core types shared across the gatewarden security layer.
//!
//! This crate holds the pieces every other crate in the workspace builds on:
//! - Configuration structures for the public address and the backend cluster
//! - The workspace-level error type
//! - The request model the authentication providers operate on
//! - Structured security events for audit logging

pub mod config;
pub mod error;
pub mod event;
pub mod request;

pub use config::{ClusterConfig, Config, PublicConfig};
pub use error::{Error, Result};
pub use event::{Event, EventBuilder, EventOutcome, EventType};
pub use request::GatewayRequest;
