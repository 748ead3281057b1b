//! Configuration for the gatewarden security layer.
//!
//! Supports loading configuration from files or environment through serde.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Externally visible address of the gateway.
    pub public: PublicConfig,
    /// Backend cluster connection settings.
    pub cluster: ClusterConfig,
}

/// Externally visible address of the gateway.
///
/// These values are what the Identity Provider sees: they are used to build
/// the Assertion Consumer Service URL that identifies this service provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    /// Scheme clients use to reach the gateway (`http` or `https`).
    pub protocol: String,
    /// Hostname clients use to reach the gateway.
    pub hostname: String,
    /// Port clients use to reach the gateway.
    pub port: u16,
    /// Path prefix the gateway is served under. Either empty or starts with
    /// `/` and does not end with one.
    #[serde(default)]
    pub base_path: String,
}

/// Backend cluster connection settings.
///
/// The internal service account is used for the privileged SAML calls; it is
/// never exposed to end users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Base URL of the cluster's HTTP API.
    pub url: String,
    /// Service account username for internal calls.
    pub username: String,
    /// Service account password for internal calls.
    pub password: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl PublicConfig {
    /// Validates the public address settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the protocol is unknown or the base path is not a
    /// normalized path prefix.
    pub fn validate(&self) -> Result<()> {
        if self.protocol != "http" && self.protocol != "https" {
            return Err(Error::config(format!(
                "unsupported public protocol: {}",
                self.protocol
            )));
        }
        if self.hostname.is_empty() {
            return Err(Error::config("public hostname is empty"));
        }
        if !self.base_path.is_empty()
            && (!self.base_path.starts_with('/') || self.base_path.ends_with('/'))
        {
            return Err(Error::config(
                "base path must start with '/' and must not end with one",
            ));
        }
        Ok(())
    }

    /// Returns the origin part of the public address, e.g. `https://gw:443`.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.hostname, self.port)
    }
}

impl ClusterConfig {
    /// Validates the cluster connection settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the URL or service account is not usable.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::config(format!("invalid cluster url: {}", self.url)));
        }
        if self.username.is_empty() {
            return Err(Error::config("cluster service account username is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("cluster timeout must be positive"));
        }
        Ok(())
    }
}

impl Config {
    /// Validates the whole configuration.
    ///
    /// ## Errors
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<()> {
        self.public.validate()?;
        self.cluster.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public: PublicConfig {
                protocol: "http".to_string(),
                hostname: "localhost".to_string(),
                port: 8080,
                base_path: String::new(),
            },
            cluster: ClusterConfig {
                url: "http://localhost:9200".to_string(),
                username: "gatewarden_system".to_string(),
                password: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn public_origin() {
        let mut public = Config::default().public;
        public.protocol = "https".to_string();
        public.hostname = "gateway.example.com".to_string();
        public.port = 443;

        assert_eq!(public.origin(), "https://gateway.example.com:443");
    }

    #[test]
    fn rejects_unknown_protocol() {
        let mut config = Config::default();
        config.public.protocol = "ftp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_trailing_slash_base_path() {
        let mut config = Config::default();
        config.public.base_path = "/gw/".to_string();
        assert!(config.validate().is_err());

        config.public.base_path = "gw".to_string();
        assert!(config.validate().is_err());

        config.public.base_path = "/gw".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_cluster_settings() {
        let mut config = Config::default();
        config.cluster.url = "localhost:9200".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cluster.username = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cluster.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
