//! Telematics service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OASA telematics service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelematicsConfig {
    /// Base URL of the telematics service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Verify TLS certificates (disable only for test setups behind
    /// intercepting proxies)
    #[serde(default = "default_verify_certs")]
    pub verify_certs: bool,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://telematics.oasa.gr".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_verify_certs() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!("oasa_telematics/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for TelematicsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            verify_certs: default_verify_certs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TelematicsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// The fixed endpoint URL all actions are issued against
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
