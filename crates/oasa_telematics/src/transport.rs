//! Low-level HTTP access to the telematics endpoint
//!
//! One [`Transport::request`] call performs exactly one HTTP request; there
//! are no retries. Failures are classified into [`Error::Transport`] (the
//! request never completed), [`Error::MalformedResponse`] (the body was not
//! JSON) and [`Error::ApiStatus`] (non-2xx status with a JSON body), in
//! that order.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::TelematicsConfig;
use crate::error::Error;
use crate::models::Outcome;

/// HTTP methods accepted by the telematics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
}

impl HttpMethod {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performs HTTP requests against the fixed telematics endpoint
///
/// Stateless apart from its configuration; a single instance can be shared
/// across concurrent callers.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    endpoint: String,
}

impl Transport {
    /// Create a transport for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TelematicsConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(!config.verify_certs)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    /// Issue a GET request with the given query parameters
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn get(&self, params: &[(&str, String)]) -> Result<Outcome, Error> {
        self.request(HttpMethod::Get, params, None).await
    }

    /// Issue a POST request with the given query parameters and JSON body
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn post(&self, params: &[(&str, String)], body: Option<&Value>) -> Result<Outcome, Error> {
        self.request(HttpMethod::Post, params, body).await
    }

    /// Perform one HTTP request and classify the result
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the request never completed
    /// - [`Error::MalformedResponse`] if the body was not valid JSON, even
    ///   on a non-2xx status
    /// - [`Error::ApiStatus`] if the status was outside the 2xx range
    pub async fn request(
        &self,
        method: HttpMethod,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Outcome, Error> {
        debug!(%method, url = %self.endpoint, ?params, "sending request");

        let mut request = match method {
            HttpMethod::Get => self.client.get(&self.endpoint),
            HttpMethod::Post => self.client.post(&self.endpoint),
        }
        .query(params);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(%method, url = %self.endpoint, ?params, "request failed: {e}");
            Error::Transport(e)
        })?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let success = status.is_success();

        let text = response.text().await.map_err(|e| {
            error!(%method, url = %self.endpoint, ?params, "failed to read response body: {e}");
            Error::Transport(e)
        })?;

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            error!(
                %method,
                url = %self.endpoint,
                ?params,
                status = status.as_u16(),
                "bad JSON in response: {e}"
            );
            Error::MalformedResponse(e)
        })?;

        if !success {
            error!(
                %method,
                url = %self.endpoint,
                ?params,
                success,
                status = status.as_u16(),
                %reason,
                "request rejected"
            );
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                reason,
            });
        }

        debug!(
            %method,
            url = %self.endpoint,
            ?params,
            success,
            status = status.as_u16(),
            %reason,
            "request completed"
        );
        Ok(Outcome::new(status.as_u16(), reason, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_transport_construction() {
        let config = TelematicsConfig::for_testing();
        let transport = Transport::new(&config).unwrap();
        assert_eq!(transport.endpoint, "https://telematics.oasa.gr/api");
    }

    #[test]
    fn test_transport_accepts_disabled_cert_verification() {
        let config = TelematicsConfig {
            verify_certs: false,
            ..TelematicsConfig::for_testing()
        };
        assert!(Transport::new(&config).is_ok());
    }
}
