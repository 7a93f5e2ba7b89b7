//! HTTP probe of the Google Workspace recovery toolbox page.
//!
//! The toolbox page at `.../apps/recovery/domain_in_use?domain=<host>`
//! reports whether a domain is already on Workspace. We fetch it directly
//! and classify the HTML body by marker phrases; the response has no
//! schema and is matched as plain text.

use crate::classify::{Signal, SignalClassifier};
use crate::error::WorkspaceCheckError;
use crate::types::CheckConfig;
use std::time::Duration;

/// Toolbox client for probing a domain's Workspace status.
///
/// Performs exactly one outbound HTTP call per probe. There is no retry:
/// a failed probe is a terminal error for that domain.
#[derive(Clone)]
pub struct ToolboxProber {
    /// HTTP client for toolbox requests
    http_client: reqwest::Client,
    /// Endpoint fetched as `<endpoint>?domain=<host>`
    endpoint: String,
    /// Timeout for the whole probe
    timeout: Duration,
    /// Marker-phrase table applied to response bodies
    classifier: SignalClassifier,
}

impl ToolboxProber {
    /// Create a new prober from a check configuration.
    pub fn from_config(config: &CheckConfig) -> Result<Self, WorkspaceCheckError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.probe_timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                WorkspaceCheckError::network_with_source(
                    "Failed to create toolbox HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            timeout: config.probe_timeout,
            classifier: SignalClassifier::with_markers(
                config.available_markers.clone(),
                config.in_use_markers.clone(),
            ),
        })
    }

    /// Probe the toolbox page for a host and classify the response.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceCheckError` if the request fails, the body can't
    /// be read, or the probe times out. An unrecognized body is NOT an
    /// error; it classifies as [`Signal::Unclear`].
    pub async fn probe(&self, host: &str) -> Result<Signal, WorkspaceCheckError> {
        let result = tokio::time::timeout(self.timeout, self.fetch_body(host)).await;

        match result {
            Ok(Ok(body)) => Ok(self.classifier.classify(&body)),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(WorkspaceCheckError::timeout(
                "availability probe",
                self.timeout,
            )),
        }
    }

    /// Fetch the toolbox page body for a host.
    ///
    /// The status code is logged but not interpreted: the page answers in
    /// its markup, not its status line.
    async fn fetch_body(&self, host: &str) -> Result<String, WorkspaceCheckError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("domain", host)])
            .send()
            .await
            .map_err(|e| {
                WorkspaceCheckError::network_with_source(
                    format!("Toolbox request failed for '{}'", host),
                    e.to_string(),
                )
            })?;

        tracing::debug!(host, status = %response.status(), "toolbox probe response");

        response.text().await.map_err(|e| {
            WorkspaceCheckError::network_with_source(
                format!("Failed to read toolbox response for '{}'", host),
                e.to_string(),
            )
        })
    }

    /// The classifier used on response bodies.
    pub fn classifier(&self) -> &SignalClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ENDPOINT;

    #[test]
    fn test_prober_from_default_config() {
        let prober = ToolboxProber::from_config(&CheckConfig::default());
        assert!(prober.is_ok());
        assert_eq!(prober.unwrap().endpoint, DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_probe_unreachable_endpoint_is_error() {
        // Port 9 (discard) is closed on any sane test host, so the
        // connection fails fast without external network access
        let config = CheckConfig::default()
            .with_endpoint("http://127.0.0.1:9/domain_in_use")
            .with_timeout(Duration::from_secs(2));
        let prober = ToolboxProber::from_config(&config).unwrap();

        let result = prober.probe("example.com").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_prober_uses_configured_markers() {
        let config = CheckConfig::default()
            .with_markers(vec!["free".to_string()], vec!["busy".to_string()]);
        let prober = ToolboxProber::from_config(&config).unwrap();

        assert_eq!(prober.classifier().classify("free"), Signal::Available);
        assert_eq!(prober.classifier().classify("busy"), Signal::InUse);
    }
}
