//! Main Workspace status checker implementation.
//!
//! This module provides the primary `WorkspaceChecker` struct that runs the
//! full check pipeline: normalize the input, optionally pre-check DNS, probe
//! the recovery toolbox page, and classify the result.

use crate::classify::Signal;
use crate::normalize::normalize_host;
use crate::probe::{DnsPrechecker, ToolboxProber};
use crate::types::{BatchItem, BatchReport, CheckConfig, ProbeReport};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;

/// Coordinates Workspace status checks for single domains and batches.
///
/// Every check is independent and stateless; the checker holds only the
/// configuration and the protocol clients built from it. Checks never fail
/// from the caller's perspective: probe failures come back as reports
/// with the `error` flag set.
///
/// # Example
///
/// ```rust,no_run
/// use workspace_check_lib::WorkspaceChecker;
///
/// #[tokio::main]
/// async fn main() {
///     let checker = WorkspaceChecker::new();
///     let report = checker.check_domain("example.com").await;
///     println!("available: {}", report.available);
/// }
/// ```
pub struct WorkspaceChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Toolbox prober for the HTTP check
    prober: ToolboxProber,
    /// Resolver for the optional DNS pre-check
    prechecker: DnsPrechecker,
}

impl WorkspaceChecker {
    /// Create a new checker with default configuration.
    ///
    /// Default settings:
    /// - Probe timeout: 10 seconds
    /// - DNS pre-check: disabled
    /// - Endpoint and marker phrases: the recovery toolbox defaults
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workspace_check_lib::{WorkspaceChecker, CheckConfig};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_timeout(Duration::from_secs(5))
    ///     .with_dns_precheck(true);
    ///
    /// let checker = WorkspaceChecker::with_config(config);
    /// ```
    pub fn with_config(config: CheckConfig) -> Self {
        let prober =
            ToolboxProber::from_config(&config).expect("Failed to create toolbox prober");
        let prechecker = DnsPrechecker::new();

        Self {
            config,
            prober,
            prechecker,
        }
    }

    /// Check the Workspace status of a single domain.
    ///
    /// The checking process:
    /// 1. Normalizes the raw input to a hostname (never fails)
    /// 2. If the DNS pre-check is enabled and finds records, reports the
    ///    domain as taken without probing
    /// 3. Fetches the toolbox page and classifies the body
    /// 4. Folds probe failures into an error report
    ///
    /// The returned report is always well-formed; callers that need to
    /// distinguish "confirmed taken" from "probe failed" must inspect the
    /// report's `error` flag.
    pub async fn check_domain(&self, raw: &str) -> ProbeReport {
        let host = normalize_host(raw);

        tracing::debug!(input = raw, host = %host, "checking Workspace status");

        if self.config.dns_precheck {
            match self.prechecker.has_records(&host).await {
                Ok(true) => return ProbeReport::registered_dns(&host),
                Ok(false) => {}
                Err(e) => {
                    // The pre-check is advisory; a resolver failure must
                    // not block the probe
                    tracing::debug!(host = %host, error = %e, "DNS pre-check failed, probing anyway");
                }
            }
        }

        match self.prober.probe(&host).await {
            Ok(Signal::Available) => ProbeReport::available(&host),
            Ok(Signal::InUse) => ProbeReport::in_use(&host),
            Ok(Signal::Unclear) => {
                tracing::debug!(host = %host, "toolbox response had no recognized markers");
                ProbeReport::unclear(&host)
            }
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "probe failed");
                ProbeReport::failed(&host, &e)
            }
        }
    }

    /// Check a batch of domains sequentially.
    ///
    /// Entries are processed one at a time, in input order, with exactly
    /// one probe in flight. Each entry is normalized and probed
    /// independently; a failure on one entry becomes an `Error` item and
    /// processing continues with the rest. The report's tally is updated
    /// after each completed item.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use workspace_check_lib::WorkspaceChecker;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let checker = WorkspaceChecker::new();
    ///     let domains = vec!["example.com".to_string(), "google.com".to_string()];
    ///     let report = checker.check_domains(&domains).await;
    ///
    ///     for item in &report.items {
    ///         println!("{}: {}", item.domain, item.status);
    ///     }
    ///     println!("{} available", report.tally.available);
    /// }
    /// ```
    pub async fn check_domains(&self, domains: &[String]) -> BatchReport {
        let mut report = BatchReport::new(domains.len());

        for raw in domains {
            let probe = self.check_domain(raw).await;
            report.push(BatchItem::from(probe));
        }

        report
    }

    /// Check a batch of domains and yield each report as it completes.
    ///
    /// Useful for progress display. The stream is still strictly
    /// sequential (the next probe starts only after the previous one
    /// finished), so ordering matches the input.
    pub fn check_domains_stream(
        &self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = ProbeReport> + Send + '_>> {
        let domains = domains.to_vec();
        let stream = futures::stream::iter(domains)
            .then(move |raw| async move { self.check_domain(&raw).await });

        Box::pin(stream)
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for WorkspaceChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_checker() -> WorkspaceChecker {
        // Closed port: probes fail fast with a connection error and no
        // external network access
        let config = CheckConfig::default()
            .with_endpoint("http://127.0.0.1:9/domain_in_use")
            .with_timeout(Duration::from_secs(2));
        WorkspaceChecker::with_config(config)
    }

    #[tokio::test]
    async fn test_probe_failure_becomes_error_report() {
        let checker = unreachable_checker();
        let report = checker.check_domain("example.com").await;

        assert!(!report.available);
        assert!(report.error);
        assert_eq!(report.domain, "example.com");
        assert!(report.message.starts_with("Error checking domain:"));
    }

    #[tokio::test]
    async fn test_check_domain_normalizes_input() {
        let checker = unreachable_checker();
        let report = checker.check_domain("https://sub.example.com/path").await;
        assert_eq!(report.domain, "sub.example.com");
    }

    #[tokio::test]
    async fn test_batch_preserves_order_through_failures() {
        let checker = unreachable_checker();
        let domains = vec![
            "a.com".to_string(),
            "b.com".to_string(),
            "bad domain".to_string(),
        ];

        let report = checker.check_domains(&domains).await;

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.items[0].domain, "a.com");
        assert_eq!(report.items[1].domain, "b.com");
        assert_eq!(report.items[2].domain, "bad domain");
        assert_eq!(report.tally.completed, 3);
        assert_eq!(report.tally.errors, 3);
    }

    #[tokio::test]
    async fn test_repeated_check_is_deterministic() {
        // Same input and same (unreachable) external state: the reports
        // must match field for field
        let checker = unreachable_checker();
        let first = checker.check_domain("example.com").await;
        let second = checker.check_domain("example.com").await;
        assert_eq!(first, second);
    }
}
