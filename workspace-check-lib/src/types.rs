//! Core data types for Workspace status checking.
//!
//! This module defines all the main data structures used throughout the
//! library, including probe reports, batch results and configuration options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::classify;
use crate::error::WorkspaceCheckError;

/// Default recovery toolbox endpoint probed for each domain.
///
/// The page is fetched as `<endpoint>?domain=<host>` and its HTML body is
/// classified by marker phrases. The response is treated as an opaque,
/// unversioned text blob.
pub const DEFAULT_ENDPOINT: &str = "https://toolbox.googleapps.com/apps/recovery/domain_in_use";

/// Result of a single Workspace status probe.
///
/// This is the JSON shape returned by the HTTP API and the CLI:
/// `{available, message, domain, error?}`. The `error` field is only
/// serialized when a probe actually failed: a failed probe is still a
/// normal report (`available: false`), never a hard error to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Whether the domain appears available for Workspace sign-up
    pub available: bool,

    /// Human-readable outcome description
    pub message: String,

    /// The normalized hostname that was checked
    pub domain: String,

    /// Set when the outbound probe failed; the report is then a
    /// fail-closed "not available" answer rather than a classification
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl ProbeReport {
    /// The toolbox page says the domain can sign up for Workspace.
    pub fn available(domain: &str) -> Self {
        Self {
            available: true,
            message: format!("Domain {} is available for Google Workspace sign up.", domain),
            domain: domain.to_string(),
            error: false,
        }
    }

    /// The toolbox page indicates the domain already uses Workspace.
    pub fn in_use(domain: &str) -> Self {
        Self {
            available: false,
            message: format!("Domain {} is already using Google Workspace.", domain),
            domain: domain.to_string(),
            error: false,
        }
    }

    /// Neither marker set matched. Fail closed: report as not available.
    pub fn unclear(domain: &str) -> Self {
        Self {
            available: false,
            message: format!(
                "Domain {} status is unclear. It does not appear to be available.",
                domain
            ),
            domain: domain.to_string(),
            error: false,
        }
    }

    /// The DNS pre-check found live records, so the probe was skipped.
    pub fn registered_dns(domain: &str) -> Self {
        Self {
            available: false,
            message: format!("Domain {} is already registered (DNS records found).", domain),
            domain: domain.to_string(),
            error: false,
        }
    }

    /// The outbound probe failed. Reported as a normal non-available
    /// result with the `error` flag set, per the fail-closed policy.
    pub fn failed(domain: &str, error: &WorkspaceCheckError) -> Self {
        Self {
            available: false,
            message: format!("Error checking domain: {}", error),
            domain: domain.to_string(),
            error: true,
        }
    }
}

/// Status of one entry in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Domain is available for Workspace sign-up
    #[serde(rename = "available")]
    Available,

    /// Domain is already using Workspace (or status was unclear)
    #[serde(rename = "taken")]
    Taken,

    /// The probe for this entry failed
    #[serde(rename = "error")]
    Error,
}

/// One entry of a batch run, in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// The normalized hostname that was checked
    pub domain: String,

    /// Outcome classification for this entry
    pub status: BatchStatus,

    /// Human-readable outcome description
    pub message: String,
}

impl From<ProbeReport> for BatchItem {
    fn from(report: ProbeReport) -> Self {
        let status = if report.error {
            BatchStatus::Error
        } else if report.available {
            BatchStatus::Available
        } else {
            BatchStatus::Taken
        };

        Self {
            domain: report.domain,
            status,
            message: report.message,
        }
    }
}

/// Running counts for a batch run, updated after each completed item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTally {
    /// Number of entries submitted
    pub total: usize,

    /// Number of entries processed so far
    pub completed: usize,

    /// Entries reported available
    pub available: usize,

    /// Entries reported taken (including unclear responses)
    pub taken: usize,

    /// Entries whose probe failed
    pub errors: usize,
}

impl BatchTally {
    /// Create a tally for a batch of `total` entries.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Record one completed item.
    pub fn record(&mut self, status: BatchStatus) {
        self.completed += 1;
        match status {
            BatchStatus::Available => self.available += 1,
            BatchStatus::Taken => self.taken += 1,
            BatchStatus::Error => self.errors += 1,
        }
    }
}

/// Ordered batch results plus the final tally.
///
/// Accumulated locally per run and returned from the batch runner; nothing
/// is held in process-wide state between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// One item per input entry, in submission order
    pub items: Vec<BatchItem>,

    /// Final counts for the run
    pub tally: BatchTally,
}

impl BatchReport {
    /// Create an empty report for a batch of `total` entries.
    pub fn new(total: usize) -> Self {
        Self {
            items: Vec::with_capacity(total),
            tally: BatchTally::new(total),
        }
    }

    /// Append a completed item and update the tally.
    pub fn push(&mut self, item: BatchItem) {
        self.tally.record(item.status);
        self.items.push(item);
    }
}

/// Configuration options for Workspace status checks.
///
/// This struct allows fine-tuning of the probe behavior, including
/// timeout, endpoint and the marker phrases used for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Timeout for each individual probe
    /// Default: 10 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub probe_timeout: Duration,

    /// Whether to resolve the host before probing and short-circuit to
    /// "taken" when records exist
    /// Default: false
    pub dns_precheck: bool,

    /// The recovery toolbox endpoint to probe
    pub endpoint: String,

    /// Marker phrases that classify a response body as available
    pub available_markers: Vec<String>,

    /// Marker phrases that classify a response body as in use
    pub in_use_markers: Vec<String>,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// Marker defaults follow the toolbox page markup; they can be
    /// overridden here or via the `[markers]` config file section so a
    /// markup change never requires touching control flow.
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(10),
            dns_precheck: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            available_markers: classify::default_available_markers(),
            in_use_markers: classify::default_in_use_markers(),
        }
    }
}

impl CheckConfig {
    /// Set a custom probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Enable or disable the DNS pre-check.
    pub fn with_dns_precheck(mut self, enabled: bool) -> Self {
        self.dns_precheck = enabled;
        self
    }

    /// Probe a different endpoint (e.g. a fixture server in tests).
    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace both marker lists.
    pub fn with_markers(mut self, available: Vec<String>, in_use: Vec<String>) -> Self {
        self.available_markers = available;
        self.in_use_markers = in_use;
        self
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::Available => write!(f, "Available"),
            BatchStatus::Taken => write!(f, "Taken"),
            BatchStatus::Error => write!(f, "Error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_omitted_when_false() {
        let report = ProbeReport::available("example.com");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["available"], true);
        assert_eq!(json["domain"], "example.com");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_field_present_when_failed() {
        let err = WorkspaceCheckError::network("connection refused");
        let report = ProbeReport::failed("example.com", &err);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["available"], false);
        assert_eq!(json["error"], true);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Error checking domain:"));
    }

    #[test]
    fn test_batch_item_from_report() {
        let available = BatchItem::from(ProbeReport::available("a.com"));
        assert_eq!(available.status, BatchStatus::Available);

        let taken = BatchItem::from(ProbeReport::in_use("b.com"));
        assert_eq!(taken.status, BatchStatus::Taken);

        // Unclear responses fail closed to Taken, not Error
        let unclear = BatchItem::from(ProbeReport::unclear("c.com"));
        assert_eq!(unclear.status, BatchStatus::Taken);

        let err = WorkspaceCheckError::network("boom");
        let failed = BatchItem::from(ProbeReport::failed("d.com", &err));
        assert_eq!(failed.status, BatchStatus::Error);
    }

    #[test]
    fn test_tally_records_counts() {
        let mut tally = BatchTally::new(3);
        tally.record(BatchStatus::Available);
        tally.record(BatchStatus::Taken);
        tally.record(BatchStatus::Error);

        assert_eq!(tally.total, 3);
        assert_eq!(tally.completed, 3);
        assert_eq!(tally.available, 1);
        assert_eq!(tally.taken, 1);
        assert_eq!(tally.errors, 1);
    }

    #[test]
    fn test_batch_report_push_updates_tally() {
        let mut report = BatchReport::new(2);
        report.push(BatchItem::from(ProbeReport::available("a.com")));
        report.push(BatchItem::from(ProbeReport::in_use("b.com")));

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.tally.completed, 2);
        assert_eq!(report.items[0].domain, "a.com");
        assert_eq!(report.items[1].domain, "b.com");
    }

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
        assert!(!config.dns_precheck);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.available_markers.is_empty());
        assert!(!config.in_use_markers.is_empty());
    }
}
