//! DNS pre-check for domains that already resolve.
//!
//! A domain with live address records is registered, so the toolbox probe
//! can be skipped entirely. Only a definitive "records exist" answer
//! short-circuits: NXDOMAIN falls through to the probe, and resolver
//! failures are surfaced as errors for the caller to treat as advisory.

use crate::error::WorkspaceCheckError;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;

/// Resolver wrapper used for the optional registration pre-check.
#[derive(Clone)]
pub struct DnsPrechecker {
    resolver: TokioAsyncResolver,
}

impl DnsPrechecker {
    /// Create a pre-checker with the default resolver configuration.
    pub fn new() -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ),
        }
    }

    /// Check whether any address records exist for the host.
    ///
    /// Returns `Ok(true)` when at least one A/AAAA record resolves,
    /// `Ok(false)` on NXDOMAIN or an empty answer, and an error for any
    /// other resolver failure.
    pub async fn has_records(&self, host: &str) -> Result<bool, WorkspaceCheckError> {
        match self.resolver.lookup_ip(host).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(e) => match e.kind() {
                // No records means the domain isn't resolving; fall
                // through to the probe rather than calling it taken
                ResolveErrorKind::NoRecordsFound { .. } => Ok(false),
                _ => Err(WorkspaceCheckError::dns(host, e.to_string())),
            },
        }
    }
}

impl Default for DnsPrechecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prechecker_creation() {
        // Construction must not panic or hit the network
        let _prechecker = DnsPrechecker::new();
    }

    /// Hits real DNS, so it's #[ignore] for CI unless explicitly run.
    #[tokio::test]
    #[ignore]
    async fn test_known_resolving_domain_has_records() {
        let prechecker = DnsPrechecker::new();
        let result = prechecker.has_records("google.com").await.unwrap();
        assert!(result, "google.com must have address records");
    }

    /// Hits real DNS, so it's #[ignore] for CI unless explicitly run.
    #[tokio::test]
    #[ignore]
    async fn test_nonexistent_domain_has_no_records() {
        let prechecker = DnsPrechecker::new();
        let result = prechecker
            .has_records("thisdomaindoesnotexist123456.com")
            .await
            .unwrap();
        assert!(!result, "NXDOMAIN must report no records, not an error");
    }
}
