//! Outbound probes used to infer a domain's Workspace status.
//!
//! A probe is one outbound check: the HTTP fetch of the recovery toolbox
//! page, optionally preceded by a DNS resolution pre-check.

/// Recovery toolbox HTTP probe
pub mod toolbox;

/// DNS resolution pre-check
pub mod dns;

pub use dns::DnsPrechecker;
pub use toolbox::ToolboxProber;
