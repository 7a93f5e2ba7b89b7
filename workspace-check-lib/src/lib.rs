//! # Workspace Check Library
//!
//! A library for checking whether a domain is already using Google Workspace
//! or is available for Workspace sign-up.
//!
//! The check is a heuristic: it fetches the Google Workspace recovery toolbox
//! page for the domain and classifies the response body by marker phrases.
//! An optional DNS pre-check can short-circuit domains that already resolve.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use workspace_check_lib::WorkspaceChecker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = WorkspaceChecker::new();
//!     let report = checker.check_domain("example.com").await;
//!
//!     println!("{}: available = {}", report.domain, report.available);
//! }
//! ```
//!
//! ## Features
//!
//! - **Toolbox Probe**: single HTTP fetch, marker-phrase classification
//! - **DNS Pre-check**: optional short-circuit for domains with live records
//! - **Sequential Batch Runner**: ordered results with a running tally
//! - **Configurable**: endpoint, timeout and marker phrases are all settings

// Re-export main public API types and functions
// This makes them available as workspace_check_lib::TypeName
pub use checker::WorkspaceChecker;
pub use classify::{Signal, SignalClassifier};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    MarkerConfig, ServerConfig,
};
pub use error::WorkspaceCheckError;
pub use normalize::{normalize_host, split_bulk_input};
pub use types::{
    BatchItem, BatchReport, BatchStatus, BatchTally, CheckConfig, ProbeReport, DEFAULT_ENDPOINT,
};

// Internal modules - these are not part of the public API
mod checker;
mod classify;
mod config;
mod error;
mod normalize;
mod probe;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, WorkspaceCheckError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
