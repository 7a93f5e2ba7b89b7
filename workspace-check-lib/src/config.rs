//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! configurations with proper precedence rules. Config can come from a
//! local file, a global file in the home directory, an XDG path, or
//! `WC_*` environment variables.

use crate::error::WorkspaceCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values, override the probed endpoint, or update
/// the marker phrases without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for check options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Marker phrase overrides for the classifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<MarkerConfig>,

    /// HTTP server settings (used by workspace-check-server)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default probe timeout (as string, e.g., "10s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default DNS pre-check setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_precheck: Option<bool>,

    /// Override for the probed toolbox endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Default JSON output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,

    /// Default pretty output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

/// Marker phrase overrides for the response classifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarkerConfig {
    /// Phrases that classify a body as available for sign-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,

    /// Phrases that classify a body as already in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_use: Option<Vec<String>>,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Bind address (default "127.0.0.1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,

    /// Listen port (default 3000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, WorkspaceCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(WorkspaceCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            WorkspaceCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig =
            toml::from_str(&content).map_err(|e| WorkspaceCheckError::ConfigError {
                message: format!("Failed to parse TOML configuration: {}", e),
            })?;

        // Validate the loaded configuration
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them
    /// according to precedence rules (local over global over XDG).
    pub fn discover_and_load(&self) -> Result<FileConfig, WorkspaceCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./workspace-check.toml", "./.workspace-check.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".workspace-check.toml", "workspace-check.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("workspace-check").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.dns_precheck.is_some() {
                        lower_defaults.dns_precheck = higher_defaults.dns_precheck;
                    }
                    if higher_defaults.endpoint.is_some() {
                        lower_defaults.endpoint = higher_defaults.endpoint;
                    }
                    if higher_defaults.json.is_some() {
                        lower_defaults.json = higher_defaults.json;
                    }
                    if higher_defaults.pretty.is_some() {
                        lower_defaults.pretty = higher_defaults.pretty;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            markers: match (lower.markers, higher.markers) {
                (Some(mut lower_markers), Some(higher_markers)) => {
                    if higher_markers.available.is_some() {
                        lower_markers.available = higher_markers.available;
                    }
                    if higher_markers.in_use.is_some() {
                        lower_markers.in_use = higher_markers.in_use;
                    }
                    Some(lower_markers)
                }
                (None, Some(higher_markers)) => Some(higher_markers),
                (Some(lower_markers), None) => Some(lower_markers),
                (None, None) => None,
            },
            server: higher.server.or(lower.server),
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), WorkspaceCheckError> {
        if let Some(defaults) = &config.defaults {
            // Validate timeout format
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(WorkspaceCheckError::ConfigError {
                        message: format!(
                            "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                            timeout_str
                        ),
                    });
                }
            }

            // Validate endpoint looks like an HTTP URL
            if let Some(endpoint) = &defaults.endpoint {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(WorkspaceCheckError::ConfigError {
                        message: format!(
                            "Invalid endpoint '{}': must start with http:// or https://",
                            endpoint
                        ),
                    });
                }
            }
        }

        // Marker lists may be replaced but never emptied: an empty list
        // would classify every response as unclear
        if let Some(markers) = &config.markers {
            if let Some(available) = &markers.available {
                if available.is_empty() || available.iter().any(|m| m.trim().is_empty()) {
                    return Err(WorkspaceCheckError::ConfigError {
                        message: "markers.available cannot be empty or contain blank phrases"
                            .to_string(),
                    });
                }
            }
            if let Some(in_use) = &markers.in_use {
                if in_use.is_empty() || in_use.iter().any(|m| m.trim().is_empty()) {
                    return Err(WorkspaceCheckError::ConfigError {
                        message: "markers.in_use cannot be empty or contain blank phrases"
                            .to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via WC_* variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub timeout: Option<String>,
    pub dns_precheck: Option<bool>,
    pub endpoint: Option<String>,
    pub json: Option<bool>,
    pub pretty: Option<bool>,
    pub file: Option<String>,
    pub config: Option<String>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Load configuration from environment variables.
///
/// Parses all WC_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings (when verbose)
/// and ignored.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // WC_TIMEOUT - probe timeout
    if let Ok(timeout_str) = env::var("WC_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            env_config.timeout = Some(timeout_str.clone());
            if verbose {
                println!("Using WC_TIMEOUT={}", timeout_str);
            }
        } else if verbose {
            eprintln!(
                "Invalid WC_TIMEOUT='{}', use format like '5s', '30s', '2m'",
                timeout_str
            );
        }
    }

    // WC_DNS_PRECHECK - enable/disable the DNS pre-check
    if let Ok(val) = env::var("WC_DNS_PRECHECK") {
        env_config.dns_precheck = parse_env_bool("WC_DNS_PRECHECK", &val, verbose);
    }

    // WC_ENDPOINT - override the probed toolbox endpoint
    if let Ok(endpoint) = env::var("WC_ENDPOINT") {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            env_config.endpoint = Some(endpoint.clone());
            if verbose {
                println!("Using WC_ENDPOINT={}", endpoint);
            }
        } else if verbose {
            eprintln!(
                "Invalid WC_ENDPOINT='{}', must start with http:// or https://",
                endpoint
            );
        }
    }

    // WC_JSON - enable JSON output
    if let Ok(val) = env::var("WC_JSON") {
        env_config.json = parse_env_bool("WC_JSON", &val, verbose);
    }

    // WC_PRETTY - enable pretty output
    if let Ok(val) = env::var("WC_PRETTY") {
        env_config.pretty = parse_env_bool("WC_PRETTY", &val, verbose);
    }

    // WC_FILE - default domains file
    if let Ok(file_path) = env::var("WC_FILE") {
        if !file_path.trim().is_empty() {
            env_config.file = Some(file_path.clone());
            if verbose {
                println!("Using WC_FILE={}", file_path);
            }
        }
    }

    // WC_CONFIG - explicit config file
    if let Ok(config_path) = env::var("WC_CONFIG") {
        if !config_path.trim().is_empty() {
            env_config.config = Some(config_path.clone());
            if verbose {
                println!("Using WC_CONFIG={}", config_path);
            }
        }
    }

    // WC_BIND - server bind address
    if let Ok(bind) = env::var("WC_BIND") {
        if !bind.trim().is_empty() {
            env_config.bind = Some(bind.clone());
            if verbose {
                println!("Using WC_BIND={}", bind);
            }
        }
    }

    // WC_PORT - server listen port
    if let Ok(val) = env::var("WC_PORT") {
        match val.parse::<u16>() {
            Ok(port) if port > 0 => {
                env_config.port = Some(port);
                if verbose {
                    println!("Using WC_PORT={}", port);
                }
            }
            _ => {
                if verbose {
                    eprintln!("Invalid WC_PORT='{}', must be 1-65535", val);
                }
            }
        }
    }

    env_config
}

/// Parse a boolean environment variable value.
fn parse_env_bool(name: &str, val: &str, verbose: bool) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => {
            if verbose {
                println!("Using {}=true", name);
            }
            Some(true)
        }
        "false" | "0" | "no" | "off" => {
            if verbose {
                println!("Using {}=false", name);
            }
            Some(false)
        }
        _ => {
            if verbose {
                eprintln!("Invalid {}='{}', use true/false", name, val);
            }
            None
        }
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
///
/// Returns the number of seconds, or None if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}
