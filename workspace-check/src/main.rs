//! Workspace Check CLI Application
//!
//! A command-line interface for checking whether domains are already using
//! Google Workspace or are available for Workspace sign-up. This CLI
//! provides a user-friendly interface to the workspace-check-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use futures::StreamExt;
use std::process;
use std::time::Duration;
use workspace_check_lib::{
    load_env_config, parse_timeout_string, split_bulk_input, BatchItem, BatchReport, CheckConfig,
    ConfigManager, FileConfig, WorkspaceChecker,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for workspace-check
#[derive(Parser, Debug)]
#[command(name = "workspace-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check whether domains are using or available for Google Workspace")]
#[command(
    long_about = "Check whether domains are already using Google Workspace or are available for Workspace sign-up.\n\nThe check probes the Google Workspace recovery toolbox page and classifies the response. Bulk input is processed sequentially, one domain at a time."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Domains or URLs to check (comma-separated or multiple arguments)
    #[arg(value_name = "DOMAINS", value_delimiter = ',', help_heading = "Domain Selection")]
    pub domains: Vec<String>,

    /// Input file with domains (one per line, commas allowed)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Domain Selection"
    )]
    pub file: Option<String>,

    /// Resolve DNS first and report domains with live records as taken
    #[arg(long = "dns-precheck", help_heading = "Checking")]
    pub dns_precheck: bool,

    /// Probe a different toolbox endpoint
    #[arg(long = "endpoint", value_name = "URL", help_heading = "Checking")]
    pub endpoint: Option<String>,

    /// Probe timeout (e.g. "10s", "2m")
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Checking")]
    pub timeout: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Enable styled output with a header and result messages
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// Resolved output preferences after config/env/CLI layering.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct OutputPrefs {
    pub(crate) json: bool,
    pub(crate) pretty: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let has_env_file = std::env::var("WC_FILE")
        .map(|f| !f.trim().is_empty())
        .unwrap_or(false);

    // Validate arguments
    if let Err(e) = validate_args(&args, has_env_file) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Set up logging if verbose
    if args.verbose {
        println!(
            "workspace-check v{} starting...",
            env!("CARGO_PKG_VERSION")
        );
    }

    // Run the checks
    if let Err(e) = run_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments.
fn validate_args(args: &Args, has_env_file: bool) -> Result<(), String> {
    // Must have some source of domains
    if args.domains.is_empty() && args.file.is_none() && !has_env_file {
        return Err(
            "You must specify domain names, or a file with --file (or WC_FILE)".to_string(),
        );
    }

    // JSON output is machine-readable; styled output would corrupt it
    if args.json && args.pretty {
        return Err("Cannot use --pretty with --json output".to_string());
    }

    // Validate timeout format early so the error names the flag
    if let Some(timeout_str) = &args.timeout {
        if parse_timeout_string(timeout_str).is_none() {
            return Err(format!(
                "Invalid --timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout_str
            ));
        }
    }

    // Endpoint must be an HTTP URL
    if let Some(endpoint) = &args.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(format!(
                "Invalid --endpoint '{}': must start with http:// or https://",
                endpoint
            ));
        }
    }

    Ok(())
}

/// Main checking logic.
async fn run_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from config files, environment, and CLI args
    let (config, output) = build_config(&args)?;

    // Determine domains to check
    let domains = get_domains_to_check(&args)?;
    if domains.is_empty() {
        return Err("No valid domains found to check".into());
    }

    let checker = WorkspaceChecker::with_config(config);
    let total = domains.len();

    if args.verbose {
        println!("Checking {} domain{} sequentially", total, if total == 1 { "" } else { "s" });
        if args.debug {
            println!("Domains: {}", domains.join(", "));
            println!("Endpoint: {}", checker.config().endpoint);
        }
    }

    if output.pretty && !output.json {
        ui::print_header(total);
    }

    let start_time = std::time::Instant::now();
    let mut probes = Vec::with_capacity(total);

    // One probe in flight at a time; results arrive in input order
    {
        let mut stream = checker.check_domains_stream(&domains);
        let mut completed = 0usize;

        while let Some(probe) = stream.next().await {
            completed += 1;

            if !output.json {
                let item = BatchItem::from(probe.clone());
                let counter = if total > 1 {
                    Some((completed, total))
                } else {
                    None
                };
                ui::print_result(&item, output.pretty || args.verbose, counter);
            }

            probes.push(probe);
        }
    }

    let duration = start_time.elapsed();

    if output.json {
        display_json_results(&probes)?;
    } else if total > 1 {
        let mut report = BatchReport::new(total);
        for probe in probes {
            report.push(BatchItem::from(probe));
        }
        println!();
        ui::print_summary(&report.tally, duration);
    }

    Ok(())
}

/// Build CheckConfig and output preferences with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (WC_*)
/// 3. Local config file (./.workspace-check.toml)
/// 4. Global config file (~/.workspace-check.toml)
/// 5. XDG config file (~/.config/workspace-check/config.toml)
/// 6. Built-in defaults
fn build_config(args: &Args) -> Result<(CheckConfig, OutputPrefs), Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();
    let mut output = OutputPrefs::default();

    // Create config manager for file discovery
    let config_manager = ConfigManager::new(args.verbose);

    // Step 1: Determine config file path and load config files
    if let Some(explicit_config_path) = &args.config {
        if args.verbose {
            println!(
                "Using explicit config file (CLI --config): {}",
                explicit_config_path
            );
        }

        let file_config = config_manager
            .load_file(explicit_config_path)
            .map_err(|e| {
                format!(
                    "Failed to load config file '{}': {}",
                    explicit_config_path, e
                )
            })?;

        (config, output) = merge_file_config(config, output, file_config);
    } else if let Ok(env_config_path) = std::env::var("WC_CONFIG") {
        if args.verbose {
            println!(
                "Using explicit config file (WC_CONFIG env var): {}",
                env_config_path
            );
        }

        let file_config = config_manager
            .load_file(&env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?;

        (config, output) = merge_file_config(config, output, file_config);
    } else {
        // No explicit config: use automatic discovery
        match config_manager.discover_and_load() {
            Ok(file_config) => {
                (config, output) = merge_file_config(config, output, file_config);
            }
            Err(e) if args.verbose => {
                eprintln!("Config discovery warning: {}", e);
            }
            Err(_) => {
                // Silently continue with defaults if no config files found
            }
        }
    }

    // Step 2: Apply environment variables (WC_*)
    (config, output) = apply_environment_config(config, output, args.verbose);

    // Step 3: Apply CLI arguments (highest precedence)
    (config, output) = apply_cli_args_to_config(config, output, args);

    Ok((config, output))
}

/// Merge FileConfig into CheckConfig and output preferences.
fn merge_file_config(
    mut config: CheckConfig,
    mut output: OutputPrefs,
    file_config: FileConfig,
) -> (CheckConfig, OutputPrefs) {
    if let Some(defaults) = file_config.defaults {
        if let Some(timeout_str) = defaults.timeout {
            if let Some(timeout_secs) = parse_timeout_string(&timeout_str) {
                config.probe_timeout = Duration::from_secs(timeout_secs);
            }
        }
        if let Some(dns_precheck) = defaults.dns_precheck {
            config.dns_precheck = dns_precheck;
        }
        if let Some(endpoint) = defaults.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(json) = defaults.json {
            output.json = json;
        }
        if let Some(pretty) = defaults.pretty {
            output.pretty = pretty;
        }
    }

    if let Some(markers) = file_config.markers {
        if let Some(available) = markers.available {
            config.available_markers = available;
        }
        if let Some(in_use) = markers.in_use {
            config.in_use_markers = in_use;
        }
    }

    (config, output)
}

/// Apply WC_* environment variables to the configuration.
fn apply_environment_config(
    mut config: CheckConfig,
    mut output: OutputPrefs,
    verbose: bool,
) -> (CheckConfig, OutputPrefs) {
    let env_config = load_env_config(verbose);

    if let Some(timeout_str) = &env_config.timeout {
        if let Some(timeout_secs) = parse_timeout_string(timeout_str) {
            config.probe_timeout = Duration::from_secs(timeout_secs);
        }
    }

    if let Some(dns_precheck) = env_config.dns_precheck {
        config.dns_precheck = dns_precheck;
    }

    if let Some(endpoint) = env_config.endpoint {
        config.endpoint = endpoint;
    }

    if let Some(json) = env_config.json {
        output.json = json;
    }

    if let Some(pretty) = env_config.pretty {
        output.pretty = pretty;
    }

    (config, output)
}

/// Apply CLI arguments to the configuration (highest precedence).
///
/// Boolean flags only enable: without the flag, config/env values are
/// preserved rather than overwritten with the clap default of false.
fn apply_cli_args_to_config(
    mut config: CheckConfig,
    mut output: OutputPrefs,
    args: &Args,
) -> (CheckConfig, OutputPrefs) {
    if let Some(timeout_str) = &args.timeout {
        // Already validated in validate_args
        if let Some(timeout_secs) = parse_timeout_string(timeout_str) {
            config.probe_timeout = Duration::from_secs(timeout_secs);
        }
    }

    if args.dns_precheck {
        config.dns_precheck = true;
    }

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }

    if args.json {
        output.json = true;
        // JSON wins over a pretty default from config/env
        output.pretty = false;
    }
    if args.pretty {
        output.pretty = true;
    }

    (config, output)
}

/// Get the list of domains to check from CLI args, environment, or file.
fn get_domains_to_check(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut entries = Vec::new();

    // Positional args may still contain commas inside quoted shell words
    for raw in &args.domains {
        entries.extend(split_bulk_input(raw));
    }

    if let Some(cli_file) = &args.file {
        if args.verbose {
            println!("Reading domains from file (CLI --file): {}", cli_file);
        }
        entries.extend(read_domains_from_file(cli_file)?);
    } else if let Ok(env_file_path) = std::env::var("WC_FILE") {
        if !env_file_path.trim().is_empty() {
            if args.verbose {
                println!(
                    "Reading domains from file (WC_FILE env var): {}",
                    env_file_path
                );
            }
            entries.extend(read_domains_from_file(&env_file_path)?);
        }
    }

    Ok(entries)
}

/// Read domains from a file.
///
/// One domain per line; commas split a line into multiple entries. Empty
/// lines and `#` comments (full-line or inline) are skipped.
fn read_domains_from_file(file_path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {}", file_path).into());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut domains = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Handle inline comments
        let domain_part = trimmed.split('#').next().unwrap_or("").trim();
        if domain_part.is_empty() {
            continue;
        }

        domains.extend(split_bulk_input(domain_part));
    }

    if domains.is_empty() {
        return Err("No valid domains found in the file.".into());
    }

    Ok(domains)
}

/// Display results in JSON format.
///
/// A single check prints the bare report object; a batch prints the full
/// report with items and tally.
fn display_json_results(
    probes: &[workspace_check_lib::ProbeReport],
) -> Result<(), Box<dyn std::error::Error>> {
    if probes.len() == 1 {
        println!("{}", serde_json::to_string_pretty(&probes[0])?);
    } else {
        let mut report = BatchReport::new(probes.len());
        for probe in probes {
            report.push(BatchItem::from(probe.clone()));
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use workspace_check_lib::{DefaultsConfig, MarkerConfig};

    // Helper function with all required fields
    fn create_test_args() -> Args {
        Args {
            domains: vec![],
            file: None,
            dns_precheck: false,
            endpoint: None,
            timeout: None,
            json: false,
            pretty: false,
            config: None,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_args_requires_input() {
        let args = create_test_args();
        let result = validate_args(&args, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("specify domain names"));
    }

    #[test]
    fn test_validate_args_env_file_counts_as_input() {
        let args = create_test_args();
        assert!(validate_args(&args, true).is_ok());
    }

    #[test]
    fn test_validate_args_json_pretty_conflict() {
        let mut args = create_test_args();
        args.domains = vec!["example.com".to_string()];
        args.json = true;
        args.pretty = true;

        let result = validate_args(&args, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--pretty"));
    }

    #[test]
    fn test_validate_args_bad_timeout() {
        let mut args = create_test_args();
        args.domains = vec!["example.com".to_string()];
        args.timeout = Some("soon".to_string());

        assert!(validate_args(&args, false).is_err());
    }

    #[test]
    fn test_validate_args_bad_endpoint() {
        let mut args = create_test_args();
        args.domains = vec!["example.com".to_string()];
        args.endpoint = Some("toolbox.googleapps.com".to_string());

        assert!(validate_args(&args, false).is_err());
    }

    #[test]
    fn test_dns_precheck_flag_only_enables() {
        // When --dns-precheck is NOT passed, config/env values are preserved
        let args = create_test_args();
        let config = CheckConfig::default().with_dns_precheck(true);

        let (result, _) = apply_cli_args_to_config(config, OutputPrefs::default(), &args);
        assert!(
            result.dns_precheck,
            "config dns_precheck=true should be preserved when the flag is not passed"
        );
    }

    #[test]
    fn test_dns_precheck_flag_overrides_config() {
        let mut args = create_test_args();
        args.dns_precheck = true;
        let config = CheckConfig::default();

        let (result, _) = apply_cli_args_to_config(config, OutputPrefs::default(), &args);
        assert!(result.dns_precheck);
    }

    #[test]
    fn test_cli_timeout_applied() {
        let mut args = create_test_args();
        args.timeout = Some("3s".to_string());

        let (config, _) =
            apply_cli_args_to_config(CheckConfig::default(), OutputPrefs::default(), &args);
        assert_eq!(config.probe_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_json_flag_cancels_pretty_default() {
        let mut args = create_test_args();
        args.json = true;

        let prefs = OutputPrefs {
            json: false,
            pretty: true, // e.g. from config file
        };
        let (_, output) = apply_cli_args_to_config(CheckConfig::default(), prefs, &args);
        assert!(output.json);
        assert!(!output.pretty);
    }

    #[test]
    fn test_merge_file_config_applies_values() {
        let file_config = FileConfig {
            defaults: Some(DefaultsConfig {
                timeout: Some("30s".to_string()),
                dns_precheck: Some(true),
                endpoint: Some("https://example.org/probe".to_string()),
                json: None,
                pretty: Some(true),
            }),
            markers: Some(MarkerConfig {
                available: Some(vec!["free for signup".to_string()]),
                in_use: None,
            }),
            server: None,
        };

        let (config, output) =
            merge_file_config(CheckConfig::default(), OutputPrefs::default(), file_config);

        assert_eq!(config.probe_timeout, Duration::from_secs(30));
        assert!(config.dns_precheck);
        assert_eq!(config.endpoint, "https://example.org/probe");
        assert_eq!(config.available_markers, vec!["free for signup"]);
        // in_use markers untouched
        assert!(!config.in_use_markers.is_empty());
        assert!(output.pretty);
        assert!(!output.json);
    }

    #[test]
    fn test_read_domains_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "# bulk list").unwrap();
        writeln!(temp_file, "a.com").unwrap();
        writeln!(temp_file, "b.com, c.com").unwrap();
        writeln!(temp_file, "d.com  # staging").unwrap();
        writeln!(temp_file).unwrap();
        temp_file.flush().unwrap();

        let domains = read_domains_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(domains, vec!["a.com", "b.com", "c.com", "d.com"]);
    }

    #[test]
    fn test_read_domains_missing_file() {
        let result = read_domains_from_file("/nonexistent/domains.txt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }
}
