//! Workspace Check HTTP API Server
//!
//! Serves the workspace-check-lib functionality over HTTP. The only
//! endpoint is `POST /check-domain`; see [`api`] for the contract.

mod api;

use clap::Parser;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use workspace_check_lib::{
    load_env_config, parse_timeout_string, CheckConfig, ConfigManager, FileConfig,
    WorkspaceChecker,
};

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// CLI arguments for workspace-check-server
#[derive(Parser, Debug)]
#[command(name = "workspace-check-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "HTTP API server for checking Google Workspace domain status")]
pub struct Args {
    /// Bind address (default: 127.0.0.1)
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<String>,

    /// Listen port (default: 3000)
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Verbose config loading output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("workspace_check_server=info,workspace_check_lib=info")
        }))
        .init();

    if let Err(e) = run_server(args).await {
        tracing::error!(error = %e, "server failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load configuration and serve until shutdown.
async fn run_server(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (config, bind, port) = build_server_config(&args)?;

    let checker = WorkspaceChecker::with_config(config);
    let state = api::AppState {
        checker: Arc::new(checker),
    };
    let app = api::router(state);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;

    tracing::info!(%addr, "workspace-check-server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the check configuration and listen address.
///
/// Precedence mirrors the CLI: flags over WC_* environment variables over
/// config files over built-in defaults.
fn build_server_config(
    args: &Args,
) -> Result<(CheckConfig, String, u16), Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();
    let mut bind = DEFAULT_BIND.to_string();
    let mut port = DEFAULT_PORT;

    let config_manager = ConfigManager::new(args.verbose);

    // Config files: explicit path, then WC_CONFIG, then discovery
    let file_config = if let Some(explicit_path) = &args.config {
        Some(
            config_manager
                .load_file(explicit_path)
                .map_err(|e| format!("Failed to load config file '{}': {}", explicit_path, e))?,
        )
    } else if let Ok(env_path) = std::env::var("WC_CONFIG") {
        Some(
            config_manager
                .load_file(&env_path)
                .map_err(|e| format!("Failed to load config file '{}': {}", env_path, e))?,
        )
    } else {
        config_manager.discover_and_load().ok()
    };

    if let Some(file_config) = file_config {
        (config, bind, port) = merge_file_config(config, bind, port, file_config);
    }

    // Environment variables
    let env_config = load_env_config(args.verbose);
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
    if let Some(env_bind) = env_config.bind {
        bind = env_bind;
    }
    if let Some(env_port) = env_config.port {
        port = env_port;
    }

    // CLI flags win
    if let Some(cli_bind) = &args.bind {
        bind = cli_bind.clone();
    }
    if let Some(cli_port) = args.port {
        port = cli_port;
    }

    Ok((config, bind, port))
}

/// Merge a FileConfig into the check configuration and listen address.
fn merge_file_config(
    mut config: CheckConfig,
    mut bind: String,
    mut port: u16,
    file_config: FileConfig,
) -> (CheckConfig, String, u16) {
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
    }

    if let Some(markers) = file_config.markers {
        if let Some(available) = markers.available {
            config.available_markers = available;
        }
        if let Some(in_use) = markers.in_use {
            config.in_use_markers = in_use;
        }
    }

    if let Some(server) = file_config.server {
        if let Some(file_bind) = server.bind {
            bind = file_bind;
        }
        if let Some(file_port) = server.port {
            port = file_port;
        }
    }

    (config, bind, port)
}
