//! Gateway route resolver.
//!
//! # Architecture Overview
//!
//! ```text
//!   gateway.toml ──▶ config ──▶ RoutingEngine ──────────────────────────┐
//!                     ▲          │                                     │
//!                     │          ▼                                     │
//!                  watcher   ProviderSelector                          │
//!                 (reload)   ├─ dynamic_with_auth  (cache + synthesis) │
//!                            ├─ static_no_auth     (synthesis only)    │
//!                            └─ plain_finder       (template match)    │
//!                                                                      ▼
//!   METHOD PATH [HOST] ─────────────────────────────────────▶ ResolvedRoute (JSON)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use route_resolver::config::{load_config, watcher::ConfigWatcher, GatewayConfig};
use route_resolver::lifecycle::{signals, Shutdown};
use route_resolver::observability::{logging, metrics};
use route_resolver::RoutingEngine;

#[derive(Parser)]
#[command(name = "route-resolver")]
#[command(about = "Resolve gateway requests to downstream routes", long_about = None)]
struct Cli {
    /// Gateway configuration file (TOML).
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and show the selected strategy
    Check,
    /// Resolve a single request
    Resolve {
        method: String,
        /// Request target, e.g. /orders/1?page=2
        target: String,
        #[arg(long, default_value = "")]
        host: String,
    },
    /// Resolve "METHOD TARGET [HOST]" lines from stdin, reloading on config change
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability);

    match cli.command {
        Commands::Check => {
            let engine = RoutingEngine::new(&config);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "routes": engine.config().routes.len(),
                    "strategy": engine.strategy().name(),
                }))?
            );
        }
        Commands::Resolve {
            method,
            target,
            host,
        } => {
            let engine = RoutingEngine::new(&config);
            let resolved = engine.resolve_target(&method, &target, &host)?;
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Commands::Watch => watch(&cli.config, config).await?,
    }

    Ok(())
}

async fn watch(path: &Path, config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let engine = Arc::new(ArcSwap::from_pointee(RoutingEngine::new(&config)));
    let shutdown = Shutdown::new();

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watch_handle = watcher.run()?;
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let reload_engine = engine.clone();
    let mut reload_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(new_config) = updates.recv() => {
                    reload_engine.store(Arc::new(RoutingEngine::new(&new_config)));
                    tracing::info!("Routing engine reloaded");
                }
                _ = reload_shutdown.recv() => break,
                else => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stop = shutdown.subscribe();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Some(output) = handle_line(&engine.load(), &line) {
                        println!("{}", output);
                    }
                }
                None => break,
            },
            _ = stop.recv() => break,
        }
    }

    shutdown.trigger();
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve one `METHOD TARGET [HOST]` line into a JSON document.
fn handle_line(engine: &RoutingEngine, line: &str) -> Option<String> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let Some(target) = parts.next() else {
        return Some(serde_json::json!({ "error": "expected METHOD TARGET [HOST]" }).to_string());
    };
    let host = parts.next().unwrap_or("");

    let output = match engine.resolve_target(method, target, host) {
        Ok(resolved) => serde_json::to_value(&resolved)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    };
    Some(output.to_string())
}
