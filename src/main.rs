//! DevOps lab demo service entry point.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devops_lab::api::{create_router, AppState};
use devops_lab::config::Config;
use devops_lab::metrics;
use devops_lab::utils::shutdown_signal;

/// Instrumented demo web service for DevOps labs.
#[derive(Parser, Debug)]
#[command(name = "devops-lab")]
#[command(about = "Instrumented demo web service for DevOps labs")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP listen port (overrides PORT from the environment).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;

    // Override with CLI args if provided
    if args.verbose {
        config.debug = true;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Initialize logging
    let filter = if config.debug {
        EnvFilter::new("devops_lab=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    let prometheus = metrics::install_recorder()?;
    metrics::init_metrics();

    info!("Configuration loaded successfully");
    info!("Environment: {}", config.environment);
    if config.fault_injection {
        info!(
            "Fault injection enabled: {}-{}ms added to every request",
            config.fault_latency_min_ms, config.fault_latency_max_ms
        );
    }

    // Create app state and router
    let port = config.port;
    let app_state = AppState::new(config, prometheus);
    let router = create_router(app_state);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
