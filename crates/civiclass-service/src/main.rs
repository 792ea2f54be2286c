//! Civiclass classifier service
//!
//! Hosts the synchronous classification API and the asynchronous event
//! pipeline worker over one shared classification engine. The worker owns
//! the broker connection exclusively; if it dies, the process exits and a
//! supervisor is expected to restart it.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use civiclass_engine::{CategoryCatalog, ClassificationEngine};
use civiclass_pipeline::{AmqpTransport, EventPipeline};

mod config;
mod routes;
mod state;

use config::ServiceConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "civiclass-service")]
#[command(about = "Civic complaint classification service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Broker connection URL
    #[arg(short, long, env = "AMQP_URL")]
    amqp_url: Option<String>,

    /// Category catalog YAML file
    #[arg(short = 'k', long)]
    catalog: Option<String>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8001")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting Civiclass classifier service");

    // Load configuration
    let config = ServiceConfig::load(&cli.config, &cli)?;
    info!("Review threshold: {}", config.review_threshold);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load the category catalog and build the engine
    let catalog = match &config.catalog_path {
        Some(path) => CategoryCatalog::from_file(path)?,
        None => {
            info!("No catalog file configured, using the builtin civic catalog");
            CategoryCatalog::builtin()
        }
    };
    info!("Catalog ready with {} categories", catalog.len());

    let engine = Arc::new(ClassificationEngine::with_threshold(
        catalog,
        config.review_threshold,
    )?);

    // Connect the broker transport and start the pipeline worker
    let transport = AmqpTransport::connect(&config.amqp_url).await?;
    let pipeline = EventPipeline::new(Arc::clone(&engine), transport);
    let mut worker = tokio::spawn(pipeline.run());
    info!("Event pipeline worker started");

    // Serve the HTTP API
    let state = AppState::new(engine, metrics_handle);
    let app = routes::create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    tokio::select! {
        res = axum::serve(listener, app).with_graceful_shutdown(shutdown) => {
            res?;
        }
        res = &mut worker => {
            // The worker does not reconnect; its death takes the process
            // down so the supervisor restarts both halves together
            match res {
                Ok(Ok(())) => anyhow::bail!("event pipeline stopped unexpectedly"),
                Ok(Err(e)) => {
                    error!("Event pipeline failed: {e}");
                    return Err(e.into());
                }
                Err(e) => anyhow::bail!("event pipeline task panicked: {e}"),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("civiclass=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civiclass=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "civiclass_requests_total",
        "Total number of HTTP classification requests"
    );
    metrics::describe_counter!(
        "civiclass_messages_total",
        "Total number of queue deliveries received"
    );
    metrics::describe_counter!(
        "civiclass_classified_total",
        "Total number of classified events published"
    );
    metrics::describe_counter!(
        "civiclass_requeued_total",
        "Total number of deliveries rejected and requeued"
    );
    metrics::describe_counter!(
        "civiclass_dropped_total",
        "Total number of unprocessable redelivered messages dropped"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
