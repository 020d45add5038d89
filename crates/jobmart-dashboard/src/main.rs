use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod app;
mod http;

use jobmart_core::JobmartConfig;
use jobmart_warehouse::WarehouseReader;

#[derive(Parser, Debug)]
#[command(name = "jobmart-dashboard", about = "HR job-ads analytics dashboard")]
struct Args {
    /// Path to jobmart.toml (default: JOBMART_CONFIG or ./jobmart.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured port.
    #[arg(long)]
    port: Option<u16>,

    /// Print the orchestrator pipeline definitions as JSON and exit.
    #[arg(long)]
    print_pipeline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobmart_dashboard=info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    if args.print_pipeline {
        return print_pipeline();
    }

    let mut config =
        JobmartConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Config load failed ({}), using defaults", e);
            JobmartConfig::default()
        });
    if let Some(bind) = args.bind {
        config.dashboard.bind = bind;
    }
    if let Some(port) = args.port {
        config.dashboard.port = port;
    }

    info!(path = %config.warehouse.db_path, "opening warehouse");
    let reader = WarehouseReader::open(&config.warehouse)
        .context("warehouse unavailable — check JOBMART_DB_PATH")?;

    let bind = config.dashboard.bind.clone();
    let port = config.dashboard.port;
    let state = Arc::new(app::AppState::new(config, reader));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {bind}:{port}"))?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Diagnostic view of what gets handed to the orchestrator.
fn print_pipeline() -> anyhow::Result<()> {
    let defs = jobmart_pipeline::Definitions::hr_pipeline()?;
    let next = defs
        .next_scheduled_run(chrono::Utc::now())
        .map(|(def, at)| serde_json::json!({ "schedule": def.name, "at": at.to_rfc3339() }));
    let out = serde_json::json!({
        "assets": defs.assets(),
        "jobs": defs.jobs(),
        "schedules": defs.schedules(),
        "sensors": defs.sensors(),
        "next_run": next,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
