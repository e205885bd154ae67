use clap::Parser;
use colored::*;
use std::io::IsTerminal;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{log_error, IntakeError, Result};
use intake_server::{create_app, IntakeConfig, IntakeServer};

/// Call intake HTTP server
#[derive(Parser, Debug)]
#[command(name = "intake-server")]
#[command(about = "Voice-AI call intake backend: webhooks, post-call records and bot management")]
struct Args {
    /// Server bind address (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "intake-server.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut config = IntakeConfig::load(Some(&args.config))
        .map_err(|e| IntakeError::ConfigError(e.to_string()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config, args.verbose)?;

    let result = run(config).await;
    if let Err(error) = &result {
        log_error("intake-server", error);
    }
    result
}

async fn run(config: IntakeConfig) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    info!("📞 {}", "Starting call intake server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!("🌐 Bind address: {}", addr.bright_yellow());
    info!("💾 Data directory: {}", config.storage.data_dir.display().to_string().bright_white());
    if config.vendor.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        tracing::warn!("{}", "Vendor API key not set; /vendor/bots will return 503".bright_yellow());
    }

    let server = IntakeServer::from_config(config).await?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| IntakeError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("🚀 {}", format!("Call intake server running on http://{}", addr).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", addr).bright_blue());
    info!("🔔 {}", format!("Webhooks available at: http://{}/webhooks", addr).bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| IntakeError::ServerError(format!("HTTP server error: {}", e)))?;

    info!("👋 {}", "Call intake server stopped".bright_cyan());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(config: &IntakeConfig, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let use_colors = env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal();
    let human_readable = config.server.is_development() && !config.logging.json && use_colors;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("intake_server={},tower_http=info", level).into());

    let init_result = if human_readable {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true),
            )
            .try_init()
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    };
    init_result.map_err(|e| IntakeError::TelemetryError(format!("Failed to init tracing: {}", e)))?;

    if human_readable {
        print_startup_banner();
    }
    Ok(())
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                     📞 CALL INTAKE BACKEND                   ║".bright_cyan());
    println!("{}", "║          Voice-AI webhooks and post-call processing          ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
