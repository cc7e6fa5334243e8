//! Tellerchain REST API entry point.
//!
//! Binary name: `tellerd`
//!
//! Parses CLI arguments, loads gateway configuration from the
//! environment, then serves the chat API until Ctrl+C or SIGTERM.

mod http;
mod state;

use clap::Parser;

use tellerchain_core::orchestrator::ChainOrchestrator;
use tellerchain_core::registry::SessionRegistry;
use tellerchain_infra::config::ServiceConfig;
use tellerchain_infra::llm::create_gateway;

use state::AppState;

#[derive(Parser)]
#[command(name = "tellerd", version, about = "Tellerchain banking assistant API")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, short, default_value_t = 8000, env = "TELLERCHAIN_PORT")]
    port: u16,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Export spans through the OpenTelemetry stdout bridge.
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,tellerchain=debug",
        _ => "trace",
    };
    tellerchain_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Configuration is fatal on error: without a credential the service
    // must not accept traffic.
    let config = ServiceConfig::from_env()?;
    let model = config.model.clone();

    let registry = SessionRegistry::new();
    let orchestrator = ChainOrchestrator::new(create_gateway(config), registry.clone());
    let state = AppState::new(orchestrator, registry);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %model, "Tellerchain API listening");

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    tellerchain_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
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
