use clap::Parser;
use dormctl::{Application, Config, telemetry};

/// Resolves when the process is asked to stop (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("cannot install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("cannot install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, draining connections..."),
        _ = terminate => tracing::info!("SIGTERM received, draining connections..."),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = dormctl::config::Args::parse();
    let config = Config::load(&args)?;

    // --validate parses and checks the config, then exits without serving
    if args.validate {
        println!("Configuration OK");
        return Ok(());
    }

    telemetry::init_telemetry()?;
    tracing::debug!(?args, "Parsed command line");

    Application::new(config).await?.serve(shutdown_signal()).await
}
