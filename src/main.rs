mod check;
mod config;
mod metrics;
mod services;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use aws_config::BehaviorVersion;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use config::Config;
use metrics::Recorder;

/// Grace period for the metrics endpoint to stop after cancellation
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(
    name = "aws-checker",
    version,
    about = "Toolkit for checking availability of AWS services"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print version information and exit
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(Command::Version) = cli.command {
        println!("aws-checker {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    run(config).await
}

/// Run the checker until SIGINT/SIGTERM, then drain and stop
async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let recorder = Arc::new(Recorder::new());

    let server = tokio::spawn({
        let addr = config.metrics_addr.clone();
        let recorder = recorder.clone();
        let cancel = cancel.clone();
        async move {
            // An endpoint failure is logged but never stops the check loops.
            if let Err(e) = metrics::start_metrics_server(&addr, recorder, cancel).await {
                error!(error = %e, "Metrics server failed");
            }
        }
    });

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let mut runners = Vec::new();
    for group in services::check_groups(&aws_config, &config) {
        runners.push(tokio::spawn(check::run_group(
            group,
            config.check_interval,
            config.api_call_interval,
            cancel.clone(),
            recorder.clone(),
        )));
    }

    wait_for_signal().await?;
    info!("Received signal, exiting...");
    cancel.cancel();

    for handle in runners {
        if let Err(e) = handle.await {
            error!(error = %e, "Check runner ended abnormally");
        }
    }

    tokio::time::timeout(SHUTDOWN_GRACE, server)
        .await
        .context("metrics server failed to shut down within grace period")?
        .context("metrics server task panicked")?;

    info!("Shutdown complete");
    Ok(())
}

async fn wait_for_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = sigterm.recv() => {}
    }
    Ok(())
}
