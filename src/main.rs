//! ccstatus - Status page client
//!
//! Prints incidents or the service status as JSON lines on stdout. Logs go
//! to stderr.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ccstatus::config::LogLevel;
use ccstatus::{Config, FetchError, StatusService, StatusSource};

const DEFAULT_INCIDENT_LIMIT: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "ccstatus", version, about = "Show status page incidents and service status")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Show recent incidents
    Incident {
        /// Number of incidents to show
        #[arg(short, long, default_value_t = DEFAULT_INCIDENT_LIMIT)]
        limit: usize,
    },
    /// Show the overall indicator and every component
    Service,
}

/// Entry point.
///
/// # Startup Sequence
/// 1. Parse arguments
/// 2. Load and validate configuration (fatal on error)
/// 3. Initialize tracing at the configured level
/// 4. Build the data service and run the command
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, file) = match Config::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_level);

    if let Some(path) = file {
        info!(path = %path.display(), "configuration file loaded");
    }
    info!(
        "Configuration loaded: base_url={}, timeout={}ms, max_attempts={}, cache_ttl={}s, cache_max_size={}",
        config.api_base_url,
        config.api_timeout_ms,
        config.max_attempts,
        config.cache_ttl_secs,
        config.cache_max_size
    );

    let service = StatusService::from_config(&config);
    let command = cli.command.unwrap_or(Command::Incident {
        limit: DEFAULT_INCIDENT_LIMIT,
    });

    let mut stdout = std::io::stdout().lock();
    match run(&service, &config, command, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            if let Some(FetchError::Network { .. }) = err.downcast_ref::<FetchError>() {
                eprintln!("hint: check your internet connection and try again");
            }
            ExitCode::FAILURE
        }
    }
}

/// Defaults to `ccstatus=<level>`; `RUST_LOG` overrides it.
fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ccstatus={}", level.as_directive()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run<S: StatusSource, W: Write>(
    source: &S,
    config: &Config,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Incident { limit } => {
            // Zero would mean "no limit" to the stream
            let limit = limit.clamp(1, config.max_incidents);
            let mut incidents = source.incidents_stream(Some(limit));
            let mut shown = 0usize;

            while let Some(incident) = incidents
                .try_next()
                .await
                .context("failed to fetch incidents")?
            {
                writeln!(out, "{}", serde_json::to_string(&incident)?)?;
                shown += 1;
            }
            info!(shown, "incidents printed");
        }
        Command::Service => {
            let summary = source
                .service_status()
                .await
                .context("failed to fetch service status")?;
            writeln!(out, "{}", serde_json::to_string(&summary.status)?)?;

            // Same resolution as the indicator, so a disabled cache costs one fetch
            for component in summary.components.iter().take(config.max_components) {
                writeln!(out, "{}", serde_json::to_string(component)?)?;
            }
        }
    }
    Ok(())
}
