//! Backend endpoint discovery CLI.
//!
//! Operator surface over the discovery library: run a cycle, inspect the
//! current endpoint, set a manual override, clear the record, or keep
//! re-checking on a timer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend_discovery::config::{load_config, DiscoveryConfig};
use backend_discovery::localnet::NetifDiscoverer;
use backend_discovery::probe::HttpProber;
use backend_discovery::selector::Selector;
use backend_discovery::status::StatusReporter;
use backend_discovery::store::EndpointStore;

#[derive(Parser)]
#[command(name = "backend-discovery")]
#[command(about = "Backend endpoint discovery for the membership client", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one discovery cycle and print the result
    Discover,
    /// Print the current endpoint snapshot without probing
    Status,
    /// Probe a manually entered endpoint and store it on success
    Set { url: String },
    /// Forget the persisted endpoint
    Clear,
    /// Re-check the active endpoint periodically until interrupted
    Watch {
        /// Override the refresh interval in seconds
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend_discovery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DiscoveryConfig::default(),
    };

    let store = EndpointStore::from_config(&config.store);
    tracing::debug!(path = %store.path().display(), "endpoint store opened");

    match cli.command {
        Commands::Discover => {
            let reporter = build_reporter(&config, store);
            let state = reporter.refresh().await;
            print_json(&reporter.snapshot())?;
            if !state.is_connected() {
                std::process::exit(1);
            }
        }
        Commands::Status => {
            print_json(&serde_json::json!({
                "record": store.get(),
                "base_url": store.base_url(),
            }))?;
        }
        Commands::Set { url } => {
            let reporter = build_reporter(&config, store);
            reporter.set_manual_endpoint(&url).await?;
            println!("endpoint stored: {}", reporter.snapshot().current_endpoint.unwrap_or_default());
        }
        Commands::Clear => {
            store.clear()?;
            println!("endpoint record cleared");
        }
        Commands::Watch { interval_secs } => {
            config.refresh.enabled = true;
            if let Some(secs) = interval_secs {
                config.refresh.interval_secs = secs;
            }
            let reporter = build_reporter(&config, store);

            let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("interrupt received, shutting down");
                let _ = shutdown_tx.send(());
            });

            reporter.run(shutdown_rx).await;
            print_json(&reporter.snapshot())?;
        }
    }

    Ok(())
}

fn build_reporter(
    config: &DiscoveryConfig,
    store: EndpointStore,
) -> StatusReporter<HttpProber, NetifDiscoverer> {
    let prober = HttpProber::from_config(&config.probe);
    let discoverer = NetifDiscoverer::from_config(&config.localnet);
    let selector = Selector::new(config, prober, discoverer, store);
    StatusReporter::new(config, selector)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
