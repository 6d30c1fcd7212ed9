//! `rates`: terminal front-end.
//!
//! Mounts one view for the given route and prints a text frame of it on an
//! interval until Ctrl-C (or `--duration-secs`), then unmounts it. Logs go
//! to stderr; frames go to stdout.

use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coincap_rates::prelude::*;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Route to open: `/rates` for the catalog or `/rates/{id}` for one asset.
    #[arg(default_value = "/rates")]
    route: String,

    /// Catalog search filter (name or symbol, case-insensitive).
    #[arg(long)]
    search: Option<String>,

    /// Milliseconds between printed frames.
    #[arg(long, default_value_t = 1000)]
    refresh_ms: u64,

    /// Exit after this many seconds instead of waiting for Ctrl-C.
    #[arg(long)]
    duration_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let route: Route = args.route.parse()?;
    let config = RatesConfig::from_env()?;
    info!("Using API {}", config.api_url);

    let client = RatesClient::from_config(&config)?;
    let mut app = App::new(client);
    app.navigate(route).await;
    if let Some(query) = &args.search {
        app.set_search(query).await;
    }

    let mut frames = tokio::time::interval(Duration::from_millis(args.refresh_ms.max(50)));
    let deadline = async {
        match args.duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    let interrupt = signal::ctrl_c();
    tokio::pin!(deadline, interrupt);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                println!("{}", app.render().await);
                println!("{}", "─".repeat(40));
            }
            _ = &mut interrupt => {
                info!("Interrupted");
                break;
            }
            () = &mut deadline => break,
        }
    }

    app.shutdown().await;
    Ok(())
}
