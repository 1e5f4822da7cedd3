//! # platnav
//!
//! Offline tooling for platform-layout navigation.
//!
//! ```text
//!   trace files ──► map ──► mapdata.pnav ──► status / graph / locate / walk / export
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Build a map from a recorded walk
//! platnav map --trace walk.txt --oneway-trace ledges.json --minimap 8,24,180,120
//!
//! # Inspect it
//! platnav status
//! platnav graph
//! platnav locate --x 40 --y 85
//!
//! # Replay 50 exploration steps from a starting position
//! platnav walk --x 40 --y 100 --steps 50 --seed 7
//! ```

use clap::Parser;
use platnav::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // PLATNAV_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("PLATNAV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "platnav=debug,platnav_core=debug"
    } else {
        "platnav=info,platnav_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so --json-mode output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
