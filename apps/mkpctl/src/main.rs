//! # mkpctl - Knowledge Pack Loader
//!
//! The binary for the mkp-core validation pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/mkpctl (THE BINARY)                │
//! │                                                          │
//! │  ┌───────────┐   ┌───────────┐   ┌────────────────────┐  │
//! │  │    CLI    │   │  Source   │   │  Helper process    │  │
//! │  │  (clap)   │   │ (csv/toml)│   │  (report on stdin) │  │
//! │  └─────┬─────┘   └─────┬─────┘   └─────────┬──────────┘  │
//! │        └───────────────┼───────────────────┘             │
//! │                        ▼                                 │
//! │                ┌───────────────┐                         │
//! │                │   mkp-core    │                         │
//! │                │ (THE PIPELINE)│                         │
//! │                └───────────────┘                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! mkpctl validate --root ./pack
//! mkpctl --json-mode validate --root ./pack --limit 5
//! mkpctl classify --message "Invalid URN in entities: bad"
//! ```

use clap::Parser;
use mkpctl::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // MKP_LOG_FORMAT=json enables machine-parseable output. Logs go to stderr.
    let log_format = std::env::var("MKP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "mkpctl=debug"
    } else {
        "mkpctl=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

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

    std::process::exit(cli::execute(cli));
}
