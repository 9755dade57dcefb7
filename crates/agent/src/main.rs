//! `mirador-agent` -- progress stream watcher.
//!
//! Subscribes to one prospect's SSE progress stream and follows it to
//! a terminal state, reconnecting with bounded exponential backoff on
//! transport drops. Useful for driving imports from scripts and for
//! watching a long run from a terminal instead of the admin UI.
//!
//! Exits 0 when processing completes successfully, 1 otherwise.
//! Ctrl-C abandons the stream only; server-side processing continues.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default                 | Description                    |
//! |----------------|----------|-------------------------|--------------------------------|
//! | `PROSPECT_ID`  | yes      | --                      | Prospect to watch              |
//! | `API_BASE_URL` | no       | `http://localhost:3000` | Base URL of the mirador API    |

use mirador_agent::stream::{watch_prospect, WatchOutcome};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mirador_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let prospect_id: i64 = std::env::var("PROSPECT_ID")
        .unwrap_or_else(|_| {
            tracing::error!("PROSPECT_ID environment variable is required");
            std::process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            tracing::error!("PROSPECT_ID must be a valid integer");
            std::process::exit(1);
        });

    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

    tracing::info!(prospect_id, base_url = %base_url, "Starting mirador-agent");

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, abandoning the stream");
            cancel_on_signal.cancel();
        }
    });

    let http = reqwest::Client::new();
    let outcome = watch_prospect(&http, &base_url, prospect_id, &cancel).await;

    match outcome {
        WatchOutcome::Completed { project_slug } => {
            tracing::info!(
                project_slug = project_slug.as_deref().unwrap_or("unknown"),
                "Processing complete"
            );
        }
        WatchOutcome::Failed { message } => {
            tracing::error!(message = %message, "Processing failed");
            std::process::exit(1);
        }
        WatchOutcome::GaveUp => {
            tracing::error!("Lost the progress stream and exhausted retries");
            std::process::exit(1);
        }
        WatchOutcome::Aborted => {
            tracing::info!("Watch abandoned; server-side processing continues");
            std::process::exit(1);
        }
    }
}
