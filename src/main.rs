//! Re-translate existing translations of a post
//!
//! Usage:
//!   retranslate --snapshot post.json               # Show the panel only
//!   retranslate --snapshot post.json --lang en     # Re-translate one language
//!   retranslate --snapshot post.json --all         # Re-translate every existing translation
//!   retranslate ... --yes                          # Skip the confirmation prompt
//!
//! Ctrl-C during `--all` stops the run after the language in flight.
//!
//! Required environment variables:
//! - RETRANSLATE_ENDPOINT
//!
//! Optional:
//! - RETRANSLATE_USERNAME / RETRANSLATE_APP_PASSWORD
//! - RETRANSLATE_NONCE
//! - DEFAULT_LANGUAGE (defaults to en)
//! - PACING_INTERVAL_MS (defaults to 2000)
//! - REQUEST_TIMEOUT_SECS (defaults to 60)
//! - RETRANSLATE_DEBUG (logs every request lifecycle event)

use anyhow::{bail, Context, Result};
use retranslate::confirm::{AutoConfirm, Confirm, PromptConfirm};
use retranslate::notify::{NoticeLog, Tee, TracingNotifier};
use retranslate::translations::load_snapshot;
use retranslate::{BulkOutcome, RetranslateClient, RetranslateSession, SingleOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Show,
    Single(String),
    All,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    snapshot: PathBuf,
    mode: Mode,
    yes: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut snapshot = None;
    let mut mode = Mode::Show;
    let mut yes = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--snapshot" => {
                snapshot = Some(PathBuf::from(
                    args.next().context("--snapshot needs a file path")?,
                ));
            }
            "--lang" => {
                if mode != Mode::Show {
                    bail!("Use either --lang or --all, not both");
                }
                mode = Mode::Single(args.next().context("--lang needs a language slug")?);
            }
            "--all" => {
                if mode != Mode::Show {
                    bail!("Use either --lang or --all, not both");
                }
                mode = Mode::All;
            }
            "--yes" | "-y" => yes = true,
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(Args {
        snapshot: snapshot.context("--snapshot is required")?,
        mode,
        yes,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    let config = retranslate::config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_directive().parse()?),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let snapshot = load_snapshot(&args.snapshot)?;
    let client = RetranslateClient::from_config(&config)?;

    info!(
        "Post {} ({}) via {}",
        snapshot.document_id,
        snapshot.language_slug,
        client.endpoint()
    );

    let log = Arc::new(NoticeLog::new());
    let session = RetranslateSession::from_config(
        &config,
        snapshot,
        client,
        Tee(TracingNotifier, Arc::clone(&log)),
    );

    let Some(panel) = session.panel() else {
        info!(
            "Nothing to re-translate: post is not in the default language '{}' or has no existing translations",
            config.default_language
        );
        return Ok(());
    };
    println!("{}", panel);

    if args.mode == Mode::Show {
        return Ok(());
    }

    let confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(PromptConfirm::terminal())
    };

    let failed = match args.mode {
        Mode::Show => 0,
        Mode::Single(slug) => match session.retranslate_one(&slug, &*confirm).await? {
            SingleOutcome::Declined => {
                info!("Cancelled, nothing was changed");
                return Ok(());
            }
            SingleOutcome::Succeeded => 0,
            SingleOutcome::Failed => 1,
        },
        Mode::All => {
            let cancel = CancellationToken::new();
            let ctrl_c = {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        warn!("Stopping after the current language...");
                        cancel.cancel();
                    }
                })
            };

            let outcome = session.retranslate_all(&*confirm, &cancel).await;
            ctrl_c.abort();

            match outcome? {
                BulkOutcome::Declined => {
                    info!("Cancelled, nothing was changed");
                    return Ok(());
                }
                BulkOutcome::Completed { failed, .. } => failed,
                BulkOutcome::Cancelled { processed, total } => {
                    info!("Stopped after {} of {} languages", processed, total);
                    0
                }
            }
        }
    };

    if let Some(panel) = session.panel() {
        println!("\n{}", panel);
    }
    for notice in log.notices() {
        println!("{}", notice);
    }

    if failed > 0 {
        bail!("{} re-translation(s) failed", failed);
    }

    Ok(())
}
