//! Preview panel binary - shows which translations would be re-translated, without network access
//!
//! Usage:
//!   cargo run --bin preview -- post.json
//!   cargo run --bin preview -- post.json --json   # Machine-readable output
//!
//! Optional:
//! - DEFAULT_LANGUAGE (defaults to en)

use anyhow::{Context, Result};
use retranslate::panel::PanelView;
use retranslate::translations::{load_snapshot, resolve_slots};
use retranslate::WorkflowState;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("retranslate=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().context("Usage: preview <snapshot.json> [--json]")?);
    let as_json = args.any(|a| a == "--json");

    let default_language =
        std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());

    let snapshot = load_snapshot(&path)?;
    let slots = resolve_slots(&snapshot);
    info!(
        "Post {} in '{}': {} existing translation(s)",
        snapshot.document_id,
        snapshot.language_slug,
        slots.len()
    );

    let panel = PanelView::build(&snapshot, &default_language, &WorkflowState::new(), false);

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "slots": slots,
                "panel": panel,
            }))?
        );
        return Ok(());
    }

    match panel {
        Some(panel) => print!("{}", panel),
        None if !snapshot.is_in_language(&default_language) => println!(
            "No panel: post is in '{}', re-translation starts from '{}'",
            snapshot.language_slug, default_language
        ),
        None => println!("No panel: post has no existing translations"),
    }

    Ok(())
}
