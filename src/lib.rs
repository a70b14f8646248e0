//! Re-run machine translation over posts that already have translations.
//!
//! The translation itself happens behind a trigger endpoint owned by the
//! content system. This crate resolves which languages can be re-translated,
//! drives the requests one language or all of them at a time, and tracks
//! what the editor sees while that happens.
//!
//! ```rust,ignore
//! use retranslate::{client::RetranslateClient, config::Config, notify::TracingNotifier};
//! use retranslate::workflow::RetranslateSession;
//!
//! let config = Config::from_env()?;
//! let client = RetranslateClient::from_config(&config)?;
//! let session = RetranslateSession::from_config(&config, snapshot, client, TracingNotifier);
//! session.retranslate_one("en", &AutoConfirm).await?;
//! ```

pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod guard;
pub mod notify;
pub mod panel;
pub mod state;
pub mod strings;
pub mod translations;
pub mod workflow;

pub use client::{RetranslateClient, RetranslatedPost, Retranslator};
pub use error::{ErrorKind, RetranslateError, WorkflowError};
pub use state::{BulkProgress, ItemState, WorkflowState};
pub use translations::{resolve_slots, DocumentSnapshot, TranslationSlot, TranslationsIndex};
pub use workflow::{BulkOutcome, RetranslateSession, SingleOutcome};
