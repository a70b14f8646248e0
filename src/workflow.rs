//! Re-translation workflow for one editing session.
//!
//! [`RetranslateSession::invoke`] re-translates one language,
//! [`RetranslateSession::invoke_all`] walks every translation slot one after
//! another with a pacing pause between remote calls. The `retranslate_*`
//! triggers put the default-language check, slot validation, the busy check,
//! the confirmation gate and the operation guard in front of them.

use crate::client::Retranslator;
use crate::config::Config;
use crate::confirm::Confirm;
use crate::error::WorkflowError;
use crate::guard::{OperationGuard, OperationSlot};
use crate::notify::{Notice, Notifier};
use crate::panel::PanelView;
use crate::state::{BulkProgress, ItemState, WorkflowState};
use crate::strings;
use crate::translations::{resolve_slots, DocumentSnapshot, TranslationSlot};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of a single-language trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleOutcome {
    Declined,
    Succeeded,
    Failed,
}

/// Result of a bulk trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    Declined,
    Completed { succeeded: usize, failed: usize },
    Cancelled { processed: usize, total: usize },
}

/// Resets an item left `Loading` by an abandoned request
struct LoadingReset<'a> {
    state: &'a WorkflowState,
    slug: &'a str,
    armed: bool,
}

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.set_item(self.slug, ItemState::Idle);
        }
    }
}

/// Clears bulk progress however the run ends
struct ProgressReset<'a>(&'a WorkflowState);

impl Drop for ProgressReset<'_> {
    fn drop(&mut self) {
        self.0.set_progress(None);
    }
}

/// Re-translation workflow bound to one document
pub struct RetranslateSession<R, N> {
    snapshot: DocumentSnapshot,
    default_language: String,
    pacing_interval: Duration,
    retranslator: R,
    notifier: N,
    state: Arc<WorkflowState>,
    slot: OperationSlot,
}

impl<R: Retranslator, N: Notifier> RetranslateSession<R, N> {
    pub fn new(
        snapshot: DocumentSnapshot,
        default_language: impl Into<String>,
        retranslator: R,
        notifier: N,
    ) -> Self {
        Self {
            snapshot,
            default_language: default_language.into(),
            pacing_interval: Duration::from_millis(crate::config::DEFAULT_PACING_INTERVAL_MS),
            retranslator,
            notifier,
            state: Arc::new(WorkflowState::new()),
            slot: OperationSlot::new(),
        }
    }

    pub fn from_config(
        config: &Config,
        snapshot: DocumentSnapshot,
        retranslator: R,
        notifier: N,
    ) -> Self {
        Self::new(snapshot, config.default_language.clone(), retranslator, notifier)
            .with_pacing(config.pacing_interval)
    }

    /// Pause between two remote calls of a bulk run
    pub fn with_pacing(mut self, interval: Duration) -> Self {
        self.pacing_interval = interval;
        self
    }

    /// Share state with an observer created before the session
    pub fn with_state(mut self, state: Arc<WorkflowState>) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &Arc<WorkflowState> {
        &self.state
    }

    pub fn snapshot(&self) -> &DocumentSnapshot {
        &self.snapshot
    }

    /// Replace the snapshot when the host reports a change
    pub fn set_snapshot(&mut self, snapshot: DocumentSnapshot) {
        self.snapshot = snapshot;
    }

    /// Translation slots of the current snapshot
    pub fn slots(&self) -> Vec<TranslationSlot> {
        resolve_slots(&self.snapshot)
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_held() || self.state.is_busy()
    }

    pub fn panel(&self) -> Option<PanelView> {
        PanelView::build(
            &self.snapshot,
            &self.default_language,
            &self.state,
            self.is_busy(),
        )
    }

    /// Re-translate one language after confirmation
    pub async fn retranslate_one<C: Confirm + ?Sized>(
        &self,
        slug: &str,
        confirm: &C,
    ) -> Result<SingleOutcome, WorkflowError> {
        self.ensure_default_language()?;

        let slot = self
            .slots()
            .into_iter()
            .find(|s| s.language_slug == slug)
            .ok_or_else(|| WorkflowError::UnknownLanguage(slug.to_string()))?;

        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }

        if !confirm.confirm(&strings::confirm_single(&slot.language_name)) {
            debug!("Re-translation of {} declined", slug);
            return Ok(SingleOutcome::Declined);
        }

        let _guard = self.acquire()?;

        Ok(if self.invoke(slug).await {
            SingleOutcome::Succeeded
        } else {
            SingleOutcome::Failed
        })
    }

    /// Re-translate every slot after confirmation
    pub async fn retranslate_all<C: Confirm + ?Sized>(
        &self,
        confirm: &C,
        cancel: &CancellationToken,
    ) -> Result<BulkOutcome, WorkflowError> {
        self.ensure_default_language()?;

        let slots = self.slots();
        if slots.is_empty() {
            return Err(WorkflowError::NoTranslations);
        }

        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }

        if !confirm.confirm(&strings::confirm_bulk(slots.len())) {
            debug!("Bulk re-translation declined");
            return Ok(BulkOutcome::Declined);
        }

        let _guard = self.acquire()?;

        Ok(self.invoke_all(&slots, cancel).await)
    }

    /// Re-translate one language: one remote call, one notice
    ///
    /// Never retries. Returns whether the call succeeded.
    pub async fn invoke(&self, slug: &str) -> bool {
        let source_id = self.snapshot.document_id;

        self.state.set_item(slug, ItemState::Loading);
        let mut reset = LoadingReset {
            state: &self.state,
            slug,
            armed: true,
        };
        debug!("Re-translation started: post {} -> {}", source_id, slug);

        let result = self.retranslator.retranslate(source_id, slug).await;
        reset.armed = false;

        match result {
            Ok(post) => {
                self.state.set_item(slug, ItemState::Success);
                debug!(
                    "Re-translation succeeded: post {} -> {} (post {})",
                    source_id, slug, post.post_id
                );
                self.notifier
                    .notify(Notice::success(strings::translation_updated(&post.post_title)));
                true
            }
            Err(e) => {
                self.state.set_item(slug, ItemState::Error);
                debug!(
                    "Re-translation failed: post {} -> {} ({:?}): {}",
                    source_id,
                    slug,
                    e.kind(),
                    e
                );
                let message = e.user_message().unwrap_or(strings::GENERIC_FAILURE);
                self.notifier.notify(Notice::error(message));
                false
            }
        }
    }

    /// Walk `slots` in order, one at a time, pausing between remote calls
    ///
    /// Item failures do not stop the run. The token is checked before each
    /// item and during each pause; a request already in flight finishes.
    pub async fn invoke_all(
        &self,
        slots: &[TranslationSlot],
        cancel: &CancellationToken,
    ) -> BulkOutcome {
        let total = slots.len();
        if total == 0 {
            return BulkOutcome::Completed {
                succeeded: 0,
                failed: 0,
            };
        }

        let _progress = ProgressReset(&self.state);
        let mut succeeded = 0;
        let mut failed = 0;

        info!("Starting bulk re-translation of {} languages", total);

        for (index, slot) in slots.iter().enumerate() {
            if cancel.is_cancelled() {
                return self.cancelled(index, total);
            }

            self.state.set_progress(Some(BulkProgress {
                current: index + 1,
                total,
            }));

            if self.invoke(&slot.language_slug).await {
                succeeded += 1;
            } else {
                failed += 1;
            }

            if index + 1 < total {
                debug!("Pacing {:?} before next language", self.pacing_interval);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return self.cancelled(index + 1, total),
                    _ = tokio::time::sleep(self.pacing_interval) => {}
                }
            }
        }

        self.state.set_progress(None);
        info!(
            "Bulk re-translation finished: {} succeeded, {} failed",
            succeeded, failed
        );
        self.notifier.notify(Notice::success(strings::BULK_COMPLETE));

        BulkOutcome::Completed { succeeded, failed }
    }

    fn cancelled(&self, processed: usize, total: usize) -> BulkOutcome {
        self.state.set_progress(None);
        info!(
            "Bulk re-translation cancelled after {} of {}",
            processed, total
        );
        self.notifier
            .notify(Notice::info(strings::bulk_cancelled(processed, total)));
        BulkOutcome::Cancelled { processed, total }
    }

    fn ensure_default_language(&self) -> Result<(), WorkflowError> {
        if self.snapshot.is_in_language(&self.default_language) {
            Ok(())
        } else {
            Err(WorkflowError::NotDefaultLanguage {
                expected: self.default_language.clone(),
                actual: self.snapshot.language_slug.clone(),
            })
        }
    }

    fn acquire(&self) -> Result<OperationGuard<'_>, WorkflowError> {
        let guard = self.slot.try_acquire().ok_or(WorkflowError::Busy)?;
        if self.state.is_busy() {
            return Err(WorkflowError::Busy);
        }
        Ok(guard)
    }
}
