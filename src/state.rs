//! Per-language item states and bulk progress shared by one editing session.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Lifecycle of one language's re-translation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemState::Idle => "idle",
            ItemState::Loading => "loading",
            ItemState::Success => "success",
            ItemState::Error => "error",
        };
        f.write_str(s)
    }
}

/// Position of an active bulk run (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkProgress {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for BulkProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

#[derive(Debug, Default)]
struct Inner {
    items: HashMap<String, ItemState>,
    progress: Option<BulkProgress>,
}

/// Mutable state of a session
///
/// Only the invoker and the bulk sequencer write here; everything else reads.
/// Each key is replaced as a whole, so readers never see a half-updated entry.
#[derive(Debug, Default)]
pub struct WorkflowState {
    inner: Mutex<Inner>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave a half-written entry behind
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// State for `slug`; `Idle` when nothing was recorded
    pub fn item(&self, slug: &str) -> ItemState {
        self.lock().items.get(slug).copied().unwrap_or_default()
    }

    pub(crate) fn set_item(&self, slug: &str, state: ItemState) {
        self.lock().items.insert(slug.to_string(), state);
    }

    /// Copy of every recorded item state
    pub fn items(&self) -> HashMap<String, ItemState> {
        self.lock().items.clone()
    }

    pub fn progress(&self) -> Option<BulkProgress> {
        self.lock().progress
    }

    pub(crate) fn set_progress(&self, progress: Option<BulkProgress>) {
        self.lock().progress = progress;
    }

    pub fn any_loading(&self) -> bool {
        self.lock()
            .items
            .values()
            .any(|state| *state == ItemState::Loading)
    }

    /// True while an item is loading or a bulk run is active
    pub fn is_busy(&self) -> bool {
        let inner = self.lock();
        inner.progress.is_some() || inner.items.values().any(|s| *s == ItemState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_slug_is_idle() {
        let state = WorkflowState::new();
        assert_eq!(state.item("en"), ItemState::Idle);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_set_item_replaces_only_that_key() {
        let state = WorkflowState::new();
        state.set_item("en", ItemState::Loading);
        state.set_item("sv", ItemState::Error);
        state.set_item("en", ItemState::Success);

        assert_eq!(state.item("en"), ItemState::Success);
        assert_eq!(state.item("sv"), ItemState::Error);
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_busy_while_loading() {
        let state = WorkflowState::new();
        assert!(!state.is_busy());

        state.set_item("en", ItemState::Loading);
        assert!(state.any_loading());
        assert!(state.is_busy());

        state.set_item("en", ItemState::Error);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_busy_while_bulk_active() {
        let state = WorkflowState::new();
        state.set_progress(Some(BulkProgress {
            current: 1,
            total: 3,
        }));
        assert!(state.is_busy());
        assert!(!state.any_loading());

        state.set_progress(None);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemState::Loading.to_string(), "loading");
        assert_eq!(
            BulkProgress {
                current: 2,
                total: 5
            }
            .to_string(),
            "2/5"
        );
    }

    #[test]
    fn test_item_state_serializes_lowercase() {
        let json = serde_json::to_string(&ItemState::Success).expect("Should serialize");
        assert_eq!(json, "\"success\"");
    }
}
