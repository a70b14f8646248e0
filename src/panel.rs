//! Sidebar panel model.
//!
//! Built fresh from the snapshot and session state every time it is shown.

use crate::state::{BulkProgress, ItemState, WorkflowState};
use crate::strings;
use crate::translations::{resolve_slots, DocumentSnapshot};
use serde::Serialize;
use std::fmt;

/// Bulk control: a button, or the progress of the active run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BulkControl {
    Button { disabled: bool },
    Progress(BulkProgress),
}

/// Per-language action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Retranslate,
    Loading,
    Retry,
}

impl RowAction {
    pub fn for_state(state: ItemState) -> Self {
        match state {
            ItemState::Idle | ItemState::Success => RowAction::Retranslate,
            ItemState::Loading => RowAction::Loading,
            ItemState::Error => RowAction::Retry,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Retranslate => strings::ACTION_RETRANSLATE,
            RowAction::Loading => strings::ACTION_LOADING,
            RowAction::Retry => strings::ACTION_RETRY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelRow {
    pub language_slug: String,
    pub language_name: String,
    pub title: String,
    pub state: ItemState,
    pub action: RowAction,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub bulk: BulkControl,
    pub rows: Vec<PanelRow>,
}

impl PanelView {
    /// Panel for `snapshot`, or `None` when there is nothing to show
    ///
    /// Only documents in the default language with at least one existing
    /// translation get a panel. `busy` disables every control.
    pub fn build(
        snapshot: &DocumentSnapshot,
        default_language: &str,
        state: &WorkflowState,
        busy: bool,
    ) -> Option<Self> {
        if !snapshot.is_in_language(default_language) {
            return None;
        }

        let slots = resolve_slots(snapshot);
        if slots.is_empty() {
            return None;
        }

        let bulk = match state.progress() {
            Some(progress) => BulkControl::Progress(progress),
            None => BulkControl::Button { disabled: busy },
        };

        let rows = slots
            .into_iter()
            .map(|slot| {
                let item = state.item(&slot.language_slug);
                let title = if slot.post_title.trim().is_empty() {
                    strings::TITLE_PLACEHOLDER.to_string()
                } else {
                    slot.post_title
                };
                PanelRow {
                    language_slug: slot.language_slug,
                    language_name: slot.language_name,
                    title,
                    state: item,
                    action: RowAction::for_state(item),
                    disabled: busy,
                }
            })
            .collect();

        Some(Self { bulk, rows })
    }

    /// True when no control can be triggered
    pub fn is_disabled(&self) -> bool {
        let bulk_disabled = match self.bulk {
            BulkControl::Button { disabled } => disabled,
            BulkControl::Progress(_) => true,
        };
        bulk_disabled && self.rows.iter().all(|row| row.disabled)
    }

    pub fn row(&self, slug: &str) -> Option<&PanelRow> {
        self.rows.iter().find(|row| row.language_slug == slug)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", strings::PANEL_TITLE)?;

        match &self.bulk {
            BulkControl::Button { disabled: false } => {
                writeln!(f, "[{}]", strings::ACTION_RETRANSLATE_ALL)?
            }
            BulkControl::Button { disabled: true } => {
                writeln!(f, "({})", strings::ACTION_RETRANSLATE_ALL)?
            }
            BulkControl::Progress(progress) => writeln!(f, "Re-translating {}", progress)?,
        }

        let name_width = self
            .rows
            .iter()
            .map(|row| row.language_name.chars().count())
            .max()
            .unwrap_or(0);

        for row in &self.rows {
            let action = if row.disabled || row.action == RowAction::Loading {
                format!("({})", row.action.label())
            } else {
                format!("[{}]", row.action.label())
            };
            writeln!(
                f,
                "  {:<width$}  {:<4} {}  {}",
                row.language_name,
                row.language_slug,
                row.title,
                action,
                width = name_width
            )?;
        }

        Ok(())
    }
}
