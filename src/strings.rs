//! User-facing text of the panel, prompts and notices.
//!
//! Kept in one place so the wording stays consistent between the CLI and the
//! notice log.

/// Panel heading
pub const PANEL_TITLE: &str = "Machine translation";

/// Action label for a language that is idle or was updated earlier
pub const ACTION_RETRANSLATE: &str = "Re-translate";

/// Action label for a language whose last attempt failed
pub const ACTION_RETRY: &str = "Retry";

/// Shown in place of the action while a request is in flight
pub const ACTION_LOADING: &str = "…";

/// Bulk control label
pub const ACTION_RETRANSLATE_ALL: &str = "Re-translate all";

/// Shown when a translated post has no title
pub const TITLE_PLACEHOLDER: &str = "(no title)";

/// Error notice when the collaborator gave no message
pub const GENERIC_FAILURE: &str = "Re-translation failed. Please try again.";

/// Aggregate notice after a bulk run
pub const BULK_COMPLETE: &str = "All translations have been updated.";

/// Success notice for one language
pub fn translation_updated(title: &str) -> String {
    let title = if title.trim().is_empty() {
        TITLE_PLACEHOLDER
    } else {
        title
    };
    format!("Translation updated: {}", title)
}

/// Notice after a bulk run was cancelled
pub fn bulk_cancelled(processed: usize, total: usize) -> String {
    format!(
        "Bulk re-translation cancelled after {} of {}.",
        processed, total
    )
}

/// Confirmation prompt for one language
pub fn confirm_single(language_name: &str) -> String {
    format!(
        "Re-translate the {} version? Its current content will be overwritten.",
        language_name
    )
}

/// Confirmation prompt for a bulk run
pub fn confirm_bulk(count: usize) -> String {
    format!(
        "Re-translate all {} existing translations? Their current content will be overwritten.",
        count
    )
}
