//! Error types for re-translation requests and workflow triggers.

use serde::Deserialize;

/// Broad class of a failed re-translation, used for logging and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller may not edit the source or the target document
    Authorization,
    /// Missing translation, bad language or post type, inactive service
    Precondition,
    /// The machine-translation call failed
    Upstream,
    /// The translated content could not be saved
    Persistence,
    /// The request never got a response
    Transport,
    /// The response could not be understood
    Protocol,
}

/// Failure of one remote re-translation call
#[derive(thiserror::Error, Debug)]
pub enum RetranslateError {
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    #[error("No existing translation: {message}")]
    NoTranslation { message: String },

    #[error("Invalid target language: {message}")]
    InvalidLanguage { message: String },

    #[error("Post type not enabled for translation: {message}")]
    UnsupportedPostType { message: String },

    #[error("Translation service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Translation failed: {message}")]
    TranslationFailed { message: String },

    #[error("Saving translated content failed: {message}")]
    SaveFailed { message: String },

    /// A structured error with a code this client does not know
    #[error("Remote error {code} ({status}): {message}")]
    Remote {
        code: String,
        status: u16,
        message: String,
    },

    /// A non-success response without a readable error body
    #[error("Trigger endpoint error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response from trigger endpoint: {0}")]
    UnexpectedResponse(String),

    #[error("Failed to reach trigger endpoint: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Structured error body returned by the trigger endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<ErrorData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorData {
    #[serde(default)]
    pub status: Option<u16>,
}

impl RetranslateError {
    /// Map a structured error body onto the matching variant
    pub fn from_body(status: u16, body: ErrorBody) -> Self {
        let message = body.message;
        match body.code.as_str() {
            "rest_forbidden" => Self::Forbidden { message },
            "no_translation" => Self::NoTranslation { message },
            "invalid_language" => Self::InvalidLanguage { message },
            "unsupported_post_type" => Self::UnsupportedPostType { message },
            "service_inactive" => Self::ServiceUnavailable { message },
            "translation_failed" => Self::TranslationFailed { message },
            "save_failed" => Self::SaveFailed { message },
            _ => Self::Remote {
                code: body.code,
                status: body.data.and_then(|d| d.status).unwrap_or(status),
                message,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Forbidden { .. } => ErrorKind::Authorization,
            Self::NoTranslation { .. }
            | Self::InvalidLanguage { .. }
            | Self::UnsupportedPostType { .. }
            | Self::ServiceUnavailable { .. } => ErrorKind::Precondition,
            Self::TranslationFailed { .. } => ErrorKind::Upstream,
            Self::SaveFailed { .. } => ErrorKind::Persistence,
            Self::Remote { status, .. } | Self::Http { status, .. } => kind_for_status(*status),
            Self::UnexpectedResponse(_) => ErrorKind::Protocol,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Message supplied by the collaborator, if any, for showing to the editor
    pub fn user_message(&self) -> Option<&str> {
        let message = match self {
            Self::Forbidden { message }
            | Self::NoTranslation { message }
            | Self::InvalidLanguage { message }
            | Self::UnsupportedPostType { message }
            | Self::ServiceUnavailable { message }
            | Self::TranslationFailed { message }
            | Self::SaveFailed { message }
            | Self::Remote { message, .. } => message.as_str(),
            Self::Http { .. } | Self::UnexpectedResponse(_) | Self::Transport(_) => return None,
        };

        let trimmed = message.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Authorization,
        400..=499 => ErrorKind::Precondition,
        _ => ErrorKind::Upstream,
    }
}

/// Reasons a trigger is refused before anything happens
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Another re-translation is already running")]
    Busy,

    #[error("Document is in '{actual}', re-translation only starts from the default language '{expected}'")]
    NotDefaultLanguage { expected: String, actual: String },

    #[error("No existing translation for language '{0}'")]
    UnknownLanguage(String),

    #[error("Document has no existing translations")]
    NoTranslations,
}
