//! Translation set resolution.
//!
//! The host editing surface hands over a read-only [`DocumentSnapshot`] for the
//! document being edited. [`resolve_slots`] turns it into the ordered list of
//! languages that already have a translated counterpart and can therefore be
//! re-translated.

use anyhow::{Context, Result};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Translation metadata for one language, as supplied by the host
///
/// Every field is optional: hosts omit or null them for languages that have
/// no translated post yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMeta {
    /// Display name of the language (e.g. "English", "Svenska")
    #[serde(default)]
    pub name: Option<String>,

    /// Id of the translated post, `None` when no translation exists
    #[serde(default, deserialize_with = "deserialize_post_id")]
    pub post_id: Option<u64>,

    /// Title of the translated post
    #[serde(default)]
    pub post_title: Option<String>,
}

/// Language slug -> translation metadata, in the host's key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationsIndex {
    entries: Vec<(String, TranslationMeta)>,
}

impl TranslationsIndex {
    /// Build an index from a JSON value, skipping anything unreadable
    ///
    /// A non-object value (including an empty list) yields an empty index;
    /// an entry whose metadata cannot be read is dropped on its own.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() && value.as_array().map_or(true, |a| !a.is_empty()) {
                debug!("Ignoring translations index that is not an object: {}", value);
            }
            return Self::default();
        };

        let entries = object
            .iter()
            .filter_map(|(slug, meta)| {
                match serde_json::from_value::<TranslationMeta>(meta.clone()) {
                    Ok(meta) => Some((slug.clone(), meta)),
                    Err(e) => {
                        debug!("Skipping unreadable translation entry '{}': {}", slug, e);
                        None
                    }
                }
            })
            .collect();

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, slug: &str) -> Option<&TranslationMeta> {
        self.entries
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, meta)| meta)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationMeta)> {
        self.entries.iter().map(|(slug, meta)| (slug.as_str(), meta))
    }
}

impl FromIterator<(String, TranslationMeta)> for TranslationsIndex {
    fn from_iter<I: IntoIterator<Item = (String, TranslationMeta)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for TranslationsIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl Serialize for TranslationsIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(slug, meta)| (slug, meta)))
    }
}

/// Read-only view of the document being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub document_id: u64,

    /// Language of the document itself; empty when the host has not assigned one
    #[serde(default)]
    pub language_slug: String,

    #[serde(default)]
    pub translations: TranslationsIndex,
}

impl DocumentSnapshot {
    /// Whether re-translation may start from this document
    pub fn is_in_language(&self, language: &str) -> bool {
        !self.language_slug.is_empty() && self.language_slug == language
    }
}

/// Read a snapshot exported by the host from a JSON file
pub fn load_snapshot(path: &Path) -> Result<DocumentSnapshot> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read snapshot at {}", path.display()))?;
    serde_json::from_str(&content)
        .context(format!("Failed to parse snapshot at {}", path.display()))
}

/// A language with an existing translated post that can be re-translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationSlot {
    pub language_slug: String,
    pub language_name: String,
    pub post_id: u64,
    pub post_title: String,
}

/// Resolve the re-translatable languages of a document
pub fn resolve_slots(snapshot: &DocumentSnapshot) -> Vec<TranslationSlot> {
    resolve_translation_slots(&snapshot.language_slug, &snapshot.translations)
}

/// Resolve slots for `current_language` from a translations index
///
/// Keeps the index order, drops the current language and every language
/// without a translated post.
pub fn resolve_translation_slots(
    current_language: &str,
    translations: &TranslationsIndex,
) -> Vec<TranslationSlot> {
    translations
        .iter()
        .filter(|(slug, _)| *slug != current_language)
        .filter_map(|(slug, meta)| {
            let post_id = meta.post_id?;
            Some(TranslationSlot {
                language_slug: slug.to_string(),
                language_name: meta
                    .name
                    .clone()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| slug.to_uppercase()),
                post_id,
                post_title: meta.post_title.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Accepts a positive number or numeric string; everything else means "no post"
fn deserialize_post_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(id.filter(|id| *id > 0))
}
