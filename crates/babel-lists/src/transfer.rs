//! Import/export formats for single lists.
//!
//! Plain text: words separated by whitespace or commas on the way in, one
//! word per line on the way out. JSON: a small versioned document carrying
//! the editable fields only; ids and timestamps are assigned on import.

use crate::error::ListError;
use crate::types::{ListDraft, WordList};
use serde::{Deserialize, Serialize};

/// Version tag for [`ListExport`].
pub const EXPORT_VERSION: u16 = 1;

/// Split raw file content into candidate words.
///
/// Whitespace and commas separate words; empty pieces are dropped. Further
/// normalization (dedup, limits) happens in [`ListDraft::validate`].
#[must_use]
pub fn words_from_text(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// One word per line, trailing newline included.
#[must_use]
pub fn words_to_text(list: &WordList) -> String {
    let mut out = String::with_capacity(list.words.iter().map(|w| w.len() + 1).sum());
    for w in &list.words {
        out.push_str(w);
        out.push('\n');
    }
    out
}

/// Portable single-list document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListExport {
    /// Document version.
    pub version: u16,
    /// Editable fields.
    #[serde(flatten)]
    pub list: ListDraft,
}

impl ListExport {
    /// Document for `list`.
    #[must_use]
    pub fn of(list: &WordList) -> Self {
        Self { version: EXPORT_VERSION, list: list.draft() }
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> Result<String, ListError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and version-check; the draft is validated by the caller.
    pub fn from_json(doc: &str) -> Result<Self, ListError> {
        let v: Self = serde_json::from_str(doc)?;
        if v.version != EXPORT_VERSION {
            return Err(ListError::UnsupportedVersion {
                found: v.version,
                expected: EXPORT_VERSION,
            });
        }
        Ok(v)
    }
}
