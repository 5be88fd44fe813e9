//! Serializable records for custom word lists and their validation.
//!
//! `ListDraft` is what a user submits; `WordList` is what gets stored.
//! `ListStoreFile` is the versioned envelope written under one store key.
//! Decoding a stored envelope re-runs the same validation a draft goes
//! through, so a hand-edited or truncated store never yields a half-valid
//! collection.

use crate::error::ListError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Envelope version written by this crate.
pub const STORE_VERSION: u16 = 1;

/// Longest list name, in characters.
pub const MAX_NAME_LEN: usize = 64;
/// Longest description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 256;
/// Most words a list may hold.
pub const MAX_WORDS: usize = 5_000;
/// Longest single word, in characters.
pub const MAX_WORD_LEN: usize = 32;
/// Most tags a list may carry.
pub const MAX_TAGS: usize = 10;
/// Longest tag, in characters.
pub const MAX_TAG_LEN: usize = 24;

/// User-editable fields of a list.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListDraft {
    /// Display name (required).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Practice words, in order.
    pub words: Vec<String>,
    /// Tags for filtering; stored lowercase.
    pub tags: Vec<String>,
}

impl ListDraft {
    /// Normalize and validate.
    ///
    /// Trims every field, drops empty words and tags, removes duplicate words
    /// (first occurrence wins) and lowercases and dedups tags, then checks
    /// the size limits.
    pub fn validate(self) -> Result<Self, ListError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ListError::EmptyName);
        }
        check_len(&name, MAX_NAME_LEN, |len, max| ListError::NameTooLong { len, max })?;

        let description = self.description.trim().to_owned();
        check_len(&description, MAX_DESCRIPTION_LEN, |len, max| {
            ListError::DescriptionTooLong { len, max }
        })?;

        let words = dedup_trimmed(self.words, false);
        if words.is_empty() {
            return Err(ListError::NoWords);
        }
        if words.len() > MAX_WORDS {
            return Err(ListError::TooManyWords { count: words.len(), max: MAX_WORDS });
        }
        for w in &words {
            check_len(w, MAX_WORD_LEN, |len, max| ListError::WordTooLong {
                word: w.clone(),
                len,
                max,
            })?;
        }

        let tags = dedup_trimmed(self.tags, true);
        if tags.len() > MAX_TAGS {
            return Err(ListError::TooManyTags { count: tags.len(), max: MAX_TAGS });
        }
        for t in &tags {
            check_len(t, MAX_TAG_LEN, |len, max| ListError::TagTooLong {
                tag: t.clone(),
                len,
                max,
            })?;
        }

        Ok(Self { name, description, words, tags })
    }
}

fn check_len(
    s: &str,
    max: usize,
    err: impl FnOnce(usize, usize) -> ListError,
) -> Result<(), ListError> {
    let len = s.chars().count();
    if len > max {
        return Err(err(len, max));
    }
    Ok(())
}

fn dedup_trimmed(items: Vec<String>, lowercase: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| {
            let s = s.trim();
            if lowercase {
                s.to_lowercase()
            } else {
                s.to_owned()
            }
        })
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// A stored custom word list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordList {
    /// Stable identifier (`list-` + 16 hex chars).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Practice words.
    pub words: Vec<String>,
    /// Lowercase tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time, Unix seconds.
    pub created_at: u64,
    /// Last update time, Unix seconds.
    pub updated_at: u64,
}

impl WordList {
    /// Editable fields as a draft (for update-in-place flows).
    #[must_use]
    pub fn draft(&self) -> ListDraft {
        ListDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            words: self.words.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Number of words.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Stored lists always hold at least one word; kept for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether the list carries `tag` (case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.tags.iter().any(|t| *t == tag)
    }

    /// Case-insensitive substring match over name and description.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }

    /// Re-validate a record read from storage. The record must already be in
    /// normalized form; normalization changing it counts as invalid.
    pub fn check(&self) -> Result<(), ListError> {
        let wrap = |source: ListError| ListError::InvalidRecord {
            id: self.id.clone(),
            source: Box::new(source),
        };
        if self.id.trim().is_empty() {
            return Err(ListError::MissingId);
        }
        let normalized = self.draft().validate().map_err(wrap)?;
        if normalized != self.draft() {
            return Err(wrap(ListError::NotNormalized));
        }
        Ok(())
    }
}

/// Versioned envelope persisted under one store key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListStoreFile {
    /// Envelope version.
    pub version: u16,
    /// All lists, in creation order.
    pub lists: Vec<WordList>,
}

impl ListStoreFile {
    /// Wrap lists in the current envelope version.
    #[must_use]
    pub const fn new(lists: Vec<WordList>) -> Self {
        Self { version: STORE_VERSION, lists }
    }

    /// Validating decode: JSON shape, version, per-record checks, unique ids.
    pub fn decode(raw: &str) -> Result<Self, ListError> {
        let file: Self = serde_json::from_str(raw)?;
        if file.version != STORE_VERSION {
            return Err(ListError::UnsupportedVersion {
                found: file.version,
                expected: STORE_VERSION,
            });
        }
        {
            let mut ids = HashSet::new();
            for list in &file.lists {
                list.check()?;
                if !ids.insert(list.id.as_str()) {
                    return Err(ListError::DuplicateId(list.id.clone()));
                }
            }
        }
        Ok(file)
    }

    /// Pretty JSON.
    pub fn encode(&self) -> Result<String, ListError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
