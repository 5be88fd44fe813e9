//! CRUD over the custom list collection.
//!
//! The manager keeps the decoded collection in memory and writes the whole
//! envelope back on every mutation. Mutations build the next collection,
//! persist it, and only then swap it in: a failed write leaves both the
//! store and the in-memory state untouched.

use crate::error::ListError;
use crate::store::KeyValueStore;
use crate::transfer::{words_from_text, words_to_text, ListExport};
use crate::types::{ListDraft, ListStoreFile, WordList};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

/// Store key the collection lives under.
pub const STORE_KEY: &str = "babel.custom_lists";

/// Owner of the list collection and its store.
#[derive(Debug)]
pub struct ListManager<S> {
    store: S,
    lists: Vec<WordList>,
    nonce: u64,
}

impl<S: KeyValueStore> ListManager<S> {
    /// Load the collection from `store`.
    ///
    /// A missing key is an empty collection. Read or decode failures are
    /// logged and also yield an empty collection; the stored value is not
    /// touched until the next successful mutation.
    pub fn load(store: S) -> Self {
        let lists = match store.get(STORE_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match ListStoreFile::decode(&raw) {
                Ok(file) => file.lists,
                Err(e) => {
                    warn!(error = %e, key = STORE_KEY, "discarding undecodable list store");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %format!("{e:#}"), key = STORE_KEY, "list store unreadable");
                Vec::new()
            }
        };
        debug!(count = lists.len(), "loaded custom lists");
        Self { store, lists, nonce: 0 }
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// All lists, in creation order.
    pub fn all(&self) -> &[WordList] {
        &self.lists
    }

    /// List by id.
    pub fn get(&self, id: &str) -> Option<&WordList> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Lists carrying `tag` (case-insensitive).
    pub fn find_by_tag(&self, tag: &str) -> Vec<&WordList> {
        self.lists.iter().filter(|l| l.has_tag(tag)).collect()
    }

    /// Lists whose name or description contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&WordList> {
        self.lists.iter().filter(|l| l.matches(term)).collect()
    }

    /// Validate and add a new list.
    pub fn create(&mut self, draft: ListDraft) -> Result<WordList, ListError> {
        let draft = draft.validate()?;
        let now = unix_now();
        let id = self.fresh_id(&draft.name);
        let list = WordList {
            id,
            name: draft.name,
            description: draft.description,
            words: draft.words,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };

        let mut next = self.lists.clone();
        next.push(list.clone());
        self.commit(next)?;
        info!(id = %list.id, words = list.len(), "created list");
        Ok(list)
    }

    /// Replace the editable fields of `id`; keeps id and `created_at`.
    pub fn update(&mut self, id: &str, draft: ListDraft) -> Result<WordList, ListError> {
        let idx = self.index_of(id)?;
        let draft = draft.validate()?;
        let prev = &self.lists[idx];
        let list = WordList {
            id: prev.id.clone(),
            name: draft.name,
            description: draft.description,
            words: draft.words,
            tags: draft.tags,
            created_at: prev.created_at,
            updated_at: unix_now().max(prev.updated_at),
        };

        let mut next = self.lists.clone();
        next[idx] = list.clone();
        self.commit(next)?;
        info!(id, words = list.len(), "updated list");
        Ok(list)
    }

    /// Remove `id`, returning the removed list.
    pub fn delete(&mut self, id: &str) -> Result<WordList, ListError> {
        let idx = self.index_of(id)?;
        let mut next = self.lists.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        info!(id, "deleted list");
        Ok(removed)
    }

    /// Create a list from raw imported text (whitespace/comma separated).
    pub fn import_text(&mut self, name: &str, text: &str) -> Result<WordList, ListError> {
        self.create(ListDraft {
            name: name.to_owned(),
            words: words_from_text(text),
            ..ListDraft::default()
        })
    }

    /// One word per line.
    pub fn export_text(&self, id: &str) -> Result<String, ListError> {
        let list = self.get(id).ok_or_else(|| ListError::NotFound(id.to_owned()))?;
        Ok(words_to_text(list))
    }

    /// Portable JSON document for `id`.
    pub fn export_json(&self, id: &str) -> Result<String, ListError> {
        let list = self.get(id).ok_or_else(|| ListError::NotFound(id.to_owned()))?;
        ListExport::of(list).to_json()
    }

    /// Create a list from a document produced by [`ListManager::export_json`].
    pub fn import_json(&mut self, doc: &str) -> Result<WordList, ListError> {
        let export = ListExport::from_json(doc)?;
        self.create(export.list)
    }

    fn index_of(&self, id: &str) -> Result<usize, ListError> {
        self.lists
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| ListError::NotFound(id.to_owned()))
    }

    /// Persist `next`, then adopt it.
    fn commit(&mut self, next: Vec<WordList>) -> Result<(), ListError> {
        let file = ListStoreFile::new(next);
        let raw = file.encode()?;
        if let Err(e) = self.store.set(STORE_KEY, &raw) {
            error!(error = %format!("{e:#}"), key = STORE_KEY, "failed to persist lists");
            return Err(ListError::Persistence(e));
        }
        self.lists = file.lists;
        Ok(())
    }

    /// `list-` + first 8 bytes of BLAKE3(name ‖ time ‖ nonce), hex-encoded.
    fn fresh_id(&mut self, name: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        loop {
            self.nonce = self.nonce.wrapping_add(1);
            let mut h = blake3::Hasher::new();
            h.update(b"babel.list-id.v1");
            h.update(name.as_bytes());
            h.update(&nanos.to_le_bytes());
            h.update(&self.nonce.to_le_bytes());
            let digest = h.finalize();
            let id = format!("list-{}", hex::encode(&digest.as_bytes()[..8]));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
