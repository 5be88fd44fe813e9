//! Key-value persistence boundary.
//!
//! The list manager only needs `get`/`set` of string values under string
//! keys. `MemoryStore` backs tests; `FileStore` keeps one JSON file per key
//! under a root directory.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// String-keyed value store.
pub trait KeyValueStore {
    /// Value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key under `root`.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root` (created lazily on first write).
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Keys are restricted to `[A-Za-z0-9._-]` and may
    /// not start with a dot, so they cannot escape the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let ok = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
        if !ok {
            bail!("invalid store key {key:?}");
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating store directory {}", self.root.display()))?;
        // Write-then-rename so a crash never leaves a truncated value behind.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        Ok(())
    }
}
