//! CLI configuration: optional TOML file plus environment overrides.
//!
//! Resolution order for the list store directory:
//! `--store-dir` flag > `BABEL_STORE_DIR` > `[lists] store_dir` > `.babel`.

use anyhow::{Context, Result};
use babel_core::ShapeParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "babel.toml";
/// Environment override for the list store directory.
pub const STORE_DIR_ENV: &str = "BABEL_STORE_DIR";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Word-shaping tunables.
    pub shape: ShapeParams,
    /// Custom list storage.
    pub lists: ListsConfig,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ListsConfig {
    pub store_dir: PathBuf,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self { store_dir: PathBuf::from(".babel") }
    }
}

impl Config {
    /// Parse TOML source.
    pub fn from_toml(src: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(src).context("parse config toml")?;
        cfg.shape.validate().context("invalid [shape] section")?;
        Ok(cfg)
    }

    /// Load `path` if given (must exist), else `babel.toml` if present, else
    /// defaults; then apply the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::read(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::read(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(STORE_DIR_ENV) {
            cfg.lists.store_dir = PathBuf::from(dir);
        }
        Ok(cfg)
    }

    fn read(path: &Path) -> Result<Self> {
        let src =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&src).with_context(|| format!("load config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            [shape]
            min_words = 40

            [lists]
            store_dir = "/tmp/babel-lists"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.shape.min_words, 40);
        assert_eq!(cfg.shape.max_word_len, 15);
        assert_eq!(cfg.lists.store_dir, PathBuf::from("/tmp/babel-lists"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_params() {
        assert!(Config::from_toml("[shape]\nmystery = 1\n").is_err());
        assert!(Config::from_toml("[shape]\nmin_word_len = 0\n").is_err());
        assert!(Config::from_toml("[shape]\nmin_words = 0\n").is_err());
    }
}
