//! Value objects produced by the engine.
//!
//! Both types are constructed fresh per request and never mutated afterwards;
//! they serialize with serde so the CLI can emit them as JSON.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Seed derived from an address or search string (`< 2^31 - 1`).
pub type Seed = u32;

/// A generated page of practice words.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Words in order. Each is lowercase, 2–15 letters, except a spliced
    /// search query (see [`SearchResult`]).
    pub words: Vec<String>,
    /// Coordinate this page was generated from.
    pub address: Address,
    /// Seed derived from `address`.
    pub seed: Seed,
    /// `words.len()`.
    pub word_count: usize,
}

impl GeneratedPage {
    /// Build a page, deriving `word_count` from `words`.
    #[must_use]
    pub fn new(words: Vec<String>, address: Address, seed: Seed) -> Self {
        let word_count = words.len();
        Self { words, address, seed, word_count }
    }

    /// Words joined with a single space.
    #[must_use]
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// Output of the cosmetic "search": a page at coordinates derived from the
/// query, with the query spliced in when it has a plausible length.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// The generated page (with the query already spliced in, if any).
    pub page: GeneratedPage,
    /// Normalized (trimmed, lowercased) query.
    pub query: String,
    /// Word index the query was inserted at, if it was.
    pub spliced_at: Option<usize>,
}
