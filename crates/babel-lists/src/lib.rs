//! Custom word lists for typing practice.
//!
//! - `types`: `ListDraft` / `WordList` records and the versioned store envelope,
//! - `store`: the `KeyValueStore` boundary with memory and file backends,
//! - `manager`: `ListManager`, CRUD with persist-then-swap semantics,
//! - `transfer`: plain-text and JSON import/export,
//! - `markup`: escaped-by-construction HTML for the list dialog.
//!
//! Validation failures are ordinary `ListError` values. Persistence failures
//! are logged at the store boundary and reported the same way; nothing here
//! panics on bad input or a bad store.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod error;
pub mod manager;
pub mod markup;
pub mod store;
pub mod transfer;
pub mod types;

pub use error::ListError;
pub use manager::{ListManager, STORE_KEY};
pub use markup::{render_list_card, render_list_overview, Html};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transfer::{words_from_text, ListExport};
pub use types::{ListDraft, ListStoreFile, WordList};
