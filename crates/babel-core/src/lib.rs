//! babel-core — addressing, seed derivation, the LCG stream, and word shaping.
//!
//! This crate maps a Library-of-Babel style address onto typing-practice text:
//! - [`address`]: the 5-field `hexagon:wall:shelf:volume:page` codec,
//! - [`seed`]: the rolling string hash that turns an address into a seed,
//! - [`lcg`]: the linear-congruential symbol stream over a 29-symbol charset,
//! - [`shape`]: tokenizing and reshaping the raw stream into practice words,
//! - [`engine`]: the stateless [`TextEngine`] façade tying it together.
//!
//! ```no_run
//! use babel_core::{Address, TextEngine};
//!
//! let engine = TextEngine::default();
//! let addr = Address::parse("1A2B3C4D:1:5:10:100").expect("valid address");
//! let page = engine.page_at(&addr, 200);
//! println!("{}", page.text());
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::unwrap_used)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// `hexagon:wall:shelf:volume:page` parsing, validation and formatting.
pub mod address;
/// Page/search orchestration and the randomness selector.
pub mod engine;
/// Seeded linear-congruential stream and charset mapping.
pub mod lcg;
/// String → 31-bit seed hash.
pub mod seed;
/// Raw stream → bounded, lowercase practice words.
pub mod shape;
/// Value objects returned by the engine.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use address::*;
pub use engine::*;
pub use lcg::{hex_id, raw_text, Lcg, CHARSET};
pub use seed::hash_to_seed;
pub use shape::{shape_words, ShapeParams};
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use babel_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        address::Address,
        engine::{Entropy, PageRequest, TextEngine},
        shape::ShapeParams,
        types::*,
    };
}
