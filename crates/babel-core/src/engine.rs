//! Address → page orchestration.
//!
//! [`TextEngine`] is a stateless service object: construct it once at the
//! composition root and pass it by reference. It owns only its
//! [`ShapeParams`]; every call is a pure function of its arguments plus the
//! randomness source the caller hands in.
//!
//! Two modes:
//! - [`TextEngine::page_at`] / [`TextEngine::search_for_text`] are fully
//!   deterministic. Shaping randomness comes from a `ChaCha8Rng` seeded with
//!   the page seed; its output stream is fixed by the algorithm, so pages do
//!   not shift when `rand` is upgraded.
//! - [`TextEngine::generate_page`] takes any `Rng`; omitted coordinates and
//!   shaping randomness are drawn from it. Pass [`Entropy::Fixed`] for
//!   reproducible runs or [`Entropy::Thread`] for ambient behaviour.

use crate::address::{Address, HEXAGON_LEN, PAGES, SHELVES, VOLUMES, WALLS};
use crate::lcg::raw_text;
use crate::seed::hash_to_seed;
use crate::shape::{shape_words, ShapeParams};
use crate::types::{GeneratedPage, SearchResult};
use anyhow::{anyhow, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

/// Default requested output length in characters.
pub const DEFAULT_LENGTH: usize = 500;

/// Query lengths (in chars) that get spliced into search results.
pub const SPLICE_QUERY_LEN: RangeInclusive<usize> = 3..=19;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Coordinates for [`TextEngine::generate_page`]; `None` means "pick one".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageRequest {
    /// Hexagon id (hex digits).
    pub hexagon: Option<String>,
    /// Wall in `[0, 3]`.
    pub wall: Option<u8>,
    /// Shelf in `[0, 31]`.
    pub shelf: Option<u8>,
    /// Volume in `[0, 31]`.
    pub volume: Option<u8>,
    /// Page in `[0, 409]`.
    pub page: Option<u16>,
    /// Requested output length in characters (approximate).
    pub length: usize,
}

impl PageRequest {
    /// A request with every coordinate pinned to `addr`.
    #[must_use]
    pub fn at(addr: &Address, length: usize) -> Self {
        Self {
            hexagon: Some(addr.hexagon().to_owned()),
            wall: Some(addr.wall()),
            shelf: Some(addr.shelf()),
            volume: Some(addr.volume()),
            page: Some(addr.page()),
            length,
        }
    }

    /// A request with every coordinate left open.
    #[must_use]
    pub fn random(length: usize) -> Self {
        Self { length, ..Self::default() }
    }

    /// `true` if every coordinate is supplied, i.e. the address is fixed.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.hexagon.is_some()
            && self.wall.is_some()
            && self.shelf.is_some()
            && self.volume.is_some()
            && self.page.is_some()
    }

    /// Fill open coordinates from `rng` and validate the result.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Address> {
        let hexagon = self.hexagon.clone().unwrap_or_else(|| random_hexagon(rng));
        let wall = self.wall.unwrap_or_else(|| rng.random_range(0..WALLS));
        let shelf = self.shelf.unwrap_or_else(|| rng.random_range(0..SHELVES));
        let volume = self.volume.unwrap_or_else(|| rng.random_range(0..VOLUMES));
        let page = self.page.unwrap_or_else(|| rng.random_range(0..PAGES));
        Address::new(hexagon.clone(), wall, shelf, volume, page).ok_or_else(|| {
            anyhow!("coordinates out of range: {hexagon}:{wall}:{shelf}:{volume}:{page}")
        })
    }
}

fn random_hexagon<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..HEXAGON_LEN)
        .map(|_| char::from(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())]))
        .collect()
}

/// Where [`TextEngine::generate_page`] draws its randomness from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entropy {
    /// OS-seeded; different on every run.
    Thread,
    /// Seeded; identical output for identical requests.
    Fixed(u64),
}

impl Entropy {
    /// Build the generator.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        match self {
            Self::Thread => ChaCha8Rng::from_os_rng(),
            Self::Fixed(seed) => ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

/// Stateless page generator.
#[derive(Clone, Debug, Default)]
pub struct TextEngine {
    params: ShapeParams,
}

impl TextEngine {
    /// Engine with custom shaping parameters (validated).
    pub fn new(params: ShapeParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Shaping parameters in use.
    #[must_use]
    pub const fn params(&self) -> &ShapeParams {
        &self.params
    }

    /// Generate a page; open coordinates and shaping randomness come from `rng`.
    ///
    /// Fails only when an explicitly supplied coordinate is out of range.
    pub fn generate_page<R: Rng + ?Sized>(
        &self,
        req: &PageRequest,
        rng: &mut R,
    ) -> Result<GeneratedPage> {
        let address = req.resolve(rng)?;
        Ok(self.render(address, req.length, rng))
    }

    /// Fully deterministic page for `addr`.
    #[must_use]
    pub fn page_at(&self, addr: &Address, length: usize) -> GeneratedPage {
        let seed = hash_to_seed(&addr.format());
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        self.render(addr.clone(), length, &mut rng)
    }

    /// Simulated search: a page at coordinates derived from the lowercased
    /// query, with the query spliced in at the one-third mark when it is
    /// 3–19 characters long. Never inspects generated content.
    ///
    /// The query is hashed as given apart from lowercasing; surrounding
    /// whitespace is part of it.
    #[must_use]
    pub fn search_for_text(&self, text: &str, length: usize) -> SearchResult {
        let query = text.to_lowercase();
        let seed = hash_to_seed(&query);
        let address = Address::locate(seed);
        let GeneratedPage { mut words, address, seed: page_seed, .. } =
            self.page_at(&address, length);

        let spliced_at = SPLICE_QUERY_LEN.contains(&query.chars().count()).then(|| {
            let at = words.len() / 3;
            words.insert(at, query.clone());
            at
        });
        debug!(%address, query_seed = seed, ?spliced_at, "simulated search");

        SearchResult {
            page: GeneratedPage::new(words, address, page_seed),
            query,
            spliced_at,
        }
    }

    fn render<R: Rng + ?Sized>(&self, address: Address, length: usize, rng: &mut R) -> GeneratedPage {
        let canonical = address.format();
        let seed = hash_to_seed(&canonical);
        // 2x raw symbols leaves slack for filtering and truncation.
        let raw = raw_text(seed, length.saturating_mul(2));
        let words = shape_words(&raw, length, &self.params, rng);
        debug!(address = %canonical, seed, length, words = words.len(), "generated page");
        GeneratedPage::new(words, address, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    #[test]
    fn page_at_is_deterministic() {
        let e = TextEngine::default();
        let a = e.page_at(&addr("00000000:0:0:0:0"), 50);
        let b = e.page_at(&addr("00000000:0:0:0:0"), 50);
        assert_eq!(a, b);
        assert_eq!(a.seed, hash_to_seed("00000000:0:0:0:0"));
        assert_eq!(a.word_count, 20);
    }

    #[test]
    fn different_addresses_differ() {
        let e = TextEngine::default();
        let a = e.page_at(&addr("00000000:0:0:0:0"), 400);
        let b = e.page_at(&addr("00000000:0:0:0:1"), 400);
        assert_ne!(a.text(), b.text());
    }

    #[test]
    fn pinned_request_with_fixed_entropy_matches_itself() {
        let e = TextEngine::default();
        let req = PageRequest::at(&addr("1A2B3C4D:1:5:10:100"), 300);
        assert!(req.is_pinned());
        let a = e.generate_page(&req, &mut Entropy::Fixed(1).rng()).unwrap();
        let b = e.generate_page(&req, &mut Entropy::Fixed(1).rng()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.address.format(), "1A2B3C4D:1:5:10:100");
    }

    #[test]
    fn open_coordinates_are_filled_in_range() {
        let e = TextEngine::default();
        let mut rng = Entropy::Fixed(9).rng();
        for _ in 0..50 {
            let p = e.generate_page(&PageRequest::random(120), &mut rng).unwrap();
            assert!(Address::is_valid(&p.address.format()));
            assert_eq!(p.address.hexagon().len(), HEXAGON_LEN);
        }
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let e = TextEngine::default();
        let req = PageRequest { wall: Some(4), ..PageRequest::random(100) };
        assert!(e.generate_page(&req, &mut Entropy::Fixed(0).rng()).is_err());
        let req = PageRequest { hexagon: Some("zz".into()), ..PageRequest::random(100) };
        assert!(e.generate_page(&req, &mut Entropy::Fixed(0).rng()).is_err());
    }

    #[test]
    fn search_splices_short_queries() {
        let e = TextEngine::default();
        let r = e.search_for_text("Hello", 300);
        assert_eq!(r.query, "hello");
        let at = r.spliced_at.unwrap();
        assert_eq!(r.page.words[at], "hello");
        assert_eq!(at, (r.page.word_count - 1) / 3);
        assert_eq!(r.page.address, Address::locate(hash_to_seed("hello")));
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let e = TextEngine::default();
        let r = e.search_for_text(" Hello", 300);
        assert_eq!(r.query, " hello");
        assert_eq!(r.page.address, Address::locate(hash_to_seed(" hello")));
        assert_ne!(r.page.address, e.search_for_text("hello", 300).page.address);
        let at = r.spliced_at.unwrap();
        assert_eq!(r.page.words[at], " hello");
    }

    #[test]
    fn page_at_shapes_with_chacha_seeded_from_page_seed() {
        let e = TextEngine::default();
        let a = addr("1A2B3C4D:1:5:10:100");
        let seed = hash_to_seed(&a.format());
        let expected = crate::shape::shape_words(
            &raw_text(seed, 600),
            300,
            e.params(),
            &mut ChaCha8Rng::seed_from_u64(u64::from(seed)),
        );
        assert_eq!(e.page_at(&a, 300).words, expected);
    }

    #[test]
    fn zero_min_words_is_rejected_at_construction() {
        let params = ShapeParams { min_words: 0, ..ShapeParams::default() };
        assert!(TextEngine::new(params).is_err());
    }

    #[test]
    fn search_skips_out_of_band_queries() {
        let e = TextEngine::default();
        assert_eq!(e.search_for_text("ab", 300).spliced_at, None);
        let long = "a".repeat(20);
        assert_eq!(e.search_for_text(&long, 300).spliced_at, None);
        assert!(e.search_for_text(&"a".repeat(19), 300).spliced_at.is_some());
    }

    #[test]
    fn search_is_case_insensitive_and_repeatable() {
        let e = TextEngine::default();
        assert_eq!(e.search_for_text("Babel", 200), e.search_for_text("babel", 200));
    }
}
