//! Address codec for `hexagon:wall:shelf:volume:page`.
//!
//! Validation never panics or raises: malformed input is a normal `None`
//! (or `false` from [`Address::is_valid`]). The `FromStr` impl wraps the same
//! check in an `anyhow` error for callers that want `?`.

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of walls per hexagon (`wall ∈ [0, 3]`).
pub const WALLS: u8 = 4;
/// Number of shelves per wall (`shelf ∈ [0, 31]`).
pub const SHELVES: u8 = 32;
/// Number of volumes per shelf (`volume ∈ [0, 31]`).
pub const VOLUMES: u8 = 32;
/// Number of pages per volume (`page ∈ [0, 409]`).
pub const PAGES: u16 = 410;
/// Digits in generated hexagon ids (random or seed-derived).
pub const HEXAGON_LEN: usize = 8;

/// Field separator in the canonical textual form.
const SEP: char = ':';

/// A validated page coordinate.
///
/// Fields are private so every value in circulation has passed the range
/// checks; use [`Address::new`] or [`Address::parse`] to build one.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    hexagon: String,
    wall: u8,
    shelf: u8,
    volume: u8,
    page: u16,
}

impl Address {
    /// Validating constructor. Returns `None` if any field is out of range or
    /// the hexagon is not a non-empty run of hex digits.
    #[must_use]
    pub fn new(hexagon: impl Into<String>, wall: u8, shelf: u8, volume: u8, page: u16) -> Option<Self> {
        let hexagon = hexagon.into();
        if !is_hex(&hexagon) || wall >= WALLS || shelf >= SHELVES || volume >= VOLUMES || page >= PAGES
        {
            return None;
        }
        Some(Self { hexagon, wall, shelf, volume, page })
    }

    /// Parse the canonical form. Exactly five `:`-separated fields.
    #[must_use]
    pub fn parse(address: &str) -> Option<Self> {
        let mut fields = address.split(SEP);
        let hexagon = fields.next()?;
        let wall = parse_field(fields.next()?)?;
        let shelf = parse_field(fields.next()?)?;
        let volume = parse_field(fields.next()?)?;
        let page = parse_field(fields.next()?)?;
        if fields.next().is_some() {
            return None;
        }
        Self::new(
            hexagon,
            u8::try_from(wall).ok()?,
            u8::try_from(shelf).ok()?,
            u8::try_from(volume).ok()?,
            page,
        )
    }

    /// Pseudo-coordinate for a seed: `wall = seed % 4`, `shelf = (seed >> 2) % 32`,
    /// `volume = (seed >> 7) % 32`, `page = (seed >> 12) % 410`, and an
    /// 8-digit hexagon from [`crate::lcg::hex_id`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn locate(seed: u32) -> Self {
        Self {
            hexagon: crate::lcg::hex_id(seed, HEXAGON_LEN),
            wall: (seed % u32::from(WALLS)) as u8,
            shelf: ((seed >> 2) % u32::from(SHELVES)) as u8,
            volume: ((seed >> 7) % u32::from(VOLUMES)) as u8,
            page: ((seed >> 12) % u32::from(PAGES)) as u16,
        }
    }

    /// Same validation as [`Address::parse`], boolean result.
    #[inline]
    #[must_use]
    pub fn is_valid(address: &str) -> bool {
        Self::parse(address).is_some()
    }

    /// Canonical `hexagon:wall:shelf:volume:page` string.
    #[inline]
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Hexagon id as given (case preserved).
    #[inline]
    #[must_use]
    pub fn hexagon(&self) -> &str {
        &self.hexagon
    }

    /// Wall index in `[0, 3]`.
    #[inline]
    #[must_use]
    pub const fn wall(&self) -> u8 {
        self.wall
    }

    /// Shelf index in `[0, 31]`.
    #[inline]
    #[must_use]
    pub const fn shelf(&self) -> u8 {
        self.shelf
    }

    /// Volume index in `[0, 31]`.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    /// Page index in `[0, 409]`.
    #[inline]
    #[must_use]
    pub const fn page(&self) -> u16 {
        self.page
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEP}{}{SEP}{}{SEP}{}{SEP}{}",
            self.hexagon, self.wall, self.shelf, self.volume, self.page
        )
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            anyhow!("invalid address {s:?} (expected hex:wall(0-3):shelf(0-31):volume(0-31):page(0-409))")
        })
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.to_string()
    }
}

/// Non-empty run of ASCII hex digits.
#[inline]
fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decimal digits only: rejects signs, whitespace and empty fields that
/// `str::parse` would otherwise accept or misreport.
#[inline]
fn parse_field(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
