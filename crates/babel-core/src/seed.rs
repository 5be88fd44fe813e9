//! Rolling string hash used to turn an address (or search text) into a seed.
//!
//! `hash = (hash << 5) - hash + unit` over UTF-16 code units in wrapping
//! 32-bit signed arithmetic, then `|hash| mod (2^31 - 1)`. Collisions are
//! expected; this is a hash, not an identifier scheme.

/// Upper bound (exclusive) of the seed range: `2^31 - 1`.
pub const SEED_MODULUS: u32 = 2_147_483_647;

/// Derive a seed from `input`. Total and deterministic; `""` maps to `0`.
///
/// Case is significant. Callers that want case-insensitive seeds lowercase
/// before hashing.
#[must_use]
pub fn hash_to_seed(input: &str) -> u32 {
    let hash = input.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });
    // `unsigned_abs` keeps i32::MIN total (2^31 mod (2^31 - 1) = 1).
    hash.unsigned_abs() % SEED_MODULUS
}
