//! Reshape a raw LCG stream into typing-practice words.
//!
//! Pipeline:
//! 1. split on spaces, drop empty tokens;
//! 2. strip edge `.`/`,` runs and drop interior punctuation;
//! 3. clamp length to `[min_word_len, max_word_len]` (pad 1-letter tokens);
//! 4. lowercase;
//! 5. top up with filler words until `min_words`;
//! 6. truncate to `max(min_target_words, floor(target_chars / avg_word_len))`.
//!
//! Steps 3 and 5 consume randomness. The source is always the caller's `rng`,
//! so a seeded generator makes the whole pipeline reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunables for [`shape_words`]. Defaults match the reference behaviour.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeParams {
    /// Shortest token kept as-is; shorter tokens are padded.
    pub min_word_len: usize,
    /// Longest token; longer tokens are truncated.
    pub max_word_len: usize,
    /// Floor on the token count before truncation (filler fills the gap).
    pub min_words: usize,
    /// Shortest filler word.
    pub filler_min_len: usize,
    /// Longest filler word.
    pub filler_max_len: usize,
    /// Average characters per word, separator included.
    pub avg_word_len: f64,
    /// Floor on the final word count.
    pub min_target_words: usize,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            min_word_len: 2,
            max_word_len: 15,
            min_words: 30,
            filler_min_len: 3,
            filler_max_len: 8,
            avg_word_len: 5.5,
            min_target_words: 20,
        }
    }
}

impl ShapeParams {
    /// Word count aimed at for a requested output length in characters.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn target_words(&self, target_chars: usize) -> usize {
        let est = if self.avg_word_len > 0.0 {
            (target_chars as f64 / self.avg_word_len).floor() as usize
        } else {
            0
        };
        est.max(self.min_target_words)
    }

    /// Reject parameter sets that would break the output contract.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.min_word_len >= 1 && self.min_word_len <= self.max_word_len,
            "word length bounds must satisfy 1 <= min ({}) <= max ({})",
            self.min_word_len,
            self.max_word_len
        );
        anyhow::ensure!(
            self.filler_min_len >= self.min_word_len
                && self.filler_min_len <= self.filler_max_len
                && self.filler_max_len <= self.max_word_len,
            "filler lengths [{}, {}] must sit inside word bounds [{}, {}]",
            self.filler_min_len,
            self.filler_max_len,
            self.min_word_len,
            self.max_word_len
        );
        anyhow::ensure!(
            self.avg_word_len.is_finite() && self.avg_word_len > 0.0,
            "avg_word_len must be positive, got {}",
            self.avg_word_len
        );
        anyhow::ensure!(self.min_target_words >= 1, "min_target_words must be >= 1");
        anyhow::ensure!(self.min_words >= 1, "min_words must be >= 1");
        Ok(())
    }
}

#[inline]
const fn is_punct(c: char) -> bool {
    matches!(c, '.' | ',')
}

/// Step 2: strip edge punctuation and drop what remains inside the token.
fn clean_token(token: &str) -> String {
    token
        .trim_matches(is_punct)
        .chars()
        .filter(|c| !is_punct(*c))
        .collect()
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(rng.random_range(b'a'..=b'z'))
}

/// Steps 3 and 4 for one cleaned, non-empty token.
fn normalize_len<R: Rng + ?Sized>(mut word: String, p: &ShapeParams, rng: &mut R) -> String {
    while word.chars().count() < p.min_word_len {
        word.push(random_letter(rng));
    }
    if let Some((cut, _)) = word.char_indices().nth(p.max_word_len) {
        word.truncate(cut);
    }
    word.make_ascii_lowercase();
    word
}

/// A filler word of `filler_min_len..=filler_max_len` random letters.
pub fn filler_word<R: Rng + ?Sized>(p: &ShapeParams, rng: &mut R) -> String {
    let len = rng.random_range(p.filler_min_len..=p.filler_max_len);
    (0..len).map(|_| random_letter(rng)).collect()
}

/// Tokenize and reshape `raw` into at most `target_words(target_chars)` words.
///
/// Every returned word has length in `[min_word_len, max_word_len]` and holds
/// only lowercase ASCII letters. The result is never empty.
#[must_use]
pub fn shape_words<R: Rng + ?Sized>(
    raw: &str,
    target_chars: usize,
    p: &ShapeParams,
    rng: &mut R,
) -> Vec<String> {
    let mut words: Vec<String> = raw
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(clean_token)
        .filter(|t| !t.is_empty())
        .map(|t| normalize_len(t, p, rng))
        .collect();

    let from_stream = words.len();
    while words.len() < p.min_words {
        words.push(filler_word(p, rng));
    }
    if words.len() > from_stream {
        tracing::trace!(from_stream, filled = words.len() - from_stream, "topped up with filler words");
    }

    words.truncate(p.target_words(target_chars));
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn cleans_edges_and_interior_punctuation() {
        assert_eq!(clean_token("..,abc,."), "abc");
        assert_eq!(clean_token("ab..,cd"), "abcd");
        assert_eq!(clean_token(".,."), "");
    }

    #[test]
    fn pads_and_truncates() {
        let p = ShapeParams::default();
        let mut r = rng();
        let padded = normalize_len("q".to_string(), &p, &mut r);
        assert_eq!(padded.len(), 2);
        assert!(padded.starts_with('q'));
        let cut = normalize_len("abcdefghijklmnopqrstuvwxyz".to_string(), &p, &mut r);
        assert_eq!(cut, "abcdefghijklmno");
    }

    #[test]
    fn tops_up_and_truncates_to_target() {
        let p = ShapeParams::default();
        let words = shape_words("hello world", 50, &p, &mut rng());
        // target = max(20, floor(50 / 5.5)) = 20
        assert_eq!(words.len(), 20);
        assert_eq!(&words[..2], &["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn long_targets_keep_the_floor_of_thirty() {
        let p = ShapeParams::default();
        let words = shape_words("", 10_000, &p, &mut rng());
        assert_eq!(words.len(), 30);
        for w in &words {
            assert!((3..=8).contains(&w.len()));
        }
    }

    #[test]
    fn target_words_rounding() {
        let p = ShapeParams::default();
        assert_eq!(p.target_words(0), 20);
        assert_eq!(p.target_words(110), 20);
        assert_eq!(p.target_words(116), 21);
        assert_eq!(p.target_words(550), 100);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let p = ShapeParams::default();
        let a = shape_words("x y, z.", 80, &p, &mut rng());
        let b = shape_words("x y, z.", 80, &p, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn params_validation() {
        assert!(ShapeParams::default().validate().is_ok());
        let bad = ShapeParams { filler_max_len: 40, ..ShapeParams::default() };
        assert!(bad.validate().is_err());
        let bad = ShapeParams { avg_word_len: 0.0, ..ShapeParams::default() };
        assert!(bad.validate().is_err());
        let bad = ShapeParams { min_words: 0, ..ShapeParams::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn smallest_valid_params_never_yield_an_empty_page() {
        let p = ShapeParams { min_words: 1, min_target_words: 1, ..ShapeParams::default() };
        assert!(p.validate().is_ok());
        let words = shape_words("", 0, &p, &mut rng());
        assert_eq!(words.len(), 1);
    }
}
