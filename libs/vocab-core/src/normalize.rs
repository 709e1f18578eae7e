//! Text canonicalization used for answer comparison and deduplication.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize `text`: trim, lower-case, strip diacritics and collapse
/// whitespace runs to a single space.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    // Only marks with a non-zero combining class are accents. Vowel signs in
    // Indic and Thai scripts have class zero and stay. Lower-case again after
    // decomposition: compatibility forms such as U+210C decompose to
    // upper-case letters.
    let folded: String = text
        .to_lowercase()
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .flat_map(char::to_lowercase)
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
