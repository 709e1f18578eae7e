//! Answer matching for typed responses.
//!
//! An expected answer may list several acceptable alternatives separated by
//! commas. A response is correct when it equals one of them after
//! normalization, or is within a small edit distance that grows with the
//! length of the alternative.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// Share of an alternative's length tolerated as typos, in tenths.
const TOLERANCE_TENTHS: usize = 3;

/// Result of comparing a typed answer to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Normalized typed answer (for display).
    pub given_normalized: String,
    /// The closest alternative, normalized. `None` if every alternative was empty.
    pub closest: Option<String>,
    /// Edit distance to `closest`.
    pub distance: Option<usize>,
}

/// Whether `given` is an acceptable answer for `expected`.
pub fn is_correct(given: &str, expected: &str) -> bool {
    match_answer(given, expected).is_correct
}

/// Compare a typed answer against every alternative in `expected`.
pub fn match_answer(given: &str, expected: &str) -> MatchResult {
    let given_normalized = normalize(given);
    let mut best: Option<(String, usize)> = None;

    for alternative in alternatives(expected) {
        if given_normalized.is_empty() {
            // Nothing typed; only report the first alternative for display.
            best.get_or_insert((alternative, usize::MAX));
            continue;
        }

        if given_normalized == alternative {
            return MatchResult {
                is_correct: true,
                given_normalized,
                closest: Some(alternative),
                distance: Some(0),
            };
        }

        let distance = levenshtein_distance(&given_normalized, &alternative);
        let accepted = distance <= tolerance(&alternative);
        let closer = best.as_ref().map_or(true, |(_, d)| distance < *d);

        if accepted {
            return MatchResult {
                is_correct: true,
                given_normalized,
                closest: Some(alternative),
                distance: Some(distance),
            };
        }
        if closer {
            best = Some((alternative, distance));
        }
    }

    let (closest, distance) = match best {
        Some((alt, d)) if d != usize::MAX => (Some(alt), Some(d)),
        Some((alt, _)) => (Some(alt), None),
        None => (None, None),
    };

    MatchResult {
        is_correct: false,
        given_normalized,
        closest,
        distance,
    }
}

/// Split `expected` on commas into normalized, non-empty alternatives.
pub fn alternatives(expected: &str) -> impl Iterator<Item = String> + '_ {
    expected
        .split(',')
        .map(normalize)
        .filter(|alt| !alt.is_empty())
}

/// Maximum edit distance accepted for a normalized alternative.
///
/// `max(1, floor(0.3 * len))`, with `len` counted in characters.
pub fn tolerance(alternative: &str) -> usize {
    let len = alternative.chars().count();
    (len * TOLERANCE_TENTHS / 10).max(1)
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rolling rows over the expected side.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("saturday", "sunday"), 3);
        assert_eq!(levenshtein_distance("recieve", "receive"), 2);
        assert_eq!(levenshtein_distance("été", "ete"), 2);
    }

    #[test]
    fn test_tolerance() {
        assert_eq!(tolerance("a"), 1);
        assert_eq!(tolerance("chat"), 1);
        assert_eq!(tolerance("receive"), 2);
        assert_eq!(tolerance("pomme de terre"), 4);
    }

    #[test]
    fn identical_answers_match() {
        for word in ["chien", "a", "pomme de terre", "l'eau"] {
            assert!(is_correct(word, word), "{word}");
        }
    }

    #[test]
    fn comma_alternatives() {
        assert!(is_correct("chien", "chien, chein"));
        assert!(is_correct("chein", "chien, chein"));
        assert!(is_correct("toutou", "chien,toutou"));
        assert!(!is_correct("chat", "chien, toutou"));
    }

    #[test]
    fn tolerates_small_typos() {
        assert!(is_correct("recieve", "receive"));
        assert!(!is_correct("xyz", "receive"));
        assert!(is_correct("b", "a"));
        assert!(!is_correct("bc", "a,"));
    }

    #[test]
    fn ignores_case_and_accents() {
        assert!(is_correct("ELEVE", "élève"));
        assert!(is_correct("  cafe ", "Café"));
    }

    #[test]
    fn empty_answers_never_match() {
        assert!(!is_correct("", "a"));
        assert!(!is_correct("   ", "chien, chat"));
        assert!(!is_correct("chien", " , "));
    }

    #[test]
    fn match_result_reports_closest() {
        let result = match_answer("chat", "chien, cheval");
        assert!(!result.is_correct);
        assert_eq!(result.closest.as_deref(), Some("chien"));
        assert_eq!(result.distance, Some(3));

        let result = match_answer("Chevale", "chien, cheval");
        assert!(result.is_correct);
        assert_eq!(result.given_normalized, "chevale");
        assert_eq!(result.closest.as_deref(), Some("cheval"));
        assert_eq!(result.distance, Some(1));
    }
}
