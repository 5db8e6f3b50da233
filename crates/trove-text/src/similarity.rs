//! Edit-distance and matching-window similarity metrics.
//!
//! Every metric first strips the common head and tail of its inputs (see
//! [`common_affixes`]) and runs its quadratic core on what remains. Scores
//! lie in `0.0..=1.0` where `1.0` means equal, and all metrics are symmetric.
//!
//! The generic functions work on any `PartialEq` slice. The `&str` helpers
//! compare Unicode scalar values.

use trove_core::config::{DEFAULT_MAX_PREFIX_LENGTH, DEFAULT_PREFIX_SCALE, MAX_PREFIX_SCALE};
use trove_core::error::CoreError;

use crate::error::TextResult;

/// ## Summary
/// Counts the elements `a` and `b` share at the start, then at the end of
/// what is left after the shared start.
///
/// The two counts never overlap: `head + tail <= min(a.len(), b.len())`.
#[must_use]
pub fn common_affixes<T: PartialEq>(a: &[T], b: &[T]) -> (usize, usize) {
    let head = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let remaining = a.len().min(b.len()) - head;
    if remaining == 0 {
        return (head, 0);
    }
    let tail = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take(remaining)
        .take_while(|(x, y)| x == y)
        .count();
    (head, tail)
}

/// [`common_affixes`] over the characters of two strings.
#[must_use]
pub fn matching_chars_with(a: &str, b: &str) -> (usize, usize) {
    common_affixes(&chars(a), &chars(b))
}

/// ## Summary
/// Restricted Damerau-Levenshtein (optimal string alignment) distance: the
/// fewest insertions, deletions, substitutions and swaps of adjacent
/// elements that turn one sequence into the other.
///
/// Keeps three rolling rows sized to the shorter input: a swap reaches back
/// two rows.
#[must_use]
pub fn damerau_levenshtein_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (head, tail) = common_affixes(a, b);
    let (shorter, longer) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let shorter = &shorter[head..shorter.len() - tail];
    let longer = &longer[head..longer.len() - tail];

    if shorter.is_empty() {
        return longer.len();
    }

    let width = shorter.len() + 1;
    let mut two_back = vec![0; width];
    let mut previous: Vec<usize> = (0..width).collect();
    let mut current = vec![0; width];
    for (i, longer_item) in longer.iter().enumerate() {
        current[0] = i + 1;
        for (k, shorter_item) in shorter.iter().enumerate() {
            let substitution = previous[k] + usize::from(longer_item != shorter_item);
            let mut cost = substitution.min(previous[k + 1] + 1).min(current[k] + 1);
            if i > 0 && k > 0 && *longer_item == shorter[k - 1] && longer[i - 1] == *shorter_item {
                cost = cost.min(two_back[k - 1] + 1);
            }
            current[k + 1] = cost;
        }
        std::mem::swap(&mut two_back, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[shorter.len()]
}

/// ## Summary
/// `1 - distance / longer length`, using [`damerau_levenshtein_distance`].
///
/// Two empty inputs score `1.0`; an empty input against a non-empty one
/// scores `0.0`.
#[must_use]
pub fn damerau_levenshtein_similarity_of<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 1.0;
    }
    1.0 - ratio(damerau_levenshtein_distance(a, b), longer)
}

/// [`damerau_levenshtein_similarity_of`] over the characters of two strings.
#[must_use]
pub fn damerau_levenshtein_similarity(a: &str, b: &str) -> f64 {
    damerau_levenshtein_similarity_of(&chars(a), &chars(b))
}

/// ## Summary
/// Jaro similarity.
///
/// The shared head and tail count as matches. The residuals are then matched
/// greedily inside a window of `(max residual + shared) / 2 - 1` positions,
/// and out-of-order matches count as half a transposition each.
#[must_use]
pub fn jaro_similarity_of<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let (head, tail) = common_affixes(a, b);
    // Walk the shorter residual so that argument order cannot change the result.
    let (source, other) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let source_rest = &source[head..source.len() - tail];
    let other_rest = &other[head..other.len() - tail];

    let mut matches = head + tail;
    let window = i64::try_from((source_rest.len().max(other_rest.len()) + matches) / 2).unwrap_or(i64::MAX) - 1;

    let mut source_matched = vec![false; source_rest.len()];
    let mut other_matched = vec![false; other_rest.len()];
    for (i, item) in source_rest.iter().enumerate() {
        let Some((from, to)) = window_bounds(i, window, other_rest.len()) else {
            continue;
        };
        if let Some(k) = (from..to).find(|&k| !other_matched[k] && other_rest[k] == *item) {
            source_matched[i] = true;
            other_matched[k] = true;
            matches += 1;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let source_order = source_rest.iter().zip(&source_matched).filter(|(_, m)| **m);
    let other_order = other_rest.iter().zip(&other_matched).filter(|(_, m)| **m);
    let transpositions = source_order
        .zip(other_order)
        .filter(|((x, _), (y, _))| x != y)
        .count();

    let m = ratio(matches, 1);
    let t = ratio(transpositions, 2);
    (m / ratio(a.len(), 1) + m / ratio(b.len(), 1) + (m - t) / m) / 3.0
}

/// [`jaro_similarity_of`] over the characters of two strings.
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    jaro_similarity_of(&chars(a), &chars(b))
}

/// ## Summary
/// Jaro-Winkler tuning: how much each shared leading element boosts the
/// Jaro score, and how many leading elements may count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    prefix_scale: f64,
    max_prefix_length: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self {
            prefix_scale: DEFAULT_PREFIX_SCALE,
            max_prefix_length: DEFAULT_MAX_PREFIX_LENGTH,
        }
    }
}

impl JaroWinkler {
    /// ## Summary
    /// Creates a tuning with the given prefix scale and prefix cap.
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidArgument`] if `prefix_scale` is outside
    /// `0.0..=0.25`. Larger scales can push scores above `1.0`.
    pub fn new(prefix_scale: f64, max_prefix_length: usize) -> TextResult<Self> {
        if !(0.0..=MAX_PREFIX_SCALE).contains(&prefix_scale) {
            return Err(CoreError::invalid_argument(
                "prefix_scale",
                format!("{prefix_scale} is outside 0.0..={MAX_PREFIX_SCALE}"),
            )
            .into());
        }
        Ok(Self {
            prefix_scale,
            max_prefix_length,
        })
    }

    /// Returns a copy with a different prefix cap.
    #[must_use]
    pub const fn with_max_prefix_length(self, max_prefix_length: usize) -> Self {
        Self {
            max_prefix_length,
            ..self
        }
    }

    #[must_use]
    pub const fn prefix_scale(self) -> f64 {
        self.prefix_scale
    }

    #[must_use]
    pub const fn max_prefix_length(self) -> usize {
        self.max_prefix_length
    }

    /// `jaro + prefix * scale * (1 - jaro)`, where `prefix` is the shared
    /// leading run capped at the configured length.
    #[must_use]
    pub fn similarity_of<T: PartialEq>(self, a: &[T], b: &[T]) -> f64 {
        let jaro = jaro_similarity_of(a, b);
        let prefix = a
            .iter()
            .zip(b)
            .take(self.max_prefix_length)
            .take_while(|(x, y)| x == y)
            .count();
        jaro + ratio(prefix, 1) * self.prefix_scale * (1.0 - jaro)
    }

    /// [`JaroWinkler::similarity_of`] over the characters of two strings.
    #[must_use]
    pub fn similarity(self, a: &str, b: &str) -> f64 {
        self.similarity_of(&chars(a), &chars(b))
    }
}

/// Jaro-Winkler similarity with the standard `0.1` prefix scale.
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str, max_prefix_length: usize) -> f64 {
    JaroWinkler::default()
        .with_max_prefix_length(max_prefix_length)
        .similarity(a, b)
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Search range `from..to` in the other residual for position `i`, or `None`
/// when the window is empty.
fn window_bounds(i: usize, window: i64, len: usize) -> Option<(usize, usize)> {
    let i = i64::try_from(i).ok()?;
    let from = usize::try_from((i - window).max(0)).ok()?;
    let to = usize::try_from(i + window + 1).ok()?.min(len);
    (from < to).then_some((from, to))
}

#[expect(clippy::cast_precision_loss, reason = "sequence lengths stay far below 2^52")]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round3(value: f64) -> f64 {
        (value * 1000.0).round() / 1000.0
    }

    const PAIRS: [(&str, &str); 4] = [
        ("DWAYNE", "DUANE"),
        ("MARTHA", "MARHTA"),
        ("DIXON", "DICKSONX"),
        ("JELLYFISH", "SMELLYFISH"),
    ];

    #[test]
    fn test_matching_chars_with() {
        let cases = [
            ("", "", (0, 0)),
            ("ABC", "CBA", (0, 0)),
            ("ABC", "ABC", (3, 0)),
            ("ABC", "ABCABC", (3, 0)),
            ("ABCCBA", "CBA", (0, 3)),
            ("ABXBA", "ABBA", (2, 2)),
        ];
        for (a, b, expected) in cases {
            assert_eq!(matching_chars_with(a, b), expected, "{a} / {b}");
        }
    }

    #[test]
    fn test_damerau_levenshtein_distance() {
        assert_eq!(damerau_levenshtein_distance(b"CA", b"AC"), 1);
        assert_eq!(damerau_levenshtein_distance(b"kitten", b"sitting"), 3);
        assert_eq!(damerau_levenshtein_distance(b"", b"abc"), 3);
        assert_eq!(damerau_levenshtein_distance(b"abc", b"abc"), 0);
        // Restricted form: no edits inside a swapped pair.
        assert_eq!(damerau_levenshtein_distance(b"CA", b"ABC"), 3);
        // A swap next to another edit still costs both.
        assert_eq!(damerau_levenshtein_distance(b"aba", b"bab"), 2);
        assert_eq!(damerau_levenshtein_distance(b"cac", b"aca"), 2);
        assert_eq!(damerau_levenshtein_distance(b"abcd", b"bacde"), 2);
    }

    /// Full-matrix optimal string alignment distance.
    fn osa_reference(a: &[u8], b: &[u8]) -> usize {
        let mut d = vec![vec![0; b.len() + 1]; a.len() + 1];
        for (i, row) in d.iter_mut().enumerate() {
            row[0] = i;
        }
        for (j, cell) in d[0].iter_mut().enumerate() {
            *cell = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let substitution = d[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
                d[i][j] = substitution.min(d[i - 1][j] + 1).min(d[i][j - 1] + 1);
                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
                }
            }
        }
        d[a.len()][b.len()]
    }

    fn words(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
        let mut all = vec![Vec::new()];
        let mut frontier = vec![Vec::new()];
        for _ in 0..max_len {
            frontier = frontier
                .iter()
                .flat_map(|word: &Vec<u8>| {
                    alphabet.iter().map(move |&c| {
                        let mut next = word.clone();
                        next.push(c);
                        next
                    })
                })
                .collect();
            all.extend(frontier.iter().cloned());
        }
        all
    }

    #[test]
    fn test_damerau_levenshtein_matches_full_matrix() {
        let words = words(b"abc", 5);
        for a in &words {
            for b in &words {
                assert_eq!(
                    damerau_levenshtein_distance(a, b),
                    osa_reference(a, b),
                    "{:?} / {:?}",
                    String::from_utf8_lossy(a),
                    String::from_utf8_lossy(b)
                );
            }
        }
    }

    #[test]
    fn test_damerau_levenshtein_similarity() {
        let expected = [0.667, 0.833, 0.5, 0.8];
        for ((a, b), score) in PAIRS.into_iter().zip(expected) {
            assert!((round3(damerau_levenshtein_similarity(a, b)) - score).abs() < 1e-9, "{a} / {b}");
        }
    }

    #[test]
    fn test_damerau_levenshtein_edge_cases() {
        assert!((damerau_levenshtein_similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!(damerau_levenshtein_similarity("XYZ", "").abs() < f64::EPSILON);
        // Shared affixes still score when one residual is empty.
        assert!((damerau_levenshtein_similarity("ABC", "ABCABC") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_jaro_similarity() {
        let expected = [0.822, 0.944, 0.767, 0.896];
        for ((a, b), score) in PAIRS.into_iter().zip(expected) {
            assert!((round3(jaro_similarity(a, b)) - score).abs() < 1e-9, "{a} / {b}");
        }
    }

    #[test]
    fn test_jaro_edge_cases() {
        assert!((jaro_similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!(jaro_similarity("ABC", "").abs() < f64::EPSILON);
        assert!(jaro_similarity("ABC", "XYZ").abs() < f64::EPSILON);
        assert!((jaro_similarity("ABC", "ABC") - 1.0).abs() < f64::EPSILON);
        assert!(jaro_similarity("ABC", "ABCABC") > 0.0);
    }

    #[test]
    fn test_jaro_winkler_similarity() {
        let expected = [0.84, 0.961, 0.813, 0.896];
        for ((a, b), score) in PAIRS.into_iter().zip(expected) {
            assert!((round3(jaro_winkler_similarity(a, b, 4)) - score).abs() < 1e-9, "{a} / {b}");
        }
    }

    #[test]
    fn test_prefix_cap() {
        let uncapped = jaro_winkler_similarity("MARTHA", "MARHTA", 4);
        let capped = jaro_winkler_similarity("MARTHA", "MARHTA", 1);
        let none = jaro_winkler_similarity("MARTHA", "MARHTA", 0);
        assert!(uncapped > capped && capped > none);
        assert!((none - jaro_similarity("MARTHA", "MARHTA")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jaro_winkler_tuning() {
        assert!(JaroWinkler::new(0.3, 4).is_err());
        assert!(JaroWinkler::new(-0.1, 4).is_err());

        let tuned = JaroWinkler::new(0.25, 4).unwrap();
        let score = tuned.similarity("DIXON", "DICKSONX");
        assert!(score > JaroWinkler::default().similarity("DIXON", "DICKSONX"));
        assert!(score <= 1.0);
    }

    #[test]
    fn test_symmetry() {
        let extra = [("", "A"), ("ABC", "ABCABC"), ("abcdef", "badcfe"), ("crate", "trace")];
        for (a, b) in PAIRS.into_iter().chain(extra) {
            assert!((jaro_similarity(a, b) - jaro_similarity(b, a)).abs() < 1e-12, "{a} / {b}");
            assert!(
                (jaro_winkler_similarity(a, b, 4) - jaro_winkler_similarity(b, a, 4)).abs() < 1e-12,
                "{a} / {b}"
            );
            assert!(
                (damerau_levenshtein_similarity(a, b) - damerau_levenshtein_similarity(b, a)).abs() < 1e-12,
                "{a} / {b}"
            );
        }
    }

    #[test]
    fn test_generic_slices() {
        let a = [1, 2, 3, 4];
        let b = [1, 3, 2, 4];
        assert_eq!(damerau_levenshtein_distance(&a, &b), 1);
        assert!(jaro_similarity_of(&a, &b) > 0.9);
    }

    #[test]
    fn test_non_ascii_compares_chars() {
        assert_eq!(matching_chars_with("naïve", "naïf"), (3, 0));
        assert!((damerau_levenshtein_similarity("é", "e") - 0.0).abs() < f64::EPSILON);
    }
}
