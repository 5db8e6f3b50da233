//! Exact substring search and fuzzy string similarity.
//!
//! [`KmpMatcher`] finds every occurrence of a target, overlaps included, in
//! memory or over any [`std::io::Read`] source. The [`similarity`] module
//! scores how alike two sequences are.

pub mod error;
pub mod kmp;
pub mod similarity;

pub use error::{TextError, TextResult};
pub use kmp::{KmpMatcher, Matches, ReaderMatches};
pub use similarity::{
    JaroWinkler, common_affixes, damerau_levenshtein_distance, damerau_levenshtein_similarity,
    jaro_similarity, jaro_winkler_similarity, matching_chars_with,
};
