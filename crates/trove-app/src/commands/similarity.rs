use std::io::Write;

use anyhow::Result;
use trove_core::config::Settings;
use trove_text::{JaroWinkler, damerau_levenshtein_distance, damerau_levenshtein_similarity, jaro_similarity};

use crate::cli::SimilarityArgs;

pub(super) fn run(args: &SimilarityArgs, settings: &Settings, out: &mut impl Write) -> Result<()> {
    let jaro_winkler = JaroWinkler::new(
        settings.similarity.prefix_scale,
        settings.similarity.max_prefix_length,
    )?;

    let a: Vec<char> = args.a.chars().collect();
    let b: Vec<char> = args.b.chars().collect();

    writeln!(out, "damerau-levenshtein distance: {}", damerau_levenshtein_distance(a.as_slice(), b.as_slice()))?;
    writeln!(
        out,
        "damerau-levenshtein similarity: {:.3}",
        damerau_levenshtein_similarity(&args.a, &args.b)
    )?;
    writeln!(out, "jaro similarity: {:.3}", jaro_similarity(&args.a, &args.b))?;
    writeln!(
        out,
        "jaro-winkler similarity: {:.3}",
        jaro_winkler.similarity(&args.a, &args.b)
    )?;
    Ok(())
}
