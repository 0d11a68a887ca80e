//! Lexical similarity between two pages.
//!
//! Reported alongside a link when requested; the engine never ranks or filters on it.

use crate::record::UrlRecord;
use std::collections::HashMap;

/// Lower-cased words from the path segments and the title.
pub fn tokens(record: &UrlRecord) -> Vec<String> {
    let path_words = record
        .segments()
        .iter()
        .flat_map(|segment| segment.split(['-', '_', '.']));
    let title_words = record
        .title
        .as_deref()
        .unwrap_or_default()
        .split(|c: char| !c.is_alphanumeric());

    path_words
        .chain(title_words)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn term_frequencies(words: &[String]) -> HashMap<&str, f64> {
    let mut tf = HashMap::new();
    for word in words {
        *tf.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    tf
}

/// Cosine similarity of the two pages' term-frequency vectors, in `[0, 1]`.
pub fn relevance_score(source: &UrlRecord, target: &UrlRecord) -> f64 {
    let source_tokens = tokens(source);
    let target_tokens = tokens(target);
    let a = term_frequencies(&source_tokens);
    let b = term_frequencies(&target_tokens);

    let dot: f64 = a
        .iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
