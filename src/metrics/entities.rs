use super::text::split_sentences;
use crate::config::Lexicon;
use crate::document::Document;
use std::collections::BTreeSet;

/// Naive named-entity count: distinct capitalized tokens that do not open a
/// sentence and are not stopwords.
pub fn entity_mentions(doc: &Document, lexicon: &Lexicon) -> usize {
    let mut seen = BTreeSet::new();
    for block in &doc.blocks {
        for sentence in split_sentences(&block.text) {
            for token in sentence.split_whitespace().skip(1) {
                let word = token.trim_matches(|c: char| !c.is_alphanumeric());
                let capitalized = word.chars().next().is_some_and(char::is_uppercase);
                if capitalized && word.chars().count() > 1 && !lexicon.is_stopword(&word.to_lowercase()) {
                    seen.insert(word.to_string());
                }
            }
        }
    }
    seen.len()
}
