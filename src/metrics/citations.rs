//! Signals that make a page worth citing: bylines, dates, outbound sources,
//! statistics, quotable sentences and first-hand material.

use super::text::{has_digit, numeric_density, round1, split_sentences, word_count};
use crate::document::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SOURCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(source|study|studies|research|report|survey|according|journal|paper|data|statistic|doi\.org|\.gov\b|\.edu\b|wikipedia|pubmed|\.pdf\b)",
    )
    .expect("static regex")
});

static FACTUAL_CLAIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(is|are|was|were|means|refers to|consists of|includes)\b")
        .expect("static regex")
});

static ORIGINAL_RESEARCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(we found|our research|our data|our analysis|we surveyed|we tested|case study|our study)\b",
    )
    .expect("static regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceLinks {
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitationSignals {
    pub has_author: bool,
    pub has_publish_date: bool,
    pub sources: SourceLinks,
    /// Digit-bearing tokens per 100 words
    pub statistic_density: f64,
}

pub fn citation_signals(doc: &Document) -> CitationSignals {
    let has_author = doc.author.as_deref().is_some_and(|a| !a.trim().is_empty())
        || doc
            .links
            .iter()
            .any(|l| l.rel.as_deref().is_some_and(|r| r.contains("author")));

    CitationSignals {
        has_author,
        has_publish_date: doc
            .published_at
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty()),
        sources: SourceLinks {
            count: count_source_links(doc),
        },
        statistic_density: round1(numeric_density(&doc.body_text())),
    }
}

/// Outbound http(s) links to another host whose href or anchor text looks
/// like a citation.
pub fn count_source_links(doc: &Document) -> usize {
    let own_host = doc.host();
    doc.links
        .iter()
        .filter(|link| {
            let Ok(url) = url::Url::parse(&link.href) else {
                return false;
            };
            let outbound = matches!(url.scheme(), "http" | "https")
                && url.host_str().map(str::to_lowercase) != own_host;
            outbound && (SOURCE_PATTERN.is_match(&link.href) || SOURCE_PATTERN.is_match(&link.text))
        })
        .count()
}

/// Statistic density mapped onto 0..=100.
pub fn specificity_score(density: f64) -> u32 {
    match density {
        d if d >= 3.0 => 100,
        d if d >= 2.0 => 75,
        d if d >= 1.0 => 50,
        d if d > 0.0 => 25,
        _ => 0,
    }
}

pub fn is_quotable(sentence: &str, max_words: usize) -> bool {
    let words = word_count(sentence);
    (5..=max_words).contains(&words)
        && (sentence.split_whitespace().any(has_digit) || FACTUAL_CLAIM.is_match(sentence))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuotableSentences {
    pub count: usize,
    pub total: usize,
    /// Percentage of sentences that are quotable
    pub ratio: u32,
}

pub fn quotable_sentences(doc: &Document, max_words: usize) -> QuotableSentences {
    let (count, total) = doc
        .blocks
        .iter()
        .flat_map(|b| split_sentences(&b.text))
        .fold((0, 0), |(q, t), sentence| {
            (q + usize::from(is_quotable(sentence, max_words)), t + 1)
        });
    let ratio = if total == 0 {
        0
    } else {
        crate::scoring::to_score(count as f64 * 100.0 / total as f64)
    };
    QuotableSentences {
        count,
        total,
        ratio,
    }
}

/// First-person research phrasing, a proxy for original material.
pub fn has_original_content(doc: &Document) -> bool {
    doc.blocks.iter().any(|b| ORIGINAL_RESEARCH.is_match(&b.text))
}
