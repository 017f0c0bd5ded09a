//! Root configuration types

use super::scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root configuration, loaded from `.aeoscope.toml`.
///
/// Immutable once built; analyzers borrow it for the duration of a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub lexicon: Lexicon,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThresholdsConfig {
    /// Sub-score at or above which no gap recommendation is emitted
    #[serde(default = "default_good_score")]
    pub good_score: u32,

    /// Longest sentence (in words) still considered quotable
    #[serde(default = "default_quotable_max_words")]
    pub quotable_max_words: usize,

    /// Longest first sentence (in words) that counts as a direct answer
    #[serde(default = "default_direct_answer_max_words")]
    pub direct_answer_max_words: usize,

    /// Queries scoring below this are content gaps
    #[serde(default = "default_weak_match")]
    pub weak_match: u32,

    /// Queries scoring below this get a medium-priority recommendation
    #[serde(default = "default_moderate_match")]
    pub moderate_match: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregationConfig {
    /// Number of leading `action` characters compared when deduplicating
    #[serde(default = "default_dedup_prefix")]
    pub dedup_prefix: usize,

    #[serde(default = "default_top_recommendations")]
    pub top_recommendations: usize,

    #[serde(default = "default_summary_recommendations")]
    pub summary_recommendations: usize,

    #[serde(default = "default_max_queries")]
    pub max_queries: usize,

    /// Run analyzers on the rayon pool during a full audit
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

pub fn default_good_score() -> u32 {
    70
}
pub fn default_quotable_max_words() -> usize {
    30
}
pub fn default_direct_answer_max_words() -> usize {
    40
}
pub fn default_weak_match() -> u32 {
    45
}
pub fn default_moderate_match() -> u32 {
    65
}
pub fn default_dedup_prefix() -> usize {
    50
}
pub fn default_top_recommendations() -> usize {
    10
}
pub fn default_summary_recommendations() -> usize {
    5
}
pub fn default_max_queries() -> usize {
    10
}
pub fn default_parallel() -> bool {
    true
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            good_score: default_good_score(),
            quotable_max_words: default_quotable_max_words(),
            direct_answer_max_words: default_direct_answer_max_words(),
            weak_match: default_weak_match(),
            moderate_match: default_moderate_match(),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            dedup_prefix: default_dedup_prefix(),
            top_recommendations: default_top_recommendations(),
            summary_recommendations: default_summary_recommendations(),
            max_queries: default_max_queries(),
            parallel: default_parallel(),
        }
    }
}

const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from",
    "how", "i", "in", "is", "it", "its", "my", "of", "on", "or", "should", "that", "the", "their",
    "this", "to", "was", "what", "when", "where", "which", "who", "why", "will", "with", "you",
    "your",
];

/// On-disk shape of the `[lexicon]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

/// Stopword set used for query-term extraction and entity heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LexiconConfig", into = "LexiconConfig")]
pub struct Lexicon {
    extra: Vec<String>,
    stopwords: HashSet<String>,
}

impl From<LexiconConfig> for Lexicon {
    fn from(config: LexiconConfig) -> Self {
        let extra: Vec<String> = config
            .extra_stopwords
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        let stopwords = DEFAULT_STOPWORDS
            .iter()
            .map(|w| w.to_string())
            .chain(extra.iter().cloned())
            .collect();
        Self { extra, stopwords }
    }
}

impl From<Lexicon> for LexiconConfig {
    fn from(lexicon: Lexicon) -> Self {
        Self {
            extra_stopwords: lexicon.extra,
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        LexiconConfig::default().into()
    }
}

impl Lexicon {
    /// `word` must already be lowercase
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: AuditConfig = toml::from_str("").unwrap();
        assert_eq!(config.aggregation.dedup_prefix, 50);
        assert_eq!(config.thresholds.weak_match, 45);
        assert!(config.lexicon.is_stopword("what"));
    }

    #[test]
    fn test_extra_stopwords_are_merged() {
        let config: AuditConfig = toml::from_str(
            r#"
            [lexicon]
            extra_stopwords = ["Guide"]
            "#,
        )
        .unwrap();
        assert!(config.lexicon.is_stopword("guide"));
        assert!(config.lexicon.is_stopword("the"));
    }
}
