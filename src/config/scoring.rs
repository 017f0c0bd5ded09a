//! Scoring weight configuration for the weighted analyzers
//!
//! Each analyzer that combines sub-scores with unequal weights owns one
//! weight table. Tables are validated to the 0.0-1.0 range and normalized so
//! their active weights sum to exactly 1.0.

use serde::{Deserialize, Serialize};

/// All weight tables, one per weighted analyzer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    #[serde(default)]
    pub content: ContentWeights,

    #[serde(default)]
    pub query_match: QueryMatchWeights,

    #[serde(default)]
    pub visibility: VisibilityWeights,
}

/// Content analyzer weights; readability dominates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentWeights {
    #[serde(default = "default_readability_weight")]
    pub readability: f64,
    #[serde(default = "default_content_minor_weight")]
    pub qa_patterns: f64,
    #[serde(default = "default_content_minor_weight")]
    pub citation_worthiness: f64,
    #[serde(default = "default_content_minor_weight")]
    pub structure: f64,
}

/// Per-query match weights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryMatchWeights {
    #[serde(default = "default_keywords_weight")]
    pub keywords: f64,
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
    #[serde(default = "default_intent_weight")]
    pub intent: f64,
    #[serde(default = "default_answer_quality_weight")]
    pub answer_quality: f64,
}

/// Visibility analyzer weights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisibilityWeights {
    #[serde(default = "default_citation_potential_weight")]
    pub citation_potential: f64,
    #[serde(default = "default_authority_weight")]
    pub authority: f64,
    #[serde(default = "default_entities_weight")]
    pub entities: f64,
}

pub fn default_readability_weight() -> f64 {
    0.40
}
pub fn default_content_minor_weight() -> f64 {
    0.20
}
pub fn default_keywords_weight() -> f64 {
    0.25
}
pub fn default_semantic_weight() -> f64 {
    0.25
}
pub fn default_intent_weight() -> f64 {
    0.20
}
pub fn default_answer_quality_weight() -> f64 {
    0.30
}
pub fn default_citation_potential_weight() -> f64 {
    0.40
}
pub fn default_authority_weight() -> f64 {
    0.35
}
pub fn default_entities_weight() -> f64 {
    0.25
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            readability: default_readability_weight(),
            qa_patterns: default_content_minor_weight(),
            citation_worthiness: default_content_minor_weight(),
            structure: default_content_minor_weight(),
        }
    }
}

impl Default for QueryMatchWeights {
    fn default() -> Self {
        Self {
            keywords: default_keywords_weight(),
            semantic: default_semantic_weight(),
            intent: default_intent_weight(),
            answer_quality: default_answer_quality_weight(),
        }
    }
}

impl Default for VisibilityWeights {
    fn default() -> Self {
        Self {
            citation_potential: default_citation_potential_weight(),
            authority: default_authority_weight(),
            entities: default_entities_weight(),
        }
    }
}

// Pure function: Check if a weight is in valid range
pub fn is_valid_weight(weight: f64) -> bool {
    (0.0..=1.0).contains(&weight)
}

// Pure function: Validate a table of named weights
fn validate_table(table: &str, weights: &[(&str, f64)]) -> Result<(), String> {
    if let Some((name, _)) = weights.iter().find(|(_, w)| !is_valid_weight(*w)) {
        return Err(format!(
            "{table}.{name} weight must be between 0.0 and 1.0"
        ));
    }
    let sum: f64 = weights.iter().map(|(_, w)| w).sum();
    if sum <= 0.0 {
        return Err(format!("{table} weights must not all be zero"));
    }
    Ok(())
}

// Pure function: Scale weights so they sum to 1.0
fn normalized<const N: usize>(weights: [f64; N]) -> [f64; N] {
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 && (sum - 1.0).abs() > 0.001 {
        weights.map(|w| w / sum)
    } else {
        weights
    }
}

impl ScoringWeights {
    /// Validate every table (range and non-zero sum)
    pub fn validate(&self) -> Result<(), String> {
        let c = &self.content;
        validate_table(
            "content",
            &[
                ("readability", c.readability),
                ("qa_patterns", c.qa_patterns),
                ("citation_worthiness", c.citation_worthiness),
                ("structure", c.structure),
            ],
        )?;
        let q = &self.query_match;
        validate_table(
            "query_match",
            &[
                ("keywords", q.keywords),
                ("semantic", q.semantic),
                ("intent", q.intent),
                ("answer_quality", q.answer_quality),
            ],
        )?;
        let v = &self.visibility;
        validate_table(
            "visibility",
            &[
                ("citation_potential", v.citation_potential),
                ("authority", v.authority),
                ("entities", v.entities),
            ],
        )
    }

    /// Normalize weights to ensure each table sums to 1.0
    pub fn normalize(&mut self) {
        let c = &mut self.content;
        [c.readability, c.qa_patterns, c.citation_worthiness, c.structure] =
            normalized([c.readability, c.qa_patterns, c.citation_worthiness, c.structure]);

        let q = &mut self.query_match;
        [q.keywords, q.semantic, q.intent, q.answer_quality] =
            normalized([q.keywords, q.semantic, q.intent, q.answer_quality]);

        let v = &mut self.visibility;
        [v.citation_potential, v.authority, v.entities] =
            normalized([v.citation_potential, v.authority, v.entities]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_and_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!(weights.validate().is_ok());
        let q = &weights.query_match;
        assert!((q.keywords + q.semantic + q.intent + q.answer_quality - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_weight_is_rejected() {
        let mut weights = ScoringWeights::default();
        weights.visibility.authority = 1.5;
        let err = weights.validate().unwrap_err();
        assert!(err.contains("visibility.authority"));
    }

    #[test]
    fn test_normalize_scales_table() {
        let mut weights = ScoringWeights::default();
        weights.visibility = VisibilityWeights {
            citation_potential: 0.5,
            authority: 0.5,
            entities: 0.5,
        };
        weights.normalize();
        assert!((weights.visibility.entities - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(weights.content, ContentWeights::default());
    }
}
