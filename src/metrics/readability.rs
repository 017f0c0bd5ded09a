//! Flesch Reading Ease and the standard grade banding.

use super::text::{round1, TextStats};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityMetrics {
    pub flesch_score: f64,
    pub grade_level: &'static str,
    pub avg_words_per_sentence: f64,
    pub readability_level: &'static str,
}

/// (lower bound, grade level, readability level), highest band first
const BANDS: &[(f64, &str, &str)] = &[
    (90.0, "5th grade", "Very Easy"),
    (80.0, "6th grade", "Easy"),
    (70.0, "7th grade", "Fairly Easy"),
    (60.0, "8th-9th grade", "Standard"),
    (50.0, "10th-12th grade", "Fairly Difficult"),
    (30.0, "College", "Difficult"),
];

pub fn flesch_reading_ease(stats: &TextStats) -> f64 {
    if stats.words == 0 {
        return 0.0;
    }
    let sentences = stats.sentences.max(1) as f64;
    let words = stats.words as f64;
    206.835 - 1.015 * (words / sentences) - 84.6 * (stats.syllables as f64 / words)
}

pub fn band(flesch: f64) -> (&'static str, &'static str) {
    BANDS
        .iter()
        .find(|(floor, _, _)| flesch >= *floor)
        .map(|(_, grade, level)| (*grade, *level))
        .unwrap_or(("College graduate", "Very Difficult"))
}

pub fn readability_metrics(stats: &TextStats) -> ReadabilityMetrics {
    let flesch = round1(flesch_reading_ease(stats));
    let (grade_level, readability_level) = band(flesch);
    let avg_words_per_sentence = if stats.sentences == 0 {
        stats.words as f64
    } else {
        stats.words as f64 / stats.sentences as f64
    };

    ReadabilityMetrics {
        flesch_score: flesch,
        grade_level,
        avg_words_per_sentence: round1(avg_words_per_sentence),
        readability_level,
    }
}
