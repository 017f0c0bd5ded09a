//! Content quality: is the text easy to read, shaped like questions and
//! answers, and worth citing?

use super::{malformed_schema_recommendation, run, Analyzer, Scored};
use crate::config::AuditConfig;
use crate::core::{Priority, Rating, Recommendation, Result, ScoreCard};
use crate::document::{BlockKind, Document};
use crate::metrics::text::{round1, word_count};
use crate::metrics::{
    citation_signals, direct_answers, has_faq_heading, has_step_content, readability_metrics,
    specificity_score, text_stats, CitationSignals, DirectAnswers, HeadingInventory, PageMetrics,
    QuestionHeaders, ReadabilityMetrics, SourceLinks, TextStats,
};
use crate::priority::rank_recommendations;
use crate::scoring::{priority_for_gap, proportional, tiered, to_score, weighted_score};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResult {
    pub scores: ScoreCard,
    pub overall_score: u32,
    pub readability: ReadabilityReport,
    pub qa_patterns: QaPatternsReport,
    pub citation_worthiness: CitationReport,
    pub structure: ContentStructureReport,
    pub content_stats: ContentStats,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityReport {
    pub score: u32,
    pub metrics: ReadabilityMetrics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaPatternsReport {
    pub score: u32,
    pub question_headers: QuestionHeaders,
    #[serde(rename = "hasFAQSection")]
    pub has_faq_section: bool,
    pub direct_answers: DirectAnswers,
    pub has_step_content: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoritySignals {
    pub has_author: bool,
    pub has_publish_date: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Specificity {
    pub density: f64,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationReport {
    pub score: u32,
    pub authority_signals: AuthoritySignals,
    pub sources: SourceLinks,
    pub specificity: Specificity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStructureReport {
    pub score: u32,
    pub avg_paragraph_words: f64,
    pub subheadings: usize,
    pub list_items: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
}

impl Scored for ContentResult {
    fn overall_score(&self) -> u32 {
        self.overall_score
    }
}

pub struct ContentAnalyzer<'a> {
    config: &'a AuditConfig,
}

impl<'a> ContentAnalyzer<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }
}

impl Analyzer for ContentAnalyzer<'_> {
    type Output = ContentResult;

    fn name(&self) -> &'static str {
        "Content Quality Analyzer"
    }

    fn analyze(&self, doc: &Document, metrics: &PageMetrics) -> Result<ContentResult> {
        let good = self.config.thresholds.good_score;
        let stats = text_stats(doc);
        let mut recommendations = Vec::new();

        let readability = self.score_readability(&stats, &mut recommendations);
        let qa_patterns = self.score_qa_patterns(doc, metrics, &mut recommendations);
        let citation_worthiness = score_citations(&citation_signals(doc), &mut recommendations);
        let structure = score_structure(doc, &stats, &metrics.headings, good, &mut recommendations);

        let scores = ScoreCard::new()
            .with("readability", readability.score)
            .with("qaPatterns", qa_patterns.score)
            .with("citationWorthiness", citation_worthiness.score)
            .with("structure", structure.score);

        let w = &self.config.weights.content;
        let overall_score = weighted_score(&[
            (readability.score, w.readability),
            (qa_patterns.score, w.qa_patterns),
            (citation_worthiness.score, w.citation_worthiness),
            (structure.score, w.structure),
        ]);
        tracing::debug!(?scores, overall_score, "content sub-scores");

        rank_recommendations(&mut recommendations);
        Ok(ContentResult {
            scores,
            overall_score,
            readability,
            qa_patterns,
            citation_worthiness,
            structure,
            content_stats: ContentStats {
                word_count: stats.words,
                sentence_count: stats.sentences,
                paragraph_count: stats.paragraphs,
            },
            recommendations,
        })
    }
}

impl ContentAnalyzer<'_> {
    fn score_readability(
        &self,
        stats: &TextStats,
        recs: &mut Vec<Recommendation>,
    ) -> ReadabilityReport {
        let metrics = readability_metrics(stats);

        if stats.words == 0 {
            recs.push(Recommendation::new(
                "Readability",
                Priority::High,
                "No readable text found",
                "Add body text in paragraphs and lists so the page has content to answer from",
            ));
            return ReadabilityReport { score: 0, metrics };
        }

        let score = readability_score(metrics.flesch_score, metrics.avg_words_per_sentence);
        let good = self.config.thresholds.good_score;
        if score < good {
            recs.push(Recommendation::new(
                "Readability",
                priority_for_gap(score, good),
                format!(
                    "Text is hard to read (Flesch {}, {})",
                    metrics.flesch_score, metrics.readability_level
                ),
                "Shorten sentences to under 20 words and prefer plain, common words",
            ));
        }
        ReadabilityReport { score, metrics }
    }

    fn score_qa_patterns(
        &self,
        doc: &Document,
        metrics: &PageMetrics,
        recs: &mut Vec<Recommendation>,
    ) -> QaPatternsReport {
        let questions = &metrics.headings.question_headers;
        let answers = direct_answers(
            doc,
            questions,
            self.config.thresholds.direct_answer_max_words,
        );
        let has_faq_section = has_faq_heading(doc) || metrics.schema.detected.has_faq;
        let has_steps = has_step_content(doc);
        if metrics.schema.is_malformed() {
            recs.push(malformed_schema_recommendation(&metrics.schema));
        }

        let mut points = tiered(questions.count, 3, 40.0, 13.0) + tiered(answers.count, 3, 20.0, 7.0);
        if has_faq_section {
            points += 25.0;
        }
        if has_steps {
            points += 15.0;
        }

        if questions.count < 3 {
            recs.push(
                Recommendation::new(
                    "Q&A Patterns",
                    Priority::Medium,
                    format!("Only {} question-style heading(s)", questions.count),
                    "Rephrase key headings as the questions your readers ask (What, How, Why)",
                )
                .rated(Rating::Low, Rating::High),
            );
        }
        if !has_faq_section {
            recs.push(
                Recommendation::new(
                    "Q&A Patterns",
                    Priority::Medium,
                    "No FAQ section",
                    "Add an FAQ section that answers the most common questions about the topic",
                )
                .rated(Rating::Medium, Rating::High),
            );
        }
        if questions.count > 0 && answers.count < questions.count.min(3) {
            recs.push(
                Recommendation::new(
                    "Q&A Patterns",
                    Priority::High,
                    "Question headings are not followed by direct answers",
                    "Open each question section with a one-sentence answer of under 40 words",
                )
                .rated(Rating::Low, Rating::High),
            );
        }
        if !has_steps {
            recs.push(Recommendation::new(
                "Q&A Patterns",
                Priority::Low,
                "No step-by-step content",
                "Present processes as numbered steps in an ordered list",
            ));
        }

        QaPatternsReport {
            score: to_score(points),
            question_headers: questions.clone(),
            has_faq_section,
            direct_answers: answers,
            has_step_content: has_steps,
        }
    }
}

pub fn analyze_content(doc: &Document, config: &AuditConfig) -> Result<ContentResult> {
    run(&ContentAnalyzer::new(config), doc)
}

/// Piecewise mapping from Flesch ease onto 0..=100, with a penalty for long
/// sentences.
pub fn readability_score(flesch: f64, avg_words_per_sentence: f64) -> u32 {
    let base = if flesch >= 60.0 {
        85.0 + (flesch - 60.0) * 15.0 / 40.0
    } else if flesch >= 30.0 {
        50.0 + (flesch - 30.0) * 35.0 / 30.0
    } else {
        flesch.max(0.0) * 50.0 / 30.0
    };
    let penalty = if avg_words_per_sentence > 25.0 {
        20.0
    } else if avg_words_per_sentence > 20.0 {
        10.0
    } else {
        0.0
    };
    to_score(base - penalty)
}

fn score_citations(signals: &CitationSignals, recs: &mut Vec<Recommendation>) -> CitationReport {
    let specificity = specificity_score(signals.statistic_density);
    let mut points = tiered(signals.sources.count, 3, 30.0, 10.0) + f64::from(specificity) * 0.25;
    if signals.has_author {
        points += 25.0;
    } else {
        recs.push(
            Recommendation::new(
                "Citation Worthiness",
                Priority::Medium,
                "No author byline",
                "Add a visible author byline linked to an author profile",
            )
            .rated(Rating::Low, Rating::High),
        );
    }
    if signals.has_publish_date {
        points += 20.0;
    } else {
        recs.push(
            Recommendation::new(
                "Citation Worthiness",
                Priority::Low,
                "No publish date",
                "Show the publish or last-updated date and mark it up with <time datetime>",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }
    if signals.sources.count < 3 {
        recs.push(Recommendation::new(
            "Citation Worthiness",
            Priority::Medium,
            format!("Only {} outbound source link(s)", signals.sources.count),
            "Cite at least 3 authoritative sources such as studies, reports or official data",
        ));
    }
    if specificity < 50 {
        recs.push(Recommendation::new(
            "Citation Worthiness",
            Priority::Low,
            "Few specific numbers or statistics",
            "Back key claims with concrete figures, dates and percentages",
        ));
    }

    CitationReport {
        score: to_score(points),
        authority_signals: AuthoritySignals {
            has_author: signals.has_author,
            has_publish_date: signals.has_publish_date,
        },
        sources: signals.sources.clone(),
        specificity: Specificity {
            density: signals.statistic_density,
            score: specificity,
        },
    }
}

fn score_structure(
    doc: &Document,
    stats: &TextStats,
    headings: &HeadingInventory,
    good: u32,
    recs: &mut Vec<Recommendation>,
) -> ContentStructureReport {
    let paragraph_words: usize = doc.paragraphs().map(|p| word_count(&p.text)).sum();
    let avg_paragraph_words = if stats.paragraphs == 0 {
        0.0
    } else {
        paragraph_words as f64 / stats.paragraphs as f64
    };
    let list_items = doc
        .blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::ListItem | BlockKind::OrderedListItem))
        .count();
    let subheadings = headings.subheadings();
    let wanted_subheadings = (stats.words / 300).max(1);

    let mut points = 0.0;
    if stats.paragraphs > 0 {
        points += match avg_paragraph_words {
            a if a <= 100.0 => 35.0,
            a if a <= 150.0 => 20.0,
            _ => 0.0,
        };
    }
    points += match stats.words {
        w if w >= 800 => 35.0,
        w if w >= 300 => 20.0,
        w => proportional(w as f64, 300.0, 20.0),
    };
    if list_items > 0 {
        points += 15.0;
    }
    if subheadings >= wanted_subheadings {
        points += 15.0;
    }
    let score = to_score(points);

    if avg_paragraph_words > 100.0 {
        recs.push(Recommendation::new(
            "Content Structure",
            priority_for_gap(score, good),
            format!("Long paragraphs (avg {avg_paragraph_words:.0} words)"),
            "Split paragraphs into 2-4 sentence chunks of under 100 words",
        ));
    }
    if stats.words < 800 {
        recs.push(Recommendation::new(
            "Content Structure",
            if stats.words < 300 { Priority::High } else { Priority::Medium },
            format!("Limited depth ({} words)", stats.words),
            "Expand coverage to at least 800 words with examples and supporting detail",
        ));
    }
    if list_items == 0 {
        recs.push(
            Recommendation::new(
                "Content Structure",
                Priority::Low,
                "No bulleted or numbered lists",
                "Summarize key points in a bulleted list",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }
    if subheadings < wanted_subheadings {
        recs.push(Recommendation::new(
            "Content Structure",
            Priority::Medium,
            format!("{subheadings} subheading(s) for {} words", stats.words),
            "Add an H2 or H3 subheading at least every 300 words",
        ));
    }

    ContentStructureReport {
        score,
        avg_paragraph_words: round1(avg_paragraph_words),
        subheadings,
        list_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Heading, SchemaBlock, TextBlock};
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str, heading: Option<usize>) -> TextBlock {
        TextBlock {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            heading,
        }
    }

    #[test]
    fn test_readability_score_bands() {
        assert_eq!(readability_score(100.0, 10.0), 100);
        assert_eq!(readability_score(60.0, 10.0), 85);
        assert_eq!(readability_score(45.0, 10.0), 68);
        assert_eq!(readability_score(15.0, 10.0), 25);
        assert_eq!(readability_score(-30.0, 10.0), 0);
        assert_eq!(readability_score(60.0, 22.0), 75);
        assert_eq!(readability_score(60.0, 30.0), 65);
    }

    #[test]
    fn test_empty_document_scores_zero_readability() {
        let doc = Document::new("https://example.com");
        let result = analyze_content(&doc, &AuditConfig::default()).unwrap();
        assert_eq!(result.readability.score, 0);
        assert_eq!(result.recommendations[0].issue, "No readable text found");
    }

    #[test]
    fn test_qa_patterns_with_faq_schema_and_answers() {
        let mut doc = Document::new("https://example.com");
        doc.headings = vec![
            Heading { level: 2, text: "What is Rust?".into() },
            Heading { level: 2, text: "Why use Rust?".into() },
            Heading { level: 2, text: "How do I install Rust?".into() },
        ];
        doc.blocks = vec![
            paragraph("Rust is a systems programming language.", Some(0)),
            paragraph("Rust prevents memory bugs at compile time.", Some(1)),
            paragraph("You install Rust with rustup.", Some(2)),
        ];
        doc.schema_blocks = vec![SchemaBlock {
            declared_type: None,
            raw: r#"{"@type":"FAQPage"}"#.into(),
        }];

        let result = analyze_content(&doc, &AuditConfig::default()).unwrap();
        // 40 questions + 25 FAQ + 20 answers
        assert_eq!(result.qa_patterns.score, 85);
        assert!(result.qa_patterns.has_faq_section);
        assert_eq!(result.qa_patterns.direct_answers.count, 3);
    }

    #[test]
    fn test_malformed_schema_next_to_faq_schema_is_reported() {
        let mut doc = Document::new("https://example.com");
        doc.blocks = vec![paragraph("Rust is fast.", None)];
        doc.schema_blocks = vec![
            SchemaBlock {
                declared_type: None,
                raw: r#"{"@type":"FAQPage"}"#.into(),
            },
            SchemaBlock {
                declared_type: None,
                raw: "{not json".into(),
            },
        ];

        let result = analyze_content(&doc, &AuditConfig::default()).unwrap();
        assert!(result.qa_patterns.has_faq_section);
        let fix = result
            .recommendations
            .iter()
            .find(|r| r.action.starts_with("Fix the JSON syntax"))
            .unwrap();
        assert_eq!(fix.priority, Priority::High);
        assert_eq!(fix.issue, "1 structured data block(s) could not be parsed");
    }

    #[test]
    fn test_overall_uses_configured_weights() {
        let mut doc = Document::new("https://example.com");
        doc.author = Some("Ada".into());
        doc.blocks = vec![paragraph("The cat sat on the mat. It was warm.", None)];
        let result = analyze_content(&doc, &AuditConfig::default()).unwrap();

        let s = &result.scores;
        let expected = weighted_score(&[
            (s.get("readability").unwrap(), 0.4),
            (s.get("qaPatterns").unwrap(), 0.2),
            (s.get("citationWorthiness").unwrap(), 0.2),
            (s.get("structure").unwrap(), 0.2),
        ]);
        assert_eq!(result.overall_score, expected);
        assert_eq!(result.citation_worthiness.score, 25);
    }

    #[test]
    fn test_recommendations_are_priority_sorted() {
        let doc = Document::new("https://example.com");
        let result = analyze_content(&doc, &AuditConfig::default()).unwrap();
        let ranks: Vec<_> = result.recommendations.iter().map(|r| r.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }
}
