//! AI visibility: how likely is an answer engine to quote, trust and
//! attribute this page?

use super::{malformed_schema_recommendation, run, Analyzer, Scored};
use crate::config::AuditConfig;
use crate::core::{Priority, Rating, Recommendation, Result, ScoreCard};
use crate::document::Document;
use crate::metrics::{
    citation_signals, direct_answers, entity_mentions, has_original_content, quotable_sentences,
    text_stats, CitationSignals, HeadingInventory, PageMetrics, QuotableSentences,
    SchemaInventory, SourceLinks,
};
use crate::priority::rank_recommendations;
use crate::scoring::{proportional, tiered, to_score, weighted_score};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityResult {
    pub scores: ScoreCard,
    pub overall_score: u32,
    pub verdict: Verdict,
    pub citation_potential: CitationPotentialReport,
    pub authority: AuthorityReport,
    pub entities: EntitiesReport,
    pub quick_wins: Vec<QuickWin>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotableSummary {
    pub count: usize,
    pub ratio: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationPotentialReport {
    pub score: u32,
    pub quotable_sentences: QuotableSummary,
    pub factual_density: f64,
    pub direct_answers: usize,
    pub has_original_content: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorship {
    pub has_author: bool,
    pub has_author_bio: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityReport {
    pub score: u32,
    pub authorship: Authorship,
    pub sources: SourceLinks,
    pub content_depth: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchemas {
    pub has_organization: bool,
    pub has_person: bool,
    pub has_product: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitiesReport {
    pub score: u32,
    pub schemas: EntitySchemas,
    pub entity_mentions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeakArea {
    pub name: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub level: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub weakest_areas: Vec<WeakArea>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickWin {
    pub action: String,
    pub reason: String,
    pub effort: Rating,
    pub impact: Rating,
}

impl From<&Recommendation> for QuickWin {
    fn from(rec: &Recommendation) -> Self {
        Self {
            action: rec.action.clone(),
            reason: rec.issue.clone(),
            effort: rec.effort,
            impact: rec.impact,
        }
    }
}

impl Scored for VisibilityResult {
    fn overall_score(&self) -> u32 {
        self.overall_score
    }
}

/// (lower bound, level, description, color), best band first
const VERDICT_BANDS: &[(u32, &str, &str, &str)] = &[
    (80, "Excellent", "Highly likely to be cited by AI answer engines", "green"),
    (65, "Good", "Likely to be cited, with room to improve", "lightgreen"),
    (50, "Fair", "May be cited occasionally; key signals are missing", "yellow"),
    (35, "Poor", "Unlikely to be cited without significant work", "orange"),
];

/// Verdict band for `overall`, naming the two weakest sub-scores.
pub fn verdict(overall: u32, scores: &ScoreCard) -> Verdict {
    let (level, description, color) = VERDICT_BANDS
        .iter()
        .find(|(floor, ..)| overall >= *floor)
        .map(|(_, l, d, c)| (*l, *d, *c))
        .unwrap_or(("Critical", "Very unlikely to be cited by AI answer engines", "red"));

    let mut areas: Vec<WeakArea> = scores
        .iter()
        .map(|s| WeakArea {
            name: s.name,
            score: s.value,
        })
        .collect();
    areas.sort_by_key(|a| a.score);
    areas.truncate(2);

    Verdict {
        level,
        description,
        color,
        weakest_areas: areas,
    }
}

pub struct VisibilityAnalyzer<'a> {
    config: &'a AuditConfig,
}

impl<'a> VisibilityAnalyzer<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    fn score_citation_potential(
        &self,
        doc: &Document,
        signals: &CitationSignals,
        headings: &HeadingInventory,
        recs: &mut Vec<Recommendation>,
    ) -> CitationPotentialReport {
        let thresholds = &self.config.thresholds;
        let quotable: QuotableSentences = quotable_sentences(doc, thresholds.quotable_max_words);
        let answers = direct_answers(
            doc,
            &headings.question_headers,
            thresholds.direct_answer_max_words,
        )
        .count;
        let original = has_original_content(doc);
        let density = signals.statistic_density;

        let mut points = proportional(f64::from(quotable.ratio), 20.0, 35.0)
            + proportional(density, 1.0, 25.0)
            + tiered(answers, 3, 20.0, 7.0);
        if original {
            points += 20.0;
        }

        if quotable.ratio < 20 {
            recs.push(
                Recommendation::new(
                    "Citation Potential",
                    Priority::Medium,
                    format!("Few quotable sentences ({}%)", quotable.ratio),
                    "Write short, self-contained sentences that each state one fact or figure",
                )
                .rated(Rating::Medium, Rating::High),
            );
        }
        if density < 1.0 {
            recs.push(Recommendation::new(
                "Citation Potential",
                Priority::Low,
                "Few facts or statistics",
                "Add specific statistics, dates and figures to support key claims",
            ));
        }
        if answers < 3 {
            recs.push(
                Recommendation::new(
                    "Citation Potential",
                    Priority::High,
                    format!("Only {answers} question(s) answered directly"),
                    "Lead each section with a one-sentence answer before elaborating",
                )
                .rated(Rating::Low, Rating::High),
            );
        }
        if !original {
            recs.push(
                Recommendation::new(
                    "Citation Potential",
                    Priority::Medium,
                    "No original research or first-hand data",
                    "Publish original data, a case study or first-hand test results",
                )
                .rated(Rating::High, Rating::High),
            );
        }

        CitationPotentialReport {
            score: to_score(points),
            quotable_sentences: QuotableSummary {
                count: quotable.count,
                ratio: quotable.ratio,
            },
            factual_density: density,
            direct_answers: answers,
            has_original_content: original,
        }
    }
}

fn score_authority(
    doc: &Document,
    signals: &CitationSignals,
    recs: &mut Vec<Recommendation>,
) -> AuthorityReport {
    let words = text_stats(doc).words;
    let mut points = tiered(signals.sources.count, 3, 30.0, 10.0);
    points += match words {
        w if w >= 1500 => 30.0,
        w if w >= 800 => 20.0,
        w if w >= 300 => 10.0,
        _ => 0.0,
    };

    if signals.has_author {
        points += 25.0;
    } else {
        recs.push(
            Recommendation::new(
                "Authority",
                Priority::High,
                "No identifiable author",
                "Add an author byline with the author's name and credentials",
            )
            .rated(Rating::Low, Rating::High),
        );
    }
    if doc.has_author_bio {
        points += 15.0;
    } else {
        recs.push(
            Recommendation::new(
                "Authority",
                Priority::Medium,
                "No author bio",
                "Add a short author bio that states the author's relevant expertise",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }
    if signals.sources.count < 3 {
        recs.push(
            Recommendation::new(
                "Authority",
                Priority::Medium,
                "Few citations to authoritative sources",
                "Link to at least 3 reputable sources that support your claims",
            )
            .rated(Rating::Low, Rating::High),
        );
    }
    if words < 800 {
        recs.push(
            Recommendation::new(
                "Authority",
                Priority::Medium,
                format!("Shallow coverage ({words} words)"),
                "Deepen the page to 1,500+ words covering related subtopics",
            )
            .rated(Rating::High, Rating::High),
        );
    }

    AuthorityReport {
        score: to_score(points),
        authorship: Authorship {
            has_author: signals.has_author,
            has_author_bio: doc.has_author_bio,
        },
        sources: signals.sources.clone(),
        content_depth: words,
    }
}

fn score_entities(
    schema: &SchemaInventory,
    mentions: usize,
    recs: &mut Vec<Recommendation>,
) -> EntitiesReport {
    let detected = &schema.detected;
    if schema.is_malformed() {
        recs.push(malformed_schema_recommendation(schema));
    }
    let mut points = tiered(mentions, 10, 35.0, 3.5);
    if detected.has_organization {
        points += 30.0;
    } else {
        recs.push(
            Recommendation::new(
                "Entities",
                Priority::Medium,
                "No Organization schema",
                "Add Organization schema with name, logo and sameAs profile links",
            )
            .rated(Rating::Low, Rating::High),
        );
    }
    if detected.has_person {
        points += 20.0;
    } else {
        recs.push(
            Recommendation::new(
                "Entities",
                Priority::Low,
                "No Person schema for the author",
                "Add Person schema for the author with name, jobTitle and sameAs links",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }
    if detected.has_product {
        points += 15.0;
    }
    if mentions < 10 {
        recs.push(Recommendation::new(
            "Entities",
            Priority::Low,
            format!("Few named entities ({mentions})"),
            "Name the specific products, people, organizations and places the topic involves",
        ));
    }

    EntitiesReport {
        score: to_score(points),
        schemas: EntitySchemas {
            has_organization: detected.has_organization,
            has_person: detected.has_person,
            has_product: detected.has_product,
        },
        entity_mentions: mentions,
    }
}

impl Analyzer for VisibilityAnalyzer<'_> {
    type Output = VisibilityResult;

    fn name(&self) -> &'static str {
        "AI Visibility Checker"
    }

    fn analyze(&self, doc: &Document, metrics: &PageMetrics) -> Result<VisibilityResult> {
        let signals = citation_signals(doc);
        let mut recommendations = Vec::new();

        let citation_potential = self.score_citation_potential(
            doc,
            &signals,
            &metrics.headings,
            &mut recommendations,
        );
        let authority = score_authority(doc, &signals, &mut recommendations);
        let entities = score_entities(
            &metrics.schema,
            entity_mentions(doc, &self.config.lexicon),
            &mut recommendations,
        );

        let scores = ScoreCard::new()
            .with("citationPotential", citation_potential.score)
            .with("authority", authority.score)
            .with("entities", entities.score);
        let w = &self.config.weights.visibility;
        let overall_score = weighted_score(&[
            (citation_potential.score, w.citation_potential),
            (authority.score, w.authority),
            (entities.score, w.entities),
        ]);
        tracing::debug!(?scores, overall_score, "visibility sub-scores");

        rank_recommendations(&mut recommendations);
        let quick_wins = recommendations
            .iter()
            .filter(|r| r.is_quick_win())
            .map(QuickWin::from)
            .collect();

        Ok(VisibilityResult {
            verdict: verdict(overall_score, &scores),
            scores,
            overall_score,
            citation_potential,
            authority,
            entities,
            quick_wins,
            recommendations,
        })
    }
}

pub fn analyze_visibility(doc: &Document, config: &AuditConfig) -> Result<VisibilityResult> {
    run(&VisibilityAnalyzer::new(config), doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockKind, SchemaBlock, TextBlock};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verdict_bands() {
        let card = ScoreCard::new().with("a", 50).with("b", 50).with("c", 90);
        assert_eq!(verdict(80, &card).level, "Excellent");
        assert_eq!(verdict(79, &card).color, "lightgreen");
        assert_eq!(verdict(50, &card).level, "Fair");
        assert_eq!(verdict(35, &card).level, "Poor");
        assert_eq!(verdict(34, &card).color, "red");
    }

    #[test]
    fn test_weakest_areas_are_stable_on_ties() {
        let card = ScoreCard::new()
            .with("citationPotential", 40)
            .with("authority", 40)
            .with("entities", 10);
        let areas = verdict(30, &card).weakest_areas;
        assert_eq!(
            areas,
            vec![
                WeakArea { name: "entities", score: 10 },
                WeakArea { name: "citationPotential", score: 40 },
            ]
        );
    }

    #[test]
    fn test_empty_page_is_critical_with_quick_wins() {
        let doc = Document::new("https://example.com");
        let result = analyze_visibility(&doc, &AuditConfig::default()).unwrap();

        assert_eq!(result.verdict.level, "Critical");
        assert_eq!(result.authority.score, 0);
        assert!(!result.quick_wins.is_empty());
        assert!(result
            .quick_wins
            .iter()
            .all(|w| w.effort == Rating::Low && w.impact == Rating::High));
    }

    #[test]
    fn test_entity_schema_points() {
        let mut doc = Document::new("https://example.com");
        doc.schema_blocks = vec![SchemaBlock {
            declared_type: None,
            raw: r#"[{"@type":"Organization"},{"@type":"Person"}]"#.into(),
        }];
        doc.blocks = vec![TextBlock {
            kind: BlockKind::Paragraph,
            text: "We found that Mozilla and Google agree.".into(),
            heading: None,
        }];
        let result = analyze_visibility(&doc, &AuditConfig::default()).unwrap();

        // org 30 + person 20 + two mentions at 3.5
        assert_eq!(result.entities.score, 57);
        assert!(result.citation_potential.has_original_content);
    }

    #[test]
    fn test_malformed_schema_block_is_reported() {
        let mut doc = Document::new("https://example.com");
        doc.schema_blocks = vec![
            SchemaBlock {
                declared_type: None,
                raw: r#"{"@type":"Organization"}"#.into(),
            },
            SchemaBlock {
                declared_type: None,
                raw: "{not json".into(),
            },
        ];
        let result = analyze_visibility(&doc, &AuditConfig::default()).unwrap();

        assert!(result.entities.schemas.has_organization);
        let fix = result
            .recommendations
            .iter()
            .find(|r| r.action.starts_with("Fix the JSON syntax"))
            .unwrap();
        assert_eq!(fix.priority, Priority::High);
        assert!(result.quick_wins.iter().any(|w| w.action == fix.action));
    }
}
