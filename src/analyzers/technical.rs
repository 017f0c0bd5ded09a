//! Technical AEO audit: can answer engines reach, parse and navigate the page?
//!
//! Four checklist sub-scores (schema, crawlability, structure, accessibility),
//! each a sum of fixed point values, averaged without weights.

use super::{malformed_schema_recommendation, run, Analyzer, Scored};
use crate::core::{MetricFailure, Priority, Rating, Recommendation, Result, ScoreCard};
use crate::document::{BlockKind, Document};
use crate::metrics::{text_stats, DetectedSchemas, HeadingInventory, PageMetrics, SchemaInventory};
use crate::priority::rank_recommendations;
use crate::scoring::{mean_score, proportional, to_score};
use serde::Serialize;

const GENERIC_LINK_TEXT: &[&str] = &[
    "", "click here", "here", "read more", "learn more", "more", "link", "this",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalResult {
    pub scores: ScoreCard,
    pub overall_score: u32,
    pub schema: SchemaReport,
    pub crawlability: CrawlabilityReport,
    pub structure: StructureReport,
    pub accessibility: AccessibilityReport,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    pub score: u32,
    pub has_schema: bool,
    pub count: usize,
    pub detected: DetectedSchemas,
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<MetricFailure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlabilityReport {
    pub score: u32,
    pub is_indexable: bool,
    pub is_followable: bool,
    #[serde(rename = "hasHTTPS")]
    pub has_https: bool,
    pub has_canonical: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadingCount {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderCounts {
    pub h1: HeadingCount,
    pub h2: HeadingCount,
    pub h3: HeadingCount,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListCount {
    pub items: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub score: u32,
    pub headers: HeaderCounts,
    pub word_count: usize,
    pub lists: ListCount,
    pub title_length: usize,
    pub meta_description_length: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub score: u32,
    pub has_lang: bool,
    pub images: usize,
    pub images_with_alt: usize,
    pub heading_skips: usize,
    pub links: usize,
    pub descriptive_links: usize,
}

impl Scored for TechnicalResult {
    fn overall_score(&self) -> u32 {
        self.overall_score
    }
}

/// Checklist scoring needs no tunables, so the analyzer carries no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicalAnalyzer;

impl Analyzer for TechnicalAnalyzer {
    type Output = TechnicalResult;

    fn name(&self) -> &'static str {
        "Technical AEO Audit"
    }

    fn analyze(&self, doc: &Document, metrics: &PageMetrics) -> Result<TechnicalResult> {
        let mut recommendations = Vec::new();
        let headings = &metrics.headings;

        let schema = score_schema(&metrics.schema, &mut recommendations);
        let crawlability = score_crawlability(doc, &mut recommendations);
        let structure = score_structure(doc, headings, &mut recommendations);
        let accessibility = score_accessibility(doc, headings, &mut recommendations);

        let scores = ScoreCard::new()
            .with("schema", schema.score)
            .with("crawlability", crawlability.score)
            .with("structure", structure.score)
            .with("accessibility", accessibility.score);
        let overall_score = mean_score(&scores.values());
        tracing::debug!(?scores, overall_score, "technical sub-scores");

        rank_recommendations(&mut recommendations);
        Ok(TechnicalResult {
            scores,
            overall_score,
            schema,
            crawlability,
            structure,
            accessibility,
            recommendations,
        })
    }
}

pub fn analyze_technical(doc: &Document) -> Result<TechnicalResult> {
    run(&TechnicalAnalyzer, doc)
}

fn score_schema(inventory: &SchemaInventory, recs: &mut Vec<Recommendation>) -> SchemaReport {
    let d = &inventory.detected;
    let points = [
        (inventory.has_schema, 40.0),
        (d.has_faq, 20.0),
        (d.has_article, 15.0),
        (d.has_organization, 15.0),
        (d.has_person || d.has_product, 10.0),
    ]
    .iter()
    .filter(|(ok, _)| *ok)
    .map(|(_, pts)| pts)
    .sum::<f64>();

    let score = if inventory.is_malformed() {
        recs.push(malformed_schema_recommendation(inventory));
        0
    } else {
        to_score(points)
    };

    if !inventory.has_schema {
        recs.push(
            Recommendation::new(
                "Schema",
                Priority::High,
                "No structured data found",
                "Add JSON-LD structured data (Article, FAQPage, Organization) so answer engines understand the page",
            )
            .rated(Rating::Medium, Rating::High),
        );
    } else {
        if !d.has_faq {
            recs.push(
                Recommendation::new(
                    "Schema",
                    Priority::Medium,
                    "No FAQPage schema",
                    "Add FAQPage schema that marks up the questions and answers on the page",
                )
                .rated(Rating::Low, Rating::High),
            );
        }
        if !d.has_article {
            recs.push(
                Recommendation::new(
                    "Schema",
                    Priority::Low,
                    "No Article schema",
                    "Add Article schema with headline, author and datePublished",
                )
                .rated(Rating::Low, Rating::Medium),
            );
        }
        if !d.has_organization {
            recs.push(
                Recommendation::new(
                    "Schema",
                    Priority::Low,
                    "No Organization schema",
                    "Add Organization schema with name, logo and sameAs profile links",
                )
                .rated(Rating::Low, Rating::Medium),
            );
        }
        if !(d.has_person || d.has_product) {
            recs.push(
                Recommendation::new(
                    "Schema",
                    Priority::Low,
                    "No Person or Product schema",
                    "Add Person schema for the author, or Product schema when the page describes a product",
                )
                .rated(Rating::Low, Rating::Medium),
            );
        }
    }

    SchemaReport {
        score,
        has_schema: inventory.has_schema,
        count: inventory.count,
        detected: *d,
        types: inventory.types.clone(),
        errors: inventory.failures.clone(),
    }
}

fn score_crawlability(doc: &Document, recs: &mut Vec<Recommendation>) -> CrawlabilityReport {
    let checks = [
        (doc.robots_allows_index, 40.0),
        (doc.robots_allows_follow, 15.0),
        (doc.has_https, 30.0),
        (doc.has_canonical, 15.0),
    ];
    let points: f64 = checks.iter().filter(|(ok, _)| *ok).map(|(_, p)| p).sum();

    if !doc.robots_allows_index {
        recs.push(
            Recommendation::new(
                "Crawlability",
                Priority::Critical,
                "Page is blocked from indexing (noindex)",
                "Remove the noindex directive from the robots meta tag so answer engines can index the page",
            )
            .rated(Rating::Low, Rating::High),
        );
    }
    if !doc.has_https {
        recs.push(
            Recommendation::new(
                "Crawlability",
                Priority::Critical,
                "Page is not served over HTTPS",
                "Serve the page over HTTPS and redirect plain HTTP requests to the secure URL",
            )
            .rated(Rating::Medium, Rating::High),
        );
    }
    if !doc.robots_allows_follow {
        recs.push(
            Recommendation::new(
                "Crawlability",
                Priority::Medium,
                "Links are marked nofollow",
                "Remove nofollow from the robots meta tag so crawlers can follow links to related pages",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }
    if !doc.has_canonical {
        recs.push(
            Recommendation::new(
                "Crawlability",
                Priority::Medium,
                "No canonical URL declared",
                "Add a <link rel=\"canonical\"> tag that points to the preferred URL of the page",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }

    CrawlabilityReport {
        score: to_score(points),
        is_indexable: doc.robots_allows_index,
        is_followable: doc.robots_allows_follow,
        has_https: doc.has_https,
        has_canonical: doc.has_canonical,
    }
}

fn score_structure(
    doc: &Document,
    headings: &HeadingInventory,
    recs: &mut Vec<Recommendation>,
) -> StructureReport {
    let h1 = headings.count(1);
    let h2 = headings.count(2);
    let word_count = text_stats(doc).words;
    let list_items = doc
        .blocks
        .iter()
        .filter(|b| matches!(b.kind, BlockKind::ListItem | BlockKind::OrderedListItem))
        .count();
    let title_length = doc.title_text().chars().count();
    let meta_length = doc.meta_text().chars().count();

    let mut points = 0.0;

    points += match h1 {
        1 => 25.0,
        0 => {
            recs.push(
                Recommendation::new(
                    "Structure",
                    Priority::Medium,
                    "Missing H1 heading",
                    "Add a single H1 heading that states the main topic of the page",
                )
                .rated(Rating::Low, Rating::High),
            );
            0.0
        }
        n => {
            recs.push(Recommendation::new(
                "Structure",
                Priority::Low,
                format!("Multiple H1 headings ({n})"),
                "Keep one H1 heading and demote the others to H2",
            ));
            10.0
        }
    };

    points += match h2 {
        n if n >= 3 => 20.0,
        n => {
            recs.push(Recommendation::new(
                "Structure",
                Priority::Medium,
                format!("Only {n} H2 subheading(s)"),
                "Break the content into sections with at least 3 descriptive H2 headings",
            ));
            if n >= 1 {
                10.0
            } else {
                0.0
            }
        }
    };

    points += match word_count {
        n if n >= 500 => 20.0,
        n => {
            recs.push(Recommendation::new(
                "Structure",
                if n >= 300 { Priority::Low } else { Priority::Medium },
                format!("Thin content ({n} words)"),
                "Expand the page to at least 500 words of substantive content",
            ));
            if n >= 300 {
                10.0
            } else {
                0.0
            }
        }
    };

    if list_items > 0 {
        points += 10.0;
    } else {
        recs.push(
            Recommendation::new(
                "Structure",
                Priority::Low,
                "No lists found",
                "Use bulleted or numbered lists for steps, features and key points",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }

    points += match title_length {
        10..=70 => 15.0,
        0 => {
            recs.push(
                Recommendation::new(
                    "Structure",
                    Priority::Medium,
                    "Missing page title",
                    "Add a descriptive <title> of 10-70 characters",
                )
                .rated(Rating::Low, Rating::High),
            );
            0.0
        }
        n => {
            recs.push(Recommendation::new(
                "Structure",
                Priority::Low,
                format!("Title length ({n} characters) is outside 10-70"),
                "Rewrite the page title to between 10 and 70 characters",
            ));
            8.0
        }
    };

    points += match meta_length {
        50..=160 => 10.0,
        0 => {
            recs.push(
                Recommendation::new(
                    "Structure",
                    Priority::Medium,
                    "Missing meta description",
                    "Add a 50-160 character meta description that summarizes the answer the page gives",
                )
                .rated(Rating::Low, Rating::High),
            );
            0.0
        }
        n => {
            recs.push(Recommendation::new(
                "Structure",
                Priority::Low,
                format!("Meta description length ({n} characters) is outside 50-160"),
                "Rewrite the meta description to between 50 and 160 characters",
            ));
            5.0
        }
    };

    StructureReport {
        score: to_score(points),
        headers: HeaderCounts {
            h1: HeadingCount { count: h1 },
            h2: HeadingCount { count: h2 },
            h3: HeadingCount {
                count: headings.count(3),
            },
        },
        word_count,
        lists: ListCount { items: list_items },
        title_length,
        meta_description_length: meta_length,
    }
}

fn score_accessibility(
    doc: &Document,
    headings: &HeadingInventory,
    recs: &mut Vec<Recommendation>,
) -> AccessibilityReport {
    let has_lang = doc.lang.as_deref().is_some_and(|l| !l.trim().is_empty());
    let images = doc.images.len();
    let images_with_alt = doc
        .images
        .iter()
        .filter(|img| img.alt.as_deref().is_some_and(|a| !a.trim().is_empty()))
        .count();
    let links = doc.links.len();
    let descriptive_links = doc
        .links
        .iter()
        .filter(|l| !GENERIC_LINK_TEXT.contains(&l.text.trim().to_lowercase().as_str()))
        .count();

    let mut points = 0.0;
    if has_lang {
        points += 25.0;
    } else {
        recs.push(
            Recommendation::new(
                "Accessibility",
                Priority::Medium,
                "Missing lang attribute",
                "Declare the page language with <html lang=\"...\">",
            )
            .rated(Rating::Low, Rating::Medium),
        );
    }

    points += proportional(images_with_alt as f64, images as f64, 35.0);
    if images_with_alt < images {
        recs.push(Recommendation::new(
            "Accessibility",
            Priority::Medium,
            format!("{} of {} images lack alt text", images - images_with_alt, images),
            "Add descriptive alt text to every informative image",
        ));
    }

    if headings.hierarchy_skips == 0 {
        points += 20.0;
    } else {
        recs.push(Recommendation::new(
            "Accessibility",
            Priority::Low,
            format!("Heading levels skip {} time(s)", headings.hierarchy_skips),
            "Use headings in order (H1, H2, H3) without skipping levels",
        ));
    }

    points += proportional(descriptive_links as f64, links as f64, 20.0);
    if descriptive_links < links {
        recs.push(Recommendation::new(
            "Accessibility",
            Priority::Low,
            format!("{} link(s) use generic anchor text", links - descriptive_links),
            "Replace generic link text such as 'click here' with descriptive anchor text",
        ));
    }

    AccessibilityReport {
        score: to_score(points),
        has_lang,
        images,
        images_with_alt,
        heading_skips: headings.hierarchy_skips,
        links,
        descriptive_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Heading, Image, SchemaBlock, TextBlock};

    fn analyze(doc: &Document) -> TechnicalResult {
        analyze_technical(doc).unwrap()
    }

    #[test]
    fn test_blocked_insecure_page_scores_low() {
        let mut doc = Document::new("http://example.com");
        doc.robots_allows_index = false;
        let result = analyze(&doc);

        assert_eq!(result.scores.get("schema"), Some(0));
        assert!(result.scores.get("crawlability").unwrap() <= 30);
        assert!(result.overall_score < 40);
        assert_eq!(result.recommendations[0].priority, Priority::Critical);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.priority == Priority::Critical && r.issue.contains("noindex")));
    }

    #[test]
    fn test_crawlability_points() {
        let mut doc = Document::new("https://example.com");
        doc.has_canonical = true;
        assert_eq!(analyze(&doc).crawlability.score, 100);
        doc.robots_allows_follow = false;
        assert_eq!(analyze(&doc).crawlability.score, 85);
    }

    #[test]
    fn test_malformed_schema_forces_zero_and_recommends_fix() {
        let mut doc = Document::new("https://example.com");
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
        let result = analyze(&doc);
        assert_eq!(result.schema.score, 0);
        assert!(result.schema.detected.has_faq);
        assert_eq!(result.schema.errors.len(), 1);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.action.starts_with("Fix the JSON syntax")));
    }

    #[test]
    fn test_person_or_product_schema_recommended() {
        let mut doc = Document::new("https://example.com");
        doc.schema_blocks = vec![SchemaBlock {
            declared_type: None,
            raw: r#"{"@type":"Article"}"#.into(),
        }];
        let result = analyze(&doc);
        assert_eq!(result.schema.score, 55);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.issue == "No Person or Product schema" && r.priority == Priority::Low));

        doc.schema_blocks[0].raw = r#"[{"@type":"Article"},{"@type":"Product"}]"#.into();
        let result = analyze(&doc);
        assert_eq!(result.schema.score, 65);
        assert!(!result
            .recommendations
            .iter()
            .any(|r| r.issue == "No Person or Product schema"));
    }

    #[test]
    fn test_structure_and_accessibility() {
        let mut doc = Document::new("https://example.com");
        doc.title = Some("A well sized page title".into());
        doc.lang = Some("en".into());
        doc.headings = vec![
            Heading { level: 1, text: "Guide".into() },
            Heading { level: 3, text: "Skipped".into() },
        ];
        doc.blocks = vec![TextBlock {
            kind: BlockKind::ListItem,
            text: "one item".into(),
            heading: Some(0),
        }];
        doc.images = vec![
            Image { src: "a.png".into(), alt: Some("A chart".into()) },
            Image { src: "b.png".into(), alt: None },
        ];
        let result = analyze(&doc);

        // H1 25 + no H2 0 + thin 0 + list 10 + title 15 + no meta 0
        assert_eq!(result.structure.score, 50);
        // lang 25 + half alt 17.5 + skip 0 + no links 20
        assert_eq!(result.accessibility.score, 63);
    }

    #[test]
    fn test_overall_is_mean_of_sub_scores() {
        let doc = Document::new("https://example.com");
        let result = analyze(&doc);
        assert_eq!(
            result.overall_score,
            crate::scoring::mean_score(&result.scores.values())
        );
    }
}
