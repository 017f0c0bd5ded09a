//! Query match: how well does the page answer each target query?
//!
//! Matching is lexical. "Semantic" coverage is a weighted presence check of
//! query terms across title, headings, meta description and body, not an
//! embedding similarity.

use super::{run, Analyzer, Scored};
use crate::config::AuditConfig;
use crate::core::{Error, Priority, Rating, Recommendation, Result, ScoreCard};
use crate::document::Document;
use crate::metrics::citations::is_quotable;
use crate::metrics::qa::is_direct_answer;
use crate::metrics::text::{content_terms, split_sentences, stem, terms};
use crate::metrics::{direct_answers, PageMetrics};
use crate::priority::rank_recommendations;
use crate::scoring::{mean_score, to_score, weighted_score};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Queries beyond this position are ignored.
pub const MAX_QUERIES: usize = 10;

static PRICE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([$€£]\s?\d|\bprice\b|\bbuy\b|\badd to cart\b)").expect("static regex")
});

const COMPARISON_CUES: &[&str] = &["vs", "versus", "best", "compare", "top", "alternative", "alternatives"];
const TRANSACTIONAL_CUES: &[&str] = &[
    "buy", "price", "pricing", "cost", "cheap", "deal", "discount", "order", "coupon",
];
const NAVIGATIONAL_CUES: &[&str] = &["login", "official", "website", "homepage"];

/// A validated, non-empty list of target queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryList(Vec<String>);

impl QueryList {
    /// Keep the first [`MAX_QUERIES`] raw entries, then trim and drop blanks.
    pub fn new<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_limit(raw, MAX_QUERIES)
    }

    pub fn with_limit<I, S>(raw: I, limit: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let queries: Vec<String> = raw
            .into_iter()
            .take(limit)
            .map(|q| q.as_ref().trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if queries.is_empty() {
            return Err(Error::invalid_input("At least one valid query is required"));
        }
        Ok(Self(queries))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through [`QueryList::new`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Informational,
    Comparison,
    Transactional,
    Navigational,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Intent, &str)] = &[
            (Intent::Informational, "informational"),
            (Intent::Comparison, "comparison"),
            (Intent::Transactional, "transactional"),
            (Intent::Navigational, "navigational"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(i, _)| i == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

/// Classify a query, first matching rule wins.
pub fn classify_intent(query: &str) -> Intent {
    let tokens = terms(query);
    let has_any = |cues: &[&str]| tokens.iter().any(|t| cues.contains(&t.as_str()));

    if has_any(COMPARISON_CUES) {
        Intent::Comparison
    } else if has_any(TRANSACTIONAL_CUES) {
        Intent::Transactional
    } else if has_any(NAVIGATIONAL_CUES) || query.to_lowercase().contains("sign in") {
        Intent::Navigational
    } else {
        Intent::Informational
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchLevel {
    pub level: &'static str,
    pub description: &'static str,
}

pub fn match_level(score: u32) -> MatchLevel {
    let (level, description) = match score {
        s if s >= 80 => ("Strong", "Page directly answers this query and is well placed to be cited"),
        s if s >= 65 => ("Good", "Page covers this query with minor gaps"),
        s if s >= 45 => ("Moderate", "Page partially addresses this query"),
        _ => ("Weak", "Page does not adequately address this query"),
    };
    MatchLevel { level, description }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Improvement {
    pub issue: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatchEntry {
    pub query: String,
    pub scores: ScoreCard,
    pub intent: Intent,
    pub match_score: u32,
    pub match_level: MatchLevel,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentGap {
    pub query: String,
    pub issue: String,
    pub solution: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMatchResult {
    pub scores: ScoreCard,
    pub overall_score: u32,
    pub queries_analyzed: usize,
    pub queries: Vec<QueryMatchEntry>,
    pub content_gaps: Vec<ContentGap>,
    pub recommendations: Vec<Recommendation>,
}

impl Scored for QueryMatchResult {
    fn overall_score(&self) -> u32 {
        self.overall_score
    }
}

/// Stemmed term sets for each region of the page, built once per document.
struct PageIndex {
    title: HashSet<String>,
    headings: Vec<HashSet<String>>,
    all_headings: HashSet<String>,
    meta: HashSet<String>,
    body: HashSet<String>,
    question_headers: usize,
    direct_answers: usize,
    comparison_layout: bool,
    commerce_signals: bool,
}

fn stemmed_set(text: &str) -> HashSet<String> {
    terms(text).iter().map(|t| stem(t).to_string()).collect()
}

fn coverage(set: &HashSet<String>, query_terms: &[String]) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let matched = query_terms.iter().filter(|t| set.contains(*t)).count();
    matched as f64 / query_terms.len() as f64
}

/// Matches needed for "at least half the terms", never less than one.
fn half_of(len: usize) -> usize {
    len.div_ceil(2).max(1)
}

impl PageIndex {
    fn build(doc: &Document, metrics: &PageMetrics, config: &AuditConfig) -> Self {
        let headings: Vec<HashSet<String>> =
            doc.headings.iter().map(|h| stemmed_set(&h.text)).collect();
        let all_headings = headings.iter().flatten().cloned().collect();
        let body_text = doc.body_text();
        let questions = &metrics.headings.question_headers;
        let answers = direct_answers(
            doc,
            questions,
            config.thresholds.direct_answer_max_words,
        );
        let comparison_heading = doc.headings.iter().any(|h| {
            let lower = h.text.to_lowercase();
            terms(&lower).iter().any(|t| t == "vs" || t == "versus") || lower.contains("compar")
        });

        Self {
            title: stemmed_set(doc.title_text()),
            headings,
            all_headings,
            meta: stemmed_set(doc.meta_text()),
            body: stemmed_set(&body_text),
            question_headers: questions.count,
            direct_answers: answers.count,
            comparison_layout: doc.tables > 0 || comparison_heading,
            commerce_signals: metrics.schema.detected.has_product
                || PRICE_TEXT.is_match(&body_text),
        }
    }

    fn any_region(&self, term: &str) -> bool {
        self.title.contains(term)
            || self.meta.contains(term)
            || self.all_headings.contains(term)
            || self.body.contains(term)
    }

    fn has_cue_for(&self, intent: Intent, query_terms: &[String]) -> bool {
        match intent {
            Intent::Informational => self.question_headers > 0 || self.direct_answers > 0,
            Intent::Comparison => self.comparison_layout,
            Intent::Transactional => self.commerce_signals,
            Intent::Navigational => query_terms.iter().any(|t| self.title.contains(t)),
        }
    }
}

pub struct QueryMatchAnalyzer<'a> {
    config: &'a AuditConfig,
    queries: &'a QueryList,
}

impl<'a> QueryMatchAnalyzer<'a> {
    pub fn new(config: &'a AuditConfig, queries: &'a QueryList) -> Self {
        Self { config, queries }
    }

    fn query_terms(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        content_terms(query, &self.config.lexicon)
            .iter()
            .map(|t| stem(t).to_string())
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }

    fn answer_quality(&self, doc: &Document, page: &PageIndex, query_terms: &[String]) -> u32 {
        let need = half_of(query_terms.len());
        let max_words = self.config.thresholds.direct_answer_max_words;

        let candidates: Vec<usize> = page
            .headings
            .iter()
            .enumerate()
            .filter(|(_, set)| query_terms.iter().filter(|t| set.contains(*t)).count() >= need)
            .map(|(index, _)| index)
            .collect();

        if candidates.is_empty() {
            let quotable_max = self.config.thresholds.quotable_max_words;
            let supported = doc
                .blocks
                .iter()
                .flat_map(|b| split_sentences(&b.text))
                .filter(|s| is_quotable(s, quotable_max))
                .any(|s| {
                    let set = stemmed_set(s);
                    query_terms.iter().filter(|t| set.contains(*t)).count() >= need
                });
            return if supported { 50 } else { 0 };
        }

        candidates
            .iter()
            .map(|&index| {
                doc.section(index)
                    .flat_map(|b| split_sentences(&b.text))
                    .take(3)
                    .position(|s| is_direct_answer(s, max_words))
                    .map_or(40, |pos| if pos == 0 { 100 } else { 80 })
            })
            .max()
            .unwrap_or(0)
    }

    fn analyze_query(&self, doc: &Document, page: &PageIndex, query: &str) -> QueryMatchEntry {
        let query_terms = self.query_terms(query);
        let intent = classify_intent(query);

        let matched = query_terms.iter().filter(|t| page.any_region(t)).count();
        let keywords = if query_terms.is_empty() {
            0
        } else {
            to_score(matched as f64 * 100.0 / query_terms.len() as f64)
        };
        let semantic = to_score(
            coverage(&page.title, &query_terms) * 35.0
                + coverage(&page.all_headings, &query_terms) * 35.0
                + coverage(&page.meta, &query_terms) * 10.0
                + coverage(&page.body, &query_terms) * 20.0,
        );
        let intent_score = if page.has_cue_for(intent, &query_terms) { 100 } else { 40 };
        let answer_quality = self.answer_quality(doc, page, &query_terms);

        let w = &self.config.weights.query_match;
        let match_score = weighted_score(&[
            (keywords, w.keywords),
            (semantic, w.semantic),
            (intent_score, w.intent),
            (answer_quality, w.answer_quality),
        ]);
        let scores = ScoreCard::new()
            .with("keywords", keywords)
            .with("semantic", semantic)
            .with("intent", intent_score)
            .with("answerQuality", answer_quality);

        let missing: Vec<&str> = query_terms
            .iter()
            .filter(|t| !page.any_region(t))
            .map(String::as_str)
            .collect();
        let improvements = self.improvements(query, intent, &scores, &missing);

        tracing::debug!(query, match_score, %intent, "query scored");
        QueryMatchEntry {
            query: query.to_string(),
            scores,
            intent,
            match_score,
            match_level: match_level(match_score),
            improvements,
        }
    }

    /// One micro-action per weak sub-metric, weakest first.
    fn improvements(
        &self,
        query: &str,
        intent: Intent,
        scores: &ScoreCard,
        missing: &[&str],
    ) -> Vec<Improvement> {
        let good = self.config.thresholds.good_score;
        let mut weak: Vec<_> = scores.iter().filter(|s| s.value < good).collect();
        weak.sort_by_key(|s| s.value);

        weak.into_iter()
            .take(3)
            .map(|s| match s.name {
                "keywords" => Improvement {
                    issue: "Query terms missing from the page".into(),
                    action: format!("Use the terms \"{}\" in a heading and the opening paragraph", missing.join(", ")),
                },
                "semantic" => Improvement {
                    issue: "Query terms absent from title and headings".into(),
                    action: "Work the query's key terms into the page title and an H2".into(),
                },
                "intent" => Improvement {
                    issue: format!("Page format does not match {intent} intent"),
                    action: intent_action(intent).into(),
                },
                _ => Improvement {
                    issue: "No direct answer to this query".into(),
                    action: format!("Add a heading phrased as \"{query}\" followed by a one-sentence answer"),
                },
            })
            .collect()
    }
}

fn intent_action(intent: Intent) -> &'static str {
    match intent {
        Intent::Informational => "Add a question heading followed by a short, direct answer",
        Intent::Comparison => "Add a comparison table or a heading that compares the options side by side",
        Intent::Transactional => "Show pricing and a clear call to action near the top of the page",
        Intent::Navigational => "Put the brand or destination name in the page title",
    }
}

impl Analyzer for QueryMatchAnalyzer<'_> {
    type Output = QueryMatchResult;

    fn name(&self) -> &'static str {
        "Query Match Analyzer"
    }

    fn analyze(&self, doc: &Document, metrics: &PageMetrics) -> Result<QueryMatchResult> {
        let page = PageIndex::build(doc, metrics, self.config);
        let thresholds = &self.config.thresholds;

        let queries: Vec<QueryMatchEntry> = self
            .queries
            .iter()
            .map(|q| self.analyze_query(doc, &page, q))
            .collect();

        let sub_mean = |name: &str| {
            let values: Vec<u32> = queries.iter().filter_map(|q| q.scores.get(name)).collect();
            mean_score(&values)
        };
        let scores = ScoreCard::new()
            .with("keywords", sub_mean("keywords"))
            .with("semantic", sub_mean("semantic"))
            .with("intent", sub_mean("intent"))
            .with("answerQuality", sub_mean("answerQuality"));
        let match_scores: Vec<u32> = queries.iter().map(|q| q.match_score).collect();
        let overall_score = mean_score(&match_scores);

        let mut content_gaps = Vec::new();
        let mut recommendations = Vec::new();
        for entry in &queries {
            let q = &entry.query;
            if entry.match_score < thresholds.weak_match {
                content_gaps.push(ContentGap {
                    query: q.clone(),
                    issue: format!("No content targets \"{q}\""),
                    solution: format!(
                        "Create a section with \"{q}\" as its heading and a direct answer in the first sentence"
                    ),
                });
                recommendations.push(Recommendation::new(
                    "Query Match",
                    Priority::High,
                    format!("Weak match for \"{q}\" ({})", entry.match_score),
                    format!("Answer \"{q}\" in a dedicated section with the query terms in its heading"),
                ));
            } else if entry.match_score < thresholds.moderate_match {
                recommendations.push(Recommendation::new(
                    "Query Match",
                    Priority::Medium,
                    format!("Partial match for \"{q}\" ({})", entry.match_score),
                    format!("Strengthen coverage of \"{q}\" with a heading and a direct answer"),
                ));
            }
        }

        if scores.get("answerQuality").unwrap_or(0) < 50 && page.question_headers == 0 {
            recommendations.push(
                Recommendation::new(
                    "Query Match",
                    Priority::Medium,
                    "No question-and-answer content for the target queries",
                    "Add an FAQ section that phrases the target queries as headings with direct answers",
                )
                .rated(Rating::Low, Rating::High),
            );
        }

        tracing::debug!(?scores, overall_score, "query match sub-scores");
        rank_recommendations(&mut recommendations);
        Ok(QueryMatchResult {
            scores,
            overall_score,
            queries_analyzed: queries.len(),
            queries,
            content_gaps,
            recommendations,
        })
    }
}

pub fn analyze_query_match(
    doc: &Document,
    queries: &QueryList,
    config: &AuditConfig,
) -> Result<QueryMatchResult> {
    run(&QueryMatchAnalyzer::new(config, queries), doc)
}
