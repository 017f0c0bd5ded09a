//! Full audit: run every analyzer over one document and merge the results.

use crate::analyzers::{
    run_with, ContentAnalyzer, ContentResult, QueryList, QueryMatchAnalyzer, QueryMatchResult,
    TechnicalAnalyzer, TechnicalResult, VisibilityAnalyzer, VisibilityResult,
};
use crate::analyzers::visibility::{QuickWin, Verdict};
use crate::config::AuditConfig;
use crate::core::{Recommendation, Result, ResultExt, ScoreCard};
use crate::document::Document;
use crate::metrics::PageMetrics;
use crate::priority::{leading, top_recommendations};
use crate::scoring::mean_score;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const FULL_AUDIT_TOOL: &str = "Full AEO Audit";

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzerSummary {
    pub score: u32,
    pub scores: ScoreCard,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilitySummary {
    pub score: u32,
    pub verdict: Verdict,
    pub quick_wins: Vec<QuickWin>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryScore {
    pub query: String,
    pub score: u32,
    pub level: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryMatchSummary {
    pub score: u32,
    pub queries: Vec<QueryScore>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAuditResult {
    pub tool: &'static str,
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub combined_score: u32,
    pub technical: AnalyzerSummary,
    pub content: AnalyzerSummary,
    pub visibility: VisibilitySummary,
    /// `null` when no queries were supplied
    pub query_match: Option<QueryMatchSummary>,
    pub top_recommendations: Vec<Recommendation>,
}

struct AnalyzerOutputs {
    technical: TechnicalResult,
    content: ContentResult,
    visibility: VisibilityResult,
    query_match: Option<QueryMatchResult>,
}

fn run_analyzers(
    doc: &Document,
    metrics: &PageMetrics,
    queries: Option<&QueryList>,
    config: &AuditConfig,
) -> Result<AnalyzerOutputs> {
    let technical = || run_with(&TechnicalAnalyzer, doc, metrics);
    let content = || run_with(&ContentAnalyzer::new(config), doc, metrics);
    let visibility = || run_with(&VisibilityAnalyzer::new(config), doc, metrics);
    let query_match = || {
        queries
            .map(|q| run_with(&QueryMatchAnalyzer::new(config, q), doc, metrics))
            .transpose()
    };

    if config.aggregation.parallel {
        let ((technical, content), (visibility, query_match)) = rayon::join(
            || rayon::join(technical, content),
            || rayon::join(visibility, query_match),
        );
        Ok(AnalyzerOutputs {
            technical: technical?,
            content: content?,
            visibility: visibility?,
            query_match: query_match?,
        })
    } else {
        Ok(AnalyzerOutputs {
            technical: technical()?,
            content: content()?,
            visibility: visibility()?,
            query_match: query_match()?,
        })
    }
}

/// Run the technical, content and visibility analyzers, plus query match
/// when `queries` is given, and merge them into one report.
///
/// The document is validated and its [`PageMetrics`] derived once, then
/// shared by every analyzer. Any analyzer error aborts the whole audit and
/// keeps its error kind.
pub fn run_full_audit(
    doc: &Document,
    queries: Option<&QueryList>,
    config: &AuditConfig,
) -> Result<CombinedAuditResult> {
    let _span = tracing::info_span!("full_audit", url = %doc.url).entered();
    doc.validate().context("full audit aborted")?;
    let metrics = PageMetrics::derive(doc);
    let outputs = run_analyzers(doc, &metrics, queries, config).context("full audit aborted")?;
    Ok(combine(&doc.url, outputs, config))
}

fn combine(url: &str, outputs: AnalyzerOutputs, config: &AuditConfig) -> CombinedAuditResult {
    let AnalyzerOutputs {
        technical,
        content,
        visibility,
        query_match,
    } = outputs;
    let agg = &config.aggregation;
    let summary_len = agg.summary_recommendations;

    let mut overall = vec![
        technical.overall_score,
        content.overall_score,
        visibility.overall_score,
    ];
    overall.extend(query_match.as_ref().map(|q| q.overall_score));
    let combined_score = mean_score(&overall);

    let all_recommendations = technical
        .recommendations
        .iter()
        .chain(&content.recommendations)
        .chain(&visibility.recommendations)
        .chain(query_match.iter().flat_map(|q| &q.recommendations))
        .cloned();
    let top = top_recommendations(all_recommendations, agg.dedup_prefix, agg.top_recommendations);

    tracing::info!(combined_score, analyzers = overall.len(), "full audit complete");

    CombinedAuditResult {
        tool: FULL_AUDIT_TOOL,
        url: url.to_string(),
        analyzed_at: Utc::now(),
        combined_score,
        technical: AnalyzerSummary {
            score: technical.overall_score,
            recommendations: leading(&technical.recommendations, summary_len),
            scores: technical.scores,
        },
        content: AnalyzerSummary {
            score: content.overall_score,
            recommendations: leading(&content.recommendations, summary_len),
            scores: content.scores,
        },
        visibility: VisibilitySummary {
            score: visibility.overall_score,
            recommendations: leading(&visibility.recommendations, summary_len),
            verdict: visibility.verdict,
            quick_wins: visibility.quick_wins,
        },
        query_match: query_match.map(|q| QueryMatchSummary {
            score: q.overall_score,
            recommendations: leading(&q.recommendations, summary_len),
            queries: q
                .queries
                .into_iter()
                .map(|entry| QueryScore {
                    level: entry.match_level.level,
                    score: entry.match_score,
                    query: entry.query,
                })
                .collect(),
        }),
        top_recommendations: top,
    }
}
