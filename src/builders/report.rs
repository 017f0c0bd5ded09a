//! Report envelopes handed to the output writers.

use super::full_audit::CombinedAuditResult;
use crate::analyzers::{ContentResult, QueryMatchResult, TechnicalResult, VisibilityResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single-tool result stamped with the tool name, URL and analysis time.
///
/// The result's own fields are flattened into the envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReport<T> {
    pub tool: &'static str,
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: T,
}

impl<T> ToolReport<T> {
    pub fn new(tool: &'static str, url: impl Into<String>, result: T) -> Self {
        Self {
            tool,
            url: url.into(),
            analyzed_at: Utc::now(),
            result,
        }
    }
}

/// Everything a writer can render.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuditReport {
    Technical(ToolReport<TechnicalResult>),
    Content(ToolReport<ContentResult>),
    QueryMatch(ToolReport<QueryMatchResult>),
    Visibility(ToolReport<VisibilityResult>),
    Full(CombinedAuditResult),
}

impl AuditReport {
    pub fn tool(&self) -> &'static str {
        match self {
            AuditReport::Technical(r) => r.tool,
            AuditReport::Content(r) => r.tool,
            AuditReport::QueryMatch(r) => r.tool,
            AuditReport::Visibility(r) => r.tool,
            AuditReport::Full(r) => r.tool,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            AuditReport::Technical(r) => &r.url,
            AuditReport::Content(r) => &r.url,
            AuditReport::QueryMatch(r) => &r.url,
            AuditReport::Visibility(r) => &r.url,
            AuditReport::Full(r) => &r.url,
        }
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        match self {
            AuditReport::Technical(r) => r.analyzed_at,
            AuditReport::Content(r) => r.analyzed_at,
            AuditReport::QueryMatch(r) => r.analyzed_at,
            AuditReport::Visibility(r) => r.analyzed_at,
            AuditReport::Full(r) => r.analyzed_at,
        }
    }

    /// Headline score: the tool's overall score, or the combined score
    pub fn score(&self) -> u32 {
        match self {
            AuditReport::Technical(r) => r.result.overall_score,
            AuditReport::Content(r) => r.result.overall_score,
            AuditReport::QueryMatch(r) => r.result.overall_score,
            AuditReport::Visibility(r) => r.result.overall_score,
            AuditReport::Full(r) => r.combined_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::analyze_technical;
    use crate::document::Document;

    #[test]
    fn test_tool_report_flattens_result() {
        let doc = Document::new("https://example.com");
        let result = analyze_technical(&doc).unwrap();
        let report = ToolReport::new("Technical AEO Audit", &doc.url, result);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["tool"], "Technical AEO Audit");
        assert_eq!(json["url"], "https://example.com");
        assert!(json["analyzedAt"].is_string());
        assert!(json["overallScore"].is_u64());
        assert!(json["scores"]["schema"].is_u64());
    }
}
