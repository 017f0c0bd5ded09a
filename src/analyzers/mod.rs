//! The four page analyzers.
//!
//! Each analyzer borrows the immutable
//! [`AuditConfig`](crate::config::AuditConfig) at construction and
//! turns a [`Document`] into its own result record. Analyzers never mutate
//! the document and hold no state between calls.

use crate::core::{Priority, Rating, Recommendation, Result};
use crate::document::Document;
use crate::metrics::{PageMetrics, SchemaInventory};

pub mod content;
pub mod query_match;
pub mod technical;
pub mod visibility;

pub use content::{analyze_content, ContentAnalyzer, ContentResult};
pub use query_match::{analyze_query_match, QueryList, QueryMatchAnalyzer, QueryMatchResult};
pub use technical::{analyze_technical, TechnicalAnalyzer, TechnicalResult};
pub use visibility::{analyze_visibility, VisibilityAnalyzer, VisibilityResult};

pub trait Analyzer: Send + Sync {
    type Output: Send;

    /// Human-readable tool name used in reports and logs
    fn name(&self) -> &'static str;

    fn analyze(&self, doc: &Document, metrics: &PageMetrics) -> Result<Self::Output>;
}

/// Shared entry point: validates the document, derives its page metrics,
/// runs the analyzer and logs the outcome.
pub fn run<A: Analyzer>(analyzer: &A, doc: &Document) -> Result<A::Output>
where
    A::Output: Scored,
{
    doc.validate()?;
    run_with(analyzer, doc, &PageMetrics::derive(doc))
}

/// Run an analyzer against metrics already derived from a validated `doc`.
pub fn run_with<A: Analyzer>(
    analyzer: &A,
    doc: &Document,
    metrics: &PageMetrics,
) -> Result<A::Output>
where
    A::Output: Scored,
{
    let output = analyzer.analyze(doc, metrics)?;
    tracing::info!(
        tool = analyzer.name(),
        url = %doc.url,
        score = output.overall_score(),
        "analysis complete"
    );
    Ok(output)
}

/// Results that expose an overall 0..=100 score
pub trait Scored {
    fn overall_score(&self) -> u32;
}

/// Raised with identical text by every analyzer that reads structured data
/// when a JSON-LD block failed to parse.
pub(crate) fn malformed_schema_recommendation(inventory: &SchemaInventory) -> Recommendation {
    Recommendation::new(
        "Schema",
        Priority::High,
        format!(
            "{} structured data block(s) could not be parsed",
            inventory.failures.len()
        ),
        "Fix the JSON syntax in the page's JSON-LD blocks so parsers can read them",
    )
    .rated(Rating::Low, Rating::High)
}
