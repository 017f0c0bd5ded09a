//! Answer engine optimization (AEO) auditing for web pages.
//!
//! A page is reduced to a [`Document`] and scored by four analyzers
//! (technical, content, query match, visibility). [`run_full_audit`]
//! runs them together and merges their recommendations.

pub mod analyzers;
pub mod builders;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod document;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod priority;
pub mod scoring;
pub mod source;

pub use crate::analyzers::{
    analyze_content, analyze_query_match, analyze_technical, analyze_visibility, Analyzer,
    ContentResult, QueryList, QueryMatchResult, TechnicalResult, VisibilityResult,
};
pub use crate::builders::{run_full_audit, AuditReport, CombinedAuditResult, ToolReport};
pub use crate::config::{load_config, AuditConfig};
pub use crate::core::{Error, Priority, Recommendation, Result, ScoreCard};
pub use crate::document::Document;
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::metrics::PageMetrics;
pub use crate::source::{load_document, normalize_url};
