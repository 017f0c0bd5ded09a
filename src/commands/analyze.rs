//! Single-tool and full-audit command handlers.

use crate::analyzers::{
    analyze_content, analyze_query_match, analyze_technical, analyze_visibility, Analyzer,
    ContentAnalyzer, QueryList, QueryMatchAnalyzer, TechnicalAnalyzer, VisibilityAnalyzer,
};
use crate::builders::{run_full_audit, AuditReport, ToolReport};
use crate::config::AuditConfig;
use crate::core::Result;
use crate::document::Document;
use crate::io::{self, OutputFormat};
use crate::source::load_document;
use anyhow::Context;
use std::path::PathBuf;

/// Which analysis to run. Query lists are validated before the page loads.
#[derive(Debug, Clone)]
pub enum Tool {
    Technical,
    Content,
    Visibility,
    QueryMatch(QueryList),
    Audit(Option<QueryList>),
}

impl Tool {
    /// Query match requires at least one non-blank query.
    pub fn query_match(raw: &[String], config: &AuditConfig) -> Result<Self> {
        QueryList::with_limit(raw, config.aggregation.max_queries).map(Tool::QueryMatch)
    }

    /// A full audit silently skips query matching when every query is blank.
    pub fn audit(raw: &[String], config: &AuditConfig) -> Self {
        if raw.is_empty() {
            return Tool::Audit(None);
        }
        let queries = QueryList::with_limit(raw, config.aggregation.max_queries).ok();
        if queries.is_none() {
            tracing::info!("no usable queries, skipping query match");
        }
        Tool::Audit(queries)
    }
}

pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub url: Option<String>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Run `tool` over an already loaded document.
pub fn build_report(tool: &Tool, doc: &Document, config: &AuditConfig) -> Result<AuditReport> {
    let url = doc.url.clone();
    Ok(match tool {
        Tool::Technical => AuditReport::Technical(ToolReport::new(
            TechnicalAnalyzer.name(),
            url,
            analyze_technical(doc)?,
        )),
        Tool::Content => AuditReport::Content(ToolReport::new(
            ContentAnalyzer::new(config).name(),
            url,
            analyze_content(doc, config)?,
        )),
        Tool::Visibility => AuditReport::Visibility(ToolReport::new(
            VisibilityAnalyzer::new(config).name(),
            url,
            analyze_visibility(doc, config)?,
        )),
        Tool::QueryMatch(queries) => AuditReport::QueryMatch(ToolReport::new(
            QueryMatchAnalyzer::new(config, queries).name(),
            url,
            analyze_query_match(doc, queries, config)?,
        )),
        Tool::Audit(queries) => AuditReport::Full(run_full_audit(doc, queries.as_ref(), config)?),
    })
}

pub fn handle_analyze(tool: Tool, request: AnalyzeConfig, config: &AuditConfig) -> anyhow::Result<()> {
    let doc = load_document(&request.input, request.url.as_deref())
        .with_context(|| format!("Failed to load page from {}", request.input.display()))?;
    let report = build_report(&tool, &doc, config)?;

    let sink = io::open_sink(request.output.as_deref())?;
    let mut writer = io::create_writer(request.format, sink);
    writer.write_report(&report)?;

    if let Some(path) = &request.output {
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
