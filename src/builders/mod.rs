pub mod full_audit;
pub mod report;

pub use full_audit::{
    run_full_audit, AnalyzerSummary, CombinedAuditResult, QueryMatchSummary, QueryScore,
    VisibilitySummary, FULL_AUDIT_TOOL,
};
pub use report::{AuditReport, ToolReport};
