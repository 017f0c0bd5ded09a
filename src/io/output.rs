use crate::builders::AuditReport;
use crate::core::{Priority, Recommendation};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AuditReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, sink: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    }
}

/// Format-neutral digest of a report: headline rows, notes, recommendations.
struct ReportView<'a> {
    rows: Vec<(String, u32)>,
    notes: Vec<String>,
    recommendations: &'a [Recommendation],
}

fn card_rows(card: &crate::core::ScoreCard) -> Vec<(String, u32)> {
    card.iter().map(|s| (s.name.to_string(), s.value)).collect()
}

fn view(report: &AuditReport) -> ReportView<'_> {
    match report {
        AuditReport::Technical(r) => ReportView {
            rows: card_rows(&r.result.scores),
            notes: vec![format!(
                "Schema types: {}",
                if r.result.schema.types.is_empty() {
                    "none".to_string()
                } else {
                    r.result.schema.types.join(", ")
                }
            )],
            recommendations: &r.result.recommendations,
        },
        AuditReport::Content(r) => {
            let m = &r.result.readability.metrics;
            let stats = &r.result.content_stats;
            ReportView {
                rows: card_rows(&r.result.scores),
                notes: vec![
                    format!(
                        "Flesch {} ({}, {})",
                        m.flesch_score, m.readability_level, m.grade_level
                    ),
                    format!(
                        "{} words, {} sentences, {} paragraphs",
                        stats.word_count, stats.sentence_count, stats.paragraph_count
                    ),
                ],
                recommendations: &r.result.recommendations,
            }
        }
        AuditReport::QueryMatch(r) => ReportView {
            rows: r
                .result
                .queries
                .iter()
                .map(|q| (format!("\"{}\" ({})", q.query, q.match_level.level), q.match_score))
                .collect(),
            notes: r
                .result
                .content_gaps
                .iter()
                .map(|g| format!("Gap: {} - {}", g.issue, g.solution))
                .collect(),
            recommendations: &r.result.recommendations,
        },
        AuditReport::Visibility(r) => {
            let v = &r.result.verdict;
            let mut notes = vec![format!("Verdict: {} - {}", v.level, v.description)];
            notes.extend(
                r.result
                    .quick_wins
                    .iter()
                    .map(|w| format!("Quick win: {} ({})", w.action, w.reason)),
            );
            ReportView {
                rows: card_rows(&r.result.scores),
                notes,
                recommendations: &r.result.recommendations,
            }
        }
        AuditReport::Full(r) => {
            let mut rows = vec![
                ("technical".to_string(), r.technical.score),
                ("content".to_string(), r.content.score),
                ("visibility".to_string(), r.visibility.score),
            ];
            rows.extend(r.query_match.as_ref().map(|q| ("queryMatch".to_string(), q.score)));
            ReportView {
                rows,
                notes: vec![format!(
                    "Visibility verdict: {} - {}",
                    r.visibility.verdict.level, r.visibility.verdict.description
                )],
                recommendations: &r.top_recommendations,
            }
        }
    }
}

fn score_status(score: u32) -> &'static str {
    match score {
        s if s >= 70 => "Good",
        s if s >= 50 => "Fair",
        _ => "Poor",
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        let view = view(report);
        self.write_header(report)?;
        self.write_scores(&view)?;
        self.write_notes(&view)?;
        self.write_recommendations(&view)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# {} Report", report.tool())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- URL: {}", report.url())?;
        writeln!(
            self.writer,
            "- Generated: {}",
            report.analyzed_at().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "- Score: **{}/100**", report.score())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_scores(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "## Scores")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Score | Status |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;
        for (name, score) in &view.rows {
            writeln!(self.writer, "| {name} | {score} | {} |", score_status(*score))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_notes(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        if view.notes.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Highlights")?;
        writeln!(self.writer)?;
        for note in &view.notes {
            writeln!(self.writer, "- {note}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_recommendations(&mut self, view: &ReportView<'_>) -> anyhow::Result<()> {
        writeln!(self.writer, "## Recommendations")?;
        writeln!(self.writer)?;
        if view.recommendations.is_empty() {
            writeln!(self.writer, "No recommendations.")?;
            return Ok(());
        }
        writeln!(self.writer, "| Priority | Category | Issue | Action |")?;
        writeln!(self.writer, "|----------|----------|-------|--------|")?;
        for rec in view.recommendations {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                rec.priority,
                rec.category,
                escape_cell(&rec.issue),
                escape_cell(&rec.action)
            )?;
        }
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AuditReport) -> anyhow::Result<()> {
        let view = view(report);

        writeln!(self.writer, "{}", report.tool().bold())?;
        writeln!(self.writer, "  {}", report.url().dimmed())?;
        writeln!(self.writer, "  Score: {}", colored_score(report.score()))?;
        writeln!(self.writer)?;

        let mut scores = Table::new();
        scores
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Metric", "Score", "Status"]);
        for (name, score) in &view.rows {
            scores.add_row(vec![
                Cell::new(name),
                Cell::new(score).fg(score_color(*score)),
                Cell::new(score_status(*score)),
            ]);
        }
        writeln!(self.writer, "{scores}")?;

        for note in &view.notes {
            writeln!(self.writer, "  {note}")?;
        }
        if !view.notes.is_empty() {
            writeln!(self.writer)?;
        }

        if view.recommendations.is_empty() {
            writeln!(self.writer, "{}", "No recommendations".green())?;
            self.writer.flush()?;
            return Ok(());
        }
        let mut recs = Table::new();
        recs.load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Priority", "Category", "Issue", "Action"]);
        for rec in view.recommendations {
            recs.add_row(vec![
                Cell::new(rec.priority).fg(priority_color(rec.priority)),
                Cell::new(&rec.category),
                Cell::new(&rec.issue),
                Cell::new(&rec.action),
            ]);
        }
        writeln!(self.writer, "{recs}")?;
        self.writer.flush()?;
        Ok(())
    }
}

fn score_color(score: u32) -> Color {
    match score {
        s if s >= 70 => Color::Green,
        s if s >= 50 => Color::Yellow,
        _ => Color::Red,
    }
}

fn colored_score(score: u32) -> ColoredString {
    let text = format!("{score}/100");
    match score {
        s if s >= 70 => text.green().bold(),
        s if s >= 50 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::Magenta,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Grey,
    }
}
