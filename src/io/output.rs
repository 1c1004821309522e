use crate::core::{ChecklistReport, EvaluatedItem, Priority, Summary};
use colored::*;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    /// Resolve a configured format name ("json", "markdown", "terminal").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" => Some(Self::Markdown),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ChecklistReport) -> anyhow::Result<()>;
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
    fn write_report(&mut self, report: &ChecklistReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
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
    fn write_report(&mut self, report: &ChecklistReport) -> anyhow::Result<()> {
        match report {
            ChecklistReport::Template {
                file_name,
                message,
                evaluation_templates,
                ..
            } => {
                writeln!(self.writer, "# Checklist Template: {file_name}")?;
                writeln!(self.writer)?;
                writeln!(self.writer, "{message}")?;
                writeln!(self.writer)?;
                writeln!(
                    self.writer,
                    "## Pending evaluation ({} items)",
                    evaluation_templates.len()
                )?;
                for item in evaluation_templates {
                    writeln!(
                        self.writer,
                        "- [ ] #{} ({}) {}",
                        item.id, item.category, item.item
                    )?;
                }
            }
            ChecklistReport::Evaluated {
                file_name,
                checklist_items,
                summary,
                errors,
                ..
            } => {
                writeln!(self.writer, "# Checklist: {file_name}")?;
                writeln!(self.writer)?;
                self.write_summary(summary)?;
                self.write_tiers(checklist_items)?;

                if !errors.is_empty() {
                    writeln!(self.writer, "## Evaluation failures ({})", errors.len())?;
                    for error in errors {
                        writeln!(self.writer, "- #{}: {}", error.id, error.error)?;
                    }
                    writeln!(self.writer)?;
                }
            }
            ChecklistReport::NoItems {
                file_name, message, ..
            } => {
                writeln!(self.writer, "# Checklist: {file_name}")?;
                writeln!(self.writer)?;
                writeln!(self.writer, "{message}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_summary(&mut self, summary: &Summary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Priority | Items |")?;
        writeln!(self.writer, "|----------|-------|")?;
        writeln!(self.writer, "| Critical | {} |", summary.critical)?;
        writeln!(self.writer, "| High | {} |", summary.high)?;
        writeln!(self.writer, "| Medium | {} |", summary.medium)?;
        writeln!(self.writer, "| Low | {} |", summary.low)?;
        writeln!(self.writer, "| Minimal | {} |", summary.minimal)?;
        writeln!(self.writer, "| **Total** | {} |", summary.total_items)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_tiers(&mut self, items: &[EvaluatedItem]) -> anyhow::Result<()> {
        for tier in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
            Priority::Minimal,
        ] {
            let tier_items: Vec<&EvaluatedItem> =
                items.iter().filter(|i| i.priority == tier).collect();
            if tier_items.is_empty() {
                continue;
            }

            writeln!(self.writer, "## {tier} ({} items)", tier_items.len())?;
            for item in tier_items {
                writeln!(
                    self.writer,
                    "- [ ] #{} ({}) {} — {}",
                    item.id, item.category, item.item, item.recommendation
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &ChecklistReport) -> anyhow::Result<()> {
        print_header();
        match report {
            ChecklistReport::Template {
                file_name,
                message,
                evaluation_templates,
                ..
            } => {
                println!("File: {file_name}");
                println!(
                    "Candidates awaiting evaluation: {}",
                    evaluation_templates.len().to_string().yellow()
                );
                println!();
                println!("{message}");
            }
            ChecklistReport::Evaluated {
                file_name,
                checklist_items,
                summary,
                errors,
                ..
            } => {
                println!("File: {file_name}");
                print_summary(summary);
                print_top_items(checklist_items);
                if !errors.is_empty() {
                    println!(
                        "{} {} item(s) failed evaluation; see the JSON report for details",
                        "!".red().bold(),
                        errors.len()
                    );
                }
            }
            ChecklistReport::NoItems { message, .. } => {
                println!("{message}");
            }
        }
        Ok(())
    }
}

fn print_header() {
    println!("{}", "Checkmap Checklist Report".bold().blue());
    println!("{}", "=========================".blue());
    println!();
}

fn print_summary(summary: &Summary) {
    println!("Summary:");
    println!("  Total items: {}", summary.total_items);
    println!("  Critical: {}", summary.critical.to_string().red());
    println!("  High: {}", summary.high.to_string().yellow());
    println!("  Medium: {}", summary.medium);
    println!("  Low: {}", summary.low.to_string().green());
    println!("  Minimal: {}", summary.minimal.to_string().green());
    println!();
}

fn print_top_items(items: &[EvaluatedItem]) {
    if items.is_empty() {
        return;
    }

    let mut ranked: Vec<&EvaluatedItem> = items.iter().collect();
    ranked.sort_by(|a, b| b.evaluation.final_score.cmp(&a.evaluation.final_score));

    println!("Top priority items:");
    ranked.iter().take(5).enumerate().for_each(|(i, item)| {
        println!(
            "  {}. [{}] #{} ({}) {}",
            i + 1,
            item.priority.to_string().red(),
            item.id,
            item.category,
            item.item
        );
    });
    println!();
}

/// Build a writer for the requested format and destination.
///
/// JSON and Markdown honor `output`; the terminal writer always prints
/// to stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    })
}
