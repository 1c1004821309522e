//! Analyze a document into a checklist template or scored checklist.

use crate::analyzers::{extraction, DocumentAnalyzer};
use crate::commands::evaluate::evaluate_items;
use crate::config;
use crate::core::{ChecklistReport, TemplateItem};
use crate::io::output::{create_writer, OutputFormat};
use crate::scoring::WeightEvaluator;
use anyhow::Context;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub auto_evaluate: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> anyhow::Result<()> {
    let text = extraction::extract_text(&config.path)?;

    let analyzer = DocumentAnalyzer::from_config();
    let items = analyzer.analyze(&text);
    log::info!(
        "extracted {} checklist candidates from {}",
        items.len(),
        config.path.display()
    );

    let file_name = config
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.path.display().to_string());

    let report = if items.is_empty() {
        log::warn!("no checklist candidates found in {}", config.path.display());
        ChecklistReport::no_items(file_name)
    } else if config.auto_evaluate {
        // Every candidate gets the midpoint default scoring strategy.
        let evaluator = WeightEvaluator::new(config::get_scoring_weights().clone())?;
        let templates: Vec<TemplateItem> = items.into_iter().map(TemplateItem::new).collect();
        let (evaluated, errors) = evaluate_items(&evaluator, templates);
        ChecklistReport::evaluated(file_name, evaluated, errors)
    } else {
        ChecklistReport::template(file_name, items)
    };

    let mut writer = create_writer(config.format, config.output.as_deref())?;
    writer
        .write_report(&report)
        .context("failed to write analysis report")
}
