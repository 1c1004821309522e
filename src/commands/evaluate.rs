//! Evaluate a previously emitted template with user-edited scores.

use crate::config;
use crate::core::{ChecklistReport, EvaluatedItem, ItemError, Priority, TemplateItem};
use crate::errors::{Error, Result};
use crate::io::output::{create_writer, OutputFormat};
use crate::scoring::WeightEvaluator;
use anyhow::Context;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub struct EvaluateConfig {
    pub template_path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn handle_evaluate(config: EvaluateConfig) -> anyhow::Result<()> {
    let (file_name, templates) = load_template(&config.template_path)?;
    log::info!(
        "loaded {} template items from {}",
        templates.len(),
        config.template_path.display()
    );

    let evaluator = WeightEvaluator::new(config::get_scoring_weights().clone())?;
    let (items, errors) = evaluate_items(&evaluator, templates);
    for error in &errors {
        log::warn!("item {} failed evaluation: {}", error.id, error.error);
    }

    let report = ChecklistReport::evaluated(file_name, items, errors);
    let mut writer = create_writer(config.format, config.output.as_deref())?;
    writer
        .write_report(&report)
        .context("failed to write evaluation report")
}

/// Load a template file, rejecting reports of any other status.
pub fn load_template(path: &Path) -> Result<(String, Vec<TemplateItem>)> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let report: ChecklistReport = serde_json::from_str(&contents)
        .map_err(|e| Error::parse(path, format!("malformed template JSON: {e}")))?;

    match report {
        ChecklistReport::Template {
            file_name,
            evaluation_templates,
            ..
        } => Ok((file_name, evaluation_templates)),
        other => Err(Error::validation(
            "status",
            format!("expected a template file, found status \"{}\"", other.status()),
        )),
    }
}

/// Evaluate a batch of template items.
///
/// Items are isolated: an invalid item becomes an [`ItemError`] while
/// the rest of the batch still succeeds. The evaluator is pure, so the
/// batch runs under rayon with result order preserved.
pub fn evaluate_items(
    evaluator: &WeightEvaluator,
    templates: Vec<TemplateItem>,
) -> (Vec<EvaluatedItem>, Vec<ItemError>) {
    let results: Vec<std::result::Result<EvaluatedItem, ItemError>> = templates
        .into_par_iter()
        .map(|template| evaluate_item(evaluator, template))
        .collect();

    let mut items = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(item) => items.push(item),
            Err(error) => errors.push(error),
        }
    }
    (items, errors)
}

fn evaluate_item(
    evaluator: &WeightEvaluator,
    template: TemplateItem,
) -> std::result::Result<EvaluatedItem, ItemError> {
    let scores = template.evaluation_input.category_scores();
    let factors = template.evaluation_input.correction_factors();

    match evaluator.evaluate(scores, &factors) {
        Ok(evaluation) => {
            let priority = Priority::from_score(evaluation.final_score);
            Ok(EvaluatedItem {
                id: template.id,
                category: template.category,
                item: template.item,
                source_text: template.source_text,
                evaluation,
                priority,
                recommendation: priority.recommendation().to_string(),
            })
        }
        Err(e) => Err(ItemError {
            id: template.id,
            error: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChecklistItem, EvaluationInput};

    fn template_item(id: u32, input: EvaluationInput) -> TemplateItem {
        TemplateItem {
            id,
            category: "general".to_string(),
            item: format!("item {id}"),
            source_text: String::new(),
            evaluation_input: input,
        }
    }

    #[test]
    fn one_invalid_item_does_not_fail_the_batch() {
        let evaluator = WeightEvaluator::with_defaults();
        let mut bad = EvaluationInput::midpoint();
        bad.c2_score = 9;

        let templates = vec![
            template_item(1, EvaluationInput::midpoint()),
            template_item(2, bad),
            template_item(3, EvaluationInput::midpoint()),
        ];

        let (items, errors) = evaluate_items(&evaluator, templates);
        assert_eq!(items.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].id, 2);
        assert!(errors[0].error.contains("C2"), "got: {}", errors[0].error);
        // Surviving items keep their original order
        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 3);
    }

    #[test]
    fn evaluated_item_carries_priority_and_recommendation() {
        let evaluator = WeightEvaluator::with_defaults();
        let mut input = EvaluationInput::midpoint();
        input.c1_score = 5;
        input.c2_score = 5;
        input.c3_score = 5;
        input.c4_score = 5;
        input.c5_score = 5;
        input.regulatory_gate_flag = 0.5;

        let (items, errors) = evaluate_items(&evaluator, vec![template_item(1, input)]);
        assert!(errors.is_empty());
        assert_eq!(items[0].priority, Priority::Critical);
        assert_eq!(
            items[0].recommendation,
            "immediate review and action required"
        );
        assert_eq!(items[0].evaluation.final_score, 5);
    }

    #[test]
    fn non_template_status_is_rejected() {
        let report = ChecklistReport::evaluated("plan.txt".to_string(), Vec::new(), Vec::new());
        let json = serde_json::to_string(&report).unwrap();

        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), json).unwrap();

        let err = load_template(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("expected a template file"),
            "got: {err}"
        );
    }

    #[test]
    fn malformed_template_json_is_a_parse_error() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        let err = load_template(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got: {err}");
    }

    #[test]
    fn template_round_trips_through_load() {
        let items = vec![ChecklistItem {
            id: 1,
            category: "cost".to_string(),
            item: "Review the construction budget".to_string(),
            source_text: "The construction budget requires review.".to_string(),
        }];
        let report = ChecklistReport::template("plan.txt".to_string(), items);
        let json = serde_json::to_string_pretty(&report).unwrap();

        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), json).unwrap();

        let (file_name, templates) = load_template(file.path()).unwrap();
        assert_eq!(file_name, "plan.txt");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].evaluation_input, EvaluationInput::midpoint());
    }
}
