//! End-to-end pipeline tests: document → template → edited scores →
//! evaluated checklist.

use checkmap::commands::analyze::{handle_analyze, AnalyzeConfig};
use checkmap::commands::evaluate::{handle_evaluate, EvaluateConfig};
use checkmap::{ChecklistReport, OutputFormat};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PROJECT_BRIEF: &str = indoc! {"
    Environmental approval must be obtained before commencement of works.
    The construction budget requires review by the steering committee.
    A noise survey must be conducted near the northern villages.
    The terminal roof will be painted light grey.
"};

fn analyze_to(path: &Path, output: &Path, auto_evaluate: bool) {
    handle_analyze(AnalyzeConfig {
        path: path.to_path_buf(),
        format: OutputFormat::Json,
        output: Some(output.to_path_buf()),
        auto_evaluate,
    })
    .unwrap();
}

fn read_report(path: &Path) -> ChecklistReport {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn analyze_emits_a_template_with_midpoint_defaults() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("plan.txt");
    fs::write(&doc, PROJECT_BRIEF).unwrap();

    let out = dir.path().join("template.json");
    analyze_to(&doc, &out, false);

    match read_report(&out) {
        ChecklistReport::Template {
            file_name,
            evaluation_templates,
            ..
        } => {
            assert_eq!(file_name, "plan.txt");
            // The painted-roof sentence is not actionable
            assert_eq!(evaluation_templates.len(), 3);
            assert!(evaluation_templates
                .iter()
                .all(|t| t.evaluation_input.c1_score == 3));
            let ids: Vec<u32> = evaluation_templates.iter().map(|t| t.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);
        }
        other => panic!("expected template report, got {}", other.status()),
    }
}

#[test]
fn auto_evaluate_scores_every_item_medium() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("plan.txt");
    fs::write(&doc, PROJECT_BRIEF).unwrap();

    let out = dir.path().join("evaluated.json");
    analyze_to(&doc, &out, true);

    match read_report(&out) {
        ChecklistReport::Evaluated {
            checklist_items,
            summary,
            errors,
            ..
        } => {
            assert!(errors.is_empty());
            assert_eq!(summary.total_items, 3);
            assert_eq!(summary.medium, 3);
            assert!(checklist_items
                .iter()
                .all(|i| i.evaluation.final_score == 3));
        }
        other => panic!("expected evaluated report, got {}", other.status()),
    }
}

#[test]
fn edited_template_round_trips_through_evaluate() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("plan.txt");
    fs::write(&doc, PROJECT_BRIEF).unwrap();

    let template_path = dir.path().join("template.json");
    analyze_to(&doc, &template_path, false);

    // Simulate the user raising item 1 to a regulatory-gated maximum
    // and breaking item 2 with an out-of-range score.
    let mut report = read_report(&template_path);
    if let ChecklistReport::Template {
        ref mut evaluation_templates,
        ..
    } = report
    {
        let input = &mut evaluation_templates[0].evaluation_input;
        input.c1_score = 5;
        input.c2_score = 5;
        input.c3_score = 5;
        input.c4_score = 5;
        input.c5_score = 5;
        input.dependency_factor = 1.2;
        input.regulatory_gate_flag = 0.5;

        evaluation_templates[1].evaluation_input.c4_score = 7;
    }
    fs::write(&template_path, serde_json::to_string_pretty(&report).unwrap()).unwrap();

    let evaluated_path = dir.path().join("evaluated.json");
    handle_evaluate(EvaluateConfig {
        template_path: template_path.clone(),
        format: OutputFormat::Json,
        output: Some(evaluated_path.clone()),
    })
    .unwrap();

    match read_report(&evaluated_path) {
        ChecklistReport::Evaluated {
            checklist_items,
            summary,
            errors,
            ..
        } => {
            // Item 2 failed in isolation; items 1 and 3 survived
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].id, 2);
            assert!(errors[0].error.contains("C4"), "got: {}", errors[0].error);

            assert_eq!(checklist_items.len(), 2);
            assert_eq!(summary.total_items, 2);
            assert_eq!(summary.critical, 1);
            assert_eq!(summary.medium, 1);

            let critical = &checklist_items[0];
            assert_eq!(critical.id, 1);
            assert_eq!(critical.evaluation.final_score, 5);
            assert_eq!(
                critical.recommendation,
                "immediate review and action required"
            );
            // base 5.0 × 1.0 × 1.2 + 0.5
            assert!((critical.evaluation.final_score_raw - 6.5).abs() < 1e-9);
        }
        other => panic!("expected evaluated report, got {}", other.status()),
    }
}

#[test]
fn documents_without_candidates_report_no_items() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("notes.txt");
    fs::write(&doc, "The terminal roof will be painted light grey.\n").unwrap();

    let out = dir.path().join("out.json");
    analyze_to(&doc, &out, false);

    assert_eq!(read_report(&out).status(), "no_items");
}

#[test]
fn markdown_output_lists_checkboxes_by_tier() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("plan.txt");
    fs::write(&doc, PROJECT_BRIEF).unwrap();

    let out = dir.path().join("checklist.md");
    handle_analyze(AnalyzeConfig {
        path: doc,
        format: OutputFormat::Markdown,
        output: Some(out.clone()),
        auto_evaluate: true,
    })
    .unwrap();

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.contains("## Medium (3 items)"), "got:\n{markdown}");
    assert!(markdown.contains("- [ ] #1 (approval)"), "got:\n{markdown}");
}
