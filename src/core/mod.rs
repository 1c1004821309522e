use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate checklist item extracted from a document.
///
/// Items are immutable once extracted; ids are unique within a document
/// and assigned in extraction order starting at 1.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: u32,
    pub category: String,
    pub item: String,
    pub source_text: String,
}

/// A single category axis rating: an integer score in [1,5] plus the
/// rationale behind it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScore {
    pub score: u8,
    pub rationale: String,
}

impl CategoryScore {
    pub fn new(score: u8, rationale: impl Into<String>) -> Self {
        Self {
            score,
            rationale: rationale.into(),
        }
    }
}

/// Correction factors applied on top of the weighted base score.
///
/// Each factor is constrained to a discrete set: uncertainty to
/// {0.9, 1.0, 1.1, 1.2}, dependency to {1.0, 1.1, 1.2}, and the
/// regulatory gate flag to {0.0, 0.5}.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CorrectionFactors {
    pub uncertainty: f64,
    pub dependency: f64,
    pub regulatory_gate: f64,
}

impl Default for CorrectionFactors {
    fn default() -> Self {
        Self {
            uncertainty: 1.0,
            dependency: 1.0,
            regulatory_gate: 0.0,
        }
    }
}

/// Complete scoring breakdown for one checklist item.
///
/// Derived by the weight evaluator and never mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    #[serde(rename = "C1_approval")]
    pub c1_approval: CategoryScore,
    #[serde(rename = "C2_cost_schedule")]
    pub c2_cost_schedule: CategoryScore,
    #[serde(rename = "C3_environment_safety")]
    pub c3_environment_safety: CategoryScore,
    #[serde(rename = "C4_operation")]
    pub c4_operation: CategoryScore,
    #[serde(rename = "C5_reversibility")]
    pub c5_reversibility: CategoryScore,
    pub base_score: f64,
    pub uncertainty_factor: f64,
    pub dependency_factor: f64,
    pub regulatory_gate_flag: f64,
    pub final_score_raw: f64,
    pub final_score: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Ord, PartialOrd)]
pub enum Priority {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Total mapping from a clamped final score to a priority tier.
    pub fn from_score(final_score: u8) -> Self {
        match final_score {
            5 => Priority::Critical,
            4 => Priority::High,
            3 => Priority::Medium,
            2 => Priority::Low,
            _ => Priority::Minimal,
        }
    }

    /// Fixed recommendation text per priority tier.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Priority::Critical => "immediate review and action required",
            Priority::High => "review needed in the near term",
            Priority::Medium => "review at regular intervals",
            Priority::Low => "review when capacity allows",
            Priority::Minimal => "review only if needed",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Priority, &str)] = &[
            (Priority::Minimal, "Minimal"),
            (Priority::Low, "Low"),
            (Priority::Medium, "Medium"),
            (Priority::High, "High"),
            (Priority::Critical, "Critical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, s)| *s)
            .unwrap_or("Unknown");

        write!(f, "{display_str}")
    }
}

/// The editable per-item scoring block carried by templates.
///
/// Field names mirror the template wire format so user-edited JSON maps
/// straight onto this struct.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EvaluationInput {
    #[serde(rename = "C1_score")]
    pub c1_score: u8,
    #[serde(rename = "C1_rationale")]
    pub c1_rationale: String,
    #[serde(rename = "C2_score")]
    pub c2_score: u8,
    #[serde(rename = "C2_rationale")]
    pub c2_rationale: String,
    #[serde(rename = "C3_score")]
    pub c3_score: u8,
    #[serde(rename = "C3_rationale")]
    pub c3_rationale: String,
    #[serde(rename = "C4_score")]
    pub c4_score: u8,
    #[serde(rename = "C4_rationale")]
    pub c4_rationale: String,
    #[serde(rename = "C5_score")]
    pub c5_score: u8,
    #[serde(rename = "C5_rationale")]
    pub c5_rationale: String,
    #[serde(default = "default_multiplicative_factor")]
    pub uncertainty_factor: f64,
    #[serde(default = "default_multiplicative_factor")]
    pub dependency_factor: f64,
    #[serde(default = "default_regulatory_gate_flag")]
    pub regulatory_gate_flag: f64,
}

fn default_multiplicative_factor() -> f64 {
    1.0
}

fn default_regulatory_gate_flag() -> f64 {
    0.0
}

impl EvaluationInput {
    /// The named default-scoring strategy behind auto-evaluation:
    /// midpoint score 3 on every axis with neutral correction factors.
    pub fn midpoint() -> Self {
        Self {
            c1_score: 3,
            c1_rationale: "pending review".to_string(),
            c2_score: 3,
            c2_rationale: "pending review".to_string(),
            c3_score: 3,
            c3_rationale: "pending review".to_string(),
            c4_score: 3,
            c4_rationale: "pending review".to_string(),
            c5_score: 3,
            c5_rationale: "pending review".to_string(),
            uncertainty_factor: 1.0,
            dependency_factor: 1.0,
            regulatory_gate_flag: 0.0,
        }
    }

    /// The five (score, rationale) pairs in fixed C1..C5 axis order.
    pub fn category_scores(&self) -> [CategoryScore; 5] {
        [
            CategoryScore::new(self.c1_score, self.c1_rationale.clone()),
            CategoryScore::new(self.c2_score, self.c2_rationale.clone()),
            CategoryScore::new(self.c3_score, self.c3_rationale.clone()),
            CategoryScore::new(self.c4_score, self.c4_rationale.clone()),
            CategoryScore::new(self.c5_score, self.c5_rationale.clone()),
        ]
    }

    pub fn correction_factors(&self) -> CorrectionFactors {
        CorrectionFactors {
            uncertainty: self.uncertainty_factor,
            dependency: self.dependency_factor,
            regulatory_gate: self.regulatory_gate_flag,
        }
    }
}

/// A checklist item awaiting manual (or default) scoring.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TemplateItem {
    pub id: u32,
    pub category: String,
    pub item: String,
    pub source_text: String,
    pub evaluation_input: EvaluationInput,
}

impl TemplateItem {
    pub fn new(item: ChecklistItem) -> Self {
        Self {
            id: item.id,
            category: item.category,
            item: item.item,
            source_text: item.source_text,
            evaluation_input: EvaluationInput::midpoint(),
        }
    }
}

/// A fully scored checklist item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EvaluatedItem {
    pub id: u32,
    pub category: String,
    pub item: String,
    pub source_text: String,
    pub evaluation: Evaluation,
    pub priority: Priority,
    pub recommendation: String,
}

/// An item whose evaluation failed; the rest of the batch still succeeds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemError {
    pub id: u32,
    pub error: String,
}

/// Per-tier item counts, computed in a single pass.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_items: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub minimal: usize,
}

impl Summary {
    pub fn from_items(items: &[EvaluatedItem]) -> Self {
        items.iter().fold(
            Self {
                total_items: items.len(),
                ..Self::default()
            },
            |mut summary, item| {
                match item.priority {
                    Priority::Critical => summary.critical += 1,
                    Priority::High => summary.high += 1,
                    Priority::Medium => summary.medium += 1,
                    Priority::Low => summary.low += 1,
                    Priority::Minimal => summary.minimal += 1,
                }
                summary
            },
        )
    }
}

/// Serialized output of the converter, discriminated by `status`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChecklistReport {
    /// Candidate items with default evaluation inputs, for manual editing.
    Template {
        file_name: String,
        message: String,
        generated_at: DateTime<Utc>,
        evaluation_templates: Vec<TemplateItem>,
    },
    /// Fully scored checklist plus per-tier summary.
    Evaluated {
        file_name: String,
        generated_at: DateTime<Utc>,
        checklist_items: Vec<EvaluatedItem>,
        summary: Summary,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        errors: Vec<ItemError>,
    },
    /// The analyzer found no candidate items in the document.
    NoItems {
        file_name: String,
        message: String,
        generated_at: DateTime<Utc>,
    },
}

impl ChecklistReport {
    pub fn template(file_name: String, items: Vec<ChecklistItem>) -> Self {
        Self::Template {
            file_name,
            message: "Evaluation template generated. Fill in each item's scores, \
                      then run `checkmap evaluate`."
                .to_string(),
            generated_at: Utc::now(),
            evaluation_templates: items.into_iter().map(TemplateItem::new).collect(),
        }
    }

    pub fn evaluated(file_name: String, items: Vec<EvaluatedItem>, errors: Vec<ItemError>) -> Self {
        let summary = Summary::from_items(&items);
        Self::Evaluated {
            file_name,
            generated_at: Utc::now(),
            checklist_items: items,
            summary,
            errors,
        }
    }

    pub fn no_items(file_name: String) -> Self {
        Self::NoItems {
            file_name,
            message: "No checklist candidates were found in the document.".to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Template { .. } => "template",
            Self::Evaluated { .. } => "evaluated",
            Self::NoItems { .. } => "no_items",
        }
    }
}
