//! Weighted priority scoring for checklist items.
//!
//! Converts five category scores plus three correction factors into a
//! final 1-5 priority classification:
//!
//! ```text
//! base_score      = Σ weight_k × score_k          (k in C1..C5)
//! final_score_raw = base_score × U × D + G
//! final_score     = clamp(round_half_up(final_score_raw), 1, 5)
//! ```
//!
//! The evaluator is a pure function over immutable inputs and is safe
//! to call from parallel iterators without synchronization.

use crate::config::ScoringWeights;
use crate::core::{CategoryScore, CorrectionFactors, Evaluation};
use crate::errors::{Error, Result};

/// Fixed axis names in evaluation order
pub const AXES: [&str; 5] = ["C1", "C2", "C3", "C4", "C5"];

/// Allowed uncertainty factor values (U)
pub const UNCERTAINTY_FACTORS: [f64; 4] = [0.9, 1.0, 1.1, 1.2];

/// Allowed dependency factor values (D)
pub const DEPENDENCY_FACTORS: [f64; 3] = [1.0, 1.1, 1.2];

/// Allowed regulatory gate flag values (G)
pub const REGULATORY_GATE_FLAGS: [f64; 2] = [0.0, 0.5];

// Tolerance when matching a factor against its enumerated set
const FACTOR_EPSILON: f64 = 1e-9;

/// Deterministic weight evaluator.
///
/// Construction validates the weight configuration once (range check
/// plus the sum-to-1.0 invariant); evaluation never mutates state.
#[derive(Debug, Clone)]
pub struct WeightEvaluator {
    weights: ScoringWeights,
}

impl WeightEvaluator {
    /// Create an evaluator, validating the weights at initialization.
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate().map_err(Error::config)?;
        Ok(Self { weights })
    }

    /// Evaluator over the published default weights.
    pub fn with_defaults() -> Self {
        // The default weights are the published constants; the sum
        // invariant holds by construction.
        Self {
            weights: ScoringWeights::default(),
        }
    }

    // Pure function: Validate one category score, naming the axis on failure
    fn validate_score(axis: &str, score: u8) -> Result<()> {
        if (1..=5).contains(&score) {
            Ok(())
        } else {
            Err(Error::validation(
                axis,
                format!("score must be between 1 and 5, got {}", score),
            ))
        }
    }

    // Pure function: Validate a factor against its enumerated set
    fn validate_factor(name: &str, value: f64, allowed: &[f64]) -> Result<()> {
        if allowed.iter().any(|v| (v - value).abs() < FACTOR_EPSILON) {
            Ok(())
        } else {
            Err(Error::validation(
                name,
                format!("must be one of {:?}, got {}", allowed, value),
            ))
        }
    }

    fn validate_factors(factors: &CorrectionFactors) -> Result<()> {
        Self::validate_factor(
            "uncertainty_factor",
            factors.uncertainty,
            &UNCERTAINTY_FACTORS,
        )?;
        Self::validate_factor("dependency_factor", factors.dependency, &DEPENDENCY_FACTORS)?;
        Self::validate_factor(
            "regulatory_gate_flag",
            factors.regulatory_gate,
            &REGULATORY_GATE_FLAGS,
        )?;
        Ok(())
    }

    /// Weighted sum of the five category scores.
    ///
    /// Guaranteed in [1.0, 5.0] for valid scores since the weights sum
    /// to 1.0.
    pub fn base_score(&self, scores: [u8; 5]) -> Result<f64> {
        for (axis, score) in AXES.iter().zip(scores) {
            Self::validate_score(axis, score)?;
        }

        Ok(self
            .weights
            .as_array()
            .iter()
            .zip(scores)
            .map(|(weight, score)| weight * f64::from(score))
            .sum())
    }

    /// Evaluate one item: five (score, rationale) pairs in C1..C5 order
    /// plus correction factors, yielding the full scoring breakdown.
    pub fn evaluate(
        &self,
        scores: [CategoryScore; 5],
        factors: &CorrectionFactors,
    ) -> Result<Evaluation> {
        Self::validate_factors(factors)?;

        let base_score = self.base_score([
            scores[0].score,
            scores[1].score,
            scores[2].score,
            scores[3].score,
            scores[4].score,
        ])?;

        let final_score_raw =
            base_score * factors.uncertainty * factors.dependency + factors.regulatory_gate;
        let final_score = round_half_up(final_score_raw).clamp(1, 5) as u8;

        let [c1, c2, c3, c4, c5] = scores;
        Ok(Evaluation {
            c1_approval: c1,
            c2_cost_schedule: c2,
            c3_environment_safety: c3,
            c4_operation: c4,
            c5_reversibility: c5,
            base_score,
            uncertainty_factor: factors.uncertainty,
            dependency_factor: factors.dependency,
            regulatory_gate_flag: factors.regulatory_gate,
            final_score_raw,
            final_score,
        })
    }
}

/// Round half up: 0.5 rounds away from zero toward the higher integer.
///
/// Implemented explicitly as floor(v + 0.5) rather than `f64::round`
/// so the .5 tie-break is never left to a library's rounding mode.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
