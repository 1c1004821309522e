use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Tolerance for the weight-sum invariant
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Category scoring weights configuration
///
/// The five weights must each lie in [0.0, 1.0] and sum to 1.0; the
/// published defaults are 0.30 / 0.25 / 0.20 / 0.15 / 0.10.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    /// Weight for C1, approval / regulatory gating (0.0-1.0)
    #[serde(default = "default_c1_weight")]
    pub c1: f64,

    /// Weight for C2, cost / schedule impact (0.0-1.0)
    #[serde(default = "default_c2_weight")]
    pub c2: f64,

    /// Weight for C3, environment / safety impact (0.0-1.0)
    #[serde(default = "default_c3_weight")]
    pub c3: f64,

    /// Weight for C4, operational impact (0.0-1.0)
    #[serde(default = "default_c4_weight")]
    pub c4: f64,

    /// Weight for C5, reversibility (0.0-1.0)
    #[serde(default = "default_c5_weight")]
    pub c5: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            c1: default_c1_weight(),
            c2: default_c2_weight(),
            c3: default_c3_weight(),
            c4: default_c4_weight(),
            c5: default_c5_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is in valid range
    fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with its axis name
    fn validate_weight(weight: f64, axis: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", axis))
        }
    }

    /// The five weights in fixed C1..C5 axis order.
    pub fn as_array(&self) -> [f64; 5] {
        [self.c1, self.c2, self.c3, self.c4, self.c5]
    }

    /// Validate that each weight is in range and the sum is 1.0
    /// (within floating epsilon).
    pub fn validate(&self) -> Result<(), String> {
        for (weight, axis) in self.as_array().iter().zip(["C1", "C2", "C3", "C4", "C5"]) {
            Self::validate_weight(*weight, axis)?;
        }

        let sum: f64 = self.as_array().iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(format!(
                "Category weights must sum to 1.0, but sum to {:.9}",
                sum
            ));
        }

        Ok(())
    }

    /// Normalize weights to ensure they sum to exactly 1.0
    pub fn normalize(&mut self) {
        let sum: f64 = self.as_array().iter().sum();
        if sum > 0.0 && (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            self.c1 /= sum;
            self.c2 /= sum;
            self.c3 /= sum;
            self.c4 /= sum;
            self.c5 /= sum;
        }
    }
}

// Default weights per the published scoring model
fn default_c1_weight() -> f64 {
    0.30 // approval gates dominate early-phase priority
}
fn default_c2_weight() -> f64 {
    0.25
}
fn default_c3_weight() -> f64 {
    0.20
}
fn default_c4_weight() -> f64 {
    0.15
}
fn default_c5_weight() -> f64 {
    0.10
}

/// Keyword classification configuration
///
/// Categories map to trigger substrings, matched case-insensitively.
/// The map is a BTreeMap so classification iterates categories in
/// sorted order and stays deterministic when several sets match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, Vec<String>>,

    /// Substrings marking a sentence as actionable
    #[serde(default = "default_action_triggers")]
    pub action_triggers: Vec<String>,

    /// Sentences shorter than this many characters are dropped
    #[serde(default = "default_min_sentence_len")]
    pub min_sentence_len: usize,

    /// Category assigned to sentences matching no keyword set
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            action_triggers: default_action_triggers(),
            min_sentence_len: default_min_sentence_len(),
            fallback_category: default_fallback_category(),
        }
    }
}

fn default_categories() -> BTreeMap<String, Vec<String>> {
    let entries: &[(&str, &[&str])] = &[
        (
            "approval",
            &[
                "approv",
                "permit",
                "licen",
                "authoriz",
                "registr",
                "consent",
                "clearance",
            ],
        ),
        (
            "cost",
            &[
                "cost",
                "capex",
                "opex",
                "budget",
                "invest",
                "expenditure",
                "funding",
            ],
        ),
        (
            "schedule",
            &[
                "schedule",
                "deadline",
                "milestone",
                "duration",
                "commencement",
                "completion",
                "handover",
            ],
        ),
        (
            "environment",
            &[
                "environment",
                "eia",
                "noise",
                "emission",
                "air quality",
                "water quality",
                "waste",
                "pollut",
            ],
        ),
        (
            "safety",
            &[
                "safety",
                "hazard",
                "accident",
                "secur",
                "fire",
                "disaster",
                "evacuation",
            ],
        ),
        (
            "operations",
            &[
                "operation",
                "otp",
                "baggage",
                "turnaround",
                "capacity",
                "throughput",
                "service level",
            ],
        ),
        (
            "design",
            &[
                "design",
                "structur",
                "layout",
                "facilit",
                "equipment",
                "drawing",
                "specification",
            ],
        ),
        (
            "planning",
            &[
                "planning",
                "strategy",
                "policy",
                "master plan",
                "roadmap",
                "feasibility",
            ],
        ),
    ];

    entries
        .iter()
        .map(|(category, keywords)| {
            (
                category.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

fn default_action_triggers() -> Vec<String> {
    [
        "required",
        "require",
        "perform",
        "conduct",
        "review",
        "confirm",
        "verify",
        "obtain",
        "acquir",
        "analy",
        "assess",
        "evaluat",
        "design",
        "plan",
        "prepar",
        "establish",
        "develop",
        "submit",
        "apply",
        "coordinat",
        "survey",
        "measur",
        "inspect",
        "manag",
        "operat",
        "maintain",
        "complet",
        "implement",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_min_sentence_len() -> usize {
    10
}

fn default_fallback_category() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
}

/// Root configuration structure for checkmap
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckmapConfig {
    /// Category scoring weights
    #[serde(default)]
    pub scoring: Option<ScoringWeights>,

    /// Keyword classification configuration
    #[serde(default)]
    pub keywords: Option<KeywordsConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Cache the configuration
static CONFIG: OnceLock<CheckmapConfig> = OnceLock::new();
static SCORING_WEIGHTS: OnceLock<ScoringWeights> = OnceLock::new();

/// Pure function to read config file contents
fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
#[cfg(test)]
pub(crate) fn parse_and_validate_config(contents: &str) -> Result<CheckmapConfig, String> {
    parse_and_validate_config_impl(contents)
}

fn parse_and_validate_config_impl(contents: &str) -> Result<CheckmapConfig, String> {
    let mut config = toml::from_str::<CheckmapConfig>(contents)
        .map_err(|e| format!("Failed to parse .checkmap.toml: {}", e))?;

    // Validate and normalize scoring weights if present
    if let Some(ref mut scoring) = config.scoring {
        if let Err(e) = scoring.validate() {
            eprintln!("Warning: Invalid scoring weights: {}. Using defaults.", e);
            config.scoring = Some(ScoringWeights::default());
        } else {
            scoring.normalize(); // Ensure exact sum of 1.0
        }
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
fn try_load_config_from_path(config_path: &Path) -> Option<CheckmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config_impl(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

fn directory_ancestors_impl(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration from .checkmap.toml if it exists
pub fn load_config() -> CheckmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return CheckmapConfig::default();
        }
    };

    directory_ancestors_impl(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(".checkmap.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CheckmapConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static CheckmapConfig {
    CONFIG.get_or_init(load_config)
}

/// Get the scoring weights (with defaults if not configured)
pub fn get_scoring_weights() -> &'static ScoringWeights {
    SCORING_WEIGHTS.get_or_init(|| get_config().scoring.clone().unwrap_or_default())
}

/// Get the keyword classification configuration (with defaults)
pub fn get_keywords_config() -> KeywordsConfig {
    get_config().keywords.clone().unwrap_or_default()
}

/// Get the configured default output format name, if any
pub fn get_default_format() -> Option<String> {
    get_config()
        .output
        .as_ref()
        .and_then(|o| o.default_format.clone())
}
