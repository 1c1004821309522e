use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".checkmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Checkmap Configuration

[scoring]
# Category weights must sum to 1.0
c1 = 0.30  # approval / regulatory gating
c2 = 0.25  # cost / schedule impact
c3 = 0.20  # environment / safety impact
c4 = 0.15  # operational impact
c5 = 0.10  # reversibility

[keywords]
min_sentence_len = 10
fallback_category = "general"
action_triggers = [
    "required", "require", "perform", "conduct", "review", "confirm",
    "verify", "obtain", "acquir", "analy", "assess", "evaluat",
    "design", "plan", "prepar", "establish", "develop", "submit",
    "apply", "coordinat", "survey", "measur", "inspect", "manag",
    "operat", "maintain", "complet", "implement",
]

# Trigger substrings per category, matched case-insensitively.
# Defining this table replaces the built-in category set.
[keywords.categories]
approval = ["approv", "permit", "licen", "authoriz", "registr", "consent", "clearance"]
cost = ["cost", "capex", "opex", "budget", "invest", "expenditure", "funding"]
schedule = ["schedule", "deadline", "milestone", "duration", "commencement", "completion", "handover"]
environment = ["environment", "eia", "noise", "emission", "air quality", "water quality", "waste", "pollut"]
safety = ["safety", "hazard", "accident", "secur", "fire", "disaster", "evacuation"]
operations = ["operation", "otp", "baggage", "turnaround", "capacity", "throughput", "service level"]
design = ["design", "structur", "layout", "facilit", "equipment", "drawing", "specification"]
planning = ["planning", "strategy", "policy", "master plan", "roadmap", "feasibility"]

[output]
default_format = "json"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .checkmap.toml configuration file");

    Ok(())
}
