use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{DetectionRule, RuleIdOnly};

/// Errors that can occur during rule file loading.
#[derive(Error, Debug)]
pub enum RuleFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Load a list of detection rules from a file.
///
/// Files with a `.json` extension are parsed as JSON, anything else as YAML.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<DetectionRule>, RuleFileError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let rules = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    Ok(rules)
}

/// Load only the `rule_id`s from a rule file.
pub fn load_rule_ids(path: impl AsRef<Path>) -> Result<Vec<RuleIdOnly>, RuleFileError> {
    Ok(load_rules(path)?.iter().map(RuleIdOnly::from).collect())
}
