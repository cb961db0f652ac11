use serde::{Deserialize, Serialize};

/// A detection rule definition as accepted by the bulk create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRule {
    pub description: String,
    pub name: String,

    /// Risk score (0-100 on the remote side, not checked here)
    pub risk_score: i32,

    /// Severity label (low, medium, high, critical)
    pub severity: String,

    /// Rule type, e.g. "query"
    #[serde(rename = "type")]
    pub rule_type: String,

    pub query: String,

    /// Schedule interval, e.g. "5m"
    pub interval: String,

    /// Start of the lookback window, e.g. "now-6m"
    pub from: String,

    /// Caller-assigned stable identifier
    pub rule_id: String,
}

/// A rule reduced to its `rule_id`.
///
/// Returned by bulk create and accepted by bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleIdOnly {
    pub rule_id: String,
}

impl RuleIdOnly {
    pub fn new(rule_id: impl Into<String>) -> Self {
        RuleIdOnly {
            rule_id: rule_id.into(),
        }
    }
}

impl From<&DetectionRule> for RuleIdOnly {
    fn from(rule: &DetectionRule) -> Self {
        RuleIdOnly::new(rule.rule_id.clone())
    }
}

/// A rule reduced to its display name, as referenced from a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleNameOnly {
    pub name: String,
}

impl RuleNameOnly {
    pub fn new(name: impl Into<String>) -> Self {
        RuleNameOnly { name: name.into() }
    }
}

impl From<&DetectionRule> for RuleNameOnly {
    fn from(rule: &DetectionRule) -> Self {
        RuleNameOnly::new(rule.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rule() -> DetectionRule {
        DetectionRule {
            description: "Detects whoami".to_string(),
            name: "whoami".to_string(),
            risk_score: 50,
            severity: "medium".to_string(),
            rule_type: "query".to_string(),
            query: "process.name:whoami".to_string(),
            interval: "5m".to_string(),
            from: "now-6m".to_string(),
            rule_id: "r-whoami".to_string(),
        }
    }

    #[test]
    fn test_rule_serialization_field_names() {
        let value = serde_json::to_value(test_rule()).unwrap();

        assert_eq!(value["type"], "query");
        assert_eq!(value["risk_score"], 50);
        assert_eq!(value["from"], "now-6m");
        assert_eq!(value["rule_id"], "r-whoami");
        assert!(value.get("rule_type").is_none());
    }

    #[test]
    fn test_rule_id_only_serialization() {
        let json = serde_json::to_string(&vec![RuleIdOnly::new("r1")]).unwrap();
        assert_eq!(json, r#"[{"rule_id":"r1"}]"#);
    }

    #[test]
    fn test_rule_id_only_missing_field() {
        let parsed: Vec<RuleIdOnly> =
            serde_json::from_str(r#"[{"id":"x","error":{"status_code":409}}]"#).unwrap();

        assert_eq!(parsed, vec![RuleIdOnly::default()]);
    }

    #[test]
    fn test_projections() {
        let rule = test_rule();

        assert_eq!(RuleIdOnly::from(&rule).rule_id, "r-whoami");
        assert_eq!(RuleNameOnly::from(&rule).name, "whoami");
    }
}
