use serde::{Deserialize, Serialize};

use super::rule::RuleNameOnly;

/// Body of the signal search request: every signal still open.
pub const OPEN_SIGNALS_QUERY: &str = r#"{"query":{"match":{"signal.status":"open"}}}"#;

/// Body of the signal status request: move every open signal to closed.
pub const CLOSE_OPEN_SIGNALS: &str =
    r#"{"query":{"match":{"signal.status":"open"}},"status":"closed"}"#;

/// Decoded `signals/search` response.
///
/// Only the fields this crate reads are modelled; everything else in the
/// response is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub hits: SearchResultHits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultHits {
    pub total: SearchResultHitsTotal,
    pub hits: Vec<SearchResultInnerHit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultHitsTotal {
    pub value: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultInnerHit {
    #[serde(rename = "_source")]
    pub source: SearchResultSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultSource {
    pub signal: SearchResultSignal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultSignal {
    pub rule: RuleNameOnly,
}

impl SearchResult {
    /// Total number of matching signals reported by the API.
    ///
    /// This can exceed `hits.hits.len()`, which is capped by the page size.
    pub fn total(&self) -> i64 {
        self.hits.total.value
    }

    /// Names of the rules behind each returned hit, in response order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.hits
            .hits
            .iter()
            .map(|hit| hit.source.signal.rule.name.as_str())
    }

    /// True when the API reports no matching signals at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
