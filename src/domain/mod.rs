pub mod rule;
pub mod signal;

pub use rule::{DetectionRule, RuleIdOnly, RuleNameOnly};
pub use signal::{
    SearchResult, SearchResultHits, SearchResultHitsTotal, SearchResultInnerHit,
    SearchResultSignal, SearchResultSource,
};
