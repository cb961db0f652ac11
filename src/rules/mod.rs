pub mod loader;

pub use loader::{load_rule_ids, load_rules, RuleFileError};
