pub mod error;
pub mod rules;

pub use error::{ClientError, ErrorKind};
pub use rules::RulesClient;
