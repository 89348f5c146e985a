// Pick protections: free-text parsing and ownership evaluation.

pub mod evaluator;
pub mod parser;
pub mod rule;

pub use evaluator::Evaluator;
pub use parser::parse;
pub use rule::{PositionRange, Rule};
