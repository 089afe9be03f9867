pub mod amount;
pub mod direction;
pub mod lines;
pub mod parser;
pub mod patterns;

pub use amount::{first_match_wins, last_match_wins, AmountPolicy};
pub use direction::{DirectionClassifier, DirectionMatch};
pub use lines::LineScanner;
pub use parser::TransactionBlockParser;
pub use patterns::{AmountMatch, DateFormat, DateMatch, PatternMatcher};
