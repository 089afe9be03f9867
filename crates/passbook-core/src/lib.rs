pub mod analysis;
pub mod category;
pub mod config;
pub mod money;
pub mod period;
pub mod transaction;

pub use analysis::{AnalysisResult, AnomalyRecord, Insights, SpendingWarning, UNUSUAL_AMOUNT_REASON};
pub use category::{Category, CategoryBreakdown};
pub use config::{AnomalyConfig, ConfigError, InputConfig, ParserConfig, StatementConfig};
pub use money::Money;
pub use period::DateRange;
pub use transaction::{CategorizedTransaction, Direction, TransactionRecord, UNKNOWN_DESCRIPTION};
