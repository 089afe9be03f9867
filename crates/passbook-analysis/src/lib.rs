pub mod analyzer;
pub mod anomaly;
pub mod category;
pub mod classifier;
pub mod insights;
pub mod lexicon;
pub mod text;

pub use analyzer::StatementAnalyzer;
pub use anomaly::AnomalyDetector;
pub use category::CategoryEngine;
pub use classifier::{CentroidClassifier, ClassifyError};
pub use insights::InsightsSummarizer;
pub use text::{SparseVector, TfidfVectorizer};
