use anyhow::{bail, Result};
use passbook_analysis::StatementAnalyzer;
use passbook_core::{AnalysisResult, CategorizedTransaction, TransactionRecord};
use passbook_extract::TransactionBlockParser;
use serde::Serialize;
use uuid::Uuid;

use crate::input::StatementSource;

/// Everything produced for one statement file.
#[derive(Debug, Serialize)]
pub struct StatementReport {
    pub session_id: String,
    pub source_sha256: String,
    pub file_name: String,
    pub transactions: Vec<CategorizedTransaction>,
    pub analysis: AnalysisResult,
}

/// Extracts the records of `source`, failing when none are found.
pub fn extract(source: &StatementSource, parser: &TransactionBlockParser) -> Result<Vec<TransactionRecord>> {
    let pages = source.pages()?;
    let transactions = parser.parse_pages(&pages);
    if transactions.is_empty() {
        bail!("Could not extract transactions from {}", source.file_name);
    }
    Ok(transactions)
}

impl StatementReport {
    pub fn build(
        source: &StatementSource,
        parser: &TransactionBlockParser,
        analyzer: &StatementAnalyzer,
    ) -> Result<Self> {
        let records = extract(source, parser)?;
        let analysis = analyzer.analyze(&records);
        Ok(Self {
            session_id: Uuid::new_v4().to_string(),
            source_sha256: source.sha256_hex(),
            file_name: source.file_name.clone(),
            transactions: analyzer.categorize(&records),
            analysis,
        })
    }
}
