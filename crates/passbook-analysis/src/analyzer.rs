use std::sync::Arc;

use passbook_core::{AnalysisResult, AnomalyConfig, CategorizedTransaction, Money, TransactionRecord};

use crate::anomaly::AnomalyDetector;
use crate::category::CategoryEngine;
use crate::insights::InsightsSummarizer;

/// Runs categorization, anomaly detection and insights over one batch and
/// combines them into an [`AnalysisResult`].
///
/// The trained [`CategoryEngine`] is shared; everything else is recomputed
/// per call.
#[derive(Debug, Clone)]
pub struct StatementAnalyzer {
    engine: Arc<CategoryEngine>,
    detector: AnomalyDetector,
}

impl StatementAnalyzer {
    pub fn new(engine: Arc<CategoryEngine>, anomaly: &AnomalyConfig) -> Self {
        Self { engine, detector: AnomalyDetector::new(anomaly) }
    }

    pub fn analyze(&self, transactions: &[TransactionRecord]) -> AnalysisResult {
        if transactions.is_empty() {
            tracing::info!("empty batch, nothing to analyze");
            return AnalysisResult::empty();
        }

        let total_income: Money = transactions.iter().filter(|tx| tx.is_credit()).map(|tx| tx.amount).sum();
        let total_expenses: Money = transactions.iter().filter(|tx| tx.is_debit()).map(|tx| tx.amount).sum();

        let breakdown = self.engine.category_breakdown(transactions);
        let anomalies = self.detector.detect(transactions);
        let insights = InsightsSummarizer::new(&self.engine).summarize(transactions, total_income, total_expenses);

        let result = AnalysisResult::new(total_income, total_expenses, breakdown, anomalies, insights);
        tracing::info!(
            transactions = transactions.len(),
            income = %result.total_income,
            expenses = %result.total_expenses,
            anomalies = result.anomalies.len(),
            "analysis complete"
        );
        result
    }

    pub fn categorize(&self, transactions: &[TransactionRecord]) -> Vec<CategorizedTransaction> {
        self.engine.annotate(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use passbook_core::{Category, Direction, SpendingWarning};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn analyzer() -> StatementAnalyzer {
        StatementAnalyzer::new(Arc::new(CategoryEngine::new()), &AnomalyConfig::default())
    }

    fn tx(desc: &str, cents: i64, direction: Direction) -> TransactionRecord {
        TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 6, 26).unwrap(), desc, Money::from_cents(cents), direction)
    }

    #[test]
    fn empty_batch_is_zero_result() {
        let r = analyzer().analyze(&[]);
        assert_eq!(r, AnalysisResult::empty());
        assert_eq!(r.category_breakdown.len(), 7);
        assert!(r.insights.is_empty());
    }

    #[test]
    fn totals_split_by_direction() {
        let r = analyzer().analyze(&[
            tx("Salary", 500_000, Direction::Credit),
            tx("Netflix", 110_000, Direction::Debit),
            tx("Foodpanda", 40_000, Direction::Debit),
        ]);
        assert_eq!(r.total_income, Money::from_cents(500_000));
        assert_eq!(r.total_expenses, Money::from_cents(150_000));
        assert_eq!(r.net_amount, Money::from_cents(350_000));
        assert_eq!(r.category_breakdown.total(), r.total_expenses);
    }

    #[test]
    fn netflix_only_debits() {
        let r = analyzer().analyze(&[
            tx("Netflix subscription June", 110_000, Direction::Debit),
            tx("NETFLIX.COM", 110_000, Direction::Debit),
            tx("Salary credit", 900_000, Direction::Credit),
        ]);
        assert_eq!(r.insights.top_category, Some(Category::Entertainment));
        assert_eq!(r.category_breakdown.get(Category::Entertainment), Money::from_cents(220_000));
        for (c, amount) in r.category_breakdown.iter() {
            if c != Category::Entertainment {
                assert!(amount.is_zero(), "{c} should be zero");
            }
        }
    }

    #[test]
    fn oversized_amounts_saturate_totals() {
        let huge = Money::from_decimal(Decimal::from_str("50000000000000000000000000000").unwrap());
        let r = analyzer().analyze(&[
            tx("Salary", 1, Direction::Credit),
            TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), "Netflix", huge, Direction::Debit),
            TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), "Netflix", huge, Direction::Debit),
        ]);
        assert_eq!(r.total_expenses.as_decimal(), Decimal::MAX);
        assert_eq!(r.category_breakdown.get(Category::Entertainment).as_decimal(), Decimal::MAX);
        assert_eq!(r.insights.spending_warning, Some(SpendingWarning::High));
        assert!(!r.net_amount.is_positive());
    }

    #[test]
    fn categorize_tags_debits() {
        let out = analyzer().categorize(&[tx("Netflix", 100, Direction::Debit)]);
        assert_eq!(out[0].category, Some(Category::Entertainment));
    }
}
