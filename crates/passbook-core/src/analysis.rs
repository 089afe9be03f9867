use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, CategoryBreakdown};
use super::money::Money;
use super::period::DateRange;
use super::transaction::{Direction, TransactionRecord};

/// Reason attached to every amount outlier.
pub const UNUSUAL_AMOUNT_REASON: &str = "Unusual amount compared to other transactions";

/// A transaction flagged by the outlier model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub direction: Direction,
    pub reason: String,
}

impl AnomalyRecord {
    pub fn unusual_amount(tx: &TransactionRecord) -> Self {
        AnomalyRecord {
            date: tx.date,
            description: tx.description.clone(),
            amount: tx.amount.abs(),
            direction: tx.direction,
            reason: UNUSUAL_AMOUNT_REASON.to_string(),
        }
    }
}

/// Serialized as the advice text shown to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpendingWarning {
    /// Spending above 90% of income.
    #[serde(rename = "Your spending is very high relative to income")]
    High,
    /// Spending above 70% of income.
    #[serde(rename = "Consider reducing expenses to save more")]
    Elevated,
    #[serde(rename = "Good spending control!")]
    Healthy,
}

impl SpendingWarning {
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio > Decimal::from(90) {
            SpendingWarning::High
        } else if ratio > Decimal::from(70) {
            SpendingWarning::Elevated
        } else {
            SpendingWarning::Healthy
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SpendingWarning::High => "Your spending is very high relative to income",
            SpendingWarning::Elevated => "Consider reducing expenses to save more",
            SpendingWarning::Healthy => "Good spending control!",
        }
    }
}

impl fmt::Display for SpendingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Named summary metrics. Absent metrics are omitted when serialized, so an
/// empty batch yields `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Expenses as a percentage of income, two decimals. Only when income > 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spending_ratio: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spending_warning: Option<SpendingWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_transactions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_transaction_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_period: Option<DateRange>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        *self == Insights::default()
    }
}

/// Outcome of analysing one transaction batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_income: Money,
    pub total_expenses: Money,
    /// Always `total_income - total_expenses`.
    pub net_amount: Money,
    pub category_breakdown: CategoryBreakdown,
    pub anomalies: Vec<AnomalyRecord>,
    pub insights: Insights,
}

impl AnalysisResult {
    pub fn new(
        total_income: Money,
        total_expenses: Money,
        category_breakdown: CategoryBreakdown,
        anomalies: Vec<AnomalyRecord>,
        insights: Insights,
    ) -> Self {
        AnalysisResult {
            total_income,
            total_expenses,
            net_amount: total_income - total_expenses,
            category_breakdown,
            anomalies,
            insights,
        }
    }

    /// The zero-valued result returned for an empty batch.
    pub fn empty() -> Self {
        AnalysisResult::new(
            Money::zero(),
            Money::zero(),
            CategoryBreakdown::new(),
            Vec::new(),
            Insights::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_zero_valued() {
        let r = AnalysisResult::empty();
        assert!(r.total_income.is_zero());
        assert!(r.total_expenses.is_zero());
        assert!(r.net_amount.is_zero());
        assert_eq!(r.category_breakdown.len(), 7);
        assert!(r.anomalies.is_empty());
        assert!(r.insights.is_empty());
    }

    #[test]
    fn net_is_income_minus_expenses() {
        let r = AnalysisResult::new(
            Money::from_cents(10000),
            Money::from_cents(12550),
            CategoryBreakdown::new(),
            vec![],
            Insights::default(),
        );
        assert_eq!(r.net_amount, Money::from_cents(-2550));
    }

    #[test]
    fn spending_warning_thresholds() {
        assert_eq!(SpendingWarning::from_ratio(Decimal::from(95)), SpendingWarning::High);
        assert_eq!(SpendingWarning::from_ratio(Decimal::from(90)), SpendingWarning::Elevated);
        assert_eq!(SpendingWarning::from_ratio(Decimal::from(71)), SpendingWarning::Elevated);
        assert_eq!(SpendingWarning::from_ratio(Decimal::from(70)), SpendingWarning::Healthy);
    }

    #[test]
    fn spending_warning_serializes_as_message() {
        for w in [SpendingWarning::High, SpendingWarning::Elevated, SpendingWarning::Healthy] {
            assert_eq!(serde_json::to_value(w).unwrap(), w.message());
        }
        let back: SpendingWarning = serde_json::from_str("\"Good spending control!\"").unwrap();
        assert_eq!(back, SpendingWarning::Healthy);
    }

    #[test]
    fn empty_insights_serialize_as_empty_object() {
        assert_eq!(serde_json::to_string(&Insights::default()).unwrap(), "{}");
    }
}
