use passbook_core::{Category, DateRange, Insights, Money, SpendingWarning, TransactionRecord};
use rust_decimal::Decimal;

use crate::category::CategoryEngine;

/// Derives the summary metrics of a batch.
pub struct InsightsSummarizer<'a> {
    engine: &'a CategoryEngine,
}

impl<'a> InsightsSummarizer<'a> {
    pub fn new(engine: &'a CategoryEngine) -> Self {
        Self { engine }
    }

    /// An empty batch yields empty insights.
    pub fn summarize(&self, transactions: &[TransactionRecord], total_income: Money, total_expenses: Money) -> Insights {
        if transactions.is_empty() {
            return Insights::default();
        }

        let spending_ratio = spending_ratio(total_income, total_expenses);
        let debits: Vec<&TransactionRecord> = transactions.iter().filter(|tx| tx.is_debit()).collect();
        let total: Money = transactions.iter().map(|tx| tx.amount).sum();

        Insights {
            spending_ratio,
            spending_warning: spending_ratio.map(SpendingWarning::from_ratio),
            top_category: self.top_category(&debits),
            total_transactions: Some(transactions.len()),
            avg_transaction_amount: Some(average(total, transactions.len())),
            credit_count: Some(transactions.len() - debits.len()),
            debit_count: Some(debits.len()),
            statement_period: DateRange::covering(transactions.iter().map(|tx| tx.date)),
        }
    }

    /// Most frequent debit category. Ties go to the category declared first.
    fn top_category(&self, debits: &[&TransactionRecord]) -> Option<Category> {
        if debits.is_empty() {
            return None;
        }
        let mut counts = [0usize; Category::ALL.len()];
        for tx in debits {
            counts[self.engine.classify(&tx.description).index()] += 1;
        }
        Category::ALL
            .into_iter()
            .fold(None, |best: Option<(Category, usize)>, c| {
                let n = counts[c.index()];
                match best {
                    Some((_, m)) if m >= n => best,
                    _ => Some((c, n)),
                }
            })
            .map(|(c, _)| c)
    }
}

/// Expenses as a percentage of income, two decimals. `None` unless income is positive.
pub fn spending_ratio(total_income: Money, total_expenses: Money) -> Option<Decimal> {
    if !total_income.is_positive() {
        return None;
    }
    let ratio = total_expenses
        .as_decimal()
        .checked_div(total_income.as_decimal())
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
    match ratio {
        Some(r) => Some(r.round_dp(2)),
        None => {
            tracing::warn!(income = %total_income, expenses = %total_expenses, "spending ratio out of range, saturating");
            Some(Decimal::MAX)
        }
    }
}

fn average(total: Money, count: usize) -> Money {
    total
        .as_decimal()
        .checked_div(Decimal::from(count))
        .map(Money::from_decimal)
        .unwrap_or_else(Money::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use passbook_core::Direction;
    use std::str::FromStr;

    fn tx(day: u32, desc: &str, cents: i64, direction: Direction) -> TransactionRecord {
        TransactionRecord::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), desc, Money::from_cents(cents), direction)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ── Ratio ────────────────────────────────────────────────────────────────

    #[test]
    fn ratio_rounds_to_two_places() {
        assert_eq!(spending_ratio(Money::from_cents(300), Money::from_cents(100)), Some(dec("33.33")));
    }

    #[test]
    fn ratio_saturates_when_out_of_range() {
        let expenses = Money::from_decimal(dec("900000000000000000000000000"));
        let ratio = spending_ratio(Money::from_cents(1), expenses);
        assert_eq!(ratio, Some(Decimal::MAX));
        assert_eq!(ratio.map(SpendingWarning::from_ratio), Some(SpendingWarning::High));
    }

    #[test]
    fn ratio_needs_positive_income() {
        assert_eq!(spending_ratio(Money::zero(), Money::from_cents(100)), None);
    }

    #[test]
    fn warning_follows_ratio() {
        let engine = CategoryEngine::new();
        let s = InsightsSummarizer::new(&engine);
        let txs = [tx(1, "Salary", 10_000, Direction::Credit)];

        let high = s.summarize(&txs, Money::from_cents(10_000), Money::from_cents(9_500));
        assert_eq!(high.spending_warning, Some(SpendingWarning::High));

        let elevated = s.summarize(&txs, Money::from_cents(10_000), Money::from_cents(8_000));
        assert_eq!(elevated.spending_warning, Some(SpendingWarning::Elevated));

        let healthy = s.summarize(&txs, Money::from_cents(10_000), Money::from_cents(7_000));
        assert_eq!(healthy.spending_warning, Some(SpendingWarning::Healthy));

        let none = s.summarize(&txs, Money::zero(), Money::from_cents(7_000));
        assert_eq!(none.spending_ratio, None);
        assert_eq!(none.spending_warning, None);
    }

    // ── Summary ──────────────────────────────────────────────────────────────

    #[test]
    fn empty_batch_has_no_insights() {
        let engine = CategoryEngine::new();
        let insights = InsightsSummarizer::new(&engine).summarize(&[], Money::zero(), Money::zero());
        assert!(insights.is_empty());
    }

    #[test]
    fn counts_average_and_period() {
        let engine = CategoryEngine::new();
        let txs = [
            tx(3, "Salary June", 100_000, Direction::Credit),
            tx(1, "Netflix", 1_000, Direction::Debit),
            tx(9, "Foodpanda", 2_001, Direction::Debit),
        ];
        let i = InsightsSummarizer::new(&engine).summarize(&txs, Money::from_cents(100_000), Money::from_cents(3_001));
        assert_eq!(i.total_transactions, Some(3));
        assert_eq!(i.credit_count, Some(1));
        assert_eq!(i.debit_count, Some(2));
        assert_eq!(i.avg_transaction_amount, Some(Money::from_cents(34_334)));
        assert_eq!(
            i.statement_period,
            Some(DateRange::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
            ))
        );
    }

    #[test]
    fn top_category_counts_debits_only() {
        let engine = CategoryEngine::new();
        let txs = [
            tx(1, "Netflix", 1_000, Direction::Debit),
            tx(2, "Hospital", 1_000, Direction::Credit),
            tx(3, "Hospital", 1_000, Direction::Credit),
        ];
        let i = InsightsSummarizer::new(&engine).summarize(&txs, Money::from_cents(2_000), Money::from_cents(1_000));
        assert_eq!(i.top_category, Some(Category::Entertainment));
    }

    #[test]
    fn top_category_ties_go_to_first_declared() {
        let engine = CategoryEngine::new();
        let txs = [
            tx(1, "Hospital", 1_000, Direction::Debit),
            tx(2, "Foodpanda", 1_000, Direction::Debit),
        ];
        let i = InsightsSummarizer::new(&engine).summarize(&txs, Money::zero(), Money::from_cents(2_000));
        assert_eq!(i.top_category, Some(Category::FoodAndDining));
    }

    #[test]
    fn no_debits_no_top_category() {
        let engine = CategoryEngine::new();
        let txs = [tx(1, "Salary", 1_000, Direction::Credit)];
        let i = InsightsSummarizer::new(&engine).summarize(&txs, Money::from_cents(1_000), Money::zero());
        assert_eq!(i.top_category, None);
    }
}
