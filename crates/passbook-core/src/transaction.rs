use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// Description used when a block leaves no text behind after cleanup.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown Transaction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Incoming funds.
    Credit,
    /// Outgoing funds.
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "CREDIT"),
            Direction::Debit => write!(f, "DEBIT"),
        }
    }
}

/// One transaction reconstructed from a statement block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Always a magnitude; `direction` carries the sign.
    pub amount: Money,
    pub direction: Direction,
}

impl TransactionRecord {
    /// Builds a record, normalizing the amount to its magnitude and replacing a
    /// blank description with [`UNKNOWN_DESCRIPTION`].
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Money, direction: Direction) -> Self {
        let description = description.into();
        let description = if description.trim().is_empty() {
            UNKNOWN_DESCRIPTION.to_string()
        } else {
            description
        };
        TransactionRecord {
            date,
            description,
            amount: amount.abs(),
            direction,
        }
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }
}

/// A record paired with its spending category. Credits carry no category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    #[serde(flatten)]
    pub record: TransactionRecord,
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_stores_magnitude() {
        let r = TransactionRecord::new(date(2024, 6, 26), "Refund", Money::from_cents(-4500), Direction::Credit);
        assert_eq!(r.amount, Money::from_cents(4500));
    }

    #[test]
    fn new_substitutes_blank_description() {
        let r = TransactionRecord::new(date(2024, 6, 26), "   ", Money::zero(), Direction::Debit);
        assert_eq!(r.description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Credit.to_string(), "CREDIT");
        assert_eq!(Direction::Debit.to_string(), "DEBIT");
    }

    #[test]
    fn direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Direction::Debit).unwrap(), "\"DEBIT\"");
    }

    #[test]
    fn categorized_transaction_flattens_record() {
        let tx = CategorizedTransaction {
            record: TransactionRecord::new(date(2024, 1, 2), "Netflix", Money::from_cents(1599), Direction::Debit),
            category: Some(Category::Entertainment),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["description"], "Netflix");
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["category"], "Entertainment");
    }
}
