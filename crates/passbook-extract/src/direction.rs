use passbook_core::Direction;

/// Phrases that mark incoming funds. Checked before [`DEBIT_KEYWORDS`], so a
/// description matching both lists is a credit.
pub const CREDIT_KEYWORDS: &[&str] = &[
    "received", "remittance", "salary", "batch transfer", "inward rtgs",
    "home remittance", "money received", "credit", "money received from",
    "remittance from", "transfer from", "raast p2p fund transfer from",
];

pub const DEBIT_KEYWORDS: &[&str] = &[
    "transferred", "charges", "pos", "purchase", "atm cash", "withdrawal",
    "money transferred", "debit", "taxes", "fed", "bank charges", "bill paid",
    "raast p2p fund transfer to", "chg:", "visa card", "replacement fee",
    "er ", "payment gateway", "payfast", "gopb", "telenor", "zong", "easy card",
    "monthly", "prepaid", "from ib", "rev ", "fbrtax:", "stan (", "transfer to",
];

/// The decided direction and the keyword that decided it. `keyword` is `None`
/// when nothing matched and the debit default applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionMatch {
    pub direction: Direction,
    pub keyword: Option<&'static str>,
}

pub struct DirectionClassifier;

impl DirectionClassifier {
    pub fn classify(description: &str) -> Direction {
        Self::explain(description).direction
    }

    /// Unknown descriptions default to [`Direction::Debit`].
    pub fn explain(description: &str) -> DirectionMatch {
        let lower = description.to_lowercase();
        if let Some(k) = find_keyword(&lower, CREDIT_KEYWORDS) {
            return DirectionMatch { direction: Direction::Credit, keyword: Some(k) };
        }
        DirectionMatch {
            direction: Direction::Debit,
            keyword: find_keyword(&lower, DEBIT_KEYWORDS),
        }
    }
}

fn find_keyword(text: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remittance_is_credit() {
        let m = DirectionClassifier::explain("Home Remittance from ABC");
        assert_eq!(m.direction, Direction::Credit);
        assert_eq!(m.keyword, Some("remittance"));
    }

    #[test]
    fn salary_is_credit() {
        assert_eq!(DirectionClassifier::classify("SALARY JUNE 2024"), Direction::Credit);
    }

    #[test]
    fn purchase_is_debit() {
        let m = DirectionClassifier::explain("Coffee Shop Purchase");
        assert_eq!(m.direction, Direction::Debit);
        assert_eq!(m.keyword, Some("purchase"));
    }

    #[test]
    fn credit_wins_on_overlap() {
        // "transfer from" (credit) and "charges" (debit) both present.
        assert_eq!(
            DirectionClassifier::classify("Reversal of charges transfer from savings"),
            Direction::Credit
        );
    }

    #[test]
    fn unknown_defaults_to_debit() {
        let m = DirectionClassifier::explain("Unknown Transaction");
        assert_eq!(m.direction, Direction::Debit);
        assert_eq!(m.keyword, None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(DirectionClassifier::classify("INWARD RTGS ref 991"), Direction::Credit);
        assert_eq!(DirectionClassifier::classify("ATM CASH WITHDRAWAL"), Direction::Debit);
    }
}
