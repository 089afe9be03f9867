use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::money::Money;

/// The closed set of spending categories applied to debit transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Declaration order. Keyword fallback scans categories in this order.
    pub const ALL: [Category; 7] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::BillsAndUtilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-category spending totals. Always holds an entry for every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(BTreeMap<Category, Money>);

impl CategoryBreakdown {
    pub fn new() -> Self {
        CategoryBreakdown(Category::ALL.into_iter().map(|c| (c, Money::zero())).collect())
    }

    pub fn add(&mut self, category: Category, amount: Money) {
        *self.0.entry(category).or_insert_with(Money::zero) += amount;
    }

    pub fn get(&self, category: Category) -> Money {
        self.0.get(&category).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.0.iter().map(|(c, m)| (*c, *m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategoryBreakdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn display_uses_human_names() {
        assert_eq!(Category::BillsAndUtilities.to_string(), "Bills & Utilities");
        assert_eq!(serde_json::to_string(&Category::FoodAndDining).unwrap(), "\"Food & Dining\"");
    }

    #[test]
    fn breakdown_is_seeded_with_every_category() {
        let b = CategoryBreakdown::new();
        assert_eq!(b.len(), 7);
        assert!(b.iter().all(|(_, m)| m.is_zero()));
    }

    #[test]
    fn breakdown_accumulates() {
        let mut b = CategoryBreakdown::new();
        b.add(Category::Shopping, Money::from_cents(1000));
        b.add(Category::Shopping, Money::from_cents(250));
        assert_eq!(b.get(Category::Shopping), Money::from_cents(1250));
        assert_eq!(b.total(), Money::from_cents(1250));
    }

    #[test]
    fn breakdown_serializes_as_named_map() {
        let json = serde_json::to_value(CategoryBreakdown::new()).unwrap();
        assert!(json.get("Food & Dining").is_some());
        assert!(json.get("Other").is_some());
    }
}
