//! Amount selection policies.
//!
//! A statement line may carry several amounts (transaction amount, running
//! balance, fees). A policy picks which one is the transaction amount. The
//! parser uses [`last_match_wins`] by default; this is a heuristic, and a
//! balance column printed after the amount will be picked instead of it.

use crate::patterns::AmountMatch;

/// Returns the index of the chosen match, or `None` when `matches` is empty.
pub type AmountPolicy = fn(&[AmountMatch<'_>]) -> Option<usize>;

pub fn last_match_wins(matches: &[AmountMatch<'_>]) -> Option<usize> {
    matches.len().checked_sub(1)
}

/// For layouts that print the running balance after the amount.
pub fn first_match_wins(matches: &[AmountMatch<'_>]) -> Option<usize> {
    if matches.is_empty() { None } else { Some(0) }
}
