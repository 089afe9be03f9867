use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive span of dates covered by a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Smallest range covering every date, or `None` for an empty input.
    pub fn covering<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        dates.into_iter().fold(None, |range, d| match range {
            None => Some(DateRange::new(d, d)),
            Some(r) => Some(DateRange::new(r.start.min(d), r.end.max(d))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn covering_spans_min_to_max() {
        let r = DateRange::covering([date(2024, 6, 26), date(2024, 6, 1), date(2024, 6, 30)]).unwrap();
        assert_eq!(r, DateRange::new(date(2024, 6, 1), date(2024, 6, 30)));
    }

    #[test]
    fn covering_empty_is_none() {
        assert_eq!(DateRange::covering(Vec::new()), None);
    }

    #[test]
    fn covering_single_date() {
        let r = DateRange::covering([date(2024, 1, 5)]).unwrap();
        assert_eq!(r.start, r.end);
    }

    #[test]
    fn display() {
        let r = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(r.to_string(), "2024-01-01 to 2024-12-31");
    }
}
