use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::NaiveDate;
use passbook_core::Money;
use regex::Regex;
use rust_decimal::Decimal;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_date_weekday,
    r"(Mon|Tue|Wed|Thu|Fri|Sat|Sun)\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+(\d{1,2})");
re!(re_date_slash,
    r"\d{2}/\d{2}/\d{4}");
re!(re_date_dash,
    r"\d{2}-\d{2}-\d{4}");
re!(re_date_iso,
    r"\d{4}-\d{2}-\d{2}");

// Only thousands-comma, two-decimal amounts are recognized. `1234`, `12,5`
// and `1.234,56` are invisible to the parser.
re!(re_amount,
    r"[\d,]+\.\d{2}");

// ── Match types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Wed Jun 26`; carries no year.
    WeekdayMonthDay,
    /// `26/06/2024`
    DayMonthYearSlash,
    /// `26-06-2024`
    DayMonthYearDash,
    /// `2024-06-26`
    Iso,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
    pub format: DateFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMatch<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

impl AmountMatch<'_> {
    /// Parsed value, or `None` for tokens such as `,.50` that match the
    /// pattern but are not numbers.
    pub fn value(&self) -> Option<Money> {
        PatternMatcher::parse_amount(self.text)
    }
}

// ── Public matching API ──────────────────────────────────────────────────────

pub struct PatternMatcher;

impl PatternMatcher {
    /// First date in `line`. Grammars are tried in fixed priority order and the
    /// first grammar that hits wins, even if a later grammar matches earlier
    /// in the line.
    pub fn find_date(line: &str) -> Option<DateMatch<'_>> {
        let grammars: [(fn() -> &'static Regex, DateFormat); 4] = [
            (re_date_weekday, DateFormat::WeekdayMonthDay),
            (re_date_slash, DateFormat::DayMonthYearSlash),
            (re_date_dash, DateFormat::DayMonthYearDash),
            (re_date_iso, DateFormat::Iso),
        ];
        grammars.iter().find_map(|(re, format)| {
            re().find(line).map(|m| DateMatch {
                text: m.as_str(),
                span: m.range(),
                format: *format,
            })
        })
    }

    /// Every amount token in `line`, left to right.
    pub fn find_amounts(line: &str) -> Vec<AmountMatch<'_>> {
        re_amount()
            .find_iter(line)
            .map(|m| AmountMatch { text: m.as_str(), span: m.range() })
            .collect()
    }

    /// Converts a matched date to a calendar date. `statement_year` fills in
    /// the year for the weekday-month-day format.
    pub fn parse_date(m: &DateMatch<'_>, statement_year: i32) -> Option<NaiveDate> {
        match m.format {
            DateFormat::WeekdayMonthDay => {
                let c = re_date_weekday().captures(m.text)?;
                let month = abbr_month_to_num(c.get(2)?.as_str())?;
                let day: u32 = c.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(statement_year, month, day)
            }
            DateFormat::DayMonthYearSlash | DateFormat::DayMonthYearDash | DateFormat::Iso => {
                ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"]
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(m.text, fmt).ok())
            }
        }
    }

    pub fn parse_amount(s: &str) -> Option<Money> {
        let clean = s.replace(',', "");
        let dec = Decimal::from_str(&clean).ok()?;
        Some(Money::from_decimal(dec).abs())
    }
}

/// `line` with every byte covered by `spans` removed, trimmed.
pub(crate) fn strip_spans(line: &str, spans: &[Range<usize>]) -> String {
    let kept: String = line
        .char_indices()
        .filter(|(i, _)| !spans.iter().any(|s| s.contains(i)))
        .map(|(_, c)| c)
        .collect();
    kept.trim().to_string()
}

fn abbr_month_to_num(name: &str) -> Option<u32> {
    match name {
        "Jan" => Some(1), "Feb" => Some(2), "Mar" => Some(3), "Apr" => Some(4),
        "May" => Some(5), "Jun" => Some(6), "Jul" => Some(7), "Aug" => Some(8),
        "Sep" => Some(9), "Oct" => Some(10), "Nov" => Some(11), "Dec" => Some(12),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
