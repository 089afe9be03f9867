use std::sync::OnceLock;

use chrono::NaiveDate;
use passbook_core::{Direction, Money, ParserConfig, TransactionRecord};
use regex::Regex;

use crate::amount::{last_match_wins, AmountPolicy};
use crate::direction::DirectionClassifier;
use crate::lines::LineScanner;
use crate::patterns::{strip_spans, AmountMatch, PatternMatcher};

fn re_whitespace() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"\s+").expect("invalid regex"))
}

fn re_stan() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"STAN\(\d+\)").expect("invalid regex"))
}

/// Reconstructs transactions from statement page text.
///
/// Each line carrying a date opens a block; following lines up to the next
/// date line (or the end of the page) belong to it. One record is emitted per
/// block, even when no amount was found.
#[derive(Clone)]
pub struct TransactionBlockParser {
    statement_year: i32,
    amount_policy: AmountPolicy,
}

impl std::fmt::Debug for TransactionBlockParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionBlockParser")
            .field("statement_year", &self.statement_year)
            .finish_non_exhaustive()
    }
}

impl Default for TransactionBlockParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

enum ScanState {
    Scanning,
    InBlock(OpenBlock),
}

/// Accumulator for the block currently being read.
struct OpenBlock {
    date: NaiveDate,
    fragments: Vec<String>,
    /// `Some` once any line of the block carried an amount token. An amount
    /// token that fails to parse counts as found with a zero value.
    amount: Option<Money>,
}

impl TransactionBlockParser {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            statement_year: config.statement_year,
            amount_policy: last_match_wins,
        }
    }

    pub fn with_amount_policy(mut self, policy: AmountPolicy) -> Self {
        self.amount_policy = policy;
        self
    }

    /// Parses each page independently; blocks never span pages.
    pub fn parse_pages<I, S>(&self, pages: I) -> Vec<TransactionRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<TransactionRecord> = pages
            .into_iter()
            .flat_map(|page| self.parse_page(page.as_ref()))
            .collect();
        tracing::info!(count = records.len(), "extracted statement transactions");
        records
    }

    /// Splits a single text blob on form feeds and parses every page.
    pub fn parse_document(&self, text: &str) -> Vec<TransactionRecord> {
        self.parse_pages(LineScanner::split_pages(text))
    }

    pub fn parse_page(&self, text: &str) -> Vec<TransactionRecord> {
        let lines = LineScanner::lines(text);
        let mut records = Vec::new();
        let mut state = ScanState::Scanning;
        let mut idx = 0;

        loop {
            state = match state {
                ScanState::Scanning => {
                    let Some(line) = lines.get(idx) else { break };
                    idx += 1;
                    match self.open_block(line) {
                        Some(block) => ScanState::InBlock(block),
                        None => ScanState::Scanning,
                    }
                }
                ScanState::InBlock(mut block) => match lines.get(idx) {
                    Some(line) if PatternMatcher::find_date(line).is_none() => {
                        self.continue_block(&mut block, line);
                        idx += 1;
                        ScanState::InBlock(block)
                    }
                    // A date line (left for the next anchor) or end of page.
                    _ => {
                        records.push(block.close());
                        ScanState::Scanning
                    }
                },
            };
        }

        records
    }

    /// SCANNING → IN_BLOCK. Returns `None` when the line carries no date or the
    /// date does not parse.
    fn open_block(&self, line: &str) -> Option<OpenBlock> {
        let date_match = PatternMatcher::find_date(line)?;
        let Some(date) = PatternMatcher::parse_date(&date_match, self.statement_year) else {
            tracing::warn!(candidate = date_match.text, "skipping unparseable statement date");
            return None;
        };

        let mut block = OpenBlock { date, fragments: Vec::new(), amount: None };

        let amounts = PatternMatcher::find_amounts(line);
        if let Some(amount) = self.select_amount(&amounts) {
            let mut spans: Vec<_> = amounts.iter().map(|m| m.span.clone()).collect();
            spans.push(date_match.span.clone());
            block.push_fragment(strip_spans(line, &spans));
            block.amount = Some(amount);
        }

        Some(block)
    }

    /// One continuation line of an open block.
    fn continue_block(&self, block: &mut OpenBlock, line: &str) {
        let amounts = PatternMatcher::find_amounts(line);
        if amounts.is_empty() {
            block.push_fragment(line.to_string());
        } else if block.amount.is_none() {
            if let Some(amount) = self.select_amount(&amounts) {
                let spans: Vec<_> = amounts.iter().map(|m| m.span.clone()).collect();
                block.push_fragment(strip_spans(line, &spans));
                block.amount = Some(amount);
            }
        }
        // Further amount lines (running balances) are neither description nor amount.
    }

    fn select_amount(&self, amounts: &[AmountMatch<'_>]) -> Option<Money> {
        let chosen = amounts.get((self.amount_policy)(amounts)?)?;
        Some(chosen.value().unwrap_or_else(|| {
            tracing::warn!(token = chosen.text, "unparseable amount, using zero");
            Money::zero()
        }))
    }
}

impl OpenBlock {
    fn push_fragment(&mut self, fragment: String) {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_string());
        }
    }

    /// IN_BLOCK → SCANNING: assemble the record.
    fn close(self) -> TransactionRecord {
        let joined = self.fragments.join(" ");
        let collapsed = re_whitespace().replace_all(&joined, " ");
        let description = re_stan().replace_all(&collapsed, "").trim().to_string();

        let record = TransactionRecord::new(
            self.date,
            description,
            self.amount.unwrap_or_default(),
            Direction::Debit,
        );
        let direction = DirectionClassifier::classify(&record.description);
        let record = TransactionRecord { direction, ..record };

        tracing::debug!(
            date = %record.date,
            amount = %record.amount,
            direction = %record.direction,
            description = %record.description,
            "closed transaction block"
        );
        record
    }
}
