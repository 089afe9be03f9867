/// Splits extracted page text into trimmed lines.
pub struct LineScanner;

impl LineScanner {
    /// Every line of `text`, trimmed, in order. Blank lines are kept as empty
    /// strings so line positions stay stable.
    pub fn lines(text: &str) -> Vec<&str> {
        text.lines().map(str::trim).collect()
    }

    /// Splits a whole-document blob into pages on form feeds.
    pub fn split_pages(text: &str) -> Vec<&str> {
        text.split('\u{c}').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_trimmed_and_ordered() {
        let lines = LineScanner::lines("  Wed Jun 26  \n\tCoffee\r\n\n  450.00");
        assert_eq!(lines, vec!["Wed Jun 26", "Coffee", "", "450.00"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(LineScanner::lines("").is_empty());
    }

    #[test]
    fn split_pages_on_form_feed() {
        let pages = LineScanner::split_pages("page one\n\u{c}page two\n");
        assert_eq!(pages, vec!["page one\n", "page two\n"]);
    }

    #[test]
    fn split_pages_without_form_feed_is_one_page() {
        assert_eq!(LineScanner::split_pages("only page").len(), 1);
    }
}
