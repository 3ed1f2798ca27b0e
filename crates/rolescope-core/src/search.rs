//! In-document line search: match extraction and circular navigation.

use regex::RegexBuilder;

use crate::MAX_QUERY_LEN;

/// One occurrence of the query within a document.
///
/// Offsets are byte positions within the matched line, suitable for slicing
/// the line when rendering highlights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset of the match start within the line.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// The matched text.
    pub text: String,
}

/// Find all non-overlapping case-insensitive occurrences of `query` in
/// `document`, line by line.
///
/// The query is a literal string, not a pattern; special characters are
/// escaped before matching. An empty query, an over-length query, or a query
/// that fails to compile all yield zero matches rather than an error.
#[must_use]
pub fn find_matches(document: &str, query: &str) -> Vec<SearchMatch> {
    let query = query.trim();
    if query.is_empty() || query.len() > MAX_QUERY_LEN {
        return Vec::new();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    for (line, text) in document.lines().enumerate() {
        for found in pattern.find_iter(text) {
            matches.push(SearchMatch {
                line,
                start: found.start(),
                end: found.end(),
                text: found.as_str().to_string(),
            });
        }
    }
    matches
}

/// Search state over one document: input buffer, derived matches, and the
/// current-match index.
///
/// Matches are recomputed in full on every edit and never persist across
/// documents. `active` tracks whether the search input has focus; it is
/// orthogonal to whether matches exist.
#[derive(Debug, Default)]
pub struct DocumentSearch {
    active: bool,
    input: String,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl DocumentSearch {
    /// Create an inactive, empty search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the search input currently has focus.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current input buffer.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// All matches for the current query, in document order.
    #[must_use]
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Index of the current match, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The current match, if any.
    #[must_use]
    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.current.and_then(|index| self.matches.get(index))
    }

    /// Focus the search input, discarding any previous query and matches.
    pub fn activate(&mut self) {
        self.active = true;
        self.input.clear();
        self.matches.clear();
        self.current = None;
    }

    /// Drop input focus, keeping the matches for `n`/`N` navigation.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Reset to the inactive empty state.
    pub fn clear(&mut self) {
        self.active = false;
        self.input.clear();
        self.matches.clear();
        self.current = None;
    }

    /// Append a character to the query and recompute matches. Input beyond
    /// the query length cap is ignored.
    pub fn push_char(&mut self, c: char, document: &str) {
        if self.input.len() + c.len_utf8() > MAX_QUERY_LEN {
            return;
        }
        self.input.push(c);
        self.recompute(document);
    }

    /// Delete the last character of the query and recompute matches.
    pub fn pop_char(&mut self, document: &str) {
        if self.input.pop().is_some() {
            self.recompute(document);
        }
    }

    fn recompute(&mut self, document: &str) {
        self.matches = find_matches(document, &self.input);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// Advance to the next match, wrapping past the end.
    pub fn next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            Some(index) => (index + 1) % self.matches.len(),
            None => 0,
        });
    }

    /// Step back to the previous match, wrapping past the start.
    pub fn previous(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let count = self.matches.len();
        self.current = Some(match self.current {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "Allow s3\nDeny ec2\nAllow s3 again";

    #[test]
    fn case_insensitive_matches_across_lines() {
        let matches = find_matches(DOCUMENT, "allow");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line, 0);
        assert_eq!(matches[1].line, 2);
        assert_eq!(matches[0].text, "Allow");
    }

    #[test]
    fn navigation_wraps_both_directions() {
        let mut search = DocumentSearch::new();
        search.activate();
        for c in "allow".chars() {
            search.push_char(c, DOCUMENT);
        }
        assert_eq!(search.current(), Some(0));

        search.next();
        assert_eq!(search.current(), Some(1));
        search.next();
        assert_eq!(search.current(), Some(0));

        search.previous();
        assert_eq!(search.current(), Some(1));
        search.previous();
        assert_eq!(search.current(), Some(0));
    }

    #[test]
    fn match_count_equals_total_occurrences() {
        let document = "aaa\naa a aa\n";
        // Non-overlapping "aa": one in "aaa", two in "aa a aa".
        let matches = find_matches(document, "aa");
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn multiple_matches_on_one_line_keep_offsets() {
        let matches = find_matches("s3 and s3", "s3");
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].start, matches[0].end), (0, 2));
        assert_eq!((matches[1].start, matches[1].end), (7, 9));
    }

    #[test]
    fn empty_query_yields_no_matches() {
        assert!(find_matches(DOCUMENT, "").is_empty());
        assert!(find_matches(DOCUMENT, "   ").is_empty());
    }

    #[test]
    fn over_length_query_yields_no_matches() {
        let query = "a".repeat(crate::MAX_QUERY_LEN + 1);
        assert!(find_matches(&"a".repeat(500), &query).is_empty());
    }

    #[test]
    fn special_characters_are_literal() {
        let document = "Resource: arn:aws:s3:::bucket/*";
        let matches = find_matches(document, "bucket/*");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "bucket/*");
        // A bare regex metacharacter matches itself, not "anything".
        assert!(find_matches("abc", ".*").is_empty());
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let matches = find_matches(DOCUMENT, "  allow  ");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn navigation_on_empty_matches_is_a_no_op() {
        let mut search = DocumentSearch::new();
        search.next();
        search.previous();
        assert_eq!(search.current(), None);
    }

    #[test]
    fn activate_discards_previous_state() {
        let mut search = DocumentSearch::new();
        search.activate();
        for c in "allow".chars() {
            search.push_char(c, DOCUMENT);
        }
        assert!(!search.matches().is_empty());

        search.activate();
        assert_eq!(search.input(), "");
        assert!(search.matches().is_empty());
        assert_eq!(search.current(), None);
    }

    #[test]
    fn deactivate_keeps_matches_for_navigation() {
        let mut search = DocumentSearch::new();
        search.activate();
        for c in "allow".chars() {
            search.push_char(c, DOCUMENT);
        }
        search.deactivate();
        assert!(!search.is_active());
        assert_eq!(search.matches().len(), 2);
        search.next();
        assert_eq!(search.current(), Some(1));
    }

    #[test]
    fn edits_recompute_current_to_first_match() {
        let mut search = DocumentSearch::new();
        search.activate();
        for c in "allow".chars() {
            search.push_char(c, DOCUMENT);
        }
        search.next();
        assert_eq!(search.current(), Some(1));
        // Any edit resets to the first match of the new result set.
        search.pop_char(DOCUMENT);
        assert_eq!(search.current(), Some(0));
    }
}
