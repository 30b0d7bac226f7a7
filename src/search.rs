//! Find-next search over the editor text.
//!
//! Mirrors a classic "find next" control: repeated searches continue
//! from the previous hit, wrap around at the end, and restart when the
//! query changes.

/// Search state carried between find-next invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// The query as typed into the search box.
    pub query: String,
    last_query: String,
    next_from: usize,
}

/// A located occurrence of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset just past the match.
    pub end: usize,
    /// 1-based line number of the match start.
    pub line: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Find the next occurrence of the query in `text`.
    ///
    /// Starts after the previous hit, wrapping to the top when the tail
    /// has no match. A changed query restarts from the beginning.
    /// Returns `None` for an empty query or a text without the query.
    pub fn find_next(&mut self, text: &str) -> Option<Match> {
        if self.query.is_empty() {
            return None;
        }
        if self.query != self.last_query {
            self.last_query = self.query.clone();
            self.next_from = 0;
        }

        // The resume offset may be stale after edits; a lossy clamp to
        // a char boundary just restarts the scan from the top.
        let from = self.next_from.min(text.len());
        let tail = text.get(from..).unwrap_or("");
        let start = tail
            .find(&self.query)
            .map(|offset| offset + from)
            .or_else(|| text.find(&self.query))?;
        let end = start + self.query.len();
        self.next_from = end;

        Some(Match {
            start,
            end,
            line: text[..start].matches('\n').count() + 1,
        })
    }

    /// Forget the resume position (e.g. after the text was replaced).
    pub fn reset(&mut self) {
        self.next_from = 0;
        self.last_query.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(query: &str) -> SearchState {
        let mut state = SearchState::new();
        state.set_query(query.to_string());
        state
    }

    #[test]
    fn test_find_next_walks_successive_matches() {
        let mut state = state_with("ab");
        let text = "ab cd ab cd ab";

        assert_eq!(state.find_next(text).unwrap().start, 0);
        assert_eq!(state.find_next(text).unwrap().start, 6);
        assert_eq!(state.find_next(text).unwrap().start, 12);
    }

    #[test]
    fn test_find_next_wraps_around() {
        let mut state = state_with("ab");
        let text = "ab cd ab";

        assert_eq!(state.find_next(text).unwrap().start, 0);
        assert_eq!(state.find_next(text).unwrap().start, 6);
        // Tail is exhausted; wrap back to the first hit.
        assert_eq!(state.find_next(text).unwrap().start, 0);
    }

    #[test]
    fn test_changed_query_restarts_from_top() {
        let mut state = state_with("ab");
        let text = "ab cd ab";
        state.find_next(text);
        state.find_next(text);

        state.set_query("cd".to_string());
        assert_eq!(state.find_next(text).unwrap().start, 3);
    }

    #[test]
    fn test_no_match_returns_none() {
        let mut state = state_with("zz");
        assert!(state.find_next("ab cd").is_none());
    }

    #[test]
    fn test_empty_query_returns_none() {
        let mut state = SearchState::new();
        assert!(state.find_next("anything").is_none());
    }

    #[test]
    fn test_match_reports_line_number() {
        let mut state = state_with("needle");
        let text = "one\ntwo\nthree needle\n";
        assert_eq!(state.find_next(text).unwrap().line, 3);
    }

    #[test]
    fn test_reset_restarts_scanning() {
        let mut state = state_with("ab");
        let text = "ab cd ab";
        state.find_next(text);
        state.find_next(text);

        state.reset();
        assert_eq!(state.find_next(text).unwrap().start, 0);
    }

    #[test]
    fn test_stale_offset_beyond_text_is_clamped() {
        let mut state = state_with("ab");
        state.find_next("some long text with ab far out");

        // Text got shorter than the resume offset.
        assert_eq!(state.find_next("ab").unwrap().start, 0);
    }
}
