//! Highlighted title spans for palette and inline search results.

use regex::RegexBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub matched: bool,
}

impl TextSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }
}

/// Splits `text` around case-insensitive occurrences of the whole `query`.
///
/// The query is matched literally. A blank query yields a single plain span.
pub fn highlight_match(text: &str, query: &str) -> Vec<TextSpan> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![TextSpan::plain(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![TextSpan::plain(text)];
    };

    let mut spans = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            spans.push(TextSpan::plain(&text[cursor..found.start()]));
        }
        spans.push(TextSpan {
            text: found.as_str().to_string(),
            matched: true,
        });
        cursor = found.end();
    }
    if cursor < text.len() {
        spans.push(TextSpan::plain(&text[cursor..]));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::{highlight_match, TextSpan};

    fn span(text: &str, matched: bool) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            matched,
        }
    }

    #[test]
    fn marks_every_case_insensitive_occurrence() {
        assert_eq!(
            highlight_match("Task tasks", "TASK"),
            vec![span("Task", true), span(" ", false), span("task", true), span("s", false)]
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert_eq!(
            highlight_match("Help & Support (beta)", "(beta)"),
            vec![span("Help & Support ", false), span("(beta)", true)]
        );
        assert_eq!(highlight_match("Files", "f.*"), vec![span("Files", false)]);
    }

    #[test]
    fn blank_query_is_plain() {
        assert_eq!(highlight_match("Dashboard", "  "), vec![span("Dashboard", false)]);
    }
}
