use serde::Serialize;
use std::fmt;

/// Characters kept before the match.
pub const PREV_CHARS: usize = 50;
/// Characters kept after the start of the match.
pub const NEXT_CHARS: usize = 100;

/// Preview of a document around the first matched term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Snippet {
    Excerpt(String),
    /// The term has no case-insensitive occurrence in the raw content, e.g.
    /// because the tokenizer rewrote it.
    TermNotFound,
    /// The match was found but the computed window is empty.
    InvalidWindow,
}

impl Snippet {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Snippet::Excerpt(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snippet::Excerpt(s) => f.write_str(s),
            Snippet::TermNotFound => f.write_str("[term not found in content]"),
            Snippet::InvalidWindow => f.write_str("[empty snippet window]"),
        }
    }
}

/// Offset in characters of the first case-insensitive occurrence of `term`.
fn find_case_insensitive(content: &[char], term: &[char]) -> Option<usize> {
    if term.is_empty() || term.len() > content.len() {
        return None;
    }
    let eq = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());
    content
        .windows(term.len())
        .position(|w| w.iter().zip(term).all(|(&a, &b)| eq(a, b)))
}

/// Cut a window of `content` around the first occurrence of `term`.
///
/// Offsets are in characters. The window starts `PREV_CHARS` before the match
/// (or at 0) and ends `NEXT_CHARS` after it, or at `len - 1` when that would
/// run past the end; the end is exclusive.
pub fn extract(content: &str, term: &str) -> Snippet {
    let chars: Vec<char> = content.chars().collect();
    let needle: Vec<char> = term.chars().collect();
    let Some(pos) = find_case_insensitive(&chars, &needle) else {
        return Snippet::TermNotFound;
    };
    let len = chars.len();
    let start = if pos > PREV_CHARS { pos - PREV_CHARS } else { 0 };
    let end = if pos + NEXT_CHARS < len { pos + NEXT_CHARS } else { len - 1 };
    if end <= start {
        return Snippet::InvalidWindow;
    }
    let mut out: String = chars[start..end].iter().collect();
    out.push_str(" ... ");
    Snippet::Excerpt(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_content_bounds() {
        let content = format!("{}boost", "x".repeat(55));
        assert_eq!(content.chars().count(), 60);
        let expected = format!("{} ... ", &content[5..59]);
        assert_eq!(extract(&content, "boost"), Snippet::Excerpt(expected));
    }

    #[test]
    fn window_in_long_content() {
        let content = format!("{}Boost{}", "a".repeat(200), "b".repeat(200));
        let Snippet::Excerpt(s) = extract(&content, "boost") else { panic!("expected excerpt") };
        assert_eq!(s, format!("{} ... ", &content[150..300]));
        assert!(s.contains("Boost"));
    }

    #[test]
    fn match_is_case_insensitive_and_keeps_original_case() {
        let s = extract("This is a Boost library", "boost");
        assert_eq!(s.as_text(), Some("This is a Boost librar ... "));
    }

    #[test]
    fn missing_term_is_distinct_from_empty_window() {
        assert_eq!(extract("nothing here", "boost"), Snippet::TermNotFound);
        assert_eq!(extract("x", "x"), Snippet::InvalidWindow);
        assert_ne!(Snippet::TermNotFound, Snippet::InvalidWindow);
    }

    #[test]
    fn offsets_are_characters_not_bytes() {
        let content = format!("{}boost trailing", "é".repeat(60));
        let Snippet::Excerpt(s) = extract(&content, "boost") else { panic!("expected excerpt") };
        assert!(s.starts_with(&"é".repeat(50)));
        assert!(s.contains("boost"));
    }
}
