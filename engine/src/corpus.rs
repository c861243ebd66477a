//! Line-oriented corpus format shared by the cleaner (writer) and the index
//! builder (reader): `title SEP content SEP url \n`, one document per line.

use std::io::{self, Write};

/// ETX. Never appears in cleaned text, so it is safe as a field separator.
pub const SEPARATOR: char = '\x03';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub url: &'a str,
}

/// Split one corpus line into its three fields. A run of adjacent separators
/// counts as one, so an empty field between two others disappears. Any field
/// count other than three is a malformed record and yields `None`.
pub fn parse_record(line: &str) -> Option<RawRecord<'_>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let pieces: Vec<&str> = line.split(SEPARATOR).collect();
    let last = pieces.len() - 1;
    let mut fields = pieces
        .into_iter()
        .enumerate()
        .filter(|&(i, f)| !f.is_empty() || i == 0 || i == last)
        .map(|(_, f)| f);
    let title = fields.next()?;
    let content = fields.next()?;
    let url = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some(RawRecord { title, content, url })
}

/// Append one record. Separators and line breaks inside fields become spaces.
/// An empty content field merges with its neighbours on read, so such a record
/// is dropped by the builder.
pub fn write_record<W: Write>(out: &mut W, title: &str, content: &str, url: &str) -> io::Result<()> {
    let sanitize = |s: &str| s.replace([SEPARATOR, '\n', '\r'], " ");
    writeln!(
        out,
        "{}{SEPARATOR}{}{SEPARATOR}{}",
        sanitize(title),
        sanitize(content),
        sanitize(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_fields() {
        let rec = parse_record("Intro\x03some text\x03http://x/a.html\r\n").unwrap();
        assert_eq!(rec.title, "Intro");
        assert_eq!(rec.content, "some text");
        assert_eq!(rec.url, "http://x/a.html");
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(parse_record("only title").is_none());
        assert!(parse_record("a\x03b").is_none());
        assert!(parse_record("a\x03b\x03c\x03d").is_none());
    }

    #[test]
    fn adjacent_separators_merge() {
        assert!(parse_record("t\x03\x03u").is_none());
        let rec = parse_record("t\x03\x03\x03body\x03u").unwrap();
        assert_eq!((rec.title, rec.content, rec.url), ("t", "body", "u"));
    }

    #[test]
    fn empty_leading_or_trailing_field_is_kept() {
        let rec = parse_record("\x03body\x03u").unwrap();
        assert_eq!(rec.title, "");
        let rec = parse_record("t\x03body\x03").unwrap();
        assert_eq!(rec.url, "");
    }

    #[test]
    fn written_record_parses_back() {
        let mut buf = Vec::new();
        write_record(&mut buf, "A\x03B", "line one\nline two", "http://x/").unwrap();
        let line = String::from_utf8(buf).unwrap();
        let rec = parse_record(&line).unwrap();
        assert_eq!(rec.title, "A B");
        assert_eq!(rec.content, "line one line two");
    }
}
