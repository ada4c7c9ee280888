use crate::document::LineEnding;

/// One physical line of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Header(&'a str), // [Name]
    Pair {
        key: &'a str,
        value: &'a str,
        comment: Option<&'a str>,
    },
    Comment, // ; ... or # ...
    Blank,

    // Malformed lines, reported by the parser with their line number
    BadHeader,
    NoEquals,
}

pub struct Lexer<'a> {
    lines: std::str::Split<'a, char>,
    line_no: usize,
    remaining: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        let mut count = src.split('\n').count();
        // A trailing newline does not start another line
        if src.is_empty() || src.ends_with('\n') {
            count -= 1;
        }
        Self {
            lines: src.split('\n'),
            line_no: 0,
            remaining: count,
        }
    }

    pub fn line_ending(src: &str) -> LineEnding {
        if src.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn ends_with_newline(src: &str) -> bool {
        src.ends_with('\n')
    }

    /// `(1-based line number, raw text without line terminator, classification)`.
    pub fn next_line(&mut self) -> Option<(usize, &'a str, Line<'a>)> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.lines.next()?;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        self.remaining -= 1;
        self.line_no += 1;
        Some((self.line_no, raw, classify(raw)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = (usize, &'a str, Line<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

pub fn classify(raw: &str) -> Line<'_> {
    let text = raw.trim();

    if text.is_empty() {
        return Line::Blank;
    }
    if text.starts_with(';') || text.starts_with('#') {
        return Line::Comment;
    }

    if let Some(rest) = text.strip_prefix('[') {
        return match rest.strip_suffix(']') {
            Some(name) if !name.contains(['[', ']']) => Line::Header(name.trim()),
            _ => Line::BadHeader,
        };
    }

    let Some((key, rest)) = text.split_once('=') else {
        return Line::NoEquals;
    };
    let (value, comment) = split_inline_comment(rest);
    Line::Pair {
        key: key.trim(),
        value: value.trim(),
        comment,
    }
}

/// An inline comment starts at a `;` preceded by whitespace.
fn split_inline_comment(rest: &str) -> (&str, Option<&str>) {
    let bytes = rest.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b';' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return (&rest[..i], Some(rest[i..].trim_end()));
        }
    }
    (rest, None)
}
