use crate::document::{Document, Entry, Section};
use crate::error::ParseError;
use crate::lexer::{Lexer, Line};

pub const BOM: char = '\u{feff}';

pub struct Parser<'a> {
    /// Source text after any byte order mark.
    src: &'a str,
    lexer: Lexer<'a>,
    doc: Document,
    current: Option<Section>,
    /// Comment and blank lines waiting for the entry or section they precede.
    pending: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        let (src, bom) = match src.strip_prefix(BOM) {
            Some(rest) => (rest, true),
            None => (src, false),
        };
        let mut doc = Document::new();
        doc.bom = bom;
        Self {
            src,
            lexer: Lexer::new(src),
            doc,
            current: None,
            pending: Vec::new(),
        }
    }

    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        self.doc.line_ending = Lexer::line_ending(self.src);
        self.doc.final_newline = Lexer::ends_with_newline(self.src);

        while let Some((line, raw, kind)) = self.lexer.next_line() {
            match kind {
                Line::Blank | Line::Comment => self.pending.push(raw.to_string()),
                Line::Header(name) => self.begin_section(line, name, raw)?,
                Line::Pair {
                    key,
                    value,
                    comment,
                } => self.push_pair(line, key, value, comment, raw)?,
                Line::BadHeader => return Err(ParseError::MalformedHeader { line }),
                Line::NoEquals => return Err(ParseError::MissingEquals { line }),
            }
        }

        let trailing = std::mem::take(&mut self.pending);
        match self.current.as_mut() {
            Some(last) => last.trailer.extend(trailing),
            None => self.doc.preamble.extend(trailing),
        }
        self.finish_section();
        Ok(self.doc)
    }

    fn begin_section(&mut self, line: usize, name: &str, raw: &str) -> Result<(), ParseError> {
        if name.is_empty() {
            return Err(ParseError::EmptySectionName { line });
        }
        let duplicate = self.doc.contains_section(name)
            || self.current.as_ref().is_some_and(|s| s.name == name);
        if duplicate {
            return Err(ParseError::DuplicateSection {
                line,
                name: name.to_string(),
            });
        }

        // Lines between sections trail the previous one
        let trivia = std::mem::take(&mut self.pending);
        match self.current.as_mut() {
            Some(previous) => previous.trailer.extend(trivia),
            None => self.doc.preamble.extend(trivia),
        }
        self.finish_section();
        self.current = Some(Section::from_source(name, raw));
        Ok(())
    }

    fn push_pair(
        &mut self,
        line: usize,
        key: &str,
        value: &str,
        comment: Option<&str>,
        raw: &str,
    ) -> Result<(), ParseError> {
        if key.is_empty() {
            return Err(ParseError::EmptyKey { line });
        }
        let Some(section) = self.current.as_mut() else {
            return Err(ParseError::KeyOutsideSection { line });
        };

        // Trivia before an entry belongs to that entry
        let leading = std::mem::take(&mut self.pending);
        let entry = Entry::from_source(key, value, comment, leading, raw);
        section
            .push_entry(entry)
            .map_err(|entry| ParseError::DuplicateKey {
                line,
                section: section.name.clone(),
                key: entry.key,
            })
    }

    fn finish_section(&mut self) {
        if let Some(section) = self.current.take() {
            // Names were checked when the header was read
            let _ = self.doc.push_section_raw(section);
        }
    }
}

/// Parses document text.
pub fn parse_document(src: &str) -> Result<Document, ParseError> {
    Parser::new(src).parse_document()
}
