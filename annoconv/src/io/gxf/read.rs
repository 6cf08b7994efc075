use std::io::BufRead;

use log::warn;

use crate::data_structs::{
    Dialect,
    GxfRecord,
};
use crate::error::{
    ConvertError,
    ConvertResult,
};
use crate::with_field_fn;

/// A non-empty line of a GFF3/GTF file.
#[derive(Debug, Clone, PartialEq)]
pub enum GxfLine {
    /// Any line starting with `#`, without its line terminator.
    Comment(String),
    Record(GxfRecord),
}

/// Streams records out of a GFF3/GTF source, one line at a time.
///
/// Items are `(line_number, line)` pairs with 1-based line numbers. Attribute
/// clauses that cannot be parsed are dropped with a warning; everything else
/// that goes wrong ends the stream with an error.
pub struct GxfReader<R: BufRead> {
    reader:         R,
    dialect:        Dialect,
    strip_prefixes: bool,
    buffer:         String,
    line:           usize,
    malformed:      usize,
    finished:       bool,
}

impl<R: BufRead> GxfReader<R> {
    pub fn new(
        reader: R,
        dialect: Dialect,
    ) -> Self {
        Self {
            reader,
            dialect,
            strip_prefixes: true,
            buffer: String::new(),
            line: 0,
            malformed: 0,
            finished: false,
        }
    }

    with_field_fn!(strip_prefixes, bool);

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> usize { self.line }

    /// Number of attribute clauses dropped so far.
    pub fn malformed_clauses(&self) -> usize { self.malformed }

    fn read_next(&mut self) -> ConvertResult<Option<(usize, GxfLine)>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buffer.trim_end_matches(['\n', '\r']);
            if text.trim().is_empty() {
                continue;
            }
            if text.starts_with('#') {
                return Ok(Some((self.line, GxfLine::Comment(text.to_string()))));
            }

            let parsed = GxfRecord::parse_with(
                text,
                self.dialect,
                self.strip_prefixes,
                self.line,
            )?;
            for clause in parsed.malformed {
                self.malformed += 1;
                warn!(
                    "{}",
                    ConvertError::MalformedAttributeClause {
                        line: self.line,
                        clause,
                    }
                );
            }
            return Ok(Some((self.line, GxfLine::Record(parsed.record))));
        }
    }
}

impl<R: BufRead> Iterator for GxfReader<R> {
    type Item = ConvertResult<(usize, GxfLine)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_next() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            },
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            },
        }
    }
}
