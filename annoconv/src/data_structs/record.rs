use std::io;
use std::str::FromStr;

use super::attributes::{
    Attributes,
    Dialect,
};
use super::enums::Strand;
use super::typedef::PosType;
use crate::error::{
    ConvertError,
    ConvertResult,
};

pub const GXF_COLUMNS: usize = 9;

/// One data line of a GFF3 or GTF file.
#[derive(Debug, Clone, PartialEq)]
pub struct GxfRecord {
    pub seqid:        String,
    pub source:       String,
    pub feature_type: String,
    pub start:        PosType,
    pub end:          PosType,
    pub score:        String,
    pub strand:       Strand,
    pub frame:        String,
    pub attributes:   Attributes,
}

/// A parsed record together with the attribute clauses that had to be
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub record:    GxfRecord,
    pub malformed: Vec<String>,
}

fn parse_coordinate(
    value: &str,
    line: usize,
) -> ConvertResult<PosType> {
    value
        .trim()
        .parse::<PosType>()
        .map_err(|_| ConvertError::InvalidCoordinate {
            line,
            value: value.to_string(),
        })
}

impl GxfRecord {
    /// Splits a tab-separated line into the nine GFF columns.
    ///
    /// `line` is only used for error reporting.
    pub fn parse(
        text: &str,
        dialect: Dialect,
        line: usize,
    ) -> ConvertResult<ParsedRecord> {
        Self::parse_with(text, dialect, true, line)
    }

    /// Like [`GxfRecord::parse`], with attribute values kept verbatim unless
    /// `strip_prefixes` is set.
    pub fn parse_with(
        text: &str,
        dialect: Dialect,
        strip_prefixes: bool,
        line: usize,
    ) -> ConvertResult<ParsedRecord> {
        let fields: Vec<&str> = text
            .trim_end_matches(['\n', '\r'])
            .splitn(GXF_COLUMNS, '\t')
            .collect();
        if fields.len() < GXF_COLUMNS {
            return Err(ConvertError::MissingRequiredColumn {
                line,
                found: fields.len(),
            });
        }

        let (attributes, malformed) =
            Attributes::parse_with(fields[8], dialect, strip_prefixes);
        let record = GxfRecord {
            seqid: fields[0].to_string(),
            source: fields[1].to_string(),
            feature_type: fields[2].to_string(),
            start: parse_coordinate(fields[3], line)?,
            end: parse_coordinate(fields[4], line)?,
            score: fields[5].to_string(),
            strand: Strand::from_str(fields[6]).unwrap_or(Strand::None),
            frame: fields[7].to_string(),
            attributes,
        };
        Ok(ParsedRecord { record, malformed })
    }

    /// Writes the first eight columns, tab-separated, without a trailing
    /// tab.
    pub fn write_columns<W: io::Write>(
        &self,
        f: &mut W,
    ) -> io::Result<()> {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.source,
            self.feature_type,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.frame
        )
    }
}
