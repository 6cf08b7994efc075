//! Splice-junction extraction from a splice aligner's alignment report.
//!
//! Each alignment in the report is a run of indented block lines such as
//! `    +chr1:100-200  (1-101)   99%`. Any other line ends the run.

use std::fmt;
use std::io::{
    BufRead,
    BufWriter,
    Write,
};
use std::str::FromStr;

use log::{
    debug,
    info,
};
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::data_structs::{
    AlignmentSpan,
    JunctionTable,
    PosType,
    Strand,
};
use crate::error::ConvertResult;

static BLOCK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s+(?P<strand>[+-])(?P<chrom>[\w.]+):(?P<start>\d+)-(?P<end>\d+)\s+\(\d+-\d+\)\s+\d+%.*",
    )
    .unwrap()
});

/// One aligned block parsed from a report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBlock {
    pub chrom:  String,
    pub strand: Strand,
    pub start:  PosType,
    pub end:    PosType,
}

impl AlignedBlock {
    /// Returns `None` for anything that is not a block line. Coordinates too
    /// large for [`PosType`] are treated the same way.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = BLOCK_LINE.captures(line)?;
        Some(Self {
            chrom:  captures["chrom"].to_string(),
            strand: Strand::from_str(&captures["strand"]).unwrap_or(Strand::None),
            start:  captures["start"].parse().ok()?,
            end:    captures["end"].parse().ok()?,
        })
    }
}

/// Groups block lines into alignments and counts their junctions.
#[derive(Debug, Default)]
pub struct JunctionExtractor {
    chrom:      String,
    strand:     Strand,
    coords:     Vec<PosType>,
    table:      JunctionTable,
    alignments: usize,
}

impl JunctionExtractor {
    pub fn new() -> Self { Self::default() }

    /// Feeds one report line. Returns the finished alignment when `line`
    /// closes one.
    pub fn push_line(
        &mut self,
        line: &str,
    ) -> Option<AlignmentSpan> {
        match AlignedBlock::parse(line) {
            Some(block) => {
                self.chrom = block.chrom;
                self.strand = block.strand;
                self.coords.push(block.start);
                self.coords.push(block.end);
                None
            },
            None => self.flush(),
        }
    }

    /// Closes the alignment still open at end of input, if any.
    pub fn finish(&mut self) -> Option<AlignmentSpan> { self.flush() }

    fn flush(&mut self) -> Option<AlignmentSpan> {
        let coords = std::mem::take(&mut self.coords);
        let span = AlignmentSpan::from_blocks(&self.chrom, self.strand, coords)?;
        for junction in span.junctions.iter() {
            self.table.add(junction.clone());
        }
        self.alignments += 1;
        debug!(
            "Alignment {}:{}-{} with {} junctions",
            span.chrom,
            span.start,
            span.end,
            span.junctions.len()
        );
        Some(span)
    }

    pub fn alignments(&self) -> usize { self.alignments }

    pub fn table(&self) -> &JunctionTable { &self.table }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunctionStats {
    pub lines_read:         usize,
    pub alignments:         usize,
    pub junctions:          usize,
    pub distinct_junctions: usize,
}

impl fmt::Display for JunctionStats {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} alignments, {} junctions ({} distinct)",
            self.lines_read, self.alignments, self.junctions, self.distinct_junctions
        )
    }
}

/// Writes one summary line per alignment to `summary` and the junction count
/// table to `table`.
pub fn extract_junctions<R: BufRead, S: Write, T: Write>(
    mut input: R,
    summary: S,
    table: T,
) -> ConvertResult<JunctionStats> {
    let mut extractor = JunctionExtractor::new();
    let mut summary = BufWriter::new(summary);
    let mut stats = JunctionStats::default();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        if input.read_line(&mut buffer)? == 0 {
            break;
        }
        stats.lines_read += 1;
        if let Some(span) = extractor.push_line(&buffer) {
            stats.junctions += span.junctions.len();
            writeln!(summary, "{}", span)?;
        }
    }
    if let Some(span) = extractor.finish() {
        stats.junctions += span.junctions.len();
        writeln!(summary, "{}", span)?;
    }
    summary.flush()?;

    let mut table = BufWriter::new(table);
    for (key, count) in extractor.table().iter() {
        writeln!(table, "{}\t{}", key, count)?;
    }
    table.flush()?;

    stats.alignments = extractor.alignments();
    stats.distinct_junctions = extractor.table().len();
    info!("Junction extraction finished: {}", stats);
    Ok(stats)
}
