use std::fmt;

use itertools::Itertools;

use super::enums::Strand;
use super::typedef::PosType;

pub const BED12_SCORE: &str = "255";
pub const BED12_ITEM_RGB: &str = "255,0,0";

/// Outer span of a transcript, taken from its transcript-level record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSpan {
    pub chrom:  String,
    pub start:  PosType,
    pub end:    PosType,
    pub strand: Strand,
}

/// A transcript and the exons collected for it so far.
///
/// `span` stays `None` until the transcript record itself is seen, which may
/// happen after some of its exons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptBucket {
    pub id:    String,
    pub span:  Option<TranscriptSpan>,
    pub exons: Vec<(PosType, PosType)>,
}

impl TranscriptBucket {
    pub fn new(id: String) -> Self {
        Self {
            id,
            span: None,
            exons: Vec::new(),
        }
    }

    pub fn push_exon(
        &mut self,
        start: PosType,
        end: PosType,
    ) {
        self.exons.push((start, end));
    }
}

/// Block structure of a BED12 row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonBlocks {
    pub sizes:  Vec<PosType>,
    pub starts: Vec<PosType>,
}

impl ExonBlocks {
    /// Sorts `exons` by start and derives block sizes and offsets relative to
    /// the first exon.
    pub fn encode(exons: &mut [(PosType, PosType)]) -> Self {
        exons.sort_by_key(|(start, _)| *start);
        let first = exons.first().map_or(0, |(start, _)| *start);
        let (sizes, starts) = exons
            .iter()
            .map(|(start, end)| (end.saturating_sub(*start), start - first))
            .unzip();
        Self { sizes, starts }
    }

    pub fn count(&self) -> usize { self.sizes.len() }
}

impl fmt::Display for ExonBlocks {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.count(),
            self.sizes.iter().join(","),
            self.starts.iter().join(",")
        )
    }
}
