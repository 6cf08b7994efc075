use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

use super::enums::Strand;
use super::typedef::PosType;

/// Intron boundaries of one splice junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JunctionKey {
    pub chrom:  String,
    pub start:  PosType,
    pub end:    PosType,
    pub strand: Strand,
}

impl fmt::Display for JunctionKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.strand
        )
    }
}

/// Summary of a single alignment: outer span plus the flattened intron
/// boundaries between its blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSpan {
    pub chrom:     String,
    pub start:     PosType,
    pub end:       PosType,
    pub strand:    Strand,
    pub junctions: Vec<JunctionKey>,
}

impl AlignmentSpan {
    /// Builds the span from the unordered block coordinates of one
    /// alignment. Returns `None` for an empty block list.
    pub fn from_blocks(
        chrom: &str,
        strand: Strand,
        mut coords: Vec<PosType>,
    ) -> Option<Self> {
        coords.sort_unstable();
        let start = *coords.first()?;
        let end = *coords.last()?;

        let junctions = coords
            .iter()
            .skip(1)
            .tuples()
            .take(coords.len().saturating_sub(2) / 2)
            .map(|(donor, acceptor)| JunctionKey {
                chrom: chrom.to_string(),
                start: donor + 1,
                end: acceptor.saturating_sub(1),
                strand,
            })
            .collect();

        Some(Self {
            chrom: chrom.to_string(),
            start,
            end,
            strand,
            junctions,
        })
    }
}

impl fmt::Display for AlignmentSpan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.strand,
            self.junctions
                .iter()
                .flat_map(|j| [j.start, j.end])
                .join(",")
        )
    }
}

/// Occurrence counts of junctions, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct JunctionTable {
    counts: IndexMap<JunctionKey, usize>,
}

impl JunctionTable {
    pub fn new() -> Self { Self::default() }

    pub fn add(
        &mut self,
        key: JunctionKey,
    ) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn count(
        &self,
        key: &JunctionKey,
    ) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&JunctionKey, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }
}
