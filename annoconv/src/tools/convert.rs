//! Streaming conversions between GFF3, GTF and BED12.
//!
//! Every pipeline reads from a [`BufRead`] and writes to a [`Write`], so the
//! same code serves files, compressed streams and in-memory buffers.

use std::fmt;
use std::io::{
    BufRead,
    Write,
};

use indexmap::IndexMap;
use log::{
    debug,
    info,
    warn,
};

use crate::data_structs::{
    Dialect,
    ExonBlocks,
    GxfRecord,
    HierarchyResolver,
    TranscriptBucket,
    TranscriptSpan,
};
use crate::error::{
    ConvertError,
    ConvertResult,
};
use crate::io::bed12::Bed12Writer;
use crate::io::gxf::{
    Gff3Writer,
    GxfLine,
    GtfWriter,
    GxfReader,
};
use crate::{
    getter_fn,
    with_field_fn,
};

/// Feature types written by the GTF projection unless configured otherwise.
pub const DEFAULT_GTF_FEATURES: [&str; 3] = ["gene", "transcript", "exon"];

/// Counters collected over one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub lines_read:        usize,
    pub records_written:   usize,
    pub records_dropped:   usize,
    pub comments_written:  usize,
    pub malformed_clauses: usize,
    pub genes:             usize,
    pub transcripts:       usize,
}

impl fmt::Display for ConvertStats {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} records written, {} dropped, {} malformed \
             clauses, {} genes, {} transcripts",
            self.lines_read,
            self.records_written,
            self.records_dropped,
            self.malformed_clauses,
            self.genes,
            self.transcripts
        )
    }
}

/// Settings of the GFF3 → GTF and GTF → GTF projections.
#[derive(Debug, Clone)]
pub struct ToGtfConfig {
    dialect:           Dialect,
    strip_prefixes:    bool,
    retained_features: Vec<String>,
    write_header:      bool,
}

impl Default for ToGtfConfig {
    fn default() -> Self {
        Self {
            dialect:           Dialect::Gff3,
            strip_prefixes:    true,
            retained_features: DEFAULT_GTF_FEATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            write_header:      true,
        }
    }
}

impl ToGtfConfig {
    getter_fn!(dialect, Dialect);

    getter_fn!(strip_prefixes, bool);

    getter_fn!(retained_features, Vec<String>);

    getter_fn!(write_header, bool);

    with_field_fn!(dialect, Dialect);

    with_field_fn!(strip_prefixes, bool);

    with_field_fn!(retained_features, Vec<String>);

    with_field_fn!(write_header, bool);

    /// Configuration for re-normalizing GTF produced by this crate. Values
    /// were already stripped of their `prefix:` on the way in, so they are
    /// kept as they are.
    pub fn normalize() -> Self {
        Self::default()
            .with_dialect(Dialect::Gtf)
            .with_strip_prefixes(false)
    }

    fn retains(
        &self,
        feature_type: &str,
    ) -> bool {
        self.retained_features
            .iter()
            .any(|kept| kept == feature_type)
    }
}

#[derive(Debug, Clone)]
pub struct ToGff3Config {
    write_header: bool,
}

impl Default for ToGff3Config {
    fn default() -> Self { Self { write_header: true } }
}

impl ToGff3Config {
    with_field_fn!(write_header, bool);
}

/// Resolves the feature hierarchy of a GFF3 (or GTF) stream and writes it as
/// GTF.
///
/// Input comments are copied through after the version header. Records whose
/// final feature type is not retained are counted and dropped.
pub fn to_gtf<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &ToGtfConfig,
) -> ConvertResult<ConvertStats> {
    let mut reader = GxfReader::new(input, config.dialect)
        .with_strip_prefixes(config.strip_prefixes);
    let mut resolver = HierarchyResolver::new();
    let mut writer = GtfWriter::new(output);
    let mut stats = ConvertStats::default();

    if config.write_header {
        writer.write_header()?;
    }
    for item in reader.by_ref() {
        let (line, parsed) = item?;
        match parsed {
            GxfLine::Comment(comment) => {
                if writer.write_comment(&comment)? {
                    stats.comments_written += 1;
                }
            },
            GxfLine::Record(mut record) => {
                let level = resolver.resolve(&mut record, line)?;
                if config.retains(&record.feature_type) {
                    writer.write_record(&record)?;
                    stats.records_written += 1;
                }
                else {
                    debug!(
                        "Dropping {} record at line {} ({:?})",
                        record.feature_type, line, level
                    );
                    stats.records_dropped += 1;
                }
            },
        }
    }
    writer.flush()?;

    stats.lines_read = reader.lines_read();
    stats.malformed_clauses = reader.malformed_clauses();
    stats.genes = resolver.n_genes();
    stats.transcripts = resolver.n_transcripts();
    info!("GTF projection finished: {}", stats);
    Ok(stats)
}

/// Rewrites a GTF stream as GFF3 with explicit `ID`/`Parent` links.
///
/// GTF already names its parents in every record, so no registry is kept;
/// input comments are dropped.
pub fn to_gff3<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &ToGff3Config,
) -> ConvertResult<ConvertStats> {
    let mut reader = GxfReader::new(input, Dialect::Gtf);
    let mut writer = Gff3Writer::new(output);
    let mut stats = ConvertStats::default();

    if config.write_header {
        writer.write_header()?;
    }
    for item in reader.by_ref() {
        match item? {
            (_, GxfLine::Comment(_)) => {},
            (_, GxfLine::Record(record)) => {
                match record.feature_type.as_str() {
                    "gene" => stats.genes += 1,
                    "transcript" => stats.transcripts += 1,
                    _ => {},
                }
                writer.write_record(record)?;
                stats.records_written += 1;
            },
        }
    }
    writer.flush()?;

    stats.lines_read = reader.lines_read();
    stats.malformed_clauses = reader.malformed_clauses();
    info!("GFF3 projection finished: {}", stats);
    Ok(stats)
}

fn is_transcript_type(feature_type: &str) -> bool {
    let lower = feature_type.to_ascii_lowercase();
    lower.contains("transcript") || lower.contains("mrna")
}

/// Transcript id of a BED12 input record. The bare `id` spelling is left to
/// `fallback` because on exons it names the exon itself.
fn bucket_key(
    record: &GxfRecord,
    fallback: &str,
) -> Option<String> {
    ["transcript_id", "transcriptid", fallback]
        .into_iter()
        .find_map(|key| record.attributes.get(key))
        .map(str::to_string)
}

/// Collects transcripts and their exons, then writes one BED12 row per
/// transcript in first-seen order.
///
/// Accepts GTF or GFF3 input. Exons may precede their transcript record, so
/// nothing is written until the whole input has been read.
pub fn to_bed12<R: BufRead, W: Write>(
    input: R,
    output: W,
) -> ConvertResult<ConvertStats> {
    let mut reader = GxfReader::new(input, Dialect::Loose);
    let mut buckets: IndexMap<String, TranscriptBucket> = IndexMap::new();
    let mut first_exon_line: IndexMap<String, usize> = IndexMap::new();
    let mut stats = ConvertStats::default();

    for item in reader.by_ref() {
        let (line, record) = match item? {
            (line, GxfLine::Record(record)) => (line, record),
            (_, GxfLine::Comment(_)) => continue,
        };

        if is_transcript_type(&record.feature_type) {
            let Some(id) = bucket_key(&record, "id") else {
                warn!("line {}: transcript record without an id, skipped", line);
                stats.records_dropped += 1;
                continue;
            };
            let bucket = buckets
                .entry(id.clone())
                .or_insert_with(|| TranscriptBucket::new(id));
            if bucket.span.is_some() {
                debug!("Transcript {} seen again at line {}", bucket.id, line);
            }
            bucket.span = Some(TranscriptSpan {
                chrom:  record.seqid,
                start:  record.start,
                end:    record.end,
                strand: record.strand,
            });
        }
        else if record.feature_type == "exon" {
            let Some(id) = bucket_key(&record, "parent") else {
                warn!("line {}: exon without a transcript, skipped", line);
                stats.records_dropped += 1;
                continue;
            };
            first_exon_line.entry(id.clone()).or_insert(line);
            buckets
                .entry(id.clone())
                .or_insert_with(|| TranscriptBucket::new(id))
                .push_exon(record.start, record.end);
        }
        else {
            stats.records_dropped += 1;
        }
    }

    let mut writer = Bed12Writer::new(output);
    for (id, mut bucket) in buckets {
        let Some(span) = bucket.span.take() else {
            return Err(ConvertError::UnresolvedParent {
                line:   first_exon_line
                    .get(&id)
                    .copied()
                    .unwrap_or_default(),
                parent: id,
            });
        };
        stats.transcripts += 1;
        if bucket.exons.is_empty() {
            warn!("Transcript {} has no exons, skipped", id);
            continue;
        }
        let blocks = ExonBlocks::encode(&mut bucket.exons);
        writer.write_transcript(&id, &span, &blocks)?;
    }
    stats.records_written = writer.rows_written();
    writer.flush()?;

    stats.lines_read = reader.lines_read();
    stats.malformed_clauses = reader.malformed_clauses();
    info!("BED12 encoding finished: {}", stats);
    Ok(stats)
}
