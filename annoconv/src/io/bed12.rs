use std::io::{
    self,
    BufWriter,
    Write,
};

use crate::data_structs::bed12::{
    BED12_ITEM_RGB,
    BED12_SCORE,
};
use crate::data_structs::{
    ExonBlocks,
    TranscriptSpan,
};

/// Writes one BED12 row per transcript.
///
/// Coordinates are copied from the annotation unchanged; the thick region
/// spans the whole transcript.
pub struct Bed12Writer<W: Write> {
    sink:    BufWriter<W>,
    written: usize,
}

impl<W: Write> Bed12Writer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink:    BufWriter::new(sink),
            written: 0,
        }
    }

    pub fn rows_written(&self) -> usize { self.written }

    pub fn write_transcript(
        &mut self,
        id: &str,
        span: &TranscriptSpan,
        blocks: &ExonBlocks,
    ) -> io::Result<()> {
        writeln!(
            self.sink,
            "{chrom}\t{start}\t{end}\t{id}\t{score}\t{strand}\t\
             {start}\t{end}\t{rgb}\t{blocks}",
            chrom = span.chrom,
            start = span.start,
            end = span.end,
            id = id,
            score = BED12_SCORE,
            strand = span.strand,
            rgb = BED12_ITEM_RGB,
            blocks = blocks,
        )?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered rows and the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> { self.sink.flush() }

    pub fn finish(self) -> io::Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| e.into_error())
    }
}
