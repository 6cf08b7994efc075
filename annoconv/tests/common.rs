#![allow(dead_code)]

use std::io::{
    self,
    Cursor,
    Write,
};

use annoconv::prelude::*;

pub const GFF3_INPUT: &str = "\
##gff-version 3
#!genome-build test
chr1\ttest\tgene\t100\t250\t.\t+\t.\tID=g1;Name=GeneA
chr1\ttest\tmRNA\t100\t250\t.\t+\t.\tID=t1;Parent=g1;Name=TxA
chr1\ttest\texon\t100\t150\t.\t+\t.\tID=e1;Parent=t1
chr1\ttest\texon\t200\t250\t.\t+\t.\tID=e2;Parent=t1
chr1\ttest\tCDS\t120\t150\t.\t+\t0\tID=c1;Parent=t1
";

pub const GTF_OUTPUT: &str = "\
#gtf-version 2.2
##gff-version 3
#!genome-build test
chr1\ttest\tgene\t100\t250\t.\t+\t.\tgene_id \"g1\"; gene_name \"GeneA\"
chr1\ttest\ttranscript\t100\t250\t.\t+\t.\tgene_id \"g1\"; gene_name \"GeneA\"; transcript_id \"t1\"; transcript_name \"TxA\"; transcript_type \"mRNA\"
chr1\ttest\texon\t100\t150\t.\t+\t.\ttranscript_id \"t1\"; transcript_name \"TxA\"; gene_id \"g1\"; gene_name \"GeneA\"; exon_id \"e1\"
chr1\ttest\texon\t200\t250\t.\t+\t.\ttranscript_id \"t1\"; transcript_name \"TxA\"; gene_id \"g1\"; gene_name \"GeneA\"; exon_id \"e2\"
";

/// Sink that holds written bytes until `flush` commits them.
#[derive(Debug, Default)]
pub struct StagedSink {
    pub staged:    Vec<u8>,
    pub committed: Vec<u8>,
}

impl Write for StagedSink {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.staged.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.committed.append(&mut self.staged);
        Ok(())
    }
}

pub fn gff3_to_gtf(input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    to_gtf(Cursor::new(input), &mut out, &ToGtfConfig::default())?;
    Ok(String::from_utf8(out)?)
}

pub fn normalize_gtf(input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    to_gtf(Cursor::new(input), &mut out, &ToGtfConfig::normalize())?;
    Ok(String::from_utf8(out)?)
}

pub fn gtf_to_gff3(input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    to_gff3(Cursor::new(input), &mut out, &ToGff3Config::default())?;
    Ok(String::from_utf8(out)?)
}

pub fn to_bed12_string(input: &str) -> anyhow::Result<String> {
    let mut out = Vec::new();
    to_bed12(Cursor::new(input), &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// `(type, ID, Parent)` of every GFF3 data line.
pub fn gff3_links(gff3: &str) -> Vec<(String, String, Option<String>)> {
    gff3.lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let columns: Vec<&str> = line.split('\t').collect();
            let (attributes, _) = Attributes::parse(columns[8], Dialect::Gff3);
            (
                columns[2].to_string(),
                attributes.get("ID").unwrap_or_default().to_string(),
                attributes.get("Parent").map(str::to_string),
            )
        })
        .collect()
}
