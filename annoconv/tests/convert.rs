mod common;

use std::io::Cursor;

use annoconv::prelude::*;
use common::*;
use rstest::rstest;

#[test]
fn gff3_to_gtf_projection() -> anyhow::Result<()> {
    assert_eq!(gff3_to_gtf(GFF3_INPUT)?, GTF_OUTPUT);
    Ok(())
}

#[test]
fn gff3_to_gtf_stats() -> anyhow::Result<()> {
    let mut out = Vec::new();
    let stats = to_gtf(
        Cursor::new(GFF3_INPUT),
        &mut out,
        &ToGtfConfig::default(),
    )?;
    assert_eq!(stats.genes, 1);
    assert_eq!(stats.transcripts, 1);
    assert_eq!(stats.records_written, 4);
    assert_eq!(stats.records_dropped, 1);
    assert_eq!(stats.comments_written, 2);
    assert_eq!(stats.malformed_clauses, 0);
    Ok(())
}

#[test]
fn transcript_rows_are_relabelled() -> anyhow::Result<()> {
    let input = "\
chr1\tt\tgene\t1\t90\t.\t-\t.\tID=g1
chr1\tt\tlnc_RNA\t1\t90\t.\t-\t.\tID=t1;Parent=g1
";
    let gtf = gff3_to_gtf(input)?;
    let transcript = gtf.lines().nth(2).unwrap();
    assert_eq!(
        transcript,
        "chr1\tt\ttranscript\t1\t90\t.\t-\t.\tgene_id \"g1\"; gene_name \"NA\"; \
         transcript_id \"t1\"; transcript_name \"NA\"; transcript_type \"lnc_RNA\""
    );
    Ok(())
}

#[test]
fn missing_names_resolve_to_na() -> anyhow::Result<()> {
    let input = "\
chr1\tt\tgene\t1\t90\t.\t+\t.\tID=g1
chr1\tt\tmRNA\t1\t90\t.\t+\t.\tID=t1;Parent=g1
chr1\tt\texon\t1\t90\t.\t+\t.\tID=e1;Parent=t1
";
    let gtf = gff3_to_gtf(input)?;
    let exon = gtf.lines().last().unwrap();
    assert!(exon.contains("transcript_name \"NA\""));
    assert!(exon.contains("gene_name \"NA\""));
    assert!(!exon.contains("\"\""));
    Ok(())
}

#[test]
fn malformed_clause_is_skipped() -> anyhow::Result<()> {
    let input = "chr1\tt\tgene\t1\t90\t.\t+\t.\tID=g1;junk;Name=A\n";
    let mut out = Vec::new();
    let stats = to_gtf(Cursor::new(input), &mut out, &ToGtfConfig::default())?;
    assert_eq!(stats.malformed_clauses, 1);
    assert_eq!(stats.records_written, 1);
    assert!(String::from_utf8(out)?
        .ends_with("gene_id \"g1\"; gene_name \"A\"\n"));
    Ok(())
}

#[rstest]
#[case::unknown_transcript("chr1\tt\texon\t1\t9\t.\t+\t.\tID=e1;Parent=t404\n", 1)]
#[case::child_before_parent(
    "chr1\tt\tgene\t1\t90\t.\t+\t.\tID=g1\n\
     chr1\tt\texon\t1\t9\t.\t+\t.\tID=e1;Parent=t1\n\
     chr1\tt\tmRNA\t1\t90\t.\t+\t.\tID=t1;Parent=g1\n",
    2
)]
fn unresolved_parent_aborts(
    #[case] input: &str,
    #[case] expected_line: usize,
) {
    let err = to_gtf(Cursor::new(input), Vec::new(), &ToGtfConfig::default())
        .unwrap_err();
    match err {
        ConvertError::UnresolvedParent { line, .. } => {
            assert_eq!(line, expected_line)
        },
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn gtf_normalize_is_idempotent() -> anyhow::Result<()> {
    let once = normalize_gtf(GTF_OUTPUT)?;
    assert_eq!(once, GTF_OUTPUT);
    assert_eq!(normalize_gtf(&once)?, once);
    Ok(())
}

#[test]
fn gtf_normalize_keeps_nested_prefixes() -> anyhow::Result<()> {
    let input = "chr1\tt\tgene\t1\t90\t.\t+\t.\tID=gene:g1;Name=HGNC:HGNC:5\n";
    let gtf = gff3_to_gtf(input)?;
    assert!(gtf.ends_with("\tgene_id \"g1\"; gene_name \"HGNC:5\"\n"));
    assert_eq!(normalize_gtf(&gtf)?, gtf);
    assert_eq!(normalize_gtf(&normalize_gtf(&gtf)?)?, gtf);
    Ok(())
}

#[test]
fn empty_attribute_column_is_not_malformed() -> anyhow::Result<()> {
    let input = "\
chr1\tt\tregion\t1\t900\t.\t.\t.\t.
chr1\tt\tgene\t1\t90\t.\t+\t.\tID=g1
";
    let config = ToGtfConfig::default()
        .with_retained_features(vec!["region".into(), "gene".into()]);
    let mut out = Vec::new();
    let stats = to_gtf(Cursor::new(input), &mut out, &config)?;
    assert_eq!(stats.malformed_clauses, 0);
    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.genes, 1);
    Ok(())
}

#[test]
fn pipelines_flush_their_sink() -> anyhow::Result<()> {
    let mut gtf = StagedSink::default();
    to_gtf(Cursor::new(GFF3_INPUT), &mut gtf, &ToGtfConfig::default())?;
    assert!(gtf.staged.is_empty());
    assert_eq!(String::from_utf8(gtf.committed)?, GTF_OUTPUT);

    let mut gff3 = StagedSink::default();
    to_gff3(Cursor::new(GTF_OUTPUT), &mut gff3, &ToGff3Config::default())?;
    assert!(gff3.staged.is_empty());
    assert_eq!(String::from_utf8(gff3.committed)?, gtf_to_gff3(GTF_OUTPUT)?);

    let mut bed = StagedSink::default();
    let stats = to_bed12(Cursor::new(GTF_OUTPUT), &mut bed)?;
    assert_eq!(stats.records_written, 1);
    assert!(bed.staged.is_empty());
    assert_eq!(
        String::from_utf8(bed.committed)?,
        "chr1\t100\t250\tt1\t255\t+\t100\t250\t255,0,0\t2\t50,50\t0,100\n"
    );
    Ok(())
}

#[test]
fn gtf_to_gff3_projection() -> anyhow::Result<()> {
    let gff3 = gtf_to_gff3(GTF_OUTPUT)?;
    let expected = "\
##gff-version 3
chr1\ttest\tgene\t100\t250\t.\t+\t.\tID=g1;Name=GeneA
chr1\ttest\ttranscript\t100\t250\t.\t+\t.\tID=t1;Name=TxA;Parent=g1;transcript_type=mRNA
chr1\ttest\texon\t100\t150\t.\t+\t.\tID=e1;Parent=t1;transcript_name=TxA;gene_id=g1
chr1\ttest\texon\t200\t250\t.\t+\t.\tID=e2;Parent=t1;transcript_name=TxA;gene_id=g1
";
    assert_eq!(gff3, expected);
    Ok(())
}

#[test]
fn gff3_gtf_gff3_keeps_linkage() -> anyhow::Result<()> {
    let round_trip = gtf_to_gff3(&gff3_to_gtf(GFF3_INPUT)?)?;
    let links = gff3_links(&round_trip)
        .into_iter()
        .map(|(_, id, parent)| (id, parent))
        .collect::<Vec<_>>();
    let original = gff3_links(GFF3_INPUT)
        .into_iter()
        .filter(|(feature_type, ..)| feature_type != "CDS")
        .map(|(_, id, parent)| (id, parent))
        .collect::<Vec<_>>();
    assert_eq!(links, original);
    Ok(())
}

#[test]
fn gtf_exon_number_builds_leaf_id() -> anyhow::Result<()> {
    let input = "chr1\ts\texon\t5\t9\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\"; exon_number \"2\";\n";
    let gff3 = gtf_to_gff3(input)?;
    assert!(gff3.ends_with("\tID=t1.2;Parent=t1;gene_id=g1;exon_number=2\n"));
    Ok(())
}

#[test]
fn bed12_row() -> anyhow::Result<()> {
    assert_eq!(
        to_bed12_string(GTF_OUTPUT)?,
        "chr1\t100\t250\tt1\t255\t+\t100\t250\t255,0,0\t2\t50,50\t0,100\n"
    );
    assert_eq!(to_bed12_string(GFF3_INPUT)?, to_bed12_string(GTF_OUTPUT)?);
    Ok(())
}

#[test]
fn bed12_exons_before_transcript() -> anyhow::Result<()> {
    let input = "\
chr1\ts\texon\t200\t250\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\";
chr1\ts\texon\t100\t150\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\";
chr2\ts\tmRNA\t10\t40\t.\t-\t.\tgene_id \"g2\"; transcript_id \"t2\";
chr2\ts\texon\t10\t40\t.\t-\t.\tgene_id \"g2\"; transcript_id \"t2\";
chr1\ts\ttranscript\t100\t250\t.\t+\t.\tgene_id \"g1\"; transcript_id \"t1\";
";
    assert_eq!(
        to_bed12_string(input)?,
        "chr1\t100\t250\tt1\t255\t+\t100\t250\t255,0,0\t2\t50,50\t0,100\n\
         chr2\t10\t40\tt2\t255\t-\t10\t40\t255,0,0\t1\t30\t0\n"
    );
    Ok(())
}

#[test]
fn bed12_orphan_exon_fails() {
    let input = "\
chr1\ts\ttranscript\t1\t90\t.\t+\t.\ttranscript_id \"t1\";
chr1\ts\texon\t1\t90\t.\t+\t.\ttranscript_id \"t1\";
chr1\ts\texon\t5\t9\t.\t+\t.\ttranscript_id \"t2\";
";
    match to_bed12(Cursor::new(input), Vec::new()) {
        Err(ConvertError::UnresolvedParent { line, parent }) => {
            assert_eq!(line, 3);
            assert_eq!(parent, "t2");
        },
        Err(other) => panic!("unexpected error: {}", other),
        Ok(stats) => panic!("expected an error, got {}", stats),
    }
}

#[test]
fn missing_column_aborts() {
    let input = "chr1\ttest\tgene\t100\n";
    let err = to_gtf(Cursor::new(input), Vec::new(), &ToGtfConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MissingRequiredColumn { line: 1, found: 4 }
    ));
}

#[cfg(feature = "compression")]
#[rstest]
#[case("genes.gff3.gz", "out/genes.gtf.zst")]
#[case("genes.gff3.bz2", "out/genes.gtf")]
fn compressed_files(
    #[case] input_name: &str,
    #[case] output_name: &str,
) -> anyhow::Result<()> {
    use std::io::{
        Read,
        Write,
    };

    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join(input_name);
    let output_path = dir.path().join(output_name);
    let mut sink = create_output(&input_path)?;
    sink.write_all(GFF3_INPUT.as_bytes())?;
    sink.finish()?;

    let mut output = create_output(&output_path)?;
    to_gtf(
        open_input(&input_path)?,
        &mut output,
        &ToGtfConfig::default(),
    )?;
    output.finish()?;

    let mut written = String::new();
    open_input(&output_path)?.read_to_string(&mut written)?;
    assert_eq!(written, GTF_OUTPUT);
    Ok(())
}
