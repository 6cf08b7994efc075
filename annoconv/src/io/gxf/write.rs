use std::io::{
    self,
    BufWriter,
    Write,
};

use itertools::Itertools;

use crate::data_structs::{
    Attributes,
    GxfRecord,
    Resolved,
};

pub const GTF_VERSION_HEADER: &str = "#gtf-version 2.2";
pub const GFF3_VERSION_HEADER: &str = "##gff-version 3";

/// Attribute key that survives GTF output even though it carries neither
/// `id` nor `name`.
const TRANSCRIPT_TYPE_KEY: &str = "transcript_type";

fn is_gtf_key(key: &str) -> bool {
    key.contains("id") || key.contains("name") || key == TRANSCRIPT_TYPE_KEY
}

/// Writes records as GTF, keeping only identifier, name and transcript type
/// attributes.
pub struct GtfWriter<W: Write> {
    sink: BufWriter<W>,
}

impl<W: Write> GtfWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: BufWriter::new(sink),
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.sink, "{}", GTF_VERSION_HEADER)
    }

    /// Copies a comment line through. Existing version headers are skipped
    /// so that normalizing a GTF file does not duplicate them.
    pub fn write_comment(
        &mut self,
        comment: &str,
    ) -> io::Result<bool> {
        if comment.starts_with("#gtf-version") {
            return Ok(false);
        }
        writeln!(self.sink, "{}", comment)?;
        Ok(true)
    }

    /// Renders `attributes` as `key "value"` pairs joined by `"; "`.
    pub fn format_attributes(attributes: &Attributes) -> String {
        attributes
            .iter()
            .filter(|(key, _)| is_gtf_key(key))
            .map(|(key, value)| format!("{} \"{}\"", key, value))
            .join("; ")
    }

    pub fn write_record(
        &mut self,
        record: &GxfRecord,
    ) -> io::Result<()> {
        record.write_columns(&mut self.sink)?;
        writeln!(self.sink, "\t{}", Self::format_attributes(&record.attributes))
    }

    pub fn flush(&mut self) -> io::Result<()> { self.sink.flush() }

    /// Flushes buffered output and returns the underlying sink.
    pub fn finish(self) -> io::Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| e.into_error())
    }
}

/// Attribute order of a GFF3 record: the identity fields first, then
/// everything that was not consumed, in input order.
fn project_gff3_attributes(
    feature_type: &str,
    attributes: &mut Attributes,
) -> String {
    let mut head: Vec<(&str, String)> = Vec::with_capacity(3);
    match feature_type {
        "gene" => {
            head.push(("ID", attributes.resolve_pop("gene_id").into_string()));
            head.push((
                "Name",
                attributes.resolve_pop("gene_name").into_string(),
            ));
        },
        "transcript" => {
            head.push((
                "ID",
                attributes.resolve_pop("transcript_id").into_string(),
            ));
            head.push((
                "Name",
                attributes
                    .resolve_pop("transcript_name")
                    .into_string(),
            ));
            head.push((
                "Parent",
                attributes.resolve_pop("gene_id").into_string(),
            ));
            attributes.pop("gene_name");
        },
        other => {
            let typed_id = format!("{}_id", other.to_lowercase());
            let own_id = ["exon_id", "protein_id", typed_id.as_str(), "id"]
                .into_iter()
                .find_map(|key| attributes.pop(key));
            let parent = attributes.resolve_pop("transcript_id");
            let id = match own_id {
                Some(id) => Resolved::Known(id),
                None => attributes
                    .get("exon_number")
                    .map(|number| format!("{}.{}", parent, number))
                    .into(),
            };
            attributes.pop("gene_name");
            head.push(("ID", id.into_string()));
            head.push(("Parent", parent.into_string()));
        },
    }

    let projected = head
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .chain(attributes.iter())
        .map(|(key, value)| format!("{}={}", key, value))
        .join(";");
    projected
}

/// Writes records as GFF3 with explicit `ID`/`Name`/`Parent` links.
pub struct Gff3Writer<W: Write> {
    sink: BufWriter<W>,
}

impl<W: Write> Gff3Writer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: BufWriter::new(sink),
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.sink, "{}", GFF3_VERSION_HEADER)
    }

    /// Consumes the record; the identity attributes are moved out of it.
    pub fn write_record(
        &mut self,
        mut record: GxfRecord,
    ) -> io::Result<()> {
        let attributes =
            project_gff3_attributes(&record.feature_type, &mut record.attributes);
        record.write_columns(&mut self.sink)?;
        writeln!(self.sink, "\t{}", attributes)
    }

    pub fn flush(&mut self) -> io::Result<()> { self.sink.flush() }

    pub fn finish(self) -> io::Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| e.into_error())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data_structs::Dialect;

    fn gtf_record(
        feature_type: &str,
        attributes: &str,
    ) -> GxfRecord {
        let line = format!(
            "chr1\tsrc\t{}\t100\t250\t.\t+\t.\t{}",
            feature_type, attributes
        );
        GxfRecord::parse(&line, Dialect::Gtf, 1)
            .unwrap()
            .record
    }

    #[test]
    fn gtf_keeps_identity_keys() {
        let record = gtf_record(
            "transcript",
            r#"gene_id "g1"; level "2"; transcript_type "mRNA"; gene_name "A""#,
        );
        let mut writer = GtfWriter::new(Vec::new());
        writer.write_record(&record).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "chr1\tsrc\ttranscript\t100\t250\t.\t+\t.\tgene_id \"g1\"; \
             transcript_type \"mRNA\"; gene_name \"A\"\n"
        );
    }

    #[test]
    fn gtf_skips_version_comments() {
        let mut writer = GtfWriter::new(Vec::new());
        writer.write_header().unwrap();
        assert!(!writer.write_comment("#gtf-version 2.2").unwrap());
        assert!(writer.write_comment("#!genome-build GRCh38").unwrap());
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "#gtf-version 2.2\n#!genome-build GRCh38\n");
    }

    #[rstest]
    #[case(
        "gene",
        r#"gene_id "g1"; gene_name "A""#,
        "ID=g1;Name=A"
    )]
    #[case(
        "transcript",
        r#"gene_id "g1"; transcript_id "t1"; gene_name "A"; transcript_type "mRNA""#,
        "ID=t1;Name=NA;Parent=g1;transcript_type=mRNA"
    )]
    #[case(
        "exon",
        r#"gene_id "g1"; transcript_id "t1"; exon_number "3""#,
        "ID=t1.3;Parent=t1;gene_id=g1;exon_number=3"
    )]
    #[case(
        "CDS",
        r#"transcript_id "t1"; protein_id "p1"; cds_id "c1""#,
        "ID=p1;Parent=t1;cds_id=c1"
    )]
    #[case("exon", r#"gene_id "g1""#, "ID=NA;Parent=NA;gene_id=g1")]
    fn gff3_projection(
        #[case] feature_type: &str,
        #[case] attributes: &str,
        #[case] expected: &str,
    ) {
        let mut record = gtf_record(feature_type, attributes);
        assert_eq!(
            project_gff3_attributes(feature_type, &mut record.attributes),
            expected
        );
    }
}
