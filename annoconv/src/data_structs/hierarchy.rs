use hashbrown::HashMap;
use log::debug;

use super::enums::FeatureLevel;
use super::record::GxfRecord;
use super::typedef::Resolved;
use crate::error::{
    ConvertError,
    ConvertResult,
};

pub const ID_KEY: &str = "ID";
pub const NAME_KEY: &str = "Name";
pub const PARENT_KEY: &str = "Parent";
pub const TRANSCRIPT_TYPE: &str = "transcript";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene {
    pub id:   String,
    pub name: Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub id:      String,
    pub name:    Resolved,
    pub gene_id: String,
}

/// Rebuilds the gene → transcript → leaf hierarchy of a GFF3 stream and
/// copies identifiers and names down to the children.
///
/// The resolver only looks backwards: input must list every gene before its
/// transcripts and every transcript before its leaves. A leaf whose
/// transcript has not been seen yet fails with
/// [`ConvertError::UnresolvedParent`].
///
/// Both registries live as long as the resolver, i.e. one conversion run. An
/// id seen twice replaces the earlier entry.
#[derive(Debug, Default)]
pub struct HierarchyResolver {
    genes:       HashMap<String, Gene>,
    transcripts: HashMap<String, Transcript>,
}

fn bare_id(record: &GxfRecord) -> Option<&str> {
    record
        .attributes
        .get(ID_KEY)
        .or_else(|| record.attributes.get("id"))
}

fn bare_name(record: &GxfRecord) -> Resolved {
    record
        .attributes
        .get(NAME_KEY)
        .map(str::to_string)
        .into()
}

impl HierarchyResolver {
    pub fn new() -> Self { Self::default() }

    pub fn gene(
        &self,
        id: &str,
    ) -> Option<&Gene> {
        self.genes.get(id)
    }

    pub fn transcript(
        &self,
        id: &str,
    ) -> Option<&Transcript> {
        self.transcripts.get(id)
    }

    pub fn n_genes(&self) -> usize { self.genes.len() }

    pub fn n_transcripts(&self) -> usize { self.transcripts.len() }

    /// Decides the level of `record` against the current registries without
    /// modifying anything.
    pub fn classify(
        &self,
        record: &GxfRecord,
    ) -> FeatureLevel {
        let parent = record.attributes.get(PARENT_KEY);
        match parent {
            None if bare_id(record).is_some()
                && record.feature_type.contains("gene") =>
            {
                FeatureLevel::Gene
            },
            Some(parent) if self.genes.contains_key(parent) => {
                FeatureLevel::Transcript
            },
            Some(_) => FeatureLevel::Leaf,
            None => FeatureLevel::Unclassified,
        }
    }

    /// Classifies `record`, updates the registries and rewrites its
    /// attributes (and, for transcripts, its feature type) in place.
    ///
    /// `line` is only used for error reporting.
    pub fn resolve(
        &mut self,
        record: &mut GxfRecord,
        line: usize,
    ) -> ConvertResult<FeatureLevel> {
        let level = self.classify(record);
        match level {
            FeatureLevel::Gene => self.resolve_gene(record),
            FeatureLevel::Transcript => self.resolve_transcript(record),
            FeatureLevel::Leaf => self.resolve_leaf(record, line)?,
            FeatureLevel::Unclassified => {},
        }
        Ok(level)
    }

    fn resolve_gene(
        &mut self,
        record: &mut GxfRecord,
    ) {
        let gene_id = record
            .attributes
            .resolve("gene_id")
            .or_else(|| bare_id(record).into())
            .into_string();
        let gene_name = record
            .attributes
            .resolve("gene_name")
            .or_else(|| bare_name(record));

        record
            .attributes
            .insert_if_absent("gene_id", || gene_id.clone());
        record
            .attributes
            .insert_if_absent("gene_name", || gene_name.to_string());

        debug!("Registered gene {} ({})", gene_id, gene_name);
        self.genes.insert(gene_id.clone(), Gene {
            id:   gene_id,
            name: gene_name,
        });
    }

    fn resolve_transcript(
        &mut self,
        record: &mut GxfRecord,
    ) {
        let parent = record
            .attributes
            .get(PARENT_KEY)
            .unwrap_or_default()
            .to_string();
        let gene_name = self
            .genes
            .get(&parent)
            .map(|gene| gene.name.clone())
            .unwrap_or_default();
        let transcript_id = record
            .attributes
            .resolve("transcript_id")
            .or_else(|| bare_id(record).into())
            .into_string();
        let transcript_name = record
            .attributes
            .resolve("transcript_name")
            .or_else(|| bare_name(record));

        let attributes = &mut record.attributes;
        attributes.insert("gene_id", parent.as_str());
        attributes.insert("gene_name", gene_name.as_str());
        attributes.insert_if_absent("transcript_id", || transcript_id.clone());
        attributes
            .insert_if_absent("transcript_name", || transcript_name.to_string());
        attributes.insert("transcript_type", record.feature_type.as_str());
        record.feature_type = TRANSCRIPT_TYPE.to_string();

        debug!("Registered transcript {} of gene {}", transcript_id, parent);
        self.transcripts
            .insert(transcript_id.clone(), Transcript {
                id:      transcript_id,
                name:    transcript_name,
                gene_id: parent,
            });
    }

    fn resolve_leaf(
        &self,
        record: &mut GxfRecord,
        line: usize,
    ) -> ConvertResult<()> {
        let parent = record
            .attributes
            .get(PARENT_KEY)
            .unwrap_or_default()
            .to_string();
        let transcript = self
            .transcripts
            .get(&parent)
            .ok_or_else(|| ConvertError::UnresolvedParent {
                line,
                parent: parent.clone(),
            })?;
        let gene_name = self
            .genes
            .get(&transcript.gene_id)
            .map(|gene| gene.name.clone())
            .unwrap_or_default();

        let attributes = &mut record.attributes;
        attributes.insert_if_absent("transcript_id", || parent.clone());
        attributes
            .insert_if_absent("transcript_name", || transcript.name.to_string());
        attributes.insert_if_absent("gene_id", || transcript.gene_id.clone());
        attributes.insert_if_absent("gene_name", || gene_name.to_string());

        let feature_type = record.feature_type.to_lowercase();
        let attributes = &mut record.attributes;
        attributes.rename(ID_KEY, &format!("{}_id", feature_type));
        attributes.rename(NAME_KEY, &format!("{}_name", feature_type));
        Ok(())
    }
}
