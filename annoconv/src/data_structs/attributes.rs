use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

use super::typedef::Resolved;

/// Syntax of the ninth (attribute) column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// `key=value;key2=value2`. Keys keep their case.
    #[default]
    Gff3,
    /// `key "value"; key2 "value2";`. Keys are lower-cased.
    Gtf,
    /// Either of the above, split on whichever of `=` or whitespace comes
    /// first. Keys are lower-cased.
    Loose,
}

impl Dialect {
    fn split_clause<'a>(
        &self,
        clause: &'a str,
    ) -> Option<(&'a str, &'a str)> {
        let is_sep: fn(char) -> bool = match self {
            Dialect::Gff3 => |c| c == '=',
            Dialect::Gtf => char::is_whitespace,
            Dialect::Loose => |c| c == '=' || c.is_whitespace(),
        };
        let (idx, sep) = clause
            .char_indices()
            .find(|(_, c)| is_sep(*c))?;
        let rest = &clause[idx + sep.len_utf8()..];
        match self {
            Dialect::Gff3 => Some((&clause[..idx], rest)),
            _ => Some((
                &clause[..idx],
                rest.trim_start()
                    .trim_start_matches('=')
                    .trim_start(),
            )),
        }
    }

    fn lowercase_keys(&self) -> bool {
        !matches!(self, Dialect::Gff3)
    }

    /// Strips GTF quoting. Returns `None` if an unquoted value holds more
    /// than one token.
    fn clean_value<'a>(
        &self,
        value: &'a str,
    ) -> Option<&'a str> {
        if matches!(self, Dialect::Gff3) {
            return Some(value);
        }
        let value = value.trim();
        if let Some(quoted) = value.strip_prefix('"') {
            Some(quoted.trim_end_matches('"'))
        }
        else if value.contains(char::is_whitespace) {
            None
        }
        else {
            Some(value)
        }
    }
}

/// Attribute column of a record without attributes.
const EMPTY_COLUMN: &str = ".";

/// Keeps only the part after the first `:` (`SO:0000147` -> `0000147`,
/// `gene:ENSG01` -> `ENSG01`).
fn strip_ontology_prefix(value: &str) -> &str {
    value
        .split_once(':')
        .map_or(value, |(_, rest)| rest)
}

type CandidateFn = for<'a> fn(&'a str) -> Option<Cow<'a, str>>;

fn exact_key(key: &str) -> Option<Cow<'_, str>> { Some(Cow::Borrowed(key)) }

fn without_underscores(key: &str) -> Option<Cow<'_, str>> {
    key.contains('_')
        .then(|| Cow::Owned(key.replace('_', "")))
}

fn last_segment(key: &str) -> Option<Cow<'_, str>> {
    key.rsplit_once('_')
        .map(|(_, suffix)| Cow::Borrowed(suffix))
}

/// Maps a canonical attribute key onto the spellings found in the wild
/// (`gene_id`, `geneid`, `id`).
pub struct KeyPolicy;

impl KeyPolicy {
    const GENERATORS: [CandidateFn; 3] =
        [exact_key, without_underscores, last_segment];

    /// Candidate keys for `canonical`, highest priority first, without
    /// duplicates.
    pub fn candidates(canonical: &str) -> Vec<Cow<'_, str>> {
        Self::GENERATORS
            .iter()
            .filter_map(|generator| generator(canonical))
            .filter(|key| !key.is_empty())
            .unique()
            .collect()
    }
}

/// Ordered attribute map of a single record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    inner: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self { Self::default() }

    /// Parses an attribute column, stripping `prefix:` from every value.
    ///
    /// Returns the parsed map together with the clauses that could not be
    /// split into a key and a value. Those clauses are left out of the map.
    pub fn parse(
        raw: &str,
        dialect: Dialect,
    ) -> (Self, Vec<String>) {
        Self::parse_with(raw, dialect, true)
    }

    /// Like [`Attributes::parse`]; values are kept verbatim unless
    /// `strip_prefixes` is set.
    pub fn parse_with(
        raw: &str,
        dialect: Dialect,
        strip_prefixes: bool,
    ) -> (Self, Vec<String>) {
        let mut attributes = Attributes::new();
        let mut malformed = Vec::new();
        if raw.trim() == EMPTY_COLUMN {
            return (attributes, malformed);
        }

        for clause in raw.split(';') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            let parsed = dialect
                .split_clause(clause)
                .filter(|(key, _)| !key.is_empty())
                .and_then(|(key, value)| {
                    dialect
                        .clean_value(value)
                        .map(|value| (key, value))
                });

            match parsed {
                Some((key, value)) => {
                    let key = if dialect.lowercase_keys() {
                        key.to_lowercase()
                    }
                    else {
                        key.to_string()
                    };
                    let value = if strip_prefixes {
                        strip_ontology_prefix(value)
                    }
                    else {
                        value
                    };
                    attributes.insert(key, value);
                },
                None => malformed.push(clause.to_string()),
            }
        }

        (attributes, malformed)
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.inner.contains_key(key)
    }

    /// Inserts or updates `key`. An existing key keeps its position.
    pub fn insert<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<String> {
        self.inner.insert(key.into(), value.into())
    }

    /// Inserts `key` only when it is not present yet.
    pub fn insert_if_absent<K: Into<String>, F: FnOnce() -> String>(
        &mut self,
        key: K,
        value: F,
    ) {
        self.inner
            .entry(key.into())
            .or_insert_with(value);
    }

    /// Removes `key`, preserving the order of the remaining attributes.
    pub fn pop(
        &mut self,
        key: &str,
    ) -> Option<String> {
        self.inner.shift_remove(key)
    }

    /// Moves the value of `from` to `to` (appended at the end) unless `to` is
    /// already present. Returns whether anything moved.
    pub fn rename(
        &mut self,
        from: &str,
        to: &str,
    ) -> bool {
        if self.contains(to) {
            return false;
        }
        match self.pop(from) {
            Some(value) => {
                self.insert(to, value);
                true
            },
            None => false,
        }
    }

    fn find_candidate(
        &self,
        canonical: &str,
    ) -> Option<String> {
        KeyPolicy::candidates(canonical)
            .into_iter()
            .find(|key| self.contains(key))
            .map(Cow::into_owned)
    }

    /// Value stored under `canonical` or one of its dialect variants.
    pub fn resolve(
        &self,
        canonical: &str,
    ) -> Resolved {
        self.find_candidate(canonical)
            .and_then(|key| self.get(&key).map(str::to_string))
            .into()
    }

    /// Like [`Attributes::resolve`], but removes the matched key so that it
    /// is not written twice.
    pub fn resolve_pop(
        &mut self,
        canonical: &str,
    ) -> Resolved {
        self.find_candidate(canonical)
            .and_then(|key| self.pop(&key))
            .into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// GFF3 rendering, used for debugging output.
impl fmt::Display for Attributes {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .join(";")
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("gene_id", vec!["gene_id", "geneid", "id"])]
    #[case("transcript_name", vec!["transcript_name", "transcriptname", "name"])]
    #[case("ID", vec!["ID"])]
    #[case("gene_biotype_x", vec!["gene_biotype_x", "genebiotypex", "x"])]
    fn key_candidates(
        #[case] canonical: &str,
        #[case] expected: Vec<&str>,
    ) {
        let candidates = KeyPolicy::candidates(canonical);
        assert_eq!(
            candidates
                .iter()
                .map(|c| c.as_ref())
                .collect_vec(),
            expected
        );
    }

    #[test]
    fn gff3_preserves_case_and_order() {
        let (attrs, malformed) = Attributes::parse(
            "ID=g1;Name=GeneA;biotype=protein_coding",
            Dialect::Gff3,
        );
        assert!(malformed.is_empty());
        assert_eq!(
            attrs.iter().collect_vec(),
            vec![("ID", "g1"), ("Name", "GeneA"), ("biotype", "protein_coding")]
        );
    }

    #[test]
    fn gtf_lowercases_and_unquotes() {
        let (attrs, malformed) = Attributes::parse(
            r#"Gene_ID "ENSG01"; gene_name "TP53"; level 2;"#,
            Dialect::Gtf,
        );
        assert!(malformed.is_empty());
        assert_eq!(attrs.get("gene_id"), Some("ENSG01"));
        assert_eq!(attrs.get("gene_name"), Some("TP53"));
        assert_eq!(attrs.get("level"), Some("2"));
    }

    #[test]
    fn gtf_quoted_value_with_spaces() {
        let (attrs, malformed) =
            Attributes::parse(r#"note "two words""#, Dialect::Gtf);
        assert!(malformed.is_empty());
        assert_eq!(attrs.get("note"), Some("two words"));
    }

    #[rstest]
    #[case(Dialect::Gff3, "ID=gene:ENSG01;Parent=transcript:ENST01")]
    #[case(Dialect::Gtf, r#"id "gene:ENSG01"; parent "transcript:ENST01""#)]
    fn ontology_prefix_is_stripped(
        #[case] dialect: Dialect,
        #[case] raw: &str,
    ) {
        let (attrs, _) = Attributes::parse(raw, dialect);
        let values = attrs.iter().map(|(_, v)| v).collect_vec();
        assert_eq!(values, vec!["ENSG01", "ENST01"]);
    }

    #[test]
    fn verbatim_values_keep_prefixes() {
        let (attrs, _) = Attributes::parse_with(
            r#"gene_id "g1"; gene_name "HGNC:5""#,
            Dialect::Gtf,
            false,
        );
        assert_eq!(attrs.get("gene_name"), Some("HGNC:5"));

        let (attrs, _) = Attributes::parse("Name=HGNC:HGNC:5", Dialect::Gff3);
        assert_eq!(attrs.get("Name"), Some("HGNC:5"));
    }

    #[rstest]
    #[case(Dialect::Gff3, ".")]
    #[case(Dialect::Gtf, " . ")]
    #[case(Dialect::Loose, "")]
    fn empty_column_has_no_attributes(
        #[case] dialect: Dialect,
        #[case] raw: &str,
    ) {
        let (attrs, malformed) = Attributes::parse(raw, dialect);
        assert!(attrs.is_empty());
        assert!(malformed.is_empty());
    }

    #[test]
    fn malformed_clauses_are_skipped() {
        let (attrs, malformed) =
            Attributes::parse("ID=g1;orphan;Name=A", Dialect::Gff3);
        assert_eq!(attrs.len(), 2);
        assert_eq!(malformed, vec!["orphan".to_string()]);

        let (attrs, malformed) = Attributes::parse(
            r#"gene_id "g1"; stray value here; lonely"#,
            Dialect::Gtf,
        );
        assert_eq!(attrs.len(), 1);
        assert_eq!(malformed, vec!["stray value here", "lonely"]);
    }

    #[rstest]
    #[case("ID=t1;Parent=g1")]
    #[case(r#"transcript_id "t1"; parent "g1";"#)]
    #[case("id t1 ; parent=g1")]
    fn loose_accepts_both_dialects(#[case] raw: &str) {
        let (attrs, malformed) = Attributes::parse(raw, Dialect::Loose);
        assert!(malformed.is_empty());
        assert_eq!(attrs.resolve("transcript_id").as_str(), "t1");
        assert_eq!(attrs.get("parent"), Some("g1"));
    }

    #[test]
    fn resolve_prefers_exact_key() {
        let attrs: Attributes =
            [("id", "x"), ("geneid", "y"), ("gene_id", "z")]
                .into_iter()
                .collect();
        assert_eq!(attrs.resolve("gene_id"), Resolved::Known("z".into()));
    }

    #[test]
    fn resolve_falls_back_to_variants() {
        let mut attrs: Attributes =
            [("geneid", "y"), ("id", "x")].into_iter().collect();
        assert_eq!(attrs.resolve_pop("gene_id").as_str(), "y");
        assert_eq!(attrs.resolve_pop("gene_id").as_str(), "x");
        assert_eq!(attrs.resolve_pop("gene_id"), Resolved::Unknown);
        assert_eq!(attrs.resolve("gene_id").to_string(), "NA");
        assert!(attrs.is_empty());
    }

    #[test]
    fn rename_respects_existing_key() {
        let mut attrs: Attributes =
            [("ID", "e1"), ("Name", "E"), ("exon_name", "keep")]
                .into_iter()
                .collect();
        assert!(attrs.rename("ID", "exon_id"));
        assert!(!attrs.rename("Name", "exon_name"));
        assert_eq!(
            attrs.iter().collect_vec(),
            vec![("Name", "E"), ("exon_name", "keep"), ("exon_id", "e1")]
        );
    }
}
