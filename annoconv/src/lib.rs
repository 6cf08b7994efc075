//! # annoconv
//!
//! `annoconv` converts genomic feature annotations between GFF3, GTF and
//! BED12, and extracts splice junctions from a splice aligner's alignment
//! report.
//!
//! All three annotation formats describe the same gene → transcript → leaf
//! (exon, CDS, ...) hierarchy but link parents and children differently.
//! While streaming records, [`HierarchyResolver`] rebuilds those links,
//! [`KeyPolicy`] reconciles attribute key spellings (`gene_id`, `geneid`,
//! `id`) and the writers in [`io`] project the result into the target layout.
//!
//! ## Pipelines
//!
//! * [`to_gtf`](tools::convert::to_gtf): GFF3 → GTF, and GTF → GTF with
//!   [`ToGtfConfig::normalize`](tools::convert::ToGtfConfig::normalize).
//! * [`to_gff3`](tools::convert::to_gff3): GTF → GFF3.
//! * [`to_bed12`](tools::convert::to_bed12): GTF or GFF3 → BED12.
//! * [`extract_junctions`](tools::junctions::extract_junctions): alignment
//!   report → alignment summaries and a junction count table.
//!
//! Input and output files may be compressed (gzip, zstd, bzip2, xz) when the
//! `compression` feature is enabled; see [`open_input`] and
//! [`create_output`]. Outputs must be closed with
//! [`Encoder::finish`](io::compression::Encoder::finish) so that write errors
//! at the end of a compressed stream are reported.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use data_structs::{
    HierarchyResolver,
    KeyPolicy,
};
pub use error::{
    ConvertError,
    ConvertResult,
};
pub use utils::{
    create_output,
    open_input,
};
