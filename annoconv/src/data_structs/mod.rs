//! Core types: attribute maps and the key policy, annotation records, the
//! hierarchy registries, BED12 transcript buckets and splice junctions.

pub mod attributes;
pub mod bed12;
pub mod enums;
pub mod hierarchy;
pub mod junction;
pub mod record;
pub mod typedef;

pub use attributes::{
    Attributes,
    Dialect,
    KeyPolicy,
};
pub use bed12::{
    ExonBlocks,
    TranscriptBucket,
    TranscriptSpan,
};
pub use enums::{
    FeatureLevel,
    Strand,
};
pub use hierarchy::{
    Gene,
    HierarchyResolver,
    Transcript,
};
pub use junction::{
    AlignmentSpan,
    JunctionKey,
    JunctionTable,
};
pub use record::{
    GxfRecord,
    ParsedRecord,
};
pub use typedef::{
    PosType,
    Resolved,
    UNKNOWN_VALUE,
};
