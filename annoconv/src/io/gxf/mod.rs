//! GFF3 and GTF line readers and writers.

mod read;
mod write;

pub use read::{
    GxfLine,
    GxfReader,
};
pub use write::{
    Gff3Writer,
    GtfWriter,
    GFF3_VERSION_HEADER,
    GTF_VERSION_HEADER,
};
