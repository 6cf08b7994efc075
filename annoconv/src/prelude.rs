pub use crate::data_structs::{
    Attributes,
    Dialect,
    FeatureLevel,
    GxfRecord,
    HierarchyResolver,
    KeyPolicy,
    Resolved,
    Strand,
};
pub use crate::error::{
    ConvertError,
    ConvertResult,
};
pub use crate::io::bed12::Bed12Writer;
pub use crate::io::compression::{
    Compression,
    Encoder,
};
pub use crate::io::gxf::{
    Gff3Writer,
    GtfWriter,
    GxfLine,
    GxfReader,
};
pub use crate::tools::convert::{
    to_bed12,
    to_gff3,
    to_gtf,
    ConvertStats,
    ToGff3Config,
    ToGtfConfig,
};
pub use crate::tools::junctions::{
    extract_junctions,
    JunctionExtractor,
    JunctionStats,
};
pub use crate::utils::{
    create_output,
    open_input,
    OutputFile,
};
