pub mod convert;
pub mod junctions;
