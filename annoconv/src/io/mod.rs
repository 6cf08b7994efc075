pub mod bed12;
pub mod compression;
pub mod gxf;
