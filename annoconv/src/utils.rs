use std::fs::{
    self,
    File,
};
use std::io::{
    BufRead,
    BufReader,
    BufWriter,
};
use std::path::Path;

use log::debug;

use crate::error::{
    ConvertError,
    ConvertResult,
};
use crate::io::compression::{
    Compression,
    Encoder,
};

/// File opened by [`create_output`]. Close it with [`Encoder::finish`].
pub type OutputFile = Encoder<BufWriter<File>>;

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        #[cfg_attr(coverage_nightly, coverage(off))]
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}
pub use getter_fn;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            #[cfg_attr(coverage_nightly, coverage(off))]
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
pub use with_field_fn;

/// Opens `path` for buffered reading, decompressing by extension.
pub fn open_input<P: AsRef<Path>>(path: P) -> ConvertResult<Box<dyn BufRead>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }
    let compression = Compression::from_path(path);
    debug!("Opening {} ({})", path.display(), compression);
    let decoder = compression.get_decoder(File::open(path)?)?;
    Ok(Box::new(BufReader::new(decoder)))
}

/// Creates `path` for writing, creating missing parent directories and
/// compressing by extension.
pub fn create_output<P: AsRef<Path>>(path: P) -> ConvertResult<OutputFile> {
    let path = path.as_ref();
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        if !parent.exists() {
            debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    let compression = Compression::from_path(path);
    let encoder =
        compression.get_encoder(BufWriter::new(File::create(path)?))?;
    Ok(encoder)
}
