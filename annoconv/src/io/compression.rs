use std::fmt;
use std::io::{
    self,
    Read,
    Write,
};
use std::path::Path;

/// Stream compression of an input or output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gz,
    Zstd,
    Bzip2,
    Xz2,
}

impl Compression {
    pub fn name(&self) -> &str {
        match self {
            Compression::None => "none",
            Compression::Gz => "gzip",
            Compression::Zstd => "zstd",
            Compression::Bzip2 => "bzip2",
            Compression::Xz2 => "xz2",
        }
    }

    /// Picks the compression from the last extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "gz" | "bgz" => Compression::Gz,
            "zst" | "zstd" => Compression::Zstd,
            "bz2" => Compression::Bzip2,
            "xz" => Compression::Xz2,
            _ => Compression::None,
        }
    }

    pub fn get_decoder<R: Read + 'static>(
        &self,
        handle: R,
    ) -> io::Result<Box<dyn Read>> {
        match self {
            Compression::None => Ok(Box::new(handle)),
            #[cfg(feature = "compression")]
            Compression::Gz => {
                Ok(Box::new(flate2::read::MultiGzDecoder::new(handle)))
            },
            #[cfg(feature = "compression")]
            Compression::Zstd => Ok(Box::new(zstd::Decoder::new(handle)?)),
            #[cfg(feature = "compression")]
            Compression::Bzip2 => {
                Ok(Box::new(bzip2::read::MultiBzDecoder::new(handle)))
            },
            #[cfg(feature = "compression")]
            Compression::Xz2 => {
                Ok(Box::new(xz2::read::XzDecoder::new_multi_decoder(handle)))
            },
            #[cfg(not(feature = "compression"))]
            other => Err(unsupported(other)),
        }
    }

    /// Wraps `handle` in an encoder. The stream is only complete after
    /// [`Encoder::finish`].
    pub fn get_encoder<W: Write>(
        &self,
        handle: W,
    ) -> io::Result<Encoder<W>> {
        let encoder = match self {
            Compression::None => Encoder::Plain(handle),
            #[cfg(feature = "compression")]
            Compression::Gz => Encoder::Gz(flate2::write::GzEncoder::new(
                handle,
                flate2::Compression::default(),
            )),
            #[cfg(feature = "compression")]
            Compression::Zstd => Encoder::Zstd(zstd::Encoder::new(
                handle,
                zstd::DEFAULT_COMPRESSION_LEVEL,
            )?),
            #[cfg(feature = "compression")]
            Compression::Bzip2 => Encoder::Bzip2(bzip2::write::BzEncoder::new(
                handle,
                bzip2::Compression::default(),
            )),
            #[cfg(feature = "compression")]
            Compression::Xz2 => {
                Encoder::Xz2(xz2::write::XzEncoder::new(handle, XZ_PRESET))
            },
            #[cfg(not(feature = "compression"))]
            other => return Err(unsupported(other)),
        };
        Ok(encoder)
    }
}

#[cfg(feature = "compression")]
const XZ_PRESET: u32 = 6;

/// Output stream, plain or compressed.
///
/// Dropping an encoder discards any error raised while writing the trailer,
/// so output must be closed with [`Encoder::finish`].
pub enum Encoder<W: Write> {
    Plain(W),
    #[cfg(feature = "compression")]
    Gz(flate2::write::GzEncoder<W>),
    #[cfg(feature = "compression")]
    Zstd(zstd::Encoder<'static, W>),
    #[cfg(feature = "compression")]
    Bzip2(bzip2::write::BzEncoder<W>),
    #[cfg(feature = "compression")]
    Xz2(xz2::write::XzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Writes the compression trailer, flushes the underlying handle and
    /// returns it.
    pub fn finish(self) -> io::Result<W> {
        let mut handle = match self {
            Encoder::Plain(handle) => handle,
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.finish()?,
            #[cfg(feature = "compression")]
            Encoder::Zstd(encoder) => encoder.finish()?,
            #[cfg(feature = "compression")]
            Encoder::Bzip2(encoder) => encoder.finish()?,
            #[cfg(feature = "compression")]
            Encoder::Xz2(encoder) => encoder.finish()?,
        };
        handle.flush()?;
        Ok(handle)
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self {
            Encoder::Plain(handle) => handle.write(buf),
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.write(buf),
            #[cfg(feature = "compression")]
            Encoder::Zstd(encoder) => encoder.write(buf),
            #[cfg(feature = "compression")]
            Encoder::Bzip2(encoder) => encoder.write(buf),
            #[cfg(feature = "compression")]
            Encoder::Xz2(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Encoder::Plain(handle) => handle.flush(),
            #[cfg(feature = "compression")]
            Encoder::Gz(encoder) => encoder.flush(),
            #[cfg(feature = "compression")]
            Encoder::Zstd(encoder) => encoder.flush(),
            #[cfg(feature = "compression")]
            Encoder::Bzip2(encoder) => encoder.flush(),
            #[cfg(feature = "compression")]
            Encoder::Xz2(encoder) => encoder.flush(),
        }
    }
}

#[cfg(not(feature = "compression"))]
fn unsupported(compression: &Compression) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "{} files require the `compression` feature",
            compression.name()
        ),
    )
}

impl fmt::Display for Compression {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}
