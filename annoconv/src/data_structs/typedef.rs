use std::fmt;

/// Genomic coordinate as written in the source file.
pub type PosType = u64;

/// Literal written wherever an identifier or name could not be resolved.
pub const UNKNOWN_VALUE: &str = "NA";

/// Outcome of looking up an attribute value.
///
/// `Unknown` is a value in its own right: it is rendered as `NA` so that
/// consumers keyed on that literal keep working, and it never collapses to an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Resolved {
    Known(String),
    #[default]
    Unknown,
}

impl Resolved {
    pub fn as_str(&self) -> &str {
        match self {
            Resolved::Known(value) => value.as_str(),
            Resolved::Unknown => UNKNOWN_VALUE,
        }
    }

    /// Returns `self` if known, otherwise evaluates `f`.
    pub fn or_else<F: FnOnce() -> Resolved>(
        self,
        f: F,
    ) -> Resolved {
        match self {
            Resolved::Known(_) => self,
            Resolved::Unknown => f(),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Resolved::Known(value) => value,
            Resolved::Unknown => UNKNOWN_VALUE.to_string(),
        }
    }
}

impl From<Option<String>> for Resolved {
    fn from(value: Option<String>) -> Self {
        value.map_or(Resolved::Unknown, Resolved::Known)
    }
}

impl From<Option<&str>> for Resolved {
    fn from(value: Option<&str>) -> Self {
        value.map(str::to_string).into()
    }
}

impl From<&str> for Resolved {
    fn from(value: &str) -> Self {
        Resolved::Known(value.to_string())
    }
}

impl fmt::Display for Resolved {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
