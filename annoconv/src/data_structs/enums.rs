use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// Not stranded (`.`).
    #[default]
    None,
    /// Stranded, but the strand is unknown (`?`).
    Unknown,
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "?" => Ok(Strand::Unknown),
            _ => Ok(Strand::None),
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
            Strand::Unknown => '?',
        }
    }
}

impl Display for Strand {
    #[cfg_attr(coverage_nightly, coverage(off))]
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Position of a record in the gene → transcript → leaf hierarchy, as
/// decided by [`HierarchyResolver`](super::HierarchyResolver).
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum FeatureLevel {
    Gene,
    Transcript,
    Leaf,
    Unclassified,
}
