use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, resolving or writing annotation records.
///
/// Line numbers are 1-based and refer to the physical line of the input.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("input file {} not found", .0.display())]
    InputNotFound(PathBuf),
    #[error("line {line}: malformed attribute clause '{clause}'")]
    MalformedAttributeClause { line: usize, clause: String },
    #[error("line {line}: parent '{parent}' was never registered")]
    UnresolvedParent { line: usize, parent: String },
    #[error(
        "line {line}: expected at least 9 tab-separated columns, found {found}"
    )]
    MissingRequiredColumn { line: usize, found: usize },
    #[error("line {line}: invalid coordinate '{value}'")]
    InvalidCoordinate { line: usize, value: String },
    #[error("I/O error: {}", .0)]
    Io(#[from] io::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
