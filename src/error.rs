use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Axis;

// ---------------------------------------------------------------------------
// Per-action error kinds
// ---------------------------------------------------------------------------

/// The chosen root directory could not be walked at all.
#[derive(Debug, Error)]
#[error("cannot read directory {}: {source}", path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A point-cloud file could not be turned into a [`PointCloud`](crate::data::model::PointCloud).
#[derive(Debug, Error)]
#[error("cannot load {}: {kind}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub kind: LoadErrorKind,
}

#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error("failed to open file: {0}")]
    Open(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 3 fields (X, Y, Z), found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {axis} value '{text}' is not a finite number")]
    InvalidNumber { line: u64, axis: Axis, text: String },

    #[error("file contains no points")]
    Empty,
}

/// Threshold text the operator typed is not a usable number.
#[derive(Debug, Error)]
#[error("'{input}' is not a valid Z value")]
pub struct ValidationError {
    pub input: String,
}

/// An action was attempted before the state it needs exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("no file selected")]
    NoFileLoaded,

    #[error("no Z value entered")]
    NoThreshold,

    #[error("file #{index} does not exist (catalog has {len} entries)")]
    NoSuchEntry { index: usize, len: usize },
}

/// Writing the annotated copy failed; the source file is untouched.
#[derive(Debug, Error)]
#[error("failed to save {}: {source}", path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// ---------------------------------------------------------------------------
// Action boundary
// ---------------------------------------------------------------------------

/// What a user-facing operation can fail with. The GUI turns every variant
/// into a status message.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Save(#[from] SaveError),
}
