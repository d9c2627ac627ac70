//! Error type for the diagnostics pipeline.

use crate::editor::{BufferId, GroupId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the render pipeline.
///
/// These are all checked before any clearing or placement happens, so a
/// failed call leaves no partial output. Unloaded buffers and out-of-range
/// lines are not errors; they are silently skipped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A severity name outside the recognized set.
    #[error("unrecognized severity name: {name:?}")]
    InvalidSeverity { name: String },
    /// A severity ordinal outside `1..=4`.
    #[error("severity ordinal {value} out of range (expected 1..=4)")]
    InvalidOrdinal { value: u8 },
    /// A group handle the namespace registry does not know.
    #[error("unknown annotation group {0:?}")]
    UnknownGroup(GroupId),
    /// A buffer handle the editor never issued.
    #[error("unknown buffer {0:?}")]
    UnknownBuffer(BufferId),
}
