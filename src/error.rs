//! Fatal errors of a notice run.
//!
//! An artifact without a matching license is not an error here: it is
//! collected as a line of [`Notice::errors`](crate::notice::Notice) and the run goes on.

use std::path::PathBuf;

use crate::license::matcher::Tier;

#[derive(Debug, thiserror::Error)]
pub enum NoticeError {
    /// Two or more catalog records tie within one tier. The catalog must be fixed.
    #[error(
        "ambiguous license catalog: {} records match {group_id}:{artifact_id} '{license}' on {tier}: [{}]",
        .candidates.len(),
        .candidates.join(", ")
    )]
    AmbiguousCatalog {
        tier: Tier,
        group_id: String,
        artifact_id: String,
        license: String,
        candidates: Vec<String>,
    },

    /// A source document could not be found.
    #[error("{kind} not found: {}", .path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    /// A source document exists but cannot be read as expected.
    #[error("malformed {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },
}
