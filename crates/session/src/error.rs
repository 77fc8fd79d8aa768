//! Session error model.

use thiserror::Error;

/// Which mutation round-trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Update,
    Delete,
}

impl core::fmt::Display for MutationOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// An error surfaced by the session. Sticky: it stays set until cleared
/// explicitly or superseded by a newer error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The initial fetch failed. Blocks the whole view; recovery is a
    /// retry of `load()`.
    #[error("catalog load failed: {0}")]
    Load(String),

    /// A create/update/delete round-trip failed. Scoped to the
    /// operation; the catalog is untouched.
    #[error("{op} failed: {message}")]
    Mutation { op: MutationOp, message: String },
}

impl SessionError {
    /// Load failures take precedence in rendering: no catalog is shown.
    pub fn blocks_view(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}
