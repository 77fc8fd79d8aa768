//! Catalog session state.
//!
//! Owns the in-memory catalog mirrored from the remote store and the
//! derived (filtered, paginated) view, and drives the store gateway for
//! create/update/delete. One session per catalog view; no ambient
//! globals.

pub mod error;
pub mod session;
pub mod telemetry;

pub use error::{MutationOp, SessionError};
pub use session::{CatalogSession, DEFAULT_PAGE_SIZE};
