//! External record-store seam for tag creation.

use thiserror::Error;
use uuid::Uuid;

use crate::edit::TagInit;
use crate::tag::Tag;

/// Errors reported by a tag directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory acknowledged the request but returned no id.
    #[error("Directory returned no id for the new tag")]
    MissingId,

    #[error("Directory rejected the request: {0}")]
    Rejected(String),
}

/// The external record store that owns tag creation.
///
/// Implementations perform whatever transport they need and hand back the
/// authoritative record, which the caller registers as-is. The trait is
/// synchronous: async transports complete their request before invoking the
/// tag core.
pub trait TagDirectory {
    fn create_tag(&mut self, name: &str, init: &TagInit) -> Result<Tag, DirectoryError>;
}

/// In-memory directory minting v4 uuid ids, for offline sessions and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryDirectory;

impl TagDirectory for MemoryDirectory {
    fn create_tag(&mut self, name: &str, _init: &TagInit) -> Result<Tag, DirectoryError> {
        Ok(Tag::new(Uuid::new_v4().to_string(), name))
    }
}
