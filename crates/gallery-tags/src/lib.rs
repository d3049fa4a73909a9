//! gallery-tags: tag graph models, merge resolution, and ranked search for
//! the gallery admin.
//!
//! Tags form two overlaid graphs: a merge graph (`merge_to` pointers toward
//! canonical records) and a parent/child hierarchy. An admin session loads
//! one snapshot of the graph, resolves user selections to canonical ids,
//! derives the implied ancestors, searches by name and alias, and edits
//! relations locally. The authoritative records live in the external store
//! and are re-fetched on reload.

pub mod tag;
pub mod normalize;
pub mod snapshot;
pub mod store;
pub mod resolve;
pub mod derive;
pub mod search;
pub mod suggest;
pub mod edit;
pub mod directory;
pub mod catalog;

pub use tag::*;
pub use normalize::*;
pub use snapshot::*;
pub use store::*;
pub use resolve::*;
pub use derive::*;
pub use search::*;
pub use suggest::*;
pub use edit::*;
pub use directory::*;
pub use catalog::*;
