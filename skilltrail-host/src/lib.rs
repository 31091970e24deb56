//! Filesystem host for the Skilltrail engine.
//!
//! This crate wires the platform-agnostic engine to a local machine: journey
//! content comes from a directory of markdown files and progress lives in
//! per-key JSON files. Embedding applications that want different sources
//! implement the engine traits themselves.

pub mod markdown;
pub mod store;

pub use markdown::{MarkdownContentProvider, MarkdownError};
pub use store::JsonFileStore;

// Re-export the engine so hosts depend on a single crate.
pub use skilltrail_engine::*;

use std::path::Path;

/// Create an engine reading journeys from `content_root` and keeping
/// progress under `state_dir`.
#[must_use]
pub fn file_engine(
    content_root: impl AsRef<Path>,
    state_dir: impl AsRef<Path>,
) -> JourneyEngine<MarkdownContentProvider, JsonFileStore> {
    JourneyEngine::new(
        MarkdownContentProvider::new(content_root.as_ref()),
        JsonFileStore::new(state_dir.as_ref()),
    )
}
