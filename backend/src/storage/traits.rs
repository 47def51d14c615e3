//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use crate::domain::models::entry::WritingEntry as DomainEntry;

/// Trait defining the interface for entry collection storage.
///
/// The whole collection is the unit of persistence: a save rewrites the
/// durable slot in full, and a load rehydrates the full ordered sequence.
/// This abstracts away the specific backend (JSON slot file, in-memory
/// fake for tests) so the domain layer never touches the filesystem
/// directly.
///
/// Note: all operations are synchronous for the desktop-only egui app.
pub trait EntryStorage: Send + Sync {
    /// Load the full ordered collection from the durable slot.
    ///
    /// An absent or unparsable slot must degrade to an empty collection
    /// (logged by the implementation), never an error.
    fn load_entries(&self) -> Result<Vec<DomainEntry>>;

    /// Rewrite the durable slot with the full collection.
    fn save_entries(&self, entries: &[DomainEntry]) -> Result<()>;
}
