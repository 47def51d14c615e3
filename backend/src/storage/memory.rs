//! In-memory entry storage, the test double for the persistence port.

use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::domain::models::entry::WritingEntry as DomainEntry;
use crate::storage::traits::EntryStorage;

/// Keeps the "durable" collection in a mutex-guarded Vec. Also counts
/// saves so tests can assert that every mutation rewrote the slot.
#[derive(Clone, Default)]
pub struct MemoryEntryStorage {
    slot: Arc<Mutex<Vec<DomainEntry>>>,
    save_count: Arc<Mutex<usize>>,
}

impl MemoryEntryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full slot rewrites performed so far.
    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }

    /// Raw slot contents, bypassing the store. Lets tests inspect stored
    /// records without going through a service.
    pub fn raw_entries(&self) -> Vec<DomainEntry> {
        self.slot.lock().unwrap().clone()
    }
}

impl EntryStorage for MemoryEntryStorage {
    fn load_entries(&self) -> Result<Vec<DomainEntry>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save_entries(&self, entries: &[DomainEntry]) -> Result<()> {
        *self.slot.lock().unwrap() = entries.to_vec();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
