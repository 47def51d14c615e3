//! Entry store domain logic for the writing receipt.
//!
//! Owns the canonical ordered collection of writing entries. Every
//! mutation rewrites the durable slot in full through the injected
//! storage port; there is no partial or incremental persistence.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::entries::{
    CreateEntryCommand, DeleteEntryCommand, EntryListResult, UpdateEntryCommand,
};
use crate::domain::models::entry::WritingEntry as DomainEntry;
use crate::storage::traits::EntryStorage;

pub struct EntryService {
    storage: Arc<dyn EntryStorage>,
}

impl EntryService {
    pub fn new(storage: Arc<dyn EntryStorage>) -> Self {
        Self { storage }
    }

    /// The collection in insertion order, rehydrated from the slot.
    pub fn list_entries(&self) -> Result<EntryListResult> {
        let entries = self.storage.load_entries()?;
        Ok(EntryListResult { entries })
    }

    /// Append a new entry with a fresh id and creation timestamp.
    pub fn create_entry(&self, command: CreateEntryCommand) -> Result<DomainEntry> {
        let entry = DomainEntry {
            id: DomainEntry::generate_id(),
            title: command.title,
            word_count: command.word_count,
            month: command.month,
            is_serial: command.is_serial,
            chapters: command.chapters,
            is_finished: command.is_finished,
            timestamp: DomainEntry::now_timestamp(),
        };

        let mut entries = self.storage.load_entries()?;
        entries.push(entry.clone());
        self.storage.save_entries(&entries)?;

        info!("✏️ ENTRY: Added 《{}》 ({} words)", entry.title, entry.word_count);
        Ok(entry)
    }

    /// Replace the record whose id matches, preserving the stored id and
    /// creation timestamp. A missing id is a silent no-op by design: no
    /// caller depends on an error signal here.
    pub fn update_entry(&self, command: UpdateEntryCommand) -> Result<Option<DomainEntry>> {
        let mut entries = self.storage.load_entries()?;

        let Some(existing) = entries.iter_mut().find(|e| e.id == command.id) else {
            warn!("✏️ ENTRY: Update target {} not found, collection unchanged", command.id);
            return Ok(None);
        };

        let updated = DomainEntry {
            id: existing.id.clone(),
            title: command.title,
            word_count: command.word_count,
            month: command.month,
            is_serial: command.is_serial,
            chapters: command.chapters,
            is_finished: command.is_finished,
            timestamp: existing.timestamp,
        };
        *existing = updated.clone();

        self.storage.save_entries(&entries)?;
        info!("✏️ ENTRY: Updated 《{}》", updated.title);
        Ok(Some(updated))
    }

    /// Remove all records with a matching id (expected: one or zero).
    /// Returns whether anything was removed; a miss is not an error.
    pub fn delete_entry(&self, command: DeleteEntryCommand) -> Result<bool> {
        let mut entries = self.storage.load_entries()?;
        let before = entries.len();
        entries.retain(|e| e.id != command.id);

        if entries.len() == before {
            info!("🗑️ ENTRY: Delete target {} not found", command.id);
            return Ok(false);
        }

        self.storage.save_entries(&entries)?;
        info!("🗑️ ENTRY: Deleted entry {}", command.id);
        Ok(true)
    }

    /// Empty the collection unconditionally. No confirmation step is a
    /// deliberate UX decision in this app.
    pub fn clear_entries(&self) -> Result<()> {
        self.storage.save_entries(&[])?;
        info!("🗑️ ENTRY: Cleared all entries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryEntryStorage;
    use shared::Month;

    fn service() -> (EntryService, MemoryEntryStorage) {
        let storage = MemoryEntryStorage::new();
        (EntryService::new(Arc::new(storage.clone())), storage)
    }

    fn create_command(title: &str, words: u32, month: Month) -> CreateEntryCommand {
        CreateEntryCommand {
            title: title.to_string(),
            word_count: words,
            month,
            is_serial: false,
            chapters: None,
            is_finished: None,
        }
    }

    #[test]
    fn test_create_appends_in_order() {
        let (service, _) = service();

        service.create_entry(create_command("甲", 1000, Month::January)).unwrap();
        service.create_entry(create_command("乙", 2000, Month::January)).unwrap();

        let entries = service.list_entries().unwrap().entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "甲");
        assert_eq!(entries[1].title, "乙");
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[test]
    fn test_every_mutation_rewrites_the_slot() {
        let (service, storage) = service();

        let created = service.create_entry(create_command("作", 100, Month::May)).unwrap();
        assert_eq!(storage.save_count(), 1);

        service
            .update_entry(UpdateEntryCommand {
                id: created.id.clone(),
                title: "作二".to_string(),
                word_count: 200,
                month: Month::May,
                is_serial: false,
                chapters: None,
                is_finished: None,
            })
            .unwrap();
        assert_eq!(storage.save_count(), 2);

        service.delete_entry(DeleteEntryCommand { id: created.id }).unwrap();
        assert_eq!(storage.save_count(), 3);

        service.clear_entries().unwrap();
        assert_eq!(storage.save_count(), 4);
    }

    #[test]
    fn test_update_preserves_id_and_timestamp() {
        let (service, _) = service();
        let created = service.create_entry(create_command("初稿", 100, Month::April)).unwrap();

        let updated = service
            .update_entry(UpdateEntryCommand {
                id: created.id.clone(),
                title: "定稿".to_string(),
                word_count: 4000,
                month: Month::July,
                is_serial: true,
                chapters: Some("1-3章".to_string()),
                is_finished: Some(false),
            })
            .unwrap()
            .expect("update should hit");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.timestamp, created.timestamp);
        assert_eq!(updated.title, "定稿");
        assert_eq!(updated.month, Month::July);

        let entries = service.list_entries().unwrap().entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], updated);
    }

    #[test]
    fn test_update_with_unknown_id_leaves_collection_unchanged() {
        let (service, _) = service();
        service.create_entry(create_command("原", 100, Month::April)).unwrap();
        let before = service.list_entries().unwrap().entries;

        let result = service
            .update_entry(UpdateEntryCommand {
                id: "no-such-id".to_string(),
                title: "改".to_string(),
                word_count: 1,
                month: Month::May,
                is_serial: false,
                chapters: None,
                is_finished: None,
            })
            .unwrap();

        assert!(result.is_none());
        assert_eq!(service.list_entries().unwrap().entries, before);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (service, _) = service();
        let created = service.create_entry(create_command("删", 100, Month::April)).unwrap();

        assert!(service.delete_entry(DeleteEntryCommand { id: created.id.clone() }).unwrap());
        assert!(!service.delete_entry(DeleteEntryCommand { id: created.id }).unwrap());
        assert!(service.list_entries().unwrap().entries.is_empty());
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let (service, storage) = service();
        for i in 0..5 {
            service.create_entry(create_command("篇", i, Month::March)).unwrap();
        }

        service.clear_entries().unwrap();
        assert!(service.list_entries().unwrap().entries.is_empty());
        assert!(storage.raw_entries().is_empty());
    }

    #[test]
    fn test_reverting_serial_flag_drops_serial_fields_from_record() {
        let (service, storage) = service();
        let created = service.create_entry(create_command("连载", 100, Month::March)).unwrap();

        service
            .update_entry(UpdateEntryCommand {
                id: created.id.clone(),
                title: "连载".to_string(),
                word_count: 100,
                month: Month::March,
                is_serial: true,
                chapters: Some("1-3章".to_string()),
                is_finished: Some(false),
            })
            .unwrap();
        assert_eq!(storage.raw_entries()[0].chapters.as_deref(), Some("1-3章"));

        // The form controller omits serial fields when the flag is off,
        // so the stored record drops them on the next update.
        service
            .update_entry(UpdateEntryCommand {
                id: created.id,
                title: "连载".to_string(),
                word_count: 100,
                month: Month::March,
                is_serial: false,
                chapters: None,
                is_finished: None,
            })
            .unwrap();

        let raw = &storage.raw_entries()[0];
        assert_eq!(raw.chapters, None);
        assert_eq!(raw.is_finished, None);
        assert_eq!(raw.effective_chapters(), None);
        assert!(!raw.effective_is_finished());
    }

    #[test]
    fn test_operation_sequence_is_deterministic() {
        // Same add/update/delete/clear sequence applied to two empty
        // stores ends in the same collection (modulo generated ids).
        let run = || {
            let (service, _) = service();
            let a = service.create_entry(create_command("一", 1000, Month::January)).unwrap();
            service.create_entry(create_command("二", 2000, Month::February)).unwrap();
            service.delete_entry(DeleteEntryCommand { id: a.id }).unwrap();
            service
                .list_entries()
                .unwrap()
                .entries
                .into_iter()
                .map(|e| (e.title, e.word_count))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
        assert_eq!(run(), vec![("二".to_string(), 2000)]);
    }
}
