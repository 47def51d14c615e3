//! Embedded backend for the writing receipt desktop app.
//!
//! The UI talks to the [`Backend`] facade with the DTOs from `shared`;
//! domain services and the storage layer live behind it.

pub mod domain;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;

use domain::commands::entries::DeleteEntryCommand;
use domain::entry_service::EntryService;
use domain::export_service::{ExportService, ReceiptSnapshot};
use domain::insight_service::InsightService;
use domain::mappers::EntryMapper;
use domain::receipt_service::ReceiptService;
use storage::{EntryRepository, EntryStorage, JsonConnection};

/// Backend facade wiring the storage connection and the domain services.
pub struct Backend {
    entry_service: EntryService,
    receipt_service: ReceiptService,
    export_service: ExportService,
    insight_service: InsightService,
}

impl Backend {
    /// Backend over the default data directory and environment-supplied
    /// insight credentials.
    pub fn new() -> Result<Self> {
        let connection = JsonConnection::new_default()?;
        Ok(Self::with_storage(Arc::new(EntryRepository::new(connection))))
    }

    /// Backend over an explicit connection (tests, custom data dirs).
    pub fn with_connection(connection: JsonConnection) -> Self {
        Self::with_storage(Arc::new(EntryRepository::new(connection)))
    }

    /// Backend over any storage port implementation.
    pub fn with_storage(storage: Arc<dyn EntryStorage>) -> Self {
        Self {
            entry_service: EntryService::new(storage),
            receipt_service: ReceiptService::new(),
            export_service: ExportService::new(),
            insight_service: InsightService::from_env(),
        }
    }

    /// The collection in insertion order.
    pub fn list_entries(&self) -> Result<Vec<shared::WritingEntry>> {
        let result = self.entry_service.list_entries()?;
        Ok(result.entries.into_iter().map(EntryMapper::to_dto).collect())
    }

    pub fn create_entry(&self, request: shared::CreateEntryRequest) -> Result<shared::WritingEntry> {
        let created = self
            .entry_service
            .create_entry(EntryMapper::to_create_command(request))?;
        Ok(EntryMapper::to_dto(created))
    }

    /// Replace an entry in place; `None` when the id no longer exists
    /// (silent no-op in the store).
    pub fn update_entry(
        &self,
        request: shared::UpdateEntryRequest,
    ) -> Result<Option<shared::WritingEntry>> {
        let updated = self
            .entry_service
            .update_entry(EntryMapper::to_update_command(request))?;
        Ok(updated.map(EntryMapper::to_dto))
    }

    /// Delete by id; false when nothing matched.
    pub fn delete_entry(&self, id: &str) -> Result<bool> {
        self.entry_service
            .delete_entry(DeleteEntryCommand { id: id.to_string() })
    }

    pub fn clear_entries(&self) -> Result<()> {
        self.entry_service.clear_entries()
    }

    /// Project the receipt view from an entry list.
    pub fn build_receipt(&self, entries: &[shared::WritingEntry]) -> shared::Receipt {
        self.receipt_service.build_receipt(entries)
    }

    /// Export a captured receipt snapshot as a PNG. Single attempt.
    pub fn export_snapshot(
        &self,
        snapshot: &ReceiptSnapshot,
        custom_path: Option<String>,
    ) -> Result<shared::ExportResult> {
        self.export_service.export_snapshot(snapshot, custom_path)
    }

    /// Cloneable export service handle for fire-and-forget worker threads.
    pub fn export_service(&self) -> ExportService {
        self.export_service.clone()
    }

    /// Cloneable insight service handle for fire-and-forget worker threads.
    pub fn insight_service(&self) -> InsightService {
        self.insight_service.clone()
    }
}
