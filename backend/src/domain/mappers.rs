//! Conversions between the public DTOs in `shared` and the domain types.

use crate::domain::commands::entries::{CreateEntryCommand, UpdateEntryCommand};
use crate::domain::models::entry::WritingEntry as DomainEntry;

pub struct EntryMapper;

impl EntryMapper {
    pub fn to_dto(entry: DomainEntry) -> shared::WritingEntry {
        shared::WritingEntry {
            id: entry.id,
            title: entry.title,
            word_count: entry.word_count,
            month: entry.month,
            is_serial: entry.is_serial,
            chapters: entry.chapters,
            is_finished: entry.is_finished,
            timestamp: entry.timestamp,
        }
    }

    pub fn to_create_command(request: shared::CreateEntryRequest) -> CreateEntryCommand {
        CreateEntryCommand {
            title: request.title,
            word_count: request.word_count,
            month: request.month,
            is_serial: request.is_serial,
            chapters: request.chapters,
            is_finished: request.is_finished,
        }
    }

    pub fn to_update_command(request: shared::UpdateEntryRequest) -> UpdateEntryCommand {
        UpdateEntryCommand {
            id: request.id,
            title: request.title,
            word_count: request.word_count,
            month: request.month,
            is_serial: request.is_serial,
            chapters: request.chapters,
            is_finished: request.is_finished,
        }
    }
}
