//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are not
//! exposed to the UI. The `Backend` facade maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod entries {
    use crate::domain::models::entry::WritingEntry as DomainEntry;
    use shared::Month;

    /// Input for creating a new entry. Id and timestamp are assigned by
    /// the service.
    #[derive(Debug, Clone)]
    pub struct CreateEntryCommand {
        pub title: String,
        pub word_count: u32,
        pub month: Month,
        pub is_serial: bool,
        pub chapters: Option<String>,
        pub is_finished: Option<bool>,
    }

    /// Input for replacing an existing entry in place. The stored id and
    /// timestamp are preserved.
    #[derive(Debug, Clone)]
    pub struct UpdateEntryCommand {
        pub id: String,
        pub title: String,
        pub word_count: u32,
        pub month: Month,
        pub is_serial: bool,
        pub chapters: Option<String>,
        pub is_finished: Option<bool>,
    }

    /// Input for deleting an entry by id.
    #[derive(Debug, Clone)]
    pub struct DeleteEntryCommand {
        pub id: String,
    }

    /// Result of listing the collection in insertion order.
    #[derive(Debug, Clone)]
    pub struct EntryListResult {
        pub entries: Vec<DomainEntry>,
    }
}
