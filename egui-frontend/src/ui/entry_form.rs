//! Entry form state machine.
//!
//! The form toggles between two modes over a single set of input fields:
//! creating a new entry or editing an existing one. The state machine is
//! plain data so the transitions are unit-testable without egui; the form
//! panel is a thin renderer over it.

use shared::{CreateEntryRequest, Month, UpdateEntryRequest, WritingEntry};

/// Which mode the form is in. Editing remembers the target's identity so
/// a save can preserve its id and creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Editing { id: String, timestamp: i64 },
}

/// What a successful submit produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmit {
    Create(CreateEntryRequest),
    Update(UpdateEntryRequest),
}

#[derive(Debug, Clone)]
pub struct EntryFormState {
    pub mode: FormMode,
    pub title: String,
    pub word_count_input: String,
    pub month: Month,
    pub is_serial: bool,
    pub chapters: String,
    pub is_finished: bool,
    /// Month the form resets to, captured when the form was created.
    default_month: Month,
}

impl EntryFormState {
    pub fn new(default_month: Month) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            word_count_input: String::new(),
            month: default_month,
            is_serial: false,
            chapters: String::new(),
            is_finished: false,
            default_month,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Editing { id, .. } => Some(id),
            FormMode::Create => None,
        }
    }

    /// Enter editing mode, populating every field from the target.
    /// Absent optional fields reset to empty/false.
    pub fn begin_edit(&mut self, entry: &WritingEntry) {
        self.mode = FormMode::Editing {
            id: entry.id.clone(),
            timestamp: entry.timestamp,
        };
        self.title = entry.title.clone();
        self.word_count_input = entry.word_count.to_string();
        self.month = entry.month;
        self.is_serial = entry.is_serial;
        self.chapters = entry.chapters.clone().unwrap_or_default();
        self.is_finished = entry.is_finished.unwrap_or(false);
    }

    /// Explicit cancel: back to create mode with default fields.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// The edited entry was deleted out from under the form; fall back
    /// to create mode. No-op when editing a different entry.
    pub fn notice_deleted(&mut self, id: &str) {
        if self.editing_id() == Some(id) {
            self.reset();
        }
    }

    /// Validate and build the store request for the current fields.
    ///
    /// Rejects (returns None, fields untouched) unless the title is
    /// non-empty and the word count parses. On success the form resets
    /// to create mode. Serial-only fields are omitted, not merely false,
    /// when the serial flag is off.
    pub fn submit(&mut self) -> Option<FormSubmit> {
        if self.title.is_empty() {
            return None;
        }
        let word_count: u32 = self.word_count_input.trim().parse().ok()?;

        let chapters = if self.is_serial && !self.chapters.is_empty() {
            Some(self.chapters.clone())
        } else {
            None
        };
        let is_finished = if self.is_serial {
            Some(self.is_finished)
        } else {
            None
        };

        let submit = match &self.mode {
            FormMode::Create => FormSubmit::Create(CreateEntryRequest {
                title: self.title.clone(),
                word_count,
                month: self.month,
                is_serial: self.is_serial,
                chapters,
                is_finished,
            }),
            FormMode::Editing { id, .. } => FormSubmit::Update(UpdateEntryRequest {
                id: id.clone(),
                title: self.title.clone(),
                word_count,
                month: self.month,
                is_serial: self.is_serial,
                chapters,
                is_finished,
            }),
        };

        self.reset();
        Some(submit)
    }

    fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.title.clear();
        self.word_count_input.clear();
        self.month = self.default_month;
        self.is_serial = false;
        self.chapters.clear();
        self.is_finished = false;
    }
}
