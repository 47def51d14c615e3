use serde::{Deserialize, Serialize};
use chrono::Datelike;

/// The twelve fixed month labels used throughout the app.
///
/// Entries store a month label, not a date: the receipt is an annual
/// summary and only cares about which month a writing session belongs to.
/// Serializes as the Chinese label (e.g. "三月") to stay compatible with
/// the v2 slot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "一月")]
    January,
    #[serde(rename = "二月")]
    February,
    #[serde(rename = "三月")]
    March,
    #[serde(rename = "四月")]
    April,
    #[serde(rename = "五月")]
    May,
    #[serde(rename = "六月")]
    June,
    #[serde(rename = "七月")]
    July,
    #[serde(rename = "八月")]
    August,
    #[serde(rename = "九月")]
    September,
    #[serde(rename = "十月")]
    October,
    #[serde(rename = "十一月")]
    November,
    #[serde(rename = "十二月")]
    December,
}

impl Month {
    /// All months in calendar order. The receipt sort key is the position
    /// in this array.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based calendar index (January = 0).
    pub fn index(&self) -> usize {
        Month::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Display label, e.g. "三月".
    pub fn label(&self) -> &'static str {
        match self {
            Month::January => "一月",
            Month::February => "二月",
            Month::March => "三月",
            Month::April => "四月",
            Month::May => "五月",
            Month::June => "六月",
            Month::July => "七月",
            Month::August => "八月",
            Month::September => "九月",
            Month::October => "十月",
            Month::November => "十一月",
            Month::December => "十二月",
        }
    }

    /// Parse a label back into a month.
    pub fn from_label(label: &str) -> Option<Month> {
        Month::ALL.iter().copied().find(|m| m.label() == label)
    }

    /// Month from a chrono month number (1-12).
    pub fn from_month_number(number: u32) -> Option<Month> {
        if (1..=12).contains(&number) {
            Some(Month::ALL[(number - 1) as usize])
        } else {
            None
        }
    }

    /// The current calendar month from the local clock. Used as the form
    /// default.
    pub fn current() -> Month {
        Month::from_month_number(chrono::Local::now().month()).unwrap_or(Month::January)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One recorded writing session. The sole persisted entity.
///
/// Serialized camelCase; `chapters`/`isFinished` are omitted entirely when
/// absent so the slot format matches the original v2 records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingEntry {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    /// Work title (non-empty).
    pub title: String,
    /// Words added in this session.
    pub word_count: u32,
    /// Which month the session belongs to.
    pub month: Month,
    /// Whether this entry is an ongoing serialized work.
    pub is_serial: bool,
    /// Completed chapter description; only meaningful when `is_serial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<String>,
    /// Marks the serialized work as completed; only meaningful when
    /// `is_serial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_finished: Option<bool>,
    /// Creation time in epoch milliseconds. Insertion-order tiebreaker
    /// within a month; never changes after creation, even across edits.
    pub timestamp: i64,
}

impl WritingEntry {
    /// Chapters as the rest of the system may consume them: `None` unless
    /// the entry is a serial, regardless of what is stored.
    pub fn effective_chapters(&self) -> Option<&str> {
        if self.is_serial {
            self.chapters.as_deref().filter(|c| !c.is_empty())
        } else {
            None
        }
    }

    /// Finished flag as the rest of the system may consume it: always
    /// false for non-serial entries.
    pub fn effective_is_finished(&self) -> bool {
        self.is_serial && self.is_finished.unwrap_or(false)
    }
}

/// Request for creating a new entry from validated form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub title: String,
    pub word_count: u32,
    pub month: Month,
    pub is_serial: bool,
    pub chapters: Option<String>,
    pub is_finished: Option<bool>,
}

/// Request for replacing an existing entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    /// Id of the entry being replaced.
    pub id: String,
    pub title: String,
    pub word_count: u32,
    pub month: Month,
    pub is_serial: bool,
    pub chapters: Option<String>,
    pub is_finished: Option<bool>,
}

/// One row of the rendered receipt, sorted and display-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRow {
    pub id: String,
    pub month_label: String,
    pub title: String,
    pub word_count: u32,
    /// Word count with thousands separators, display only.
    pub formatted_word_count: String,
    /// Effective chapters line; absent for non-serial entries.
    pub chapters: Option<String>,
    /// Effective finished flag; false for non-serial entries.
    pub is_finished: bool,
}

/// The formatted, sorted, totaled presentation of all entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub rows: Vec<ReceiptRow>,
    /// Number of recorded works.
    pub work_count: usize,
    /// Sum of word counts over the whole collection.
    pub total_words: u64,
    /// Total with thousands separators, display only.
    pub formatted_total_words: String,
    /// Distinguishes "no entries at all" from a list of zero-word entries.
    pub is_empty: bool,
}

/// Outcome of a single export attempt. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    pub success: bool,
    pub message: String,
    /// Path of the written PNG when `success`.
    pub file_path: String,
}
