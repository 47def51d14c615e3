//! Domain model for a writing entry.
use serde::{Deserialize, Serialize};
use shared::Month;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingEntry {
    pub id: String,
    pub title: String,
    pub word_count: u32,
    pub month: Month,
    pub is_serial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_finished: Option<bool>,
    /// Epoch milliseconds at creation. Set once, preserved through edits.
    pub timestamp: i64,
}

impl WritingEntry {
    /// Generate a fresh random entry identifier.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Current wall-clock time in epoch milliseconds, the creation
    /// timestamp for new entries.
    pub fn now_timestamp() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Chapters as consumers may see them: absent unless the entry is a
    /// serial, regardless of what the raw record carries.
    pub fn effective_chapters(&self) -> Option<&str> {
        if self.is_serial {
            self.chapters.as_deref().filter(|c| !c.is_empty())
        } else {
            None
        }
    }

    /// Finished flag as consumers may see it: always false for
    /// non-serial entries.
    pub fn effective_is_finished(&self) -> bool {
        self.is_serial && self.is_finished.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WritingEntry {
        WritingEntry {
            id: WritingEntry::generate_id(),
            title: "短篇".to_string(),
            word_count: 500,
            month: Month::June,
            is_serial: false,
            chapters: None,
            is_finished: None,
            timestamp: 1,
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = WritingEntry::generate_id();
        let b = WritingEntry::generate_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_stale_serial_fields_read_as_absent() {
        let mut entry = sample();
        entry.chapters = Some("1-3章".to_string());
        entry.is_finished = Some(true);

        assert_eq!(entry.effective_chapters(), None);
        assert!(!entry.effective_is_finished());

        entry.is_serial = true;
        assert_eq!(entry.effective_chapters(), Some("1-3章"));
        assert!(entry.effective_is_finished());
    }

    #[test]
    fn test_empty_chapters_read_as_absent() {
        let mut entry = sample();
        entry.is_serial = true;
        entry.chapters = Some(String::new());
        assert_eq!(entry.effective_chapters(), None);
    }

    #[test]
    fn test_slot_record_shape() {
        let mut entry = sample();
        entry.id = "fixed".to_string();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["wordCount"], 500);
        assert_eq!(json["month"], "六月");
        assert!(json.get("chapters").is_none());
    }
}
