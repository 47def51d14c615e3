//! Receipt projection logic.
//!
//! Pure derivation over the entry collection, recomputed on every render.
//! It is cheap (O(n log n)) so nothing is cached.

use shared::{Receipt, ReceiptRow, WritingEntry};

/// Stateless projector from the entry collection to the receipt view.
#[derive(Clone, Default)]
pub struct ReceiptService;

impl ReceiptService {
    pub fn new() -> Self {
        Self
    }

    /// Derive the sorted, totaled receipt from the collection.
    ///
    /// Rows are ordered ascending by month, then by creation timestamp
    /// within a month. Entries sharing a timestamp have an unspecified
    /// relative order; that tie is accepted. Totals are computed over the
    /// unsorted input, so sorting can never change them.
    pub fn build_receipt(&self, entries: &[WritingEntry]) -> Receipt {
        let total_words: u64 = entries.iter().map(|e| u64::from(e.word_count)).sum();
        let work_count = entries.len();

        let mut sorted: Vec<&WritingEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            a.month
                .index()
                .cmp(&b.month.index())
                .then(a.timestamp.cmp(&b.timestamp))
        });

        let rows = sorted
            .into_iter()
            .map(|entry| ReceiptRow {
                id: entry.id.clone(),
                month_label: entry.month.label().to_string(),
                title: entry.title.clone(),
                word_count: entry.word_count,
                formatted_word_count: format_grouped(u64::from(entry.word_count)),
                chapters: entry.effective_chapters().map(str::to_string),
                is_finished: entry.effective_is_finished(),
            })
            .collect();

        Receipt {
            rows,
            work_count,
            total_words,
            formatted_total_words: format_grouped(total_words),
            is_empty: work_count == 0,
        }
    }
}

/// Group a number with thousands separators for display, e.g. 1234567 ->
/// "1,234,567". The underlying numeric values stay untouched.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Month;

    fn entry(id: &str, title: &str, words: u32, month: Month, timestamp: i64) -> WritingEntry {
        WritingEntry {
            id: id.to_string(),
            title: title.to_string(),
            word_count: words,
            month,
            is_serial: false,
            chapters: None,
            is_finished: None,
            timestamp,
        }
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(3000), "3,000");
        assert_eq!(format_grouped(1234567), "1,234,567");
    }

    #[test]
    fn test_single_entry_projection() {
        let service = ReceiptService::new();
        let receipt = service.build_receipt(&[entry("a", "星火", 3000, Month::March, 1)]);

        assert_eq!(receipt.work_count, 1);
        assert_eq!(receipt.total_words, 3000);
        assert_eq!(receipt.formatted_total_words, "3,000");
        assert!(!receipt.is_empty);
        assert_eq!(receipt.rows.len(), 1);
        assert_eq!(receipt.rows[0].month_label, "三月");
        assert_eq!(receipt.rows[0].title, "星火");
    }

    #[test]
    fn test_rows_sorted_by_month_then_timestamp() {
        let service = ReceiptService::new();
        let entries = vec![
            entry("late", "十二月篇", 10, Month::December, 1),
            entry("b", "一月晚", 2000, Month::January, 200),
            entry("a", "一月早", 1000, Month::January, 100),
        ];

        let receipt = service.build_receipt(&entries);
        let ids: Vec<&str> = receipt.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "late"]);
        assert_eq!(receipt.total_words, 3010);
    }

    #[test]
    fn test_projection_is_stable_and_total_invariant_under_resort() {
        let service = ReceiptService::new();
        let entries = vec![
            entry("c", "三", 300, Month::October, 5),
            entry("a", "一", 100, Month::February, 9),
            entry("b", "二", 200, Month::February, 3),
        ];

        let first = service.build_receipt(&entries);
        let second = service.build_receipt(&entries);
        assert_eq!(first, second);
        assert_eq!(first.total_words, 600);
    }

    #[test]
    fn test_empty_collection_is_signalled_distinctly() {
        let service = ReceiptService::new();

        let empty = service.build_receipt(&[]);
        assert!(empty.is_empty);
        assert_eq!(empty.total_words, 0);
        assert_eq!(empty.work_count, 0);

        // Zero-word entries are not the same as no entries.
        let zero_words = service.build_receipt(&[entry("a", "空", 0, Month::June, 1)]);
        assert!(!zero_words.is_empty);
        assert_eq!(zero_words.total_words, 0);
        assert_eq!(zero_words.work_count, 1);
    }

    #[test]
    fn test_rows_mask_stale_serial_fields() {
        let service = ReceiptService::new();
        let mut stale = entry("s", "改回单篇", 50, Month::August, 1);
        stale.chapters = Some("第1章".to_string());
        stale.is_finished = Some(true);

        let receipt = service.build_receipt(&[stale]);
        assert_eq!(receipt.rows[0].chapters, None);
        assert!(!receipt.rows[0].is_finished);
    }

    #[test]
    fn test_rows_carry_serial_fields_for_serials() {
        let service = ReceiptService::new();
        let mut serial = entry("s", "长篇", 50_000, Month::August, 1);
        serial.is_serial = true;
        serial.chapters = Some("1-10章".to_string());
        serial.is_finished = Some(true);

        let receipt = service.build_receipt(&[serial]);
        assert_eq!(receipt.rows[0].chapters.as_deref(), Some("1-10章"));
        assert!(receipt.rows[0].is_finished);
        assert_eq!(receipt.rows[0].formatted_word_count, "50,000");
    }
}
