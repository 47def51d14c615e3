//! Insight client for the writing receipt.
//!
//! Sends a text summary of the entry list to the Gemini generation API and
//! returns a short congratulatory comment. Deliberately fail-soft: this
//! service never raises to its caller. Missing credentials, transport
//! errors and empty responses all fall back to fixed strings, and an empty
//! entry list never makes a network call at all.

use log::{info, warn};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use shared::WritingEntry;

/// Returned for an empty collection, without touching the network.
pub const NO_ENTRIES_INSIGHT: &str = "还没有任何写作记录，快去码字吧！";

/// Returned when the service answers with blank text.
pub const EMPTY_RESPONSE_INSIGHT: &str = "你的才华如泉涌，继续加油！";

/// Returned for any transport, auth or parse failure.
pub const FAILURE_INSIGHT: &str = "系统忙着看你的大作，暂时无法评价，但你的努力已被宇宙记录！";

const GENERATION_MODEL: &str = "gemini-3-flash-preview";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the generation service.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// generateContent endpoint, without the key query parameter.
    pub endpoint: String,
    /// Externally supplied credential. Absence is handled as a call
    /// failure, not a startup crash.
    pub api_key: Option<String>,
}

impl InsightConfig {
    /// Read the credential from the environment (GEMINI_API_KEY, with
    /// API_KEY as the legacy fallback name).
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            endpoint: format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                GENERATION_MODEL
            ),
            api_key,
        }
    }
}

#[derive(Clone)]
pub struct InsightService {
    config: InsightConfig,
    client: reqwest::blocking::Client,
}

/// Ways a single generation attempt can fail. All of them collapse into
/// [`FAILURE_INSIGHT`] at the public surface.
#[derive(Debug, Error)]
enum InsightError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl InsightService {
    pub fn new(config: InsightConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(InsightConfig::from_env())
    }

    /// One generation round trip for the current entry list. Single
    /// attempt per call; always returns displayable text.
    pub fn request_insight(&self, entries: &[WritingEntry]) -> String {
        if entries.is_empty() {
            return NO_ENTRIES_INSIGHT.to_string();
        }

        let prompt = build_prompt(entries);
        match self.call_generation_service(&prompt) {
            Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_INSIGHT.to_string(),
            Ok(text) => {
                info!("💬 INSIGHT: received {} chars of commentary", text.len());
                text.trim().to_string()
            }
            Err(e) => {
                warn!("💬 INSIGHT: generation call failed: {}", e);
                FAILURE_INSIGHT.to_string()
            }
        }
    }

    fn call_generation_service(&self, prompt: &str) -> Result<String, InsightError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingApiKey)?;

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()?
            .error_for_status()?;

        let parsed: GenerateContentResponse = response.json()?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

/// Fixed-shape one-line-per-entry summary fed into the prompt.
fn build_summary(entries: &[WritingEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let mut detail = format!("{}: 《{}》 ({}字)", e.month.label(), e.title, e.word_count);
            if e.is_serial {
                match e.effective_chapters() {
                    Some(chapters) => detail.push_str(&format!(" [连载中, {}]", chapters)),
                    None => detail.push_str(" [连载中]"),
                }
                if e.effective_is_finished() {
                    detail.push_str(" [已完结!!!]");
                }
            }
            detail
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(entries: &[WritingEntry]) -> String {
    // Raw number in the prompt; separator grouping is display-only.
    let total_words: u64 = entries.iter().map(|e| u64::from(e.word_count)).sum();

    format!(
        "我是一名小说作者。这是我最近的创作清单：\n{}\n总计：{} 字。\n\n\
         请你以一个“文学咖啡馆老板”或者“温柔的编辑”的身份，给我的这张“写作小票”\
         写一段简短、幽默且富有鼓励性的评语（100字以内）。\n\
         如果清单中有作品“已完结”，请务必给予最高规格的热烈祝贺！\n\
         请直接输出评语，不要带任何开场白或解释。",
        build_summary(entries),
        total_words
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Month;

    fn entry(title: &str, words: u32, month: Month) -> WritingEntry {
        WritingEntry {
            id: title.to_string(),
            title: title.to_string(),
            word_count: words,
            month,
            is_serial: false,
            chapters: None,
            is_finished: None,
            timestamp: 1,
        }
    }

    /// Service wired to an unroutable endpoint: any attempted network
    /// call comes back as the failure fallback, so tests can tell "no
    /// call" and "failed call" apart.
    fn unroutable_service() -> InsightService {
        InsightService::new(InsightConfig {
            endpoint: "http://127.0.0.1:1/generate".to_string(),
            api_key: Some("test-key".to_string()),
        })
    }

    #[test]
    fn test_empty_collection_short_circuits_without_network_call() {
        let service = unroutable_service();
        // A network attempt against the unroutable endpoint would yield
        // FAILURE_INSIGHT; the fixed no-data string proves no attempt.
        assert_eq!(service.request_insight(&[]), NO_ENTRIES_INSIGHT);
    }

    #[test]
    fn test_transport_failure_falls_back() {
        let service = unroutable_service();
        let result = service.request_insight(&[entry("星火", 3000, Month::March)]);
        assert_eq!(result, FAILURE_INSIGHT);
    }

    #[test]
    fn test_missing_credential_is_a_call_failure_not_a_crash() {
        let service = InsightService::new(InsightConfig {
            endpoint: "http://127.0.0.1:1/generate".to_string(),
            api_key: None,
        });
        let result = service.request_insight(&[entry("星火", 3000, Month::March)]);
        assert_eq!(result, FAILURE_INSIGHT);
    }

    #[test]
    fn test_summary_shape() {
        let mut serial = entry("大江", 120000, Month::December);
        serial.is_serial = true;
        serial.chapters = Some("1-3章".to_string());
        serial.is_finished = Some(true);

        let summary = build_summary(&[entry("星火", 3000, Month::March), serial]);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "三月: 《星火》 (3000字)");
        assert_eq!(lines[1], "十二月: 《大江》 (120000字) [连载中, 1-3章] [已完结!!!]");
    }

    #[test]
    fn test_summary_masks_stale_serial_fields() {
        let mut stale = entry("旧作", 10, Month::May);
        stale.chapters = Some("第1章".to_string());
        stale.is_finished = Some(true);

        let summary = build_summary(&[stale]);
        assert_eq!(summary, "五月: 《旧作》 (10字)");
    }

    #[test]
    fn test_prompt_includes_summary_and_total() {
        let prompt = build_prompt(&[
            entry("一", 1000, Month::January),
            entry("二", 2000, Month::January),
        ]);
        assert!(prompt.contains("《一》"));
        assert!(prompt.contains("《二》"));
        // The prompt carries the plain total; grouped formatting is for
        // the rendered receipt only.
        assert!(prompt.contains("总计：3000 字"));
        assert!(!prompt.contains("3,000"));
        assert!(prompt.contains("文学咖啡馆老板"));
    }
}
