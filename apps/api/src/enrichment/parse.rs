//! Recovery of structured fields from free-form model output.
//!
//! The model is asked for JSON but may wrap it in prose or fences, or ignore the
//! instruction entirely. Parsing never fails: the outcome is tagged so callers
//! can tell a real structured answer from the raw-text fallback.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::llm_client::strip_json_fences;

fn object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment<T> {
    Structured(T),
    Fallback(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    Structured,
    Fallback,
}

impl<T: DeserializeOwned> Enrichment<T> {
    /// Takes the outermost `{ … }` span of `raw` and deserializes it as `T`.
    pub fn parse(raw: &str) -> Self {
        let unfenced = strip_json_fences(raw);
        let Some(object) = object_pattern().find(unfenced) else {
            warn!("Model output contained no JSON object, using raw text");
            return Enrichment::Fallback(raw.to_string());
        };

        match serde_json::from_str::<T>(object.as_str()) {
            Ok(value) => Enrichment::Structured(value),
            Err(e) => {
                warn!("Model output was not the expected JSON shape: {e}");
                Enrichment::Fallback(raw.to_string())
            }
        }
    }
}

impl<T> Enrichment<T> {
    pub fn source(&self) -> EnrichmentSource {
        match self {
            Enrichment::Structured(_) => EnrichmentSource::Structured,
            Enrichment::Fallback(_) => EnrichmentSource::Fallback,
        }
    }
}

/// Reads a list field the model may have sent as an array, a single
/// comma-separated string, or something else entirely (read as absent).
pub fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<String> = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::String(s)) => s
            .split([',', ';', '\n'])
            .map(str::to_string)
            .collect(),
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect(),
    ))
}

fn lenient_list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(deserializer)?.unwrap_or_default())
}

/// The three narrative fields the summary prompt asks for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryFields {
    pub persona_summary: String,
    pub unique_value: String,
    #[serde(deserialize_with = "lenient_list_or_empty")]
    pub recommendations: Vec<String>,
}

impl From<Enrichment<SummaryFields>> for SummaryFields {
    fn from(enrichment: Enrichment<SummaryFields>) -> Self {
        match enrichment {
            Enrichment::Structured(fields) => fields,
            Enrichment::Fallback(raw) => SummaryFields {
                persona_summary: raw,
                unique_value: String::new(),
                recommendations: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_falls_back_to_summary() {
        let raw = "You are a seasoned engineer with a knack for systems.";
        let parsed = Enrichment::<SummaryFields>::parse(raw);
        assert_eq!(parsed.source(), EnrichmentSource::Fallback);

        let fields = SummaryFields::from(parsed);
        assert_eq!(fields.persona_summary, raw);
        assert_eq!(fields.unique_value, "");
        assert!(fields.recommendations.is_empty());
    }

    #[test]
    fn test_json_inside_prose_is_extracted() {
        let raw = r#"Sure! Here it is:
{"personaSummary": "Builds things.", "uniqueValue": "Ships.", "recommendations": ["Blog", "Talk"]}
Hope this helps."#;
        let fields = SummaryFields::from(Enrichment::<SummaryFields>::parse(raw));
        assert_eq!(fields.persona_summary, "Builds things.");
        assert_eq!(fields.unique_value, "Ships.");
        assert_eq!(fields.recommendations, vec!["Blog", "Talk"]);
    }

    #[test]
    fn test_fenced_json_is_structured() {
        let raw = "```json\n{\"personaSummary\": \"A\"}\n```";
        let parsed = Enrichment::<SummaryFields>::parse(raw);
        assert_eq!(parsed.source(), EnrichmentSource::Structured);
        let fields = SummaryFields::from(parsed);
        assert_eq!(fields.persona_summary, "A");
        assert!(fields.recommendations.is_empty());
    }

    #[test]
    fn test_malformed_json_falls_back_to_raw() {
        let raw = "{\"personaSummary\": \"unterminated}";
        let parsed = Enrichment::<SummaryFields>::parse(raw);
        assert_eq!(parsed, Enrichment::Fallback(raw.to_string()));
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let raw = "{\"personaSummary\": {\"text\": \"nested\"}}";
        assert_eq!(
            Enrichment::<SummaryFields>::parse(raw).source(),
            EnrichmentSource::Fallback
        );
    }

    #[test]
    fn test_list_sent_as_string_is_split() {
        let raw = r#"{"personaSummary": "Builds.", "recommendations": "Blog, Talk; "}"#;
        let parsed = Enrichment::<SummaryFields>::parse(raw);
        assert_eq!(parsed.source(), EnrichmentSource::Structured);
        let fields = SummaryFields::from(parsed);
        assert_eq!(fields.persona_summary, "Builds.");
        assert_eq!(fields.recommendations, vec!["Blog", "Talk"]);
    }

    #[test]
    fn test_list_of_unexpected_type_reads_as_empty() {
        let raw = r#"{"personaSummary": "Builds.", "recommendations": {"first": "Blog"}}"#;
        let fields = SummaryFields::from(Enrichment::<SummaryFields>::parse(raw));
        assert_eq!(fields.persona_summary, "Builds.");
        assert!(fields.recommendations.is_empty());
    }
}
