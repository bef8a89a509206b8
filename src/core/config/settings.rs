use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::defaults::{DEFAULT_ENDPOINT, DEFAULT_LOG_LEVEL};
use crate::core::errors::ChainError;
use crate::store::VectaraFilter;
use crate::vectara::SummarizerConfig;

/// Typed view of the `vectara` config section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VectaraSettings {
    pub endpoint: String,
    #[serde(deserialize_with = "string_or_integer")]
    pub customer_id: String,
    pub corpus_ids: Vec<u32>,
    pub api_key: String,
    pub k: Option<u32>,
    pub filter: Option<VectaraFilter>,
    pub summarizer: SummarizerConfig,
}

impl Default for VectaraSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            customer_id: String::new(),
            corpus_ids: Vec::new(),
            api_key: String::new(),
            k: None,
            filter: None,
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl VectaraSettings {
    pub fn from_config(config: &Value) -> Result<Self, ChainError> {
        match config.get("vectara") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(section) => serde_json::from_value(section.clone())
                .map_err(|err| ChainError::Config(format!("vectara: {}", err))),
        }
    }
}

/// YAML reads an unquoted `customer_id: 1234567890` as a number.
fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

pub fn log_level(config: &Value) -> String {
    config
        .get("logging")
        .and_then(|v| v.get("level"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContextWindow;
    use serde_json::json;

    #[test]
    fn missing_section_yields_defaults() {
        let settings = VectaraSettings::from_config(&json!({})).expect("settings");

        assert_eq!(settings, VectaraSettings::default());
        assert_eq!(settings.endpoint, "https://api.vectara.io");
        assert_eq!(
            settings.summarizer.prompt_name,
            "vectara-experimental-summary-ext-2023-10-23-med"
        );
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = json!({
            "vectara": {
                "customer_id": "42",
                "corpus_ids": [5],
                "filter": { "context_config": { "sentences_after": 4 } },
                "summarizer": { "response_lang": "ja" }
            }
        });

        let settings = VectaraSettings::from_config(&config).expect("settings");

        assert_eq!(settings.customer_id, "42");
        assert_eq!(settings.corpus_ids, vec![5]);
        assert_eq!(settings.k, None);
        assert_eq!(
            settings.filter.and_then(|f| f.context_config),
            Some(ContextWindow {
                sentences_before: None,
                sentences_after: Some(4),
            })
        );
        assert_eq!(settings.summarizer.response_lang, "ja");
        assert_eq!(settings.summarizer.max_summarized_results, 5);
    }

    #[test]
    fn unquoted_customer_id_becomes_string() {
        let config: Value =
            serde_yaml::from_str("vectara:\n  customer_id: 1234567890\n  corpus_ids: [1]\n")
                .expect("yaml");

        let settings = VectaraSettings::from_config(&config).expect("settings");

        assert_eq!(settings.customer_id, "1234567890");
    }

    #[test]
    fn null_lambda_leaves_lambda_unset() {
        let config = json!({ "vectara": { "filter": { "lambda": null } } });

        let settings = VectaraSettings::from_config(&config).expect("settings");

        assert_eq!(settings.filter.and_then(|f| f.lambda), None);
    }

    #[test]
    fn log_level_falls_back_to_info() {
        assert_eq!(log_level(&json!({})), "info");
        assert_eq!(log_level(&json!({ "logging": { "level": "debug" } })), "debug");
    }
}
