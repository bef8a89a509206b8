use serde_json::{Map, Value};

use crate::core::errors::ChainError;

pub fn validate_config(config: &Value) -> Result<(), ChainError> {
    let root = config
        .as_object()
        .ok_or_else(|| config_type_error("root", "object"))?;

    if let Some(vectara) = expect_optional_object(root, "vectara")? {
        validate_optional_string_field(vectara, "vectara.endpoint", "endpoint")?;
        validate_string_or_integer_field(vectara, "vectara.customer_id", "customer_id")?;
        validate_optional_string_field(vectara, "vectara.api_key", "api_key")?;
        validate_u64_array_field(
            vectara,
            "vectara.corpus_ids",
            "corpus_ids",
            u64::from(u32::MAX),
        )?;
        validate_u64_field(vectara, "vectara.k", "k", 1, 1_000)?;

        if let Some(filter) = expect_optional_object(vectara, "filter")? {
            validate_optional_string_field(filter, "vectara.filter.filter", "filter")?;
            validate_f64_field(filter, "vectara.filter.lambda", "lambda", 0.0, 1.0)?;
            if let Some(context) = expect_optional_object(filter, "context_config")? {
                validate_u64_field(
                    context,
                    "vectara.filter.context_config.sentences_before",
                    "sentences_before",
                    0,
                    100,
                )?;
                validate_u64_field(
                    context,
                    "vectara.filter.context_config.sentences_after",
                    "sentences_after",
                    0,
                    100,
                )?;
            }
        }

        if let Some(summarizer) = expect_optional_object(vectara, "summarizer")? {
            validate_non_empty_string_field(
                summarizer,
                "vectara.summarizer.prompt_name",
                "prompt_name",
            )?;
            validate_non_empty_string_field(
                summarizer,
                "vectara.summarizer.response_lang",
                "response_lang",
            )?;
            validate_u64_field(
                summarizer,
                "vectara.summarizer.max_summarized_results",
                "max_summarized_results",
                1,
                100,
            )?;
        }
    }

    if let Some(logging) = expect_optional_object(root, "logging")? {
        validate_optional_string_field(logging, "logging.level", "level")?;
    }

    Ok(())
}

fn expect_optional_object<'a>(
    root: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, ChainError> {
    match root.get(key) {
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(config_type_error(key, "object")),
    }
}

fn validate_u64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min: u64,
    max: u64,
) -> Result<(), ChainError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    if value.is_null() {
        return Ok(());
    }
    let Some(number) = value.as_u64() else {
        return Err(config_type_error(path, "integer"));
    };
    if number < min || number > max {
        return Err(ChainError::Config(format!(
            "Invalid config at '{}': must be between {} and {}",
            path, min, max
        )));
    }
    Ok(())
}

fn validate_f64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min: f64,
    max: f64,
) -> Result<(), ChainError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    if value.is_null() {
        return Ok(());
    }
    let Some(number) = value.as_f64() else {
        return Err(config_type_error(path, "number"));
    };
    if number < min || number > max {
        return Err(ChainError::Config(format!(
            "Invalid config at '{}': must be between {} and {}",
            path, min, max
        )));
    }
    Ok(())
}

fn validate_non_empty_string_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), ChainError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(text) = value.as_str() else {
        return Err(config_type_error(path, "string"));
    };
    if text.trim().is_empty() {
        return Err(ChainError::Config(format!(
            "Invalid config at '{}': value cannot be empty",
            path
        )));
    }
    Ok(())
}

fn validate_optional_string_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), ChainError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    if value.as_str().is_none() {
        return Err(config_type_error(path, "string"));
    }
    Ok(())
}

fn validate_string_or_integer_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), ChainError> {
    match section.get(key) {
        None | Some(Value::String(_)) => Ok(()),
        Some(value) if value.as_u64().is_some() => Ok(()),
        Some(_) => Err(config_type_error(path, "string or integer")),
    }
}

fn validate_u64_array_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    max: u64,
) -> Result<(), ChainError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(items) = value.as_array() else {
        return Err(config_type_error(path, "array of integers"));
    };
    for (index, item) in items.iter().enumerate() {
        let Some(number) = item.as_u64() else {
            return Err(config_type_error(&format!("{}[{}]", path, index), "integer"));
        };
        if number > max {
            return Err(ChainError::Config(format!(
                "Invalid config at '{}[{}]': must be at most {}",
                path, index, max
            )));
        }
    }
    Ok(())
}

fn config_type_error(path: &str, expected: &str) -> ChainError {
    ChainError::Config(format!(
        "Invalid config at '{}': expected {}",
        path, expected
    ))
}
