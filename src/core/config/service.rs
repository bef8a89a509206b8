use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::paths::AppPaths;
use super::validation::validate_config;
use crate::core::errors::ChainError;

const REDACT_PLACEHOLDER: &str = "****";

/// Config entries kept in the secrets file and masked when displayed.
const SECRET_KEYS: &[&[&str]] = &[&["vectara", "api_key"]];

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    /// `VECTARA_CHAIN_CONFIG_PATH`, else the user config if present, else the
    /// project config.
    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("VECTARA_CHAIN_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            user_config
        } else {
            self.paths.project_root.join("config.yml")
        }
    }

    pub fn config_write_path(&self) -> PathBuf {
        env::var("VECTARA_CHAIN_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.paths.user_data_dir.join("config.yml"))
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.paths.secrets_path.clone()
    }

    /// Public config overlaid with the secrets file, then validated.
    pub fn load_config(&self) -> Result<Value, ChainError> {
        let mut config = read_yaml(&self.config_path());
        merge_into(&mut config, read_yaml(&self.secrets_path()));
        validate_config(&config)?;
        Ok(config)
    }

    /// Save `update` (overlaid on the current config when `merge` is set),
    /// writing secret entries to the secrets file only.
    pub fn update_config(&self, update: Value, merge: bool) -> Result<(), ChainError> {
        let config = if merge {
            let mut current = self.load_config()?;
            merge_into(&mut current, update);
            current
        } else {
            update
        };
        validate_config(&config)?;

        let (public, secrets) = split_secrets(&config);
        write_yaml(&self.config_write_path(), &public)?;
        write_yaml(&self.secrets_path(), &secrets)?;

        tracing::info!("Config saved to {}", self.config_write_path().display());
        Ok(())
    }

    /// Copy of `config` with every set secret replaced by a placeholder.
    pub fn redact_secrets(&self, config: &Value) -> Value {
        let mut redacted = config.clone();
        for path in SECRET_KEYS {
            if let Some(slot) = lookup_mut(&mut redacted, path) {
                if !slot.is_null() {
                    *slot = Value::String(REDACT_PLACEHOLDER.to_string());
                }
            }
        }
        redacted
    }
}

fn read_yaml(path: &Path) -> Value {
    let Ok(contents) = fs::read_to_string(path) else {
        return Value::Object(Map::new());
    };

    match serde_yaml::from_str::<Value>(&contents) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => Value::Object(Map::new()),
        Err(err) => {
            tracing::warn!("Ignoring unparsable config {}: {}", path.display(), err);
            Value::Object(Map::new())
        }
    }
}

fn write_yaml(path: &Path, value: &Value) -> Result<(), ChainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(ChainError::internal)?;
    }
    let yaml = serde_yaml::to_string(value).map_err(ChainError::internal)?;
    fs::write(path, yaml).map_err(ChainError::internal)
}

/// Overlay `overlay` onto `target`: objects merge key by key, anything else
/// replaces.
fn merge_into(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn lookup_mut<'a>(config: &'a mut Value, path: &[&str]) -> Option<&'a mut Value> {
    path.iter().try_fold(config, |node, key| node.get_mut(*key))
}

/// Split `config` into (public, secrets) along [`SECRET_KEYS`].
fn split_secrets(config: &Value) -> (Value, Value) {
    let mut public = config.clone();
    let mut secrets = Value::Object(Map::new());

    for path in SECRET_KEYS {
        let Some((last, parents)) = path.split_last() else {
            continue;
        };
        let taken = lookup_mut(&mut public, parents)
            .and_then(Value::as_object_mut)
            .and_then(|section| section.remove(*last));
        if let Some(value) = taken.filter(|value| !value.is_null()) {
            let nested = path.iter().rev().fold(value, |inner, key| {
                Value::Object(Map::from_iter([(key.to_string(), inner)]))
            });
            merge_into(&mut secrets, nested);
        }
    }

    (public, secrets)
}
