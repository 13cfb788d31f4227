//! Schema validation helpers for Fyodor JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Fields that must be present at the top level.
const REQUIRED_KEYS: &[&str] = &["g_credentials_path", "discord_bot_token"];

/// Validate a config document against the schema.
pub(super) fn validate_config_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    let allowed = [
        "$schema",
        "g_credentials_path",
        "discord_bot_token",
        "channel_ids",
        "ignored_user_ids",
        "violation_reaction_emoji",
        "enforce_ignored_users",
        "store",
    ];
    ensure_allowed_keys(map, &allowed, layer, "")?;

    for key in REQUIRED_KEYS {
        if !map.contains_key(*key) {
            return Err(ConfigError::MissingField {
                path: layer.to_string(),
                field: (*key).to_string(),
            });
        }
    }

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("g_credentials_path") {
        expect_string(value, layer, "g_credentials_path")?;
    }
    if let Some(value) = map.get("discord_bot_token") {
        expect_string(value, layer, "discord_bot_token")?;
    }
    if let Some(value) = map.get("channel_ids") {
        validate_snowflake_array(value, layer, "channel_ids")?;
    }
    if let Some(value) = map.get("ignored_user_ids") {
        validate_snowflake_array(value, layer, "ignored_user_ids")?;
    }
    if let Some(value) = map.get("violation_reaction_emoji") {
        expect_string(value, layer, "violation_reaction_emoji")?;
    }
    if let Some(value) = map.get("enforce_ignored_users") {
        expect_bool(value, layer, "enforce_ignored_users")?;
    }
    if let Some(value) = map.get("store") {
        validate_store(value, layer, "store")?;
    }

    Ok(())
}

/// Validate the "store" block.
fn validate_store(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["path"], layer, path)?;
    if let Some(value) = map.get("path") {
        expect_string(value, layer, &join_path(path, "path"))?;
    }
    Ok(())
}

/// Validate an array of platform ids, given as integers or decimal strings.
fn validate_snowflake_array(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let arr = match value {
        Value::Array(arr) => arr,
        _ => return Err(invalid_field(layer, path, "expected array")),
    };
    for (idx, entry) in arr.iter().enumerate() {
        let valid = match entry {
            Value::Number(number) => number.is_u64(),
            Value::String(text) => !text.is_empty() && text.parse::<u64>().is_ok(),
            _ => false,
        };
        if !valid {
            return Err(invalid_field(
                layer,
                &format!("{path}[{idx}]"),
                "expected id (non-negative integer or decimal string)",
            ));
        }
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if matches!(value, Value::Bool(_)) {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
