//! Schema settings.
//!
//! The optional top-level `settings` map tunes the schema surface: field
//! requiredness default, data-key attributes, tag names and the generic
//! application syntax. Unknown keys are a load error; see SCHEMA.md for
//! the full list.

use crate::document::Node;

use super::errors::{SchemaError, SchemaResult};

/// Parsed schema settings with their defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Fields without an explicit tag are required when true.
    pub default_required: bool,
    /// Strip `attribute_separator`-suffixed segments from data keys.
    pub ignore_attributes: bool,
    /// Tag names, stored without the leading `!`.
    pub optional_tag: String,
    pub required_tag: String,
    pub embed_tag: String,
    pub variant_tag: String,
    /// Generic application syntax: `name<arg;arg>` by default.
    pub generic_open: String,
    pub generic_close: String,
    pub generic_separator: String,
    /// Separator between a data key and its attributes.
    pub attribute_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_required: true,
            ignore_attributes: false,
            optional_tag: "optional".into(),
            required_tag: "required".into(),
            embed_tag: "embed".into(),
            variant_tag: "variant".into(),
            generic_open: "<".into(),
            generic_close: ">".into(),
            generic_separator: ";".into(),
            attribute_separator: ":".into(),
        }
    }
}

impl Settings {
    /// Parses a `settings` node. The node must be a map with recognized
    /// keys only.
    pub fn from_node(node: &Node) -> SchemaResult<Self> {
        let entries = node.as_mapping().ok_or(SchemaError::SettingsNotAMap)?;
        let mut settings = Settings::default();

        for (key, value) in entries {
            let key_text = key.render();
            match key_text.as_str() {
                "default_required" => settings.default_required = bool_value(&key_text, value)?,
                "ignore_attributes" => settings.ignore_attributes = bool_value(&key_text, value)?,
                "optional_tag" => settings.optional_tag = tag_value(&key_text, value)?,
                "required_tag" => settings.required_tag = tag_value(&key_text, value)?,
                "embed_tag" => settings.embed_tag = tag_value(&key_text, value)?,
                "variant_tag" => settings.variant_tag = tag_value(&key_text, value)?,
                "generic_brackets" => {
                    let (open, close) = bracket_pair(&key_text, value)?;
                    settings.generic_open = open;
                    settings.generic_close = close;
                }
                "generic_separator" => settings.generic_separator = string_value(&key_text, value)?,
                "attribute_separator" => {
                    settings.attribute_separator = string_value(&key_text, value)?
                }
                other => return Err(SchemaError::UnknownSetting(other.to_string())),
            }
        }

        Ok(settings)
    }
}

fn bool_value(key: &str, node: &Node) -> SchemaResult<bool> {
    match node.as_scalar().map(|s| s.text.as_str()) {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(SchemaError::InvalidSetting {
            key: key.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

fn string_value(key: &str, node: &Node) -> SchemaResult<String> {
    let scalar = node.as_scalar().ok_or_else(|| SchemaError::InvalidSetting {
        key: key.to_string(),
        reason: "expected a scalar".into(),
    })?;
    if scalar.text.is_empty() {
        return Err(SchemaError::InvalidSetting {
            key: key.to_string(),
            reason: "expected a non-empty scalar".into(),
        });
    }
    Ok(scalar.text.clone())
}

/// Tag settings may be written with or without the leading `!`.
fn tag_value(key: &str, node: &Node) -> SchemaResult<String> {
    Ok(string_value(key, node)?
        .trim_start_matches('!')
        .to_string())
}

fn bracket_pair(key: &str, node: &Node) -> SchemaResult<(String, String)> {
    let items = node.as_sequence().ok_or_else(|| SchemaError::InvalidSetting {
        key: key.to_string(),
        reason: "expected a pair of scalars".into(),
    })?;
    match items {
        [open, close] => Ok((string_value(key, open)?, string_value(key, close)?)),
        _ => Err(SchemaError::InvalidSetting {
            key: key.to_string(),
            reason: "expected exactly two brackets".into(),
        }),
    }
}
