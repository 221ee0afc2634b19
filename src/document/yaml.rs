//! YAML adapter: turns `serde_yaml` values into the document tree.
//!
//! The engine stays parser-agnostic; this is the one place that knows
//! about the YAML stack. Tags survive via `serde_yaml::Value::Tagged`,
//! plain-scalar resolution (bool/int/float) is the parser's, and mapping
//! order is preserved.

use thiserror::Error;

use super::node::{Node, Scalar};

/// Document parse failure.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parses a YAML string into a document tree. Empty input is a null
/// document.
pub fn from_yaml_str(input: &str) -> Result<Node, DocumentError> {
    if input.trim().is_empty() {
        return Ok(Node::null());
    }
    let value: serde_yaml::Value = serde_yaml::from_str(input)?;
    Ok(from_yaml_value(&value))
}

/// Converts an already-parsed YAML value.
pub fn from_yaml_value(value: &serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::null(),
        serde_yaml::Value::Bool(b) => Node::scalar(Scalar::bool(*b)),
        serde_yaml::Value::Number(n) => Node::scalar(number_scalar(n)),
        serde_yaml::Value::String(s) => Node::scalar(Scalar::string(s.clone())),
        serde_yaml::Value::Sequence(items) => {
            Node::sequence(items.iter().map(from_yaml_value).collect())
        }
        serde_yaml::Value::Mapping(entries) => Node::mapping(
            entries
                .iter()
                .map(|(k, v)| (from_yaml_value(k), from_yaml_value(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => {
            from_yaml_value(&tagged.value).with_tag(tagged.tag.to_string())
        }
    }
}

fn number_scalar(n: &serde_yaml::Number) -> Scalar {
    if n.is_i64() || n.is_u64() {
        Scalar::int(n.to_string())
    } else {
        Scalar::float(n.as_f64().unwrap_or(f64::NAN))
    }
}
