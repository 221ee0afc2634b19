//! Type expression parser.
//!
//! Schema nodes become type expressions here. Scalar nodes are parsed as
//! type references (builtin aliases, generic applications, named
//! references); sequences become lists or type variants depending on
//! length; maps become structs. Tag dispatch (`!variant`, `!embed`,
//! `!optional`, `!required`) uses the names configured in `settings`.

use std::collections::HashSet;

use crate::document::{Body, Node};

use super::errors::{SchemaError, SchemaResult};
use super::settings::Settings;
use super::types::{Builtin, FieldSpec, KeyTypeSpec, StructEntry, TypeExpr};

pub struct TypeParser<'a> {
    settings: &'a Settings,
}

impl<'a> TypeParser<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Parses a schema node into a type expression. `scope` holds the
    /// generic parameter names visible in the enclosing named type.
    pub fn parse(&self, node: &Node, scope: &[String]) -> SchemaResult<TypeExpr> {
        if let Some(tag) = node.tag() {
            if tag == self.settings.variant_tag {
                return self.parse_value_variant(node);
            }
            if tag == self.settings.embed_tag {
                return Err(SchemaError::EmbedOutsideMap(node.render()));
            }
            // Requiredness tags are consumed by the field parser; any
            // other tag belongs to the host document format and is not
            // a type constructor.
            return self.parse(&node.untagged(), scope);
        }

        match node.body() {
            Body::Null => Err(SchemaError::MalformedType(node.render())),
            Body::Scalar(scalar) => self.parse_reference(&scalar.text, scope),
            Body::Sequence(items) => match items.as_slice() {
                [] => Ok(TypeExpr::builtin(Builtin::AnyList, node.render())),
                [elem] => Ok(TypeExpr::list(self.parse(elem, scope)?, node.render())),
                items => {
                    let alts = items
                        .iter()
                        .map(|item| self.parse(item, scope))
                        .collect::<SchemaResult<Vec<_>>>()?;
                    Ok(TypeExpr::variant(alts, false, node.render()))
                }
            },
            Body::Mapping(entries) => self.parse_struct(node, entries, scope),
        }
    }

    /// Parses a scalar type reference: a builtin alias, a generic
    /// parameter in scope, a generic application or a plain name.
    pub fn parse_reference(&self, text: &str, scope: &[String]) -> SchemaResult<TypeExpr> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SchemaError::MalformedType(text.to_string()));
        }
        if let Some(builtin) = Builtin::from_alias(text) {
            return Ok(TypeExpr::builtin(builtin, text));
        }
        if scope.iter().any(|p| p == text) {
            return Ok(TypeExpr::param(text));
        }

        let open = &self.settings.generic_open;
        let close = &self.settings.generic_close;
        if let Some(pos) = text.find(open.as_str()) {
            let name = text[..pos].trim();
            let tail = &text[pos + open.len()..];
            if name.is_empty() || !tail.ends_with(close.as_str()) {
                return Err(SchemaError::MalformedType(text.to_string()));
            }
            let inner = &tail[..tail.len() - close.len()];
            let args = self
                .split_arguments(inner, text)?
                .into_iter()
                .map(|arg| self.parse_reference(arg, scope))
                .collect::<SchemaResult<Vec<_>>>()?;
            return Ok(TypeExpr::reference(name, args, text));
        }

        Ok(TypeExpr::reference(text, Vec::new(), text))
    }

    /// Parses a `types:` key of the form `name` or `name<P1;P2>`.
    pub fn parse_type_name(&self, text: &str) -> SchemaResult<(String, Vec<String>)> {
        let text = text.trim();
        let open = &self.settings.generic_open;
        let close = &self.settings.generic_close;

        let Some(pos) = text.find(open.as_str()) else {
            if text.is_empty() {
                return Err(SchemaError::MalformedType(text.to_string()));
            }
            return Ok((text.to_string(), Vec::new()));
        };

        let name = text[..pos].trim();
        let tail = &text[pos + open.len()..];
        if name.is_empty() || !tail.ends_with(close.as_str()) {
            return Err(SchemaError::MalformedType(text.to_string()));
        }
        let inner = &tail[..tail.len() - close.len()];

        let mut params = Vec::new();
        for part in self.split_arguments(inner, text)? {
            let param = part.trim();
            if param.is_empty() || param.contains(open.as_str()) {
                return Err(SchemaError::MalformedType(text.to_string()));
            }
            if params.iter().any(|p| p == param) {
                return Err(SchemaError::DuplicateParam {
                    ty: name.to_string(),
                    param: param.to_string(),
                });
            }
            params.push(param.to_string());
        }
        Ok((name.to_string(), params))
    }

    fn parse_value_variant(&self, node: &Node) -> SchemaResult<TypeExpr> {
        let inner = node.untagged();
        let items = inner
            .as_sequence()
            .ok_or_else(|| SchemaError::VariantNotASequence(node.render()))?;
        let alts = items
            .iter()
            .map(|item| TypeExpr::literal(item.clone()))
            .collect();
        Ok(TypeExpr::variant(alts, true, inner.render()))
    }

    fn parse_struct(
        &self,
        node: &Node,
        entries: &[(Node, Node)],
        scope: &[String],
    ) -> SchemaResult<TypeExpr> {
        let mut parsed = Vec::with_capacity(entries.len());
        let mut seen = HashSet::new();

        for (key, value) in entries {
            let key_text = key.render();

            if value.tag() == Some(self.settings.embed_tag.as_str()) {
                // The placeholder key (`_` by convention) only shows up
                // in the struct's rendering.
                parsed.push(StructEntry::Embed(self.parse(&value.untagged(), scope)?));
                continue;
            }

            if let Some(key_type_text) = key_text.strip_prefix('$') {
                let (required, inner) = self.strip_requiredness(value);
                parsed.push(StructEntry::KeyType(KeyTypeSpec {
                    key_type: self.parse_reference(key_type_text, scope)?,
                    value_type: self.parse(&inner, scope)?,
                    required,
                }));
                continue;
            }

            if !seen.insert(key_text.clone()) {
                return Err(SchemaError::DuplicateField(key_text));
            }
            let (required, inner) = self.strip_requiredness(value);
            parsed.push(StructEntry::Field {
                name: key_text,
                spec: FieldSpec {
                    ty: self.parse(&inner, scope)?,
                    required,
                },
            });
        }

        Ok(TypeExpr::structure(parsed, node.render()))
    }

    fn strip_requiredness(&self, node: &Node) -> (bool, Node) {
        match node.tag() {
            Some(tag) if tag == self.settings.optional_tag => (false, node.untagged()),
            Some(tag) if tag == self.settings.required_tag => (true, node.untagged()),
            _ => (self.settings.default_required, node.clone()),
        }
    }

    /// Splits a generic argument list at bracket depth zero.
    fn split_arguments<'t>(&self, inner: &'t str, whole: &str) -> SchemaResult<Vec<&'t str>> {
        let open = self.settings.generic_open.as_str();
        let close = self.settings.generic_close.as_str();
        let separator = self.settings.generic_separator.as_str();

        let mut parts = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        let mut i = 0usize;
        while i < inner.len() {
            let rest = &inner[i..];
            if rest.starts_with(open) {
                depth += 1;
                i += open.len();
            } else if rest.starts_with(close) {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SchemaError::MalformedType(whole.to_string()))?;
                i += close.len();
            } else if depth == 0 && rest.starts_with(separator) {
                parts.push(&inner[start..i]);
                i += separator.len();
                start = i;
            } else {
                i += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        if depth != 0 {
            return Err(SchemaError::MalformedType(whole.to_string()));
        }
        parts.push(&inner[start..]);
        Ok(parts)
    }
}
