//! Schema loader.
//!
//! Walks the schema document once: `settings` first (wherever it
//! appears), then `types`, then `root`. Named types are recorded
//! without resolving references; generic bodies stay unresolved until
//! application. After parsing, a static pass verifies every reference
//! names a known type with the right arity and that statically
//! resolvable `!embed` targets are map types, so that validation never
//! runs against an ill-formed schema.

use std::collections::{HashMap, HashSet};

use crate::document::Node;

use super::errors::{SchemaError, SchemaResult};
use super::parser::TypeParser;
use super::settings::Settings;
use super::types::{NamedType, Schema, StructEntry, TypeExpr, TypeKind};

/// Loads and statically checks a schema document.
pub fn load(node: &Node) -> SchemaResult<Schema> {
    let entries = node.as_mapping().ok_or(SchemaError::NotAMap)?;

    for (key, _) in entries {
        let key_text = key.render();
        if !matches!(key_text.as_str(), "settings" | "types" | "root") {
            return Err(SchemaError::UnknownKey(key_text));
        }
    }

    let settings = match top_level(entries, "settings") {
        Some(settings_node) => Settings::from_node(settings_node)?,
        None => Settings::default(),
    };
    let parser = TypeParser::new(&settings);

    // Parse the registry in declaration order so that duplicate
    // detection and the static checks below are deterministic.
    let mut order: Vec<String> = Vec::new();
    let mut types: HashMap<String, NamedType> = HashMap::new();
    if let Some(types_node) = top_level(entries, "types") {
        let type_entries = types_node.as_mapping().ok_or(SchemaError::TypesNotAMap)?;
        for (key, body) in type_entries {
            let (name, params) = parser.parse_type_name(&key.render())?;
            if types.contains_key(&name) {
                return Err(SchemaError::DuplicateType(name));
            }
            let body = parser.parse(body, &params)?;
            order.push(name.clone());
            types.insert(name, NamedType { params, body });
        }
    }

    let root_node = top_level(entries, "root").ok_or(SchemaError::MissingRoot)?;
    let root = parser.parse(root_node, &[])?;

    for name in &order {
        check_expr(&types[name].body, &types)?;
    }
    check_expr(&root, &types)?;

    Ok(Schema {
        settings,
        types,
        root,
    })
}

fn top_level<'a>(entries: &'a [(Node, Node)], name: &str) -> Option<&'a Node> {
    entries
        .iter()
        .find(|(key, _)| key.render() == name)
        .map(|(_, value)| value)
}

/// Verifies references, arities and embed targets throughout an
/// expression. Generic parameters are validated by the parser (an
/// out-of-scope name parses as a reference and fails here instead).
fn check_expr(expr: &TypeExpr, types: &HashMap<String, NamedType>) -> SchemaResult<()> {
    match &expr.kind {
        TypeKind::Builtin(_) | TypeKind::Param(_) | TypeKind::Literal(_) => Ok(()),
        TypeKind::Ref { name, args } => {
            let named = types
                .get(name)
                .ok_or_else(|| SchemaError::UndefinedReference(name.clone()))?;
            if named.params.len() != args.len() {
                return Err(SchemaError::BadArity {
                    name: name.clone(),
                    expected: named.params.len(),
                    found: args.len(),
                });
            }
            args.iter().try_for_each(|arg| check_expr(arg, types))
        }
        TypeKind::List(elem) => check_expr(elem, types),
        TypeKind::Variant { alts, .. } => alts.iter().try_for_each(|alt| check_expr(alt, types)),
        TypeKind::Struct(st) => {
            let mut fields = HashSet::new();
            collect_field_names(expr, types, &mut fields, &mut HashSet::new())?;
            for entry in &st.entries {
                match entry {
                    StructEntry::Field { spec, .. } => check_expr(&spec.ty, types)?,
                    StructEntry::KeyType(spec) => {
                        check_expr(&spec.key_type, types)?;
                        check_expr(&spec.value_type, types)?;
                    }
                    StructEntry::Embed(target) => {
                        check_expr(target, types)?;
                        check_embed_target(target, types, &mut HashSet::new())?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// An embed target must resolve to a map type. Generic applications and
/// bare parameters cannot be decided statically; they are re-checked
/// when the embed is spliced during validation.
fn check_embed_target(
    expr: &TypeExpr,
    types: &HashMap<String, NamedType>,
    visited: &mut HashSet<String>,
) -> SchemaResult<()> {
    match &expr.kind {
        TypeKind::Struct(_) | TypeKind::Param(_) => Ok(()),
        TypeKind::Ref { name, args } => {
            if !args.is_empty() || !visited.insert(name.clone()) {
                return Ok(());
            }
            match types.get(name) {
                Some(named) => check_embed_target(&named.body, types, visited),
                None => Err(SchemaError::UndefinedReference(name.clone())),
            }
        }
        _ => Err(SchemaError::EmbedNotMap(expr.display.clone())),
    }
}

/// Collects the literal field names a struct exposes, following
/// statically resolvable embeds, and faults on a name declared twice.
fn collect_field_names(
    expr: &TypeExpr,
    types: &HashMap<String, NamedType>,
    fields: &mut HashSet<String>,
    visited: &mut HashSet<String>,
) -> SchemaResult<()> {
    match &expr.kind {
        TypeKind::Struct(st) => {
            for entry in &st.entries {
                match entry {
                    StructEntry::Field { name, .. } => {
                        if !fields.insert(name.clone()) {
                            return Err(SchemaError::DuplicateField(name.clone()));
                        }
                    }
                    StructEntry::Embed(target) => {
                        collect_field_names(target, types, fields, visited)?
                    }
                    StructEntry::KeyType(_) => {}
                }
            }
            Ok(())
        }
        TypeKind::Ref { name, args } if args.is_empty() => {
            if !visited.insert(name.clone()) {
                return Ok(());
            }
            match types.get(name) {
                Some(named) => collect_field_names(&named.body, types, fields, visited),
                None => Ok(()), // reported by check_expr
            }
        }
        _ => Ok(()),
    }
}
