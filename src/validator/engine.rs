//! Validator core.
//!
//! Recursive descent over (data node, type expression, substitution
//! environment). The matching rules are described in SCHEMA.md; the
//! engine itself is purely functional over the input tree: no I/O, no
//! mutation, deterministic error order (fields first, then key-type
//! checks, then undefined keys in document order).
//!
//! Error display names follow the surface form of the schema. A shape
//! mismatch (sequence expected, map expected, variant exhausted) renders
//! the *context* type — the one entered at the nearest root, named
//! reference or variant alternative. Builtin mismatches always render
//! the builtin's own alias. Field and element descent does not change
//! the context.

use std::collections::HashMap;

use crate::document::{Node, Scalar, ScalarKind};
use crate::schema::{
    load, Builtin, FieldSpec, KeyTypeSpec, Schema, SchemaError, Settings, StructEntry, StructType,
    TypeExpr, TypeKind,
};

use super::errors::Error;

/// Generic parameters resolved at the current application site. Bound
/// expressions are already substituted: no `Param` survives inside.
type Env = HashMap<String, TypeExpr>;

const DEFAULT_MAX_DEPTH: usize = 256;

/// A compiled schema ready to validate documents.
///
/// Construction performs the full schema load and its static checks;
/// validation never mutates, so a `Validator` can be shared freely
/// between readers.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    max_depth: usize,
}

impl Validator {
    /// Loads a schema document. All load errors surface here.
    pub fn new(schema_doc: &Node) -> Result<Self, SchemaError> {
        Ok(Self {
            schema: load(schema_doc)?,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Overrides the recursion guard (default 256 levels). Exceeding it
    /// reports `schema too deep` at the offending path.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.schema.settings
    }

    /// Validates a document against the schema root. The returned list
    /// is empty when the document conforms.
    pub fn validate(&self, doc: &Node) -> Vec<Error> {
        let ctx = context_name(&self.schema.root);
        self.match_type(doc, &self.schema.root, &Env::new(), "/", &ctx, 0)
    }

    fn match_type(
        &self,
        node: &Node,
        ty: &TypeExpr,
        env: &Env,
        path: &str,
        ctx: &str,
        depth: usize,
    ) -> Vec<Error> {
        if depth > self.max_depth {
            return vec![Error::new(path, "schema too deep")];
        }
        match &ty.kind {
            TypeKind::Builtin(builtin) => {
                if probe(node, *builtin) {
                    Vec::new()
                } else {
                    vec![Error::new(
                        path,
                        format!("expected value type: {}", ty.display),
                    )]
                }
            }
            TypeKind::Param(name) => match env.get(name) {
                Some(bound) => self.match_type(node, bound, env, path, ctx, depth + 1),
                // Unreachable after the static load checks.
                None => vec![Error::new(
                    path,
                    format!("unresolved type parameter: {}", name),
                )],
            },
            TypeKind::Ref { name, args } => {
                let Some(named) = self.schema.named(name) else {
                    // Unreachable after the static load checks.
                    return vec![Error::new(
                        path,
                        format!("undefined type reference: {}", name),
                    )];
                };
                // Arguments are expressions in the caller's environment:
                // substitute them before binding the fresh frame.
                let mut frame = Env::new();
                for (param, arg) in named.params.iter().zip(args) {
                    frame.insert(param.clone(), substitute(arg, env));
                }
                self.match_type(node, &named.body, &frame, path, &ty.display, depth + 1)
            }
            TypeKind::Literal(expected) => {
                if literal_eq(node, expected) {
                    Vec::new()
                } else {
                    vec![Error::new(
                        path,
                        format!("expected value: {}", ty.display),
                    )]
                }
            }
            TypeKind::List(elem) => match node.as_sequence() {
                Some(items) => {
                    let mut errors = Vec::new();
                    for (index, item) in items.iter().enumerate() {
                        errors.extend(self.match_type(
                            item,
                            elem,
                            env,
                            &child_index(path, index),
                            ctx,
                            depth + 1,
                        ));
                    }
                    errors
                }
                None => vec![Error::new(path, format!("expected value type: {}", ctx))],
            },
            TypeKind::Variant { alts, value } => {
                self.match_variant(node, alts, *value, env, path, ctx, depth)
            }
            TypeKind::Struct(st) => self.match_struct(node, st, env, path, ctx, depth),
        }
    }

    fn match_variant(
        &self,
        node: &Node,
        alts: &[TypeExpr],
        value: bool,
        env: &Env,
        path: &str,
        ctx: &str,
        depth: usize,
    ) -> Vec<Error> {
        let mut branches = Vec::with_capacity(alts.len());
        for alt in alts {
            match &alt.kind {
                TypeKind::Literal(expected) => {
                    if literal_eq(node, expected) {
                        return Vec::new();
                    }
                    branches.push(vec![Error::new(
                        path,
                        format!("expected value: {}", alt.display),
                    )]);
                }
                _ => {
                    let errors =
                        self.match_type(node, alt, env, path, &context_name(alt), depth + 1);
                    if errors.is_empty() {
                        return Vec::new();
                    }
                    branches.push(errors);
                }
            }
        }

        if value || alts.iter().all(|alt| matches!(alt.kind, TypeKind::Literal(_))) {
            let mut message = String::from("expected value: one of");
            for alt in alts {
                message.push_str("\n\t- ");
                message.push_str(&alt.display);
            }
            return vec![Error::new(path, message)];
        }

        vec![Error::with_variants(
            path,
            format!("expected value type: {}", ctx),
            branches,
        )]
    }

    fn match_struct(
        &self,
        node: &Node,
        st: &StructType,
        env: &Env,
        path: &str,
        ctx: &str,
        depth: usize,
    ) -> Vec<Error> {
        let mut fields: Vec<(String, FieldSpec, Env)> = Vec::new();
        let mut keyed: Vec<(KeyTypeSpec, Env)> = Vec::new();
        let mut errors = Vec::new();
        self.flatten_struct(st, env, path, depth, &mut fields, &mut keyed, &mut errors);

        let Some(entries) = node.as_mapping() else {
            // A non-map against required fields expands to per-field
            // errors; with nothing required it is a plain type mismatch.
            if fields.iter().any(|(_, spec, _)| spec.required) {
                for (name, spec, _) in &fields {
                    if spec.required {
                        errors.push(Error::new(child_key(path, name), "node not found"));
                    }
                }
            } else {
                errors.push(Error::new(path, format!("expected value type: {}", ctx)));
            }
            return errors;
        };

        let mut keys: Vec<KeyView> = entries
            .iter()
            .map(|(key, value)| KeyView::new(key, value, &self.schema.settings))
            .collect();

        for (name, spec, field_env) in &fields {
            let found = keys
                .iter()
                .position(|key| !key.matched_field && key.text == *name);
            match found {
                Some(index) => {
                    keys[index].matched_field = true;
                    keys[index].consumed = true;
                    let value = keys[index].value;
                    errors.extend(self.match_type(
                        value,
                        &spec.ty,
                        field_env,
                        &child_key(path, name),
                        ctx,
                        depth + 1,
                    ));
                }
                None if spec.required => {
                    errors.push(Error::new(child_key(path, name), "node not found"));
                }
                None => {}
            }
        }

        for (spec, key_env) in &keyed {
            let mut satisfied = false;
            for index in 0..keys.len() {
                if keys[index].matched_field {
                    continue;
                }
                let key_matches = self
                    .match_type(&keys[index].node, &spec.key_type, key_env, path, ctx, depth + 1)
                    .is_empty();
                if !key_matches {
                    continue;
                }
                satisfied = true;
                keys[index].consumed = true;
                let value = keys[index].value;
                let value_path = child_key(path, &keys[index].text);
                errors.extend(self.match_type(
                    value,
                    &spec.value_type,
                    key_env,
                    &value_path,
                    ctx,
                    depth + 1,
                ));
            }
            if !satisfied && spec.required {
                errors.push(Error::new(
                    path,
                    format!(
                        "missing key with type: {}",
                        resolved_display(&spec.key_type, key_env)
                    ),
                ));
            }
        }

        for key in &keys {
            if !key.consumed {
                errors.push(Error::new(child_key(path, &key.text), "undefined node"));
            }
        }

        errors
    }

    /// Splices embedded structs into a flat ordered field/key-type view.
    /// Embedded fields keep the environment of their defining type.
    fn flatten_struct(
        &self,
        st: &StructType,
        env: &Env,
        path: &str,
        depth: usize,
        fields: &mut Vec<(String, FieldSpec, Env)>,
        keyed: &mut Vec<(KeyTypeSpec, Env)>,
        errors: &mut Vec<Error>,
    ) {
        if depth > self.max_depth {
            errors.push(Error::new(path, "schema too deep"));
            return;
        }
        for entry in &st.entries {
            match entry {
                StructEntry::Field { name, spec } => {
                    if fields.iter().any(|(existing, _, _)| existing == name) {
                        errors.push(Error::new(path, format!("duplicate field name: {}", name)));
                        continue;
                    }
                    fields.push((name.clone(), spec.clone(), env.clone()));
                }
                StructEntry::KeyType(spec) => keyed.push((spec.clone(), env.clone())),
                StructEntry::Embed(target) => match self.resolve_struct(target, env, depth) {
                    Ok((embedded, embed_env)) => self.flatten_struct(
                        &embedded, &embed_env, path, depth + 1, fields, keyed, errors,
                    ),
                    Err(message) => errors.push(Error::new(path, message)),
                },
            }
        }
    }

    /// Follows references and parameters until a struct body is found.
    fn resolve_struct(
        &self,
        ty: &TypeExpr,
        env: &Env,
        depth: usize,
    ) -> Result<(StructType, Env), String> {
        if depth > self.max_depth {
            return Err("schema too deep".into());
        }
        match &ty.kind {
            TypeKind::Struct(st) => Ok((st.clone(), env.clone())),
            TypeKind::Param(name) => match env.get(name) {
                Some(bound) => {
                    let bound = bound.clone();
                    self.resolve_struct(&bound, env, depth + 1)
                }
                None => Err(format!("unresolved type parameter: {}", name)),
            },
            TypeKind::Ref { name, args } => {
                let Some(named) = self.schema.named(name) else {
                    return Err(format!("undefined type reference: {}", name));
                };
                let mut frame = Env::new();
                for (param, arg) in named.params.iter().zip(args) {
                    frame.insert(param.clone(), substitute(arg, env));
                }
                self.resolve_struct(&named.body, &frame, depth + 1)
            }
            _ => Err(format!("embedded type is not a map type: {}", ty.display)),
        }
    }
}

/// Data-map key as seen through the attribute settings: the effective
/// text used for matching, paths and undefined-key reports, plus a key
/// node whose scalar category survives attribute stripping.
struct KeyView<'n> {
    text: String,
    node: Node,
    value: &'n Node,
    matched_field: bool,
    consumed: bool,
}

impl<'n> KeyView<'n> {
    fn new(key: &Node, value: &'n Node, settings: &Settings) -> Self {
        if settings.ignore_attributes {
            if let Some(scalar) = key.as_scalar() {
                if scalar.kind == ScalarKind::Str {
                    if let Some((bare, _)) =
                        scalar.text.split_once(settings.attribute_separator.as_str())
                    {
                        return Self {
                            text: bare.to_string(),
                            node: Node::scalar(Scalar::resolve_plain(bare)),
                            value,
                            matched_field: false,
                            consumed: false,
                        };
                    }
                }
            }
        }
        Self {
            text: key.render(),
            node: key.clone(),
            value,
            matched_field: false,
            consumed: false,
        }
    }
}

fn probe(node: &Node, builtin: Builtin) -> bool {
    match builtin {
        Builtin::Any => true,
        Builtin::Scalar => node.as_scalar().is_some(),
        Builtin::Numeric => node.is_numeric(),
        Builtin::Integer => node.is_integer(),
        Builtin::Boolean => node.is_boolean(),
        Builtin::String => node.is_string(),
        Builtin::AnyList => node.as_sequence().is_some(),
        Builtin::AnyMap => node.as_mapping().is_some(),
    }
}

/// Display name a type establishes when matching enters it: inline type
/// variants list their alternatives, everything else keeps its surface
/// form.
fn context_name(ty: &TypeExpr) -> String {
    match &ty.kind {
        TypeKind::Variant { alts, value: false } => {
            let mut out = String::from("one of");
            for alt in alts {
                out.push_str("\n\t- ");
                out.push_str(&alt.display);
            }
            out
        }
        _ => ty.display.clone(),
    }
}

/// Replaces parameters with their bindings. Arguments come from scalar
/// references, so only references and parameters can nest.
fn substitute(expr: &TypeExpr, env: &Env) -> TypeExpr {
    match &expr.kind {
        TypeKind::Param(name) => env.get(name).cloned().unwrap_or_else(|| expr.clone()),
        TypeKind::Ref { name, args } => TypeExpr {
            kind: TypeKind::Ref {
                name: name.clone(),
                args: args.iter().map(|arg| substitute(arg, env)).collect(),
            },
            display: expr.display.clone(),
        },
        _ => expr.clone(),
    }
}

/// Surface name for a key type in `missing key with type:` messages. A
/// bare parameter reports its bound argument's surface form.
fn resolved_display(ty: &TypeExpr, env: &Env) -> String {
    match &ty.kind {
        TypeKind::Param(name) => env
            .get(name)
            .map(|bound| bound.display.clone())
            .unwrap_or_else(|| ty.display.clone()),
        _ => ty.display.clone(),
    }
}

/// Value equality through the stable rendering, never node identity.
fn literal_eq(node: &Node, expected: &Node) -> bool {
    node.render() == expected.render()
}

fn child_key(path: &str, key: &str) -> String {
    if path == "/" {
        format!("/{}", key)
    } else {
        format!("{}.{}", path, key)
    }
}

fn child_index(path: &str, index: usize) -> String {
    if path == "/" {
        format!("/{}", index)
    } else {
        format!("{}.{}", path, index)
    }
}
