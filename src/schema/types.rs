//! Schema type graph.
//!
//! A loaded schema is a set of named type definitions plus a root type
//! expression. Type expressions keep the surface form they were written
//! in (`display`): error messages render the surface form, and the
//! render/parse round-trip for named and builtin references depends on
//! it. Generic parameters are a first-class variant so that nested
//! applications like `one_of<boolean; one_of<integer; string>>`
//! substitute structurally, not textually.

use std::collections::HashMap;

use crate::document::Node;

use super::settings::Settings;

/// Builtin type predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Any,
    Scalar,
    Numeric,
    Integer,
    Boolean,
    String,
    AnyList,
    AnyMap,
}

impl Builtin {
    /// Resolves a builtin alias. Aliases are case-sensitive and are
    /// recognized before named-type lookup.
    pub fn from_alias(name: &str) -> Option<Self> {
        match name {
            "any" => Some(Self::Any),
            "scalar" => Some(Self::Scalar),
            "numeric" | "num" => Some(Self::Numeric),
            "integer" | "int" => Some(Self::Integer),
            "boolean" | "bool" => Some(Self::Boolean),
            "string" | "str" => Some(Self::String),
            "list" => Some(Self::AnyList),
            "map" => Some(Self::AnyMap),
            _ => None,
        }
    }
}

/// A type expression with its surface rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeKind,
    /// Surface form: the reference text as written for scalar
    /// references, the flow rendering of the schema node for structural
    /// expressions.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive predicate.
    Builtin(Builtin),
    /// Named-type application; `args` may be empty.
    Ref { name: String, args: Vec<TypeExpr> },
    /// Generic parameter placeholder, resolved through the substitution
    /// environment at match time.
    Param(String),
    /// Matches by value equality against the rendered node.
    Literal(Node),
    /// Sequence whose every element matches `elem`.
    List(Box<TypeExpr>),
    /// Ordered alternatives; the first alternative that matches wins.
    /// `value` distinguishes `!variant` value alternatives (literals)
    /// from structurally declared type alternatives.
    Variant { alts: Vec<TypeExpr>, value: bool },
    /// Structured mapping.
    Struct(StructType),
}

impl TypeExpr {
    pub fn builtin(builtin: Builtin, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Builtin(builtin),
            display: display.into(),
        }
    }

    pub fn reference(name: impl Into<String>, args: Vec<TypeExpr>, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Ref {
                name: name.into(),
                args,
            },
            display: display.into(),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display: name.clone(),
            kind: TypeKind::Param(name),
        }
    }

    pub fn literal(node: Node) -> Self {
        Self {
            display: node.render(),
            kind: TypeKind::Literal(node),
        }
    }

    pub fn list(elem: TypeExpr, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::List(Box::new(elem)),
            display: display.into(),
        }
    }

    pub fn variant(alts: Vec<TypeExpr>, value: bool, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Variant { alts, value },
            display: display.into(),
        }
    }

    pub fn structure(entries: Vec<StructEntry>, display: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Struct(StructType { entries }),
            display: display.into(),
        }
    }
}

/// A struct keeps its entries in declaration order: field checks,
/// key-type checks and embed splicing all observe that order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub entries: Vec<StructEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StructEntry {
    /// Literal key expected in the data.
    Field { name: String, spec: FieldSpec },
    /// `$T` dynamic key: at least one actual key must satisfy `T`.
    KeyType(KeyTypeSpec),
    /// `!embed` reference whose fields and key types are spliced in.
    Embed(TypeExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub ty: TypeExpr,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyTypeSpec {
    pub key_type: TypeExpr,
    pub value_type: TypeExpr,
    pub required: bool,
}

/// A `types:` entry. Zero-parameter entries are monomorphic aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub params: Vec<String>,
    pub body: TypeExpr,
}

/// A loaded schema: settings, named types and the root expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub settings: Settings,
    pub types: HashMap<String, NamedType>,
    pub root: TypeExpr,
}

impl Schema {
    pub fn named(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }
}
