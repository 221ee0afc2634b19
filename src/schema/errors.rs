//! Schema load errors.
//!
//! Everything here is fatal and surfaced at `Validator::new` time: a
//! schema that fails to load never validates anything. Validation
//! findings on documents live in `validator::Error` instead.

use thiserror::Error;

/// Fatal schema-construction failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema is not a map")]
    NotAMap,

    #[error("schema has no root")]
    MissingRoot,

    #[error("unknown schema key: {0}")]
    UnknownKey(String),

    #[error("settings must be a map")]
    SettingsNotAMap,

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("types must be a map")]
    TypesNotAMap,

    #[error("duplicate type name: {0}")]
    DuplicateType(String),

    #[error("duplicate type parameter `{param}` in type `{ty}`")]
    DuplicateParam { ty: String, param: String },

    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    #[error("malformed type expression: {0}")]
    MalformedType(String),

    #[error("undefined type reference: {0}")]
    UndefinedReference(String),

    #[error("type `{name}` expects {expected} argument(s), found {found}")]
    BadArity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("embedded type is not a map type: {0}")]
    EmbedNotMap(String),

    #[error("embedded type outside of a map: {0}")]
    EmbedOutsideMap(String),

    #[error("variant type must be a sequence: {0}")]
    VariantNotASequence(String),
}

/// Result alias for schema loading.
pub type SchemaResult<T> = Result<T, SchemaError>;
