//! shapecheck - structural schema validation for YAML-shaped document trees
//!
//! A schema document describes expected shapes (named and generic types,
//! variants, optional/required fields, dynamic keys, embedded structs);
//! the validator walks a data document against it and returns a list of
//! structured errors, each carrying a path into the data. See SCHEMA.md
//! for the schema language.

pub mod cli;
pub mod document;
pub mod observability;
pub mod schema;
pub mod validator;

pub use document::{from_yaml_str, Node};
pub use schema::SchemaError;
pub use validator::{Error, Validator};
