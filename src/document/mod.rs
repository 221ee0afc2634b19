//! Document tree model for shapecheck
//!
//! Provides the uniform node view the validator consumes:
//! - kind (null / scalar / sequence / mapping), tag, children
//! - scalar type probes (integer / numeric / boolean / string)
//! - stable flow rendering used by error messages and literal matching
//! - the YAML adapter

mod node;
mod render;
mod yaml;

pub use node::{Body, Node, NodeKind, Scalar, ScalarKind};
pub use yaml::{from_yaml_str, from_yaml_value, DocumentError};
