//! CLI-specific error types.
//!
//! Load and I/O failures exit with code 2; documents that merely fail
//! validation exit with code 1 so scripts can tell the two apart.

use thiserror::Error;

use crate::document::DocumentError;
use crate::schema::SchemaError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Document {
        path: String,
        #[source]
        source: DocumentError,
    },

    #[error("schema {path}: {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },

    #[error("{0} document(s) failed validation")]
    DocumentsInvalid(usize),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DocumentsInvalid(_) => 1,
            _ => 2,
        }
    }

    /// Validation failures already printed their findings; everything
    /// else still needs to be reported.
    pub fn needs_report(&self) -> bool {
        !matches!(self, CliError::DocumentsInvalid(_))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
