//! CLI command implementations.
//!
//! The commands are thin: read files, hand the parsed trees to the
//! engine, print what comes back. All validation semantics live in the
//! `validator` subsystem.

use std::fs;
use std::path::Path;

use crate::document::{from_yaml_str, Node};
use crate::observability::Logger;
use crate::validator::{Error, Validator};

use super::args::{Command, OutputFormat};
use super::errors::{CliError, CliResult};

/// Dispatches a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Validate {
            schema,
            documents,
            depth,
            format,
            verbose,
        } => validate(&schema, &documents, depth, format, verbose),
        Command::Check { schema, verbose } => check(&schema, verbose),
    }
}

/// Validates every document against the schema; any invalid document
/// makes the whole run fail with exit code 1.
pub fn validate(
    schema_path: &Path,
    documents: &[impl AsRef<Path>],
    depth: Option<usize>,
    format: OutputFormat,
    verbose: bool,
) -> CliResult<()> {
    let validator = load_validator(schema_path, verbose)?;

    let mut reports = Vec::with_capacity(documents.len());
    let mut invalid = 0usize;
    for document in documents {
        let document = document.as_ref();
        let node = load_document(document)?;
        let errors = validator.validate(&node);
        if !errors.is_empty() {
            invalid += 1;
        }
        if verbose {
            Logger::info(
                "DOCUMENT_VALIDATED",
                &[
                    ("document", &document.display().to_string()),
                    ("errors", &errors.len().to_string()),
                ],
            );
        }
        reports.push((document.display().to_string(), errors));
    }

    match format {
        OutputFormat::Text => print_text(&reports, depth),
        OutputFormat::Json => print_json(&reports, invalid)?,
    }

    if invalid > 0 {
        return Err(CliError::DocumentsInvalid(invalid));
    }
    Ok(())
}

/// Loads the schema and reports whether it is well-formed.
pub fn check(schema_path: &Path, verbose: bool) -> CliResult<()> {
    load_validator(schema_path, verbose)?;
    println!("ok");
    Ok(())
}

fn load_validator(path: &Path, verbose: bool) -> CliResult<Validator> {
    let node = load_document(path)?;
    let validator = Validator::new(&node).map_err(|source| CliError::Schema {
        path: path.display().to_string(),
        source,
    })?;
    if verbose {
        Logger::info(
            "SCHEMA_LOADED",
            &[("schema", &path.display().to_string())],
        );
    }
    Ok(validator)
}

fn load_document(path: &Path) -> CliResult<Node> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    from_yaml_str(&content).map_err(|source| CliError::Document {
        path: path.display().to_string(),
        source,
    })
}

fn print_text(reports: &[(String, Vec<Error>)], depth: Option<usize>) {
    let many = reports.len() > 1;
    for (document, errors) in reports {
        if errors.is_empty() {
            continue;
        }
        if many {
            println!("{}:", document);
        }
        for error in errors {
            println!("{}", error.description(depth));
        }
    }
}

fn print_json(reports: &[(String, Vec<Error>)], invalid: usize) -> CliResult<()> {
    let documents: Vec<serde_json::Value> = reports
        .iter()
        .map(|(document, errors)| {
            serde_json::json!({
                "document": document,
                "valid": errors.is_empty(),
                "errors": errors,
            })
        })
        .collect();
    let report = serde_json::json!({
        "status": if invalid == 0 { "valid" } else { "invalid" },
        "documents": documents,
    });
    println!("{}", report);
    Ok(())
}
