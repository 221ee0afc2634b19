//! Validation error tree.
//!
//! An error carries a path into the document, a message from the fixed
//! taxonomy, and — when a variant dispatch exhausted its alternatives —
//! the per-alternative failures. `description` serialises the tree at a
//! requested depth; `description(Some(1))` is the first line only.

use std::fmt;

use serde::Serialize;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    path: String,
    message: String,
    /// One entry per failed variant alternative, in declaration order.
    /// Empty for non-variant errors.
    variants: Vec<Vec<Error>>,
}

impl Error {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            variants: Vec::new(),
        }
    }

    pub(crate) fn with_variants(
        path: impl Into<String>,
        message: impl Into<String>,
        variants: Vec<Vec<Error>>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            variants,
        }
    }

    /// Document path of the failure (`/`, `/targets.1`, ...).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Message without the path prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Failures of each tried variant alternative.
    pub fn variant_failures(&self) -> &[Vec<Error>] {
        &self.variants
    }

    /// Renders the error. `None` renders the whole tree; `Some(n)`
    /// stops after `n` levels, so `Some(1)` yields exactly the first
    /// line of the unbounded rendering.
    pub fn description(&self, depth: Option<usize>) -> String {
        let mut out = String::new();
        self.render(&mut out, 0, depth);
        out
    }

    fn render(&self, out: &mut String, level: usize, depth: Option<usize>) {
        if depth == Some(0) {
            return;
        }
        let head = format!("{}: {}", self.path, self.message);
        if depth == Some(1) {
            push_line(out, level, head.lines().next().unwrap_or(""));
            return;
        }
        for line in head.lines() {
            push_line(out, level, line);
        }
        for (index, branch) in self.variants.iter().enumerate() {
            push_line(out, level + 1, &format!("* failed variant {}:", index));
            for error in branch {
                error.render(out, level + 2, depth.map(|d| d - 1));
            }
        }
    }
}

fn push_line(out: &mut String, level: usize, line: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    for _ in 0..level {
        out.push('\t');
    }
    out.push_str(line);
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description(None))
    }
}
