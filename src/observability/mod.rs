//! Observability for shapecheck
//!
//! Structured JSON logging used by the CLI. The engine itself never
//! logs: validation results are values, not events.

mod logger;

pub use logger::{Logger, Severity};
