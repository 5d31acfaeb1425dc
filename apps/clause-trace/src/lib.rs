//! Clause traceability front end
//!
//! Reads plain text, runs the clause engine under a bounded wait and emits the
//! JSON analysis report.

pub mod pipeline;

pub use pipeline::{analyze_document, run_detached, run_with_timeout, AnalysisError, Limits};
