//! Reporting collaborators for scan results.

/// Console reporter
pub mod console;
