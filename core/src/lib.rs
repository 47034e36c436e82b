//! Orchestration around the external nuclei scanner.
//!
//! [`scanner`] owns the process boundary, [`output`] persists results and
//! [`launcher`] ties configuration, targets and the scan into one run.

pub mod launcher;
pub mod output;
pub mod scanner;
