//! Pepscan - mutant peptide to proteome scanner
//!
//! This library locates the places in a proteome where a mutant peptide
//! aligns with a small number of point substitutions, and writes a tabular
//! report describing each candidate wild-type window.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod protein;
pub mod report;

// Re-export main types for convenience
pub use app::{run, ScanOutcome, ScanSummary};
pub use config::ScanConfig;
pub use error::{ConfigError, PepscanError};
pub use protein::{MismatchScanner, PeptideMatch, ReferenceRecord};
