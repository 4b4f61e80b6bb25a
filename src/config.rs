use std::path::PathBuf;

use crate::error::ConfigError;
use crate::report::ReportFormat;

pub const DEFAULT_MAX_MISMATCHES: usize = 3;
pub const DEFAULT_OUTPUT: &str = "mutation_scan_results.tsv";

/// Everything a scan needs to know. Nothing is hardcoded past this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Mutant peptide to look for
    pub query: String,
    /// Largest number of substitutions a window may carry
    pub max_mismatches: usize,
    /// Proteome FASTA, optionally gzip-compressed
    pub input: PathBuf,
    /// Report destination; its extension picks the table format
    pub output: PathBuf,
}

impl ScanConfig {
    pub fn new(query: impl Into<String>, input: impl Into<PathBuf>) -> Self {
        ScanConfig {
            query: query.into(),
            max_mismatches: DEFAULT_MAX_MISMATCHES,
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    pub fn with_max_mismatches(mut self, max_mismatches: usize) -> Self {
        self.max_mismatches = max_mismatches;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Reject parameters that would make the scan meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.is_empty() {
            return Err(ConfigError::EmptyQuery);
        }
        if !self.query.is_ascii() {
            return Err(ConfigError::NonAsciiQuery(self.query.clone()));
        }
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::MissingInput);
        }
        ReportFormat::from_path(&self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::new("ILDTAGKEEY", "proteome.fasta");
        assert_eq!(config.max_mismatches, 3);
        assert_eq!(config.output, PathBuf::from("mutation_scan_results.tsv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let config = ScanConfig::new("", "proteome.fasta");
        assert_eq!(config.validate(), Err(ConfigError::EmptyQuery));
    }

    #[test]
    fn test_non_ascii_query_is_rejected() {
        let config = ScanConfig::new("ILDTÄG", "proteome.fasta");
        assert!(matches!(config.validate(), Err(ConfigError::NonAsciiQuery(_))));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        let config = ScanConfig::new("ILDTAG", "");
        assert_eq!(config.validate(), Err(ConfigError::MissingInput));
    }

    #[test]
    fn test_spreadsheet_output_is_rejected() {
        let config = ScanConfig::new("ILDTAG", "proteome.fasta").with_output("results.xlsx");
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedOutput(PathBuf::from("results.xlsx")))
        );
    }

    #[test]
    fn test_budget_larger_than_peptide_is_allowed() {
        let config = ScanConfig::new("AC", "proteome.fasta").with_max_mismatches(10);
        assert!(config.validate().is_ok());
    }
}
