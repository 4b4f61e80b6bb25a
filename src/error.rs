use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the scan parameters, detected before any file is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("peptide must not be empty")]
    EmptyQuery,

    #[error("peptide '{0}' contains non-ASCII characters")]
    NonAsciiQuery(String),

    #[error("input FASTA path must not be empty")]
    MissingInput,

    #[error(
        "output path '{}' has an unsupported extension \
         (expected .tsv, .txt or .csv, optionally followed by .gz)",
        .0.display()
    )]
    UnsupportedOutput(PathBuf),
}

#[derive(Debug, Error)]
pub enum PepscanError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to open proteome {}: {source}", path.display())]
    ProteomeOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed proteome {} at record {record}: {reason}", path.display())]
    Proteome {
        path: PathBuf,
        record: usize,
        reason: String,
    },

    #[error("failed to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
