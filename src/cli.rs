use std::path::PathBuf;

use clap::Parser;

use crate::config::{ScanConfig, DEFAULT_MAX_MISMATCHES, DEFAULT_OUTPUT};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pepscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find proteome windows that a mutant peptide differs from by a few point substitutions"
)]
pub struct Args {
    /// Mutant peptide to scan for.
    #[arg(short = 'p', long = "peptide", value_name = "SEQ")]
    pub peptide: String,

    /// Proteome FASTA file (plain or gzip-compressed).
    #[arg(short = 'i', long = "input", value_name = "FASTA")]
    pub input: PathBuf,

    /// Largest number of substitutions a matching window may carry.
    #[arg(
        short = 'm',
        long = "max-mismatches",
        value_name = "N",
        default_value_t = DEFAULT_MAX_MISMATCHES
    )]
    pub max_mismatches: usize,

    /// Report destination: .tsv, .txt or .csv, optionally followed by .gz.
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Write a timestamped log file into this directory instead of stderr.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the log file into ~/.pepscan/logs.
    #[arg(long = "log-to-file", default_value_t = false, conflicts_with = "log_dir")]
    pub log_to_file: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn into_config(self) -> ScanConfig {
        ScanConfig::new(self.peptide, self.input)
            .with_max_mismatches(self.max_mismatches)
            .with_output(self.output)
    }
}
