use std::path::PathBuf;

use log::{debug, info};

use crate::config::ScanConfig;
use crate::error::PepscanError;
use crate::logging::log_budget_warning;
use crate::protein::{
    warn_on_unusual_peptide, MismatchScanner, PeptideMatch, ProteomeReader, ScanStats,
};
use crate::report::ReportWriter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Saved { path: PathBuf, matches: usize },
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub stats: ScanStats,
    pub outcome: ScanOutcome,
}

impl ScanSummary {
    /// Line shown to the user once the scan is over.
    pub fn message(&self) -> String {
        match &self.outcome {
            ScanOutcome::Saved { path, matches } => {
                format!("Saved {} matches to {}", matches, path.display())
            }
            ScanOutcome::NoMatches => "No matches found.".to_string(),
        }
    }
}

fn prepare(config: &ScanConfig) -> Result<MismatchScanner, PepscanError> {
    config.validate()?;
    warn_on_unusual_peptide(&config.query);
    log_budget_warning(config.query.len(), config.max_mismatches);

    info!(
        "Scanning {:?} for {} with up to {} mismatches",
        config.input, config.query, config.max_mismatches
    );
    Ok(MismatchScanner::new(config.query.as_bytes(), config.max_mismatches))
}

/// Scan the configured proteome and stream every match into the report.
pub fn run(config: &ScanConfig) -> Result<ScanSummary, PepscanError> {
    let scanner = prepare(config)?;
    let proteome = ProteomeReader::open(&config.input)?;
    let mut report = ReportWriter::create(&config.output, config.query.as_str())?;

    let mut scan = scanner.scan(proteome);
    for found in scan.by_ref() {
        let found = found?;
        debug!(
            "{} {}..{} {}",
            found.protein_id,
            found.start(),
            found.end(),
            found.mutation_notation()
        );
        report.write_match(&found)?;
    }
    let stats = scan.stats();

    let path = report.path().to_path_buf();
    let matches = report.finish()?;
    info!(
        "Scanned {} proteins ({} windows), {} matches",
        stats.proteins, stats.windows, matches
    );

    let outcome = if matches == 0 {
        ScanOutcome::NoMatches
    } else {
        ScanOutcome::Saved { path, matches }
    };
    Ok(ScanSummary { stats, outcome })
}

/// Scan the configured proteome and keep the matches in memory instead of
/// writing a report.
pub fn collect_matches(config: &ScanConfig) -> Result<Vec<PeptideMatch>, PepscanError> {
    let scanner = prepare(config)?;
    let proteome = ProteomeReader::open(&config.input)?;
    let matches = scanner.scan(proteome).collect::<Result<Vec<_>, _>>()?;
    Ok(matches)
}
