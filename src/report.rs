//! Tabular match report.
//!
//! Rows are streamed to disk as matches arrive. The destination file only
//! appears once the whole table has been written, so neither a scan without
//! matches nor a failed scan leaves a table behind.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{ConfigError, PepscanError};
use crate::protein::PeptideMatch;

/// Delimiter and compression, both taken from the destination file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormat {
    pub delimiter: u8,
    pub gzip: bool,
}

impl ReportFormat {
    /// `.csv` is comma-separated, `.tsv` and `.txt` are tab-separated, and a
    /// trailing `.gz` compresses either.
    pub fn from_path(path: &Path) -> Result<ReportFormat, ConfigError> {
        let unsupported = || ConfigError::UnsupportedOutput(path.to_path_buf());

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(unsupported)?
            .to_ascii_lowercase();
        let (stem, gzip) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };

        let delimiter = match Path::new(stem).extension().and_then(|e| e.to_str()) {
            Some("csv") => b',',
            Some("tsv") | Some("txt") => b'\t',
            _ => return Err(unsupported()),
        };
        Ok(ReportFormat { delimiter, gzip })
    }
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Peptide")]
    peptide: &'a str,
    #[serde(rename = "Protein_ID")]
    protein_id: &'a str,
    #[serde(rename = "Protein_Description")]
    protein_description: &'a str,
    #[serde(rename = "Match_Start")]
    match_start: usize,
    #[serde(rename = "Match_End")]
    match_end: usize,
    #[serde(rename = "Wildtype_Window")]
    wildtype_window: String,
    #[serde(rename = "Num_Mismatches")]
    num_mismatches: usize,
    #[serde(rename = "Mutations")]
    mutations: String,
}

enum Sink {
    Plain(BufWriter<NamedTempFile>),
    Gzip(GzEncoder<BufWriter<NamedTempFile>>),
}

impl Sink {
    fn finish(self) -> io::Result<NamedTempFile> {
        let buffered = match self {
            Sink::Plain(w) => w,
            Sink::Gzip(w) => w.finish()?,
        };
        buffered.into_inner().map_err(|e| e.into_error())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Rows go to a temporary file next to the destination, which is only
/// renamed into place by `finish`. Dropping the writer early, e.g. when the
/// scan fails halfway, leaves nothing at the destination.
pub struct ReportWriter {
    path: PathBuf,
    peptide: String,
    format: ReportFormat,
    writer: Option<csv::Writer<Sink>>,
    rows: usize,
}

fn report_error(path: &Path, source: impl Into<csv::Error>) -> PepscanError {
    PepscanError::Report {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

fn open(path: &Path, format: ReportFormat) -> Result<csv::Writer<Sink>, PepscanError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| report_error(path, e))?;
    }

    let temp = NamedTempFile::new_in(dir).map_err(|e| report_error(path, e))?;
    debug!("Staging report {path:?} in {:?}", temp.path());
    let buffered = BufWriter::new(temp);
    let sink = if format.gzip {
        Sink::Gzip(GzEncoder::new(buffered, Compression::default()))
    } else {
        Sink::Plain(buffered)
    };

    Ok(csv::WriterBuilder::new()
        .delimiter(format.delimiter)
        .from_writer(sink))
}

impl ReportWriter {
    pub fn create(
        path: impl Into<PathBuf>,
        peptide: impl Into<String>,
    ) -> Result<Self, PepscanError> {
        let path = path.into();
        let format = ReportFormat::from_path(&path)?;
        debug!("Report {path:?} will be written as {format:?}");
        Ok(ReportWriter {
            path,
            peptide: peptide.into(),
            format,
            writer: None,
            rows: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn write_match(&mut self, found: &PeptideMatch) -> Result<(), PepscanError> {
        let writer = match &mut self.writer {
            Some(writer) => writer,
            None => self.writer.insert(open(&self.path, self.format)?),
        };

        let row = ReportRow {
            peptide: &self.peptide,
            protein_id: &found.protein_id,
            protein_description: &found.protein_description,
            match_start: found.start(),
            match_end: found.end(),
            wildtype_window: found.window_str(),
            num_mismatches: found.num_mismatches(),
            mutations: found.mutation_notation(),
        };

        writer.serialize(&row).map_err(|e| report_error(&self.path, e))?;
        self.rows += 1;
        Ok(())
    }

    /// Flush the table, move it to its destination and return the number of
    /// rows written. No file exists afterwards when the row count is zero.
    pub fn finish(self) -> Result<usize, PepscanError> {
        let Some(writer) = self.writer else {
            debug!("No rows written, skipping {:?}", self.path);
            return Ok(0);
        };

        let path = self.path;
        let sink = writer
            .into_inner()
            .map_err(|e| report_error(&path, e.into_error()))?;
        let temp = sink.finish().map_err(|e| report_error(&path, e))?;
        temp.persist(&path).map_err(|e| report_error(&path, e.error))?;

        info!("Wrote {} rows to {:?}", self.rows, path);
        Ok(self.rows)
    }
}
