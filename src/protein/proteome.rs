use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use log::{debug, info};

use crate::error::PepscanError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// One protein of the reference proteome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub id: String,
    /// Full FASTA header line, identifier included
    pub description: String,
    pub sequence: Vec<u8>,
}

impl ReferenceRecord {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        sequence: impl Into<Vec<u8>>,
    ) -> Self {
        ReferenceRecord {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }
}

impl From<fasta::Record> for ReferenceRecord {
    fn from(record: fasta::Record) -> Self {
        let id = record.id().to_string();
        let description = match record.desc() {
            Some(desc) => format!("{id} {desc}"),
            None => id.clone(),
        };
        ReferenceRecord {
            id,
            description,
            sequence: record.seq().to_vec(),
        }
    }
}

/// Streams proteins out of a FASTA file, one record in memory at a time.
/// Gzip input is recognised by its magic bytes.
pub struct ProteomeReader {
    path: PathBuf,
    records: fasta::Records<BufReader<Box<dyn Read>>>,
    index: usize,
    failed: bool,
}

impl ProteomeReader {
    pub fn open(path: impl AsRef<Path>) -> Result<ProteomeReader, PepscanError> {
        let path = path.as_ref().to_path_buf();
        let open_error = |source: std::io::Error| PepscanError::ProteomeOpen {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(open_error)?;
        let mut buffered = BufReader::new(file);
        let compressed = buffered.fill_buf().map_err(open_error)?.starts_with(&GZIP_MAGIC);

        let inner: Box<dyn Read> = if compressed {
            debug!("Reading gzip-compressed proteome {path:?}");
            Box::new(MultiGzDecoder::new(buffered))
        } else {
            Box::new(buffered)
        };

        info!("Opened proteome {path:?}");
        Ok(ProteomeReader {
            path,
            records: fasta::Reader::new(inner).records(),
            index: 0,
            failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, reason: impl Into<String>) -> PepscanError {
        PepscanError::Proteome {
            path: self.path.clone(),
            record: self.index,
            reason: reason.into(),
        }
    }
}

impl Iterator for ProteomeReader {
    type Item = Result<ReferenceRecord, PepscanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let next = self.records.next()?;
        self.index += 1;

        let result = match next {
            Ok(record) => match record.check().map_err(str::to_string) {
                Ok(()) => Ok(ReferenceRecord::from(record)),
                Err(reason) => Err(self.malformed(reason)),
            },
            Err(e) => Err(self.malformed(e.to_string())),
        };

        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
