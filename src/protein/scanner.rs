use log::{debug, trace};

use crate::protein::mutation::{Mismatch, PeptideMatch};
use crate::protein::proteome::ReferenceRecord;

/// Slides the peptide across reference proteins and keeps the windows
/// that differ from it by between 1 and `max_mismatches` residues.
///
/// Exact occurrences are never reported: the scanner looks for
/// mutation-derived windows, not for the peptide itself.
#[derive(Debug, Clone)]
pub struct MismatchScanner {
    query: Vec<u8>,
    max_mismatches: usize,
}

impl MismatchScanner {
    pub fn new(query: impl Into<Vec<u8>>, max_mismatches: usize) -> Self {
        MismatchScanner {
            query: query.into(),
            max_mismatches,
        }
    }

    /// Number of windows a sequence of length `len` contributes.
    pub fn window_count(&self, len: usize) -> usize {
        if self.query.is_empty() || len < self.query.len() {
            0
        } else {
            len - self.query.len() + 1
        }
    }

    /// Compare a window against the peptide. Gives up as soon as the budget
    /// is exceeded, since the window is rejected at that point anyway.
    fn mismatches(&self, window: &[u8]) -> Option<Vec<Mismatch>> {
        let mut found = Vec::new();
        for (position, (&reference, &query)) in window.iter().zip(&self.query).enumerate() {
            if reference != query {
                if found.len() == self.max_mismatches {
                    return None;
                }
                found.push(Mismatch { position, reference, query });
            }
        }

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }

    /// Evaluate the window of `record` starting at the 0-based `offset`.
    pub fn match_at(&self, record: &ReferenceRecord, offset: usize) -> Option<PeptideMatch> {
        if self.query.is_empty() {
            return None;
        }
        let end = offset.checked_add(self.query.len())?;
        let window = record.sequence.get(offset..end)?;
        let mismatches = self.mismatches(window)?;

        Some(PeptideMatch {
            protein_id: record.id.clone(),
            protein_description: record.description.clone(),
            offset,
            window: window.to_vec(),
            mismatches,
        })
    }

    /// Matches within one protein, in ascending offset order.
    pub fn matches_in<'a>(
        &'a self,
        record: &'a ReferenceRecord,
    ) -> impl Iterator<Item = PeptideMatch> + 'a {
        (0..self.window_count(record.sequence.len()))
            .filter_map(move |offset| self.match_at(record, offset))
    }

    /// Lazily scan a stream of proteins. Matches come out in input order,
    /// then ascending offset order. The first record error is yielded once
    /// and ends the scan.
    pub fn scan<I, E>(&self, records: I) -> Scan<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Result<ReferenceRecord, E>>,
    {
        Scan {
            scanner: self,
            records: records.into_iter(),
            current: None,
            failed: false,
            stats: ScanStats::default(),
        }
    }
}

/// Counters collected while a scan runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub proteins: usize,
    pub windows: usize,
    pub matches: usize,
}

struct Cursor {
    record: ReferenceRecord,
    offset: usize,
    windows: usize,
}

pub struct Scan<'s, I> {
    scanner: &'s MismatchScanner,
    records: I,
    current: Option<Cursor>,
    failed: bool,
    stats: ScanStats,
}

impl<I> Scan<'_, I> {
    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

impl<I, E> Iterator for Scan<'_, I>
where
    I: Iterator<Item = Result<ReferenceRecord, E>>,
{
    type Item = Result<PeptideMatch, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(cursor) = self.current.as_mut() {
                while cursor.offset < cursor.windows {
                    let offset = cursor.offset;
                    cursor.offset += 1;
                    self.stats.windows += 1;
                    if let Some(found) = self.scanner.match_at(&cursor.record, offset) {
                        trace!("{} matches at offset {offset}", cursor.record.id);
                        self.stats.matches += 1;
                        return Some(Ok(found));
                    }
                }
                self.current = None;
            }

            match self.records.next()? {
                Ok(record) => {
                    self.stats.proteins += 1;
                    let windows = self.scanner.window_count(record.sequence.len());
                    if windows == 0 {
                        debug!("{} is shorter than the peptide, skipping", record.id);
                    }
                    self.current = Some(Cursor { record, offset: 0, windows });
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
