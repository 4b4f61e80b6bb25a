//! Sanity checks on the query peptide.
//!
//! Matching works on any alphabet, so nothing here rejects a peptide. These
//! checks only decide whether the user should be warned.

use bio_seq::prelude::*;
use log::warn;

/// Whether the peptide is made only of amino-acid letters bio-seq knows.
pub fn is_standard_peptide(peptide: &str) -> bool {
    !peptide.is_empty() && peptide.parse::<Seq<Amino>>().is_ok()
}

pub fn has_lowercase(peptide: &str) -> bool {
    peptide.chars().any(|c| c.is_ascii_lowercase())
}

/// Log warnings for peptides that are legal but probably not what was meant.
pub fn warn_on_unusual_peptide(peptide: &str) {
    if has_lowercase(peptide) {
        warn!("Peptide '{peptide}' contains lowercase letters; matching is case-sensitive");
    } else if !is_standard_peptide(peptide) {
        warn!("Peptide '{peptide}' contains non-standard amino-acid letters");
    }
}
