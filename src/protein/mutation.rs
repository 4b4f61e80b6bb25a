//! Match records produced by the mismatch scanner.

use std::fmt;

/// A single differing position inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    /// 0-based position within the window
    pub position: usize,
    /// Wild-type residue found in the reference
    pub reference: u8,
    /// Residue the peptide carries at that position
    pub query: u8,
}

/// A point substitution in global protein coordinates, e.g. `A5B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub reference: u8,
    /// 1-based position within the protein
    pub position: usize,
    pub substitute: u8,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            char::from(self.reference),
            self.position,
            char::from(self.substitute)
        )
    }
}

/// A window of a reference protein that differs from the peptide by at
/// least one and at most `max_mismatches` residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideMatch {
    pub protein_id: String,
    pub protein_description: String,
    /// 0-based offset of the window within the protein
    pub offset: usize,
    pub window: Vec<u8>,
    pub mismatches: Vec<Mismatch>,
}

impl PeptideMatch {
    /// 1-based start coordinate.
    pub fn start(&self) -> usize {
        self.offset + 1
    }

    /// 1-based inclusive end coordinate.
    pub fn end(&self) -> usize {
        self.offset + self.window.len()
    }

    pub fn num_mismatches(&self) -> usize {
        self.mismatches.len()
    }

    pub fn window_str(&self) -> String {
        String::from_utf8_lossy(&self.window).into_owned()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mismatches
            .iter()
            .map(|m| Mutation {
                reference: m.reference,
                position: self.offset + m.position + 1,
                substitute: m.query,
            })
            .collect()
    }

    /// Mutations in ascending position order, joined by `"; "`.
    pub fn mutation_notation(&self) -> String {
        self.mutations()
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
