pub mod mutation;
pub mod peptide;
pub mod proteome;
pub mod scanner;

pub use mutation::*;
pub use peptide::*;
pub use proteome::*;
pub use scanner::*;
