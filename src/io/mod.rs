pub mod fasta;

pub use fasta::read_sequences;
