pub mod errors;
pub mod sequence;
pub mod aligner;
pub mod config;
pub mod io;
pub mod batch;

pub use aligner::{AlignedPair, AlignmentResult, AlignmentType, PairwiseAligner};
pub use aligner::scoring::{Cost, CostModel, EditCosts, GapCosts, SubstitutionMatrix};
pub use config::AlignerConfig;
pub use errors::AlignError;
pub use sequence::{Alphabet, NamedSequence, Sequence, SymbolSequence};
