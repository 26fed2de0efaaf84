use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum AlignError {
    /// The band around the main diagonal can't reach the terminal cell of the DP matrix
    BandTooNarrow { off_diagonal: usize, len1: usize, len2: usize },

    /// A requested sub-range does not fit in the sequence
    InvalidRange { start: usize, end: usize, len: usize },

    /// The two sequences (or a sequence and the cost model) use incompatible alphabets
    AlphabetMismatch { expected: String, found: String },

    /// A token that is not part of the alphabet
    UnknownSymbol(String),

    /// The same token was given twice when building an alphabet
    DuplicateSymbol(String),

    /// The DP matrices do not hold a valid computation
    NotComputed,

    /// Error variant when the configuration file couldn't be parsed
    ConfigError { source: serde_json::Error },

    /// Other IO errors
    IOError(io::Error),
}

impl Error for AlignError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::ConfigError { ref source } => Some(source),
            Self::IOError(ref source) => Some(source),
            _ => None
        }
    }
}

impl From<io::Error> for AlignError {
    fn from(value: io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<serde_json::Error> for AlignError {
    fn from(value: serde_json::Error) -> Self {
        Self::ConfigError {
            source: value
        }
    }
}

impl Display for AlignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::BandTooNarrow { off_diagonal, len1, len2 } =>
                write!(f, "Band of {off_diagonal} off-diagonals can't cover sub-sequences of length {len1} and {len2}!"),
            Self::InvalidRange { start, end, len } =>
                write!(f, "Range {start}..{end} is not valid for a sequence of length {len}!"),
            Self::AlphabetMismatch { ref expected, ref found } =>
                write!(f, "Alphabet mismatch: expected [{expected}], found [{found}]!"),
            Self::UnknownSymbol(ref token) =>
                write!(f, "Symbol '{token}' is not part of the alphabet!"),
            Self::DuplicateSymbol(ref token) =>
                write!(f, "Symbol '{token}' occurs more than once in the alphabet!"),
            Self::NotComputed =>
                write!(f, "No alignment has been computed yet!"),
            Self::ConfigError { source: _ } =>
                write!(f, "Could not parse the aligner configuration!"),
            Self::IOError(ref err) =>
                err.fmt(f),
        }
    }
}
