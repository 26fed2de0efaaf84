use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use pairalign::batch::PairMode;
use pairalign::AlignmentType;

/// Output formats for alignment results
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// Header line per pair followed by a three-line view of the alignment
    #[default]
    Text,

    /// One JSON object per pair and line
    Json,
}

/// An enum indicating what kind of alignment to perform
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlignmentSpan {
    /// Align both sequences end-to-end
    Global,

    /// Globally align the first sequence of each pair, but allow free gaps at the beginning
    /// and end of the second
    SemiGlobal,

    /// Indels at the beginning or end of either sequence are free
    FreeShift,

    /// Best aligning substrings of both sequences
    Local,
}

impl From<AlignmentSpan> for AlignmentType {
    fn from(value: AlignmentSpan) -> Self {
        match value {
            AlignmentSpan::Global => Self::Global,
            AlignmentSpan::SemiGlobal => Self::SemiGlobal,
            AlignmentSpan::FreeShift => Self::FreeShift,
            AlignmentSpan::Local => Self::Local,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AlphabetKind {
    /// A, C, G and T
    #[default]
    Dna,

    /// The twenty standard amino acids
    Protein,
}

/// Which records of the input file to align
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Pairing {
    /// Align the first record against each of the others
    FirstVsRest,

    /// Align every pair of records
    AllPairs,
}

impl From<Pairing> for PairMode {
    fn from(value: Pairing) -> Self {
        match value {
            Pairing::FirstVsRest => Self::FirstVsRest,
            Pairing::AllPairs => Self::AllPairs,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Set verbosity level. Use multiple times to increase the verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<CliSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliSubcommand {
    /// Pairwise align the records of a FASTA file
    Align(AlignArgs),
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Sequences to align in FASTA format, optionally gzipped.
    #[clap(help_heading = "Inputs")]
    pub sequences: PathBuf,

    /// Alphabet of the input sequences
    #[arg(value_enum, short = 'a', long, default_value = "dna")]
    #[clap(help_heading = "Inputs")]
    pub alphabet: AlphabetKind,

    /// Which pairs of records to align
    #[arg(value_enum, short = 'p', long, default_value = "first-vs-rest")]
    #[clap(help_heading = "Inputs")]
    pub pairs: Pairing,

    /// Output filename. If not given, defaults to stdout
    #[arg(short, long)]
    #[clap(help_heading = "Outputs")]
    pub output: Option<PathBuf>,

    /// Output file type.
    #[arg(value_enum, short = 'O', long, default_value = "text")]
    #[clap(help_heading = "Outputs")]
    pub output_type: OutputType,

    /// Aligner configuration in JSON format. Options given on the command line take
    /// precedence.
    #[arg(short, long)]
    #[clap(help_heading = "Alignment configuration")]
    pub config: Option<PathBuf>,

    /// Alignment span: global, semi-global, free-shift or local alignment
    #[arg(value_enum, short = 'm', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub alignment_span: Option<AlignmentSpan>,

    /// Cost of aligning identical residues. Use a negative value for local alignment.
    #[arg(short = 'M', long, allow_negative_numbers = true)]
    #[clap(help_heading = "Alignment configuration")]
    pub cost_match: Option<f64>,

    /// Penalty for mismatching residues
    #[arg(short = 'n', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub cost_mismatch: Option<f64>,

    /// Penalty for opening a new gap. With --linear, the cost of each gap position.
    #[arg(short = 'g', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub cost_gap_open: Option<f64>,

    /// Penalty for extending a gap
    #[arg(short = 'e', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub cost_gap_extend: Option<f64>,

    /// Use linear instead of affine gap costs
    #[arg(long)]
    #[clap(help_heading = "Alignment configuration")]
    pub linear: bool,

    /// Only compute DP cells at most this many positions away from the main diagonal
    #[arg(short = 'b', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub off_diagonal: Option<usize>,

    /// Number of alignment threads
    #[arg(short = 't', long, default_value = "1")]
    pub threads: usize,
}
