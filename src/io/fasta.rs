use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::{debug, info};

use crate::errors::AlignError;
use crate::sequence::{Alphabet, NamedSequence, SymbolSequence};

/// Read all records of a (optionally gzipped) FASTA file. Residues are upper-cased before
/// they are parsed into `alphabet`.
pub fn read_sequences(path: &Path, alphabet: Arc<Alphabet>) -> Result<Vec<NamedSequence>, AlignError> {
    let is_gzipped = path
        .file_name()
        .map(|v| v.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false);

    let reader_inner: Box<dyn BufRead> = if is_gzipped {
        Box::new(
            File::open(path)
                .map(MultiGzDecoder::new)
                .map(BufReader::new)?,
        )
    } else {
        Box::new(File::open(path).map(BufReader::new)?)
    };

    let sequences = parse_fasta(reader_inner, alphabet)?;
    info!("Read {} sequences from {}", sequences.len(), path.display());

    Ok(sequences)
}

pub fn parse_fasta<R: BufRead>(reader: R, alphabet: Arc<Alphabet>) -> Result<Vec<NamedSequence>, AlignError> {
    let mut reader = fasta::io::Reader::new(reader);

    let mut sequences = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = std::str::from_utf8(record.name())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let residues = record.sequence().as_ref().to_ascii_uppercase();
        let text = std::str::from_utf8(&residues)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let seq = SymbolSequence::from_text(alphabet.clone(), text)?;
        debug!(name, length = seq.symbols().len(), "read sequence");

        sequences.push(NamedSequence::new(name, seq));
    }

    Ok(sequences)
}
