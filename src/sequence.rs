use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::errors::AlignError;

/// Index of a token within its alphabet
pub type Symbol = u32;

/// A discrete alphabet. Each symbol has a display token, which may be longer than one
/// character (e.g., three letter amino acid codes). Tokens are joined with the delimiter
/// when rendering a sequence.
#[derive(Clone, Debug)]
pub struct Alphabet {
    tokens: Vec<String>,
    index: FxHashMap<String, Symbol>,
    delimiter: String,
}

impl Alphabet {
    pub fn new<I, T>(tokens: I) -> Result<Self, AlignError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut index = FxHashMap::default();

        for (symbol, token) in tokens.iter().enumerate() {
            if index.insert(token.clone(), symbol as Symbol).is_some() {
                return Err(AlignError::DuplicateSymbol(token.clone()));
            }
        }

        Ok(Self { tokens, index, delimiter: String::new() })
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn dna() -> Self {
        Self::from_chars("ACGT")
    }

    pub fn protein() -> Self {
        Self::from_chars("ACDEFGHIKLMNPQRSTVWY")
    }

    fn from_chars(chars: &str) -> Self {
        let tokens: Vec<String> = chars.chars().map(String::from).collect();
        let index = tokens.iter()
            .enumerate()
            .map(|(symbol, token)| (token.clone(), symbol as Symbol))
            .collect();

        Self { tokens, index, delimiter: String::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn symbol(&self, token: &str) -> Option<Symbol> {
        self.index.get(token).copied()
    }

    #[inline]
    pub fn token(&self, symbol: Symbol) -> &str {
        &self.tokens[symbol as usize]
    }

    #[inline]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Parse a textual sequence. Without a delimiter, every character is a token.
    pub fn parse(&self, text: &str) -> Result<Vec<Symbol>, AlignError> {
        let lookup = |token: &str| self.symbol(token)
            .ok_or_else(|| AlignError::UnknownSymbol(token.to_string()));

        if self.delimiter.is_empty() {
            let mut buf = [0u8; 4];
            text.chars()
                .map(|c| lookup(c.encode_utf8(&mut buf)))
                .collect()
        } else {
            text.split(self.delimiter.as_str())
                .filter(|token| !token.is_empty())
                .map(lookup)
                .collect()
        }
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens && self.delimiter == other.delimiter
    }
}

impl Eq for Alphabet {}

impl Display for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(","))
    }
}

/// An indexable, immutable sequence of symbols from a shared alphabet.
pub trait Sequence {
    fn alphabet(&self) -> &Alphabet;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn symbol(&self, pos: usize) -> Symbol;

    /// The display token of the symbol at `pos`
    fn display(&self, pos: usize) -> &str {
        self.alphabet().token(self.symbol(pos))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolSequence {
    alphabet: Arc<Alphabet>,
    symbols: Vec<Symbol>,
}

impl SymbolSequence {
    pub fn new(alphabet: Arc<Alphabet>, symbols: Vec<Symbol>) -> Self {
        Self { alphabet, symbols }
    }

    pub fn from_text(alphabet: Arc<Alphabet>, text: &str) -> Result<Self, AlignError> {
        let symbols = alphabet.parse(text)?;

        Ok(Self { alphabet, symbols })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Sequence for SymbolSequence {
    #[inline]
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    fn symbol(&self, pos: usize) -> Symbol {
        self.symbols[pos]
    }
}

impl Display for SymbolSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.symbols.iter()
            .map(|s| self.alphabet.token(*s))
            .join(self.alphabet.delimiter());

        f.write_str(&text)
    }
}

/// A sequence with the name of the record it was read from.
#[derive(Clone, Debug)]
pub struct NamedSequence {
    pub name: String,
    pub seq: SymbolSequence,
}

impl NamedSequence {
    pub fn new(name: impl Into<String>, seq: SymbolSequence) -> Self {
        Self { name: name.into(), seq }
    }
}
