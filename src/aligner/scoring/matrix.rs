use std::sync::Arc;

use crate::aligner::scoring::{Cost, CostModel, GapCosts};
use crate::errors::AlignError;
use crate::sequence::{Alphabet, Sequence};

/// A full substitution cost table over a single alphabet.
#[derive(Clone, Debug)]
pub struct SubstitutionMatrix {
    alphabet: Arc<Alphabet>,
    costs: Vec<Cost>,
    gaps: GapCosts,
}

impl SubstitutionMatrix {
    pub fn from_fn<F>(alphabet: Arc<Alphabet>, gaps: GapCosts, f: F) -> Self
    where
        F: Fn(&str, &str) -> Cost,
    {
        let n = alphabet.len();
        let mut costs = Vec::with_capacity(n * n);
        for a in 0..n {
            for b in 0..n {
                costs.push(f(alphabet.token(a as u32), alphabet.token(b as u32)));
            }
        }

        Self { alphabet, costs, gaps }
    }

    pub fn identity(alphabet: Arc<Alphabet>, match_cost: Cost, mismatch_cost: Cost, gaps: GapCosts) -> Self {
        Self::from_fn(alphabet, gaps, |a, b| if a == b { match_cost } else { mismatch_cost })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn lookup(&self, token: &str) -> Result<usize, AlignError> {
        self.alphabet.symbol(token)
            .map(|s| s as usize)
            .ok_or_else(|| AlignError::UnknownSymbol(token.to_string()))
    }

    pub fn get(&self, token1: &str, token2: &str) -> Result<Cost, AlignError> {
        let (a, b) = (self.lookup(token1)?, self.lookup(token2)?);
        Ok(self.costs[a * self.alphabet.len() + b])
    }

    /// Set the cost of substituting `token1` by `token2`. The table is not kept symmetric.
    pub fn set(&mut self, token1: &str, token2: &str, cost: Cost) -> Result<(), AlignError> {
        let (a, b) = (self.lookup(token1)?, self.lookup(token2)?);
        self.costs[a * self.alphabet.len() + b] = cost;

        Ok(())
    }
}

impl CostModel for SubstitutionMatrix {
    #[inline]
    fn substitution<S1, S2>(&self, seq1: &S1, seq2: &S2, pos1: usize, pos2: usize) -> Cost
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        let a = seq1.symbol(pos1) as usize;
        let b = seq2.symbol(pos2) as usize;

        self.costs[a * self.alphabet.len() + b]
    }

    #[inline(always)]
    fn gap_costs(&self) -> GapCosts {
        self.gaps
    }

    fn check_alphabets(&self, alphabet1: &Alphabet, alphabet2: &Alphabet) -> Result<(), AlignError> {
        for alphabet in [alphabet1, alphabet2] {
            if alphabet != self.alphabet.as_ref() {
                return Err(AlignError::AlphabetMismatch {
                    expected: self.alphabet.to_string(),
                    found: alphabet.to_string(),
                });
            }
        }

        Ok(())
    }
}
