pub mod edit;
pub mod matrix;

use serde::{Deserialize, Serialize};

use crate::errors::AlignError;
use crate::sequence::{Alphabet, Sequence};

pub use edit::EditCosts;
pub use matrix::SubstitutionMatrix;

/// Numeric type of all alignment costs. Lower is better.
pub type Cost = f64;

/// Cost of a DP cell that can't be reached under the current band or boundary conditions
pub const UNREACHABLE: Cost = f64::INFINITY;

/// Gap cost model. The variant determines which DP strategy the aligner uses.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum GapCosts {
    /// Every gap position costs `gap`
    Linear { gap: Cost },

    /// The first position of a gap costs `open`, every following position `elongate`
    Affine { open: Cost, elongate: Cost },
}

impl GapCosts {
    #[inline]
    pub fn is_affine(&self) -> bool {
        matches!(self, Self::Affine { .. })
    }

    /// Cost of a gap of the given length, opened from a non-gap state.
    #[inline]
    pub fn gap_open_cost(&self, length: usize) -> Cost {
        if length == 0 {
            return 0.0;
        }

        match *self {
            Self::Linear { gap } => length as Cost * gap,
            Self::Affine { open, elongate } => open + (length - 1) as Cost * elongate,
        }
    }

    /// Marginal cost of each additional gap position
    #[inline]
    pub fn elongate_cost(&self) -> Cost {
        match *self {
            Self::Linear { gap } => gap,
            Self::Affine { elongate, .. } => elongate,
        }
    }
}

impl Default for GapCosts {
    fn default() -> Self {
        Self::Affine { open: 8.0, elongate: 2.0 }
    }
}

/// Supplies substitution and gap costs to the aligner. Implementations must be free of side
/// effects: the aligner may evaluate the same pair of positions more than once.
pub trait CostModel {
    /// Cost of aligning `seq1[pos1]` with `seq2[pos2]`.
    fn substitution<S1, S2>(&self, seq1: &S1, seq2: &S2, pos1: usize, pos2: usize) -> Cost
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized;

    fn gap_costs(&self) -> GapCosts;

    /// Check whether substitution costs are defined for sequences over the given alphabets.
    fn check_alphabets(&self, alphabet1: &Alphabet, alphabet2: &Alphabet) -> Result<(), AlignError> {
        if alphabet1 != alphabet2 {
            return Err(AlignError::AlphabetMismatch {
                expected: alphabet1.to_string(),
                found: alphabet2.to_string(),
            });
        }

        Ok(())
    }
}

impl<C> CostModel for &C
where
    C: CostModel,
{
    #[inline]
    fn substitution<S1, S2>(&self, seq1: &S1, seq2: &S2, pos1: usize, pos2: usize) -> Cost
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        (**self).substitution(seq1, seq2, pos1, pos2)
    }

    #[inline]
    fn gap_costs(&self) -> GapCosts {
        (**self).gap_costs()
    }

    fn check_alphabets(&self, alphabet1: &Alphabet, alphabet2: &Alphabet) -> Result<(), AlignError> {
        (**self).check_alphabets(alphabet1, alphabet2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affine_gap_cost() {
        let gaps = GapCosts::Affine { open: 2.0, elongate: 1.0 };

        assert_eq!(gaps.gap_open_cost(0), 0.0);
        assert_eq!(gaps.gap_open_cost(1), 2.0);
        assert_eq!(gaps.gap_open_cost(3), 4.0);
        assert_eq!(gaps.elongate_cost(), 1.0);
        assert!(gaps.is_affine());
    }

    #[test]
    fn test_linear_gap_cost() {
        let gaps = GapCosts::Linear { gap: 1.5 };

        assert_eq!(gaps.gap_open_cost(1), 1.5);
        assert_eq!(gaps.gap_open_cost(4), 6.0);
        assert_eq!(gaps.elongate_cost(), 1.5);
        assert!(!gaps.is_affine());
    }

    #[test]
    fn test_gap_costs_json() {
        let gaps: GapCosts = serde_json::from_str(r#"{"model": "affine", "open": 6, "elongate": 2}"#).unwrap();
        assert_eq!(gaps, GapCosts::Affine { open: 6.0, elongate: 2.0 });

        let gaps: GapCosts = serde_json::from_str(r#"{"model": "linear", "gap": 1.0}"#).unwrap();
        assert_eq!(gaps, GapCosts::Linear { gap: 1.0 });
    }
}
