use serde::{Deserialize, Serialize};

use crate::aligner::scoring::{Cost, CostModel, GapCosts};
use crate::sequence::Sequence;

/// Costs depending only on whether two symbols are identical.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditCosts {
    pub match_cost: Cost,
    pub mismatch_cost: Cost,
    pub gaps: GapCosts,
}

impl EditCosts {
    pub fn new(match_cost: Cost, mismatch_cost: Cost, gaps: GapCosts) -> Self {
        Self { match_cost, mismatch_cost, gaps }
    }

    /// Unit edit distance: mismatches and gap positions all cost one
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, GapCosts::Linear { gap: 1.0 })
    }
}

impl Default for EditCosts {
    fn default() -> Self {
        Self::new(0.0, 4.0, GapCosts::default())
    }
}

impl CostModel for EditCosts {
    #[inline]
    fn substitution<S1, S2>(&self, seq1: &S1, seq2: &S2, pos1: usize, pos2: usize) -> Cost
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        if seq1.symbol(pos1) == seq2.symbol(pos2) {
            self.match_cost
        } else {
            self.mismatch_cost
        }
    }

    #[inline(always)]
    fn gap_costs(&self) -> GapCosts {
        self.gaps
    }
}
