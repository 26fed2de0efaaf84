pub mod alignment;
pub mod band;
pub mod boundary;
pub mod matrix;
pub mod scoring;
pub(crate) mod gap_affine;
pub(crate) mod gap_linear;
pub(crate) mod traceback;

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::errors::AlignError;
use crate::sequence::Sequence;
use band::Band;
use boundary::BoundaryPolicy;
use matrix::MatrixStore;
use scoring::{Cost, CostModel, GapCosts};

pub use alignment::{AlignedPair, AlignmentResult};

/// Enum representing the kind of alignment to perform
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentType {
    /// End-to-end alignment of both sequences
    #[default]
    Global,

    /// Align all of sequence 1 to any part of sequence 2, i.e., leading and trailing residues
    /// of sequence 2 are free
    SemiGlobal,

    /// Leading and trailing residues of both sequences are free, e.g., for overlaps
    FreeShift,

    /// Best scoring alignment of any pair of substrings
    Local,
}

/// The sub-ranges and alignment type of the last successful DP fill
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ComputedRegion {
    aln_type: AlignmentType,
    start1: usize,
    end1: usize,
    start2: usize,
    end2: usize,
}

/// Everything the per-cell recurrences need: costs, the aligned sub-ranges and the boundary
/// policy of the alignment type. DP coordinate `i` refers to `seq1[offset1 + i - 1]`.
pub(crate) struct DpContext<'a, C, S1: ?Sized, S2: ?Sized> {
    pub costs: &'a C,
    pub seq1: &'a S1,
    pub seq2: &'a S2,
    pub offset1: usize,
    pub offset2: usize,
    pub len1: usize,
    pub len2: usize,
    pub policy: BoundaryPolicy,
    pub gaps: GapCosts,
}

impl<'a, C, S1, S2> DpContext<'a, C, S1, S2>
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    #[inline(always)]
    pub fn substitution(&self, i: usize, j: usize) -> Cost {
        self.costs.substitution(self.seq1, self.seq2, self.offset1 + i - 1, self.offset2 + j - 1)
    }
}

/// Pairwise aligner. Owns its DP matrices and reuses them across calls, so an instance
/// can't be shared between threads: use one aligner per thread.
///
/// The DP strategy follows from the cost model's gap costs: linear gap costs use a single
/// matrix (Needleman-Wunsch), affine gap costs use three (Gotoh).
pub struct PairwiseAligner<C> {
    costs: C,
    gaps: GapCosts,
    off_diagonal: Option<usize>,
    matrices: MatrixStore,
    computed: Option<ComputedRegion>,
}

impl<C> PairwiseAligner<C>
where
    C: CostModel,
{
    pub fn new(costs: C) -> Self {
        let gaps = costs.gap_costs();

        Self {
            costs,
            gaps,
            off_diagonal: None,
            matrices: MatrixStore::new(),
            computed: None,
        }
    }

    /// Restrict the DP to cells at most `off_diagonal` positions away from the main
    /// diagonal. `None` computes the full matrix.
    pub fn with_off_diagonal(mut self, off_diagonal: Option<usize>) -> Self {
        self.set_off_diagonal(off_diagonal);
        self
    }

    pub fn set_off_diagonal(&mut self, off_diagonal: Option<usize>) {
        self.off_diagonal = off_diagonal;
        self.computed = None;
    }

    pub fn off_diagonal(&self) -> Option<usize> {
        self.off_diagonal
    }

    pub fn costs(&self) -> &C {
        &self.costs
    }

    pub fn is_affine(&self) -> bool {
        self.gaps.is_affine()
    }

    /// The DP matrices of the last computation
    pub fn matrices(&self) -> &MatrixStore {
        &self.matrices
    }

    /// Fill the DP matrices for `seq1[range1]` against `seq2[range2]`. Invalidates any
    /// earlier computation, also when it fails.
    pub fn compute_alignment<S1, S2>(
        &mut self,
        aln_type: AlignmentType,
        seq1: &S1,
        range1: Range<usize>,
        seq2: &S2,
        range2: Range<usize>,
    ) -> Result<(), AlignError>
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        self.computed = None;

        check_range(&range1, seq1.len())?;
        check_range(&range2, seq2.len())?;
        self.costs.check_alphabets(seq1.alphabet(), seq2.alphabet())?;

        let (len1, len2) = (range1.len(), range2.len());
        let band = Band::new(self.off_diagonal, len1, len2)?;

        let span = debug_span!("compute_alignment", ?aln_type, len1, len2, affine = self.gaps.is_affine());
        let _enter = span.enter();

        self.matrices.reset_or_resize(len1 + 1, len2 + 1, self.gaps.is_affine());

        let ctx = DpContext {
            costs: &self.costs,
            seq1,
            seq2,
            offset1: range1.start,
            offset2: range2.start,
            len1,
            len2,
            policy: BoundaryPolicy::new(aln_type),
            gaps: self.gaps,
        };

        match self.gaps {
            GapCosts::Linear { .. } => gap_linear::fill(&ctx, &mut self.matrices, &band),
            GapCosts::Affine { .. } => gap_affine::fill(&ctx, &mut self.matrices, &band),
        }

        self.computed = Some(ComputedRegion {
            aln_type,
            start1: range1.start,
            end1: range1.end,
            start2: range2.start,
            end2: range2.end,
        });

        debug!(banded = !band.is_unbounded(), "filled DP matrices");

        Ok(())
    }

    /// Compute the optimal alignment of `seq1[range1]` and `seq2[range2]` and trace it back.
    pub fn get_alignment<S1, S2>(
        &mut self,
        aln_type: AlignmentType,
        seq1: &S1,
        range1: Range<usize>,
        seq2: &S2,
        range2: Range<usize>,
    ) -> Result<AlignmentResult, AlignError>
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        self.compute_alignment(aln_type, seq1, range1.clone(), seq2, range2.clone())?;

        let ctx = DpContext {
            costs: &self.costs,
            seq1,
            seq2,
            offset1: range1.start,
            offset2: range2.start,
            len1: range1.len(),
            len2: range2.len(),
            policy: BoundaryPolicy::new(aln_type),
            gaps: self.gaps,
        };

        let terminal = ctx.policy.terminal_cell(&self.matrices.m, ctx.len1, ctx.len2);
        let cost = self.matrices.m.get(terminal.0, terminal.1);
        debug!(?terminal, cost, "tracing back alignment");

        let path = match self.gaps {
            GapCosts::Linear { .. } => traceback::traceback_linear(&ctx, &self.matrices, terminal),
            GapCosts::Affine { .. } => traceback::traceback_affine(&ctx, &self.matrices, terminal),
        };

        Ok(AlignmentResult::new(seq1, seq2, (range1.start, range2.start), path, cost))
    }

    /// Align both sequences in full.
    pub fn align<S1, S2>(&mut self, aln_type: AlignmentType, seq1: &S1, seq2: &S2) -> Result<AlignmentResult, AlignError>
    where
        S1: Sequence + ?Sized,
        S2: Sequence + ?Sized,
    {
        self.get_alignment(aln_type, seq1, 0..seq1.len(), seq2, 0..seq2.len())
    }

    /// Cost of the alignment of the computed sub-ranges truncated at `end1` and `end2`, with
    /// the terminal cell chosen by the alignment type of the last computation. Passing the
    /// ends of the computed sub-ranges yields the cost of the optimal alignment.
    ///
    /// Requires a successful [`Self::compute_alignment`] on this instance. With a band, cells
    /// outside the band report an infinite cost.
    pub fn get_cost(&self, end1: usize, end2: usize) -> Result<Cost, AlignError> {
        let region = self.computed.ok_or(AlignError::NotComputed)?;

        if end1 < region.start1 || end1 > region.end1 {
            return Err(AlignError::InvalidRange { start: region.start1, end: end1, len: region.end1 });
        }

        if end2 < region.start2 || end2 > region.end2 {
            return Err(AlignError::InvalidRange { start: region.start2, end: end2, len: region.end2 });
        }

        let policy = BoundaryPolicy::new(region.aln_type);
        let (i, j) = policy.terminal_cell(&self.matrices.m, end1 - region.start1, end2 - region.start2);

        Ok(self.matrices.m.get(i, j))
    }
}

fn check_range(range: &Range<usize>, len: usize) -> Result<(), AlignError> {
    if range.start > range.end || range.end > len {
        return Err(AlignError::InvalidRange { start: range.start, end: range.end, len });
    }

    Ok(())
}
