use crate::aligner::band::Band;
use crate::aligner::matrix::MatrixStore;
use crate::aligner::scoring::{Cost, CostModel};
use crate::aligner::DpContext;
use crate::sequence::Sequence;

/// Predecessor of a cell in the `m` matrix
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MatchStep {
    Diagonal,

    /// The cell's best alignment ends in a horizontal gap (`iy`)
    FromIy,

    /// The cell's best alignment ends in a vertical gap (`ix`)
    FromIx,
    Restart,
}

/// Predecessor of a cell in one of the gap matrices
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum GapStep {
    /// Gap opened from the `m` matrix
    Open,

    /// Gap continued from the same gap matrix
    Elongate,
}

/// Ties open the gap from `m`, so traceback returns to the match matrix as early as possible.
#[inline(always)]
fn open_or_elongate(from_m: Cost, from_gap: Cost) -> (Cost, GapStep) {
    if from_m <= from_gap {
        (from_m, GapStep::Open)
    } else {
        (from_gap, GapStep::Elongate)
    }
}

/// Vertical gap ending at `(i, j)`, consuming `seq1[i - 1]`.
#[inline]
pub(crate) fn ix_cell<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    store: &MatrixStore,
    i: usize,
    j: usize,
) -> (Cost, GapStep)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let (open, elongate) = if ctx.policy.vertical_gap_free(j, ctx.len2) {
        (0.0, 0.0)
    } else {
        (ctx.gaps.gap_open_cost(1), ctx.gaps.elongate_cost())
    };

    open_or_elongate(store.m.get(i - 1, j) + open, store.ix.get(i - 1, j) + elongate)
}

/// Horizontal gap ending at `(i, j)`, consuming `seq2[j - 1]`.
#[inline]
pub(crate) fn iy_cell<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    store: &MatrixStore,
    i: usize,
    j: usize,
) -> (Cost, GapStep)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let (open, elongate) = if ctx.policy.horizontal_gap_free(i, ctx.len1) {
        (0.0, 0.0)
    } else {
        (ctx.gaps.gap_open_cost(1), ctx.gaps.elongate_cost())
    };

    open_or_elongate(store.m.get(i, j - 1) + open, store.iy.get(i, j - 1) + elongate)
}

/// Best cost at `(i, j)`. Requires `ix` and `iy` of the same cell to be computed. Ties
/// prefer diagonal over `iy` over `ix`. The local restart only applies to this matrix.
#[inline]
pub(crate) fn m_cell<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    store: &MatrixStore,
    i: usize,
    j: usize,
) -> (Cost, MatchStep)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let mut best = (store.m.get(i - 1, j - 1) + ctx.substitution(i, j), MatchStep::Diagonal);

    let iy = store.iy.get(i, j);
    if iy < best.0 {
        best = (iy, MatchStep::FromIy);
    }

    let ix = store.ix.get(i, j);
    if ix < best.0 {
        best = (ix, MatchStep::FromIx);
    }

    if ctx.policy.restart && best.0 > 0.0 {
        best = (0.0, MatchStep::Restart);
    }

    best
}

/// Gotoh fill of all cells within the band.
pub(crate) fn fill<C, S1, S2>(ctx: &DpContext<'_, C, S1, S2>, store: &mut MatrixStore, band: &Band)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    ctx.policy.init_affine(store, band, ctx.gaps);

    for i in 1..=ctx.len1 {
        for j in band.columns(i) {
            if j == 0 {
                continue;
            }

            let (ix, _) = ix_cell(ctx, store, i, j);
            store.ix.set(i, j, ix);

            let (iy, _) = iy_cell(ctx, store, i, j);
            store.iy.set(i, j, iy);

            let (m, _) = m_cell(ctx, store, i, j);
            store.m.set(i, j, m);
        }
    }
}
