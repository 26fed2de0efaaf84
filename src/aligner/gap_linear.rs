use crate::aligner::band::Band;
use crate::aligner::matrix::{DpMatrix, MatrixStore};
use crate::aligner::scoring::{Cost, CostModel};
use crate::aligner::DpContext;
use crate::sequence::Sequence;

/// The predecessor of a cell in the single linear gap cost matrix
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LinearStep {
    Diagonal,
    Horizontal,
    Vertical,

    /// Local alignment starts at this cell
    Restart,
}

/// Compute interior cell `(i, j)` from its three neighbours. Ties prefer diagonal over
/// horizontal over vertical.
#[inline]
pub(crate) fn linear_cell<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    m: &DpMatrix,
    i: usize,
    j: usize,
) -> (Cost, LinearStep)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let gap = ctx.gaps.elongate_cost();
    let horizontal_gap = if ctx.policy.horizontal_gap_free(i, ctx.len1) { 0.0 } else { gap };
    let vertical_gap = if ctx.policy.vertical_gap_free(j, ctx.len2) { 0.0 } else { gap };

    let mut best = (m.get(i - 1, j - 1) + ctx.substitution(i, j), LinearStep::Diagonal);

    let horizontal = m.get(i, j - 1) + horizontal_gap;
    if horizontal < best.0 {
        best = (horizontal, LinearStep::Horizontal);
    }

    let vertical = m.get(i - 1, j) + vertical_gap;
    if vertical < best.0 {
        best = (vertical, LinearStep::Vertical);
    }

    if ctx.policy.restart && best.0 > 0.0 {
        best = (0.0, LinearStep::Restart);
    }

    best
}

/// Needleman-Wunsch fill of all cells within the band.
pub(crate) fn fill<C, S1, S2>(ctx: &DpContext<'_, C, S1, S2>, store: &mut MatrixStore, band: &Band)
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    ctx.policy.init_linear(store, band, ctx.gaps);

    let m = &mut store.m;
    for i in 1..=ctx.len1 {
        for j in band.columns(i) {
            if j == 0 {
                continue;
            }

            let (value, _) = linear_cell(ctx, m, i, j);
            m.set(i, j, value);
        }
    }
}
