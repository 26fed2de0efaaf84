use tracing::trace;

use crate::aligner::alignment::AlignedPair;
use crate::aligner::gap_affine::{self, GapStep, MatchStep};
use crate::aligner::gap_linear::{self, LinearStep};
use crate::aligner::matrix::MatrixStore;
use crate::aligner::scoring::CostModel;
use crate::aligner::DpContext;
use crate::sequence::Sequence;

/// An optimal path through the DP matrices, from its first to its last cell.
#[derive(Clone, Debug)]
pub(crate) struct TracedPath {
    pub pairs: Vec<AlignedPair>,
    pub matches: usize,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

/// Which affine matrix the traceback currently walks
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AffineState {
    Match,
    Ix,
    Iy,
}

/// Collects aligned pairs while walking backwards from the terminal cell.
struct PathBuilder<'a, 'c, C, S1: ?Sized, S2: ?Sized> {
    ctx: &'a DpContext<'c, C, S1, S2>,
    pairs: Vec<AlignedPair>,
    matches: usize,
    i: usize,
    j: usize,
    end: (usize, usize),
}

impl<'a, 'c, C, S1, S2> PathBuilder<'a, 'c, C, S1, S2>
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    fn new(ctx: &'a DpContext<'c, C, S1, S2>, terminal: (usize, usize)) -> Self {
        Self {
            ctx,
            pairs: Vec::with_capacity(terminal.0 + terminal.1),
            matches: 0,
            i: terminal.0,
            j: terminal.1,
            end: terminal,
        }
    }

    #[inline]
    fn at_origin(&self) -> bool {
        self.i == 0 && self.j == 0
    }

    #[inline]
    fn on_edge(&self) -> bool {
        self.i == 0 || self.j == 0
    }

    fn diagonal(&mut self) {
        let pos1 = self.ctx.offset1 + self.i - 1;
        let pos2 = self.ctx.offset2 + self.j - 1;

        if self.ctx.seq1.symbol(pos1) == self.ctx.seq2.symbol(pos2) {
            self.matches += 1;
        }

        self.pairs.push(AlignedPair::new(Some(pos1), Some(pos2)));
        self.i -= 1;
        self.j -= 1;
    }

    /// Consume `seq2[j - 1]` against a gap in sequence 1
    fn horizontal(&mut self) {
        self.pairs.push(AlignedPair::new(None, Some(self.ctx.offset2 + self.j - 1)));
        self.j -= 1;
    }

    /// Consume `seq1[i - 1]` against a gap in sequence 2
    fn vertical(&mut self) {
        self.pairs.push(AlignedPair::new(Some(self.ctx.offset1 + self.i - 1), None));
        self.i -= 1;
    }

    /// Row 0 and column 0 hold leading gaps only.
    fn walk_edge(&mut self) {
        while self.j > 0 && self.i == 0 {
            self.horizontal();
        }

        while self.i > 0 && self.j == 0 {
            self.vertical();
        }
    }

    fn finish(mut self) -> TracedPath {
        self.pairs.reverse();

        trace!(start = ?(self.i, self.j), end = ?self.end, columns = self.pairs.len(), "traceback done");

        TracedPath {
            pairs: self.pairs,
            matches: self.matches,
            start: (self.i, self.j),
            end: self.end,
        }
    }
}

/// Walk back from `terminal` through the linear gap cost matrix, re-evaluating each cell's
/// recurrence to find its predecessor.
pub(crate) fn traceback_linear<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    store: &MatrixStore,
    terminal: (usize, usize),
) -> TracedPath
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let m = &store.m;
    let mut path = PathBuilder::new(ctx, terminal);

    while !path.at_origin() {
        if ctx.policy.restart && m.get(path.i, path.j) >= 0.0 {
            break;
        }

        if path.on_edge() {
            path.walk_edge();
            break;
        }

        match gap_linear::linear_cell(ctx, m, path.i, path.j).1 {
            LinearStep::Diagonal => path.diagonal(),
            LinearStep::Horizontal => path.horizontal(),
            LinearStep::Vertical => path.vertical(),
            LinearStep::Restart => break,
        }
    }

    path.finish()
}

/// Walk back from `terminal` through the three affine gap cost matrices.
pub(crate) fn traceback_affine<C, S1, S2>(
    ctx: &DpContext<'_, C, S1, S2>,
    store: &MatrixStore,
    terminal: (usize, usize),
) -> TracedPath
where
    C: CostModel,
    S1: Sequence + ?Sized,
    S2: Sequence + ?Sized,
{
    let mut path = PathBuilder::new(ctx, terminal);
    let mut state = AffineState::Match;

    while !path.at_origin() {
        match state {
            AffineState::Match => {
                if ctx.policy.restart && store.m.get(path.i, path.j) >= 0.0 {
                    break;
                }

                if path.on_edge() {
                    path.walk_edge();
                    break;
                }

                match gap_affine::m_cell(ctx, store, path.i, path.j).1 {
                    MatchStep::Diagonal => path.diagonal(),
                    MatchStep::FromIy => state = AffineState::Iy,
                    MatchStep::FromIx => state = AffineState::Ix,
                    MatchStep::Restart => break,
                }
            },
            AffineState::Iy => {
                let (_, step) = gap_affine::iy_cell(ctx, store, path.i, path.j);
                path.horizontal();

                if step == GapStep::Open {
                    state = AffineState::Match;
                }
            },
            AffineState::Ix => {
                let (_, step) = gap_affine::ix_cell(ctx, store, path.i, path.j);
                path.vertical();

                if step == GapStep::Open {
                    state = AffineState::Match;
                }
            },
        }
    }

    path.finish()
}
