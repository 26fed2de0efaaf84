use crate::aligner::AlignmentType;
use crate::aligner::band::Band;
use crate::aligner::matrix::{DpMatrix, MatrixStore};
use crate::aligner::scoring::{Cost, GapCosts};

/// Row/column initialization and terminal cell selection for an alignment type.
///
/// Row 0 of the DP matrix holds alignments that consumed a prefix of sequence 2 only, column
/// 0 those that consumed a prefix of sequence 1 only. A free edge is initialized with cost 0
/// instead of an accumulated gap cost. Free trailing edges are handled during the fill: gaps
/// along the last row (or last column) cost nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryPolicy {
    pub free_leading_seq2: bool,
    pub free_leading_seq1: bool,
    pub free_trailing_seq2: bool,
    pub free_trailing_seq1: bool,

    /// Local alignment: a cell never costs more than starting a new alignment
    pub restart: bool,
}

impl BoundaryPolicy {
    pub fn new(aln_type: AlignmentType) -> Self {
        match aln_type {
            AlignmentType::Global => Self {
                free_leading_seq2: false,
                free_leading_seq1: false,
                free_trailing_seq2: false,
                free_trailing_seq1: false,
                restart: false,
            },
            AlignmentType::SemiGlobal => Self {
                free_leading_seq2: true,
                free_leading_seq1: false,
                free_trailing_seq2: true,
                free_trailing_seq1: false,
                restart: false,
            },
            AlignmentType::FreeShift => Self {
                free_leading_seq2: true,
                free_leading_seq1: true,
                free_trailing_seq2: true,
                free_trailing_seq1: true,
                restart: false,
            },
            AlignmentType::Local => Self {
                free_leading_seq2: true,
                free_leading_seq1: true,
                free_trailing_seq2: false,
                free_trailing_seq1: false,
                restart: true,
            },
        }
    }

    /// Horizontal gaps are free in the last row if trailing sequence 2 residues are free
    #[inline(always)]
    pub fn horizontal_gap_free(&self, i: usize, len1: usize) -> bool {
        self.free_trailing_seq2 && i == len1
    }

    #[inline(always)]
    pub fn vertical_gap_free(&self, j: usize, len2: usize) -> bool {
        self.free_trailing_seq1 && j == len2
    }

    /// Initialize row 0 and column 0 of the single matrix used with linear gap costs.
    pub fn init_linear(&self, store: &mut MatrixStore, band: &Band, gaps: GapCosts) {
        let m = &mut store.m;
        m.set(0, 0, 0.0);

        for j in band.columns(0).skip(1) {
            m.set(0, j, self.leading_cost(self.free_leading_seq2, j, gaps));
        }

        for i in 1..m.rows() {
            if !band.contains(i, 0) {
                break;
            }

            m.set(i, 0, self.leading_cost(self.free_leading_seq1, i, gaps));
        }
    }

    /// Initialize row 0 and column 0 of the three matrices used with affine gap costs. Gap
    /// matrices stay unreachable on an edge unless that edge accumulates gap costs.
    pub fn init_affine(&self, store: &mut MatrixStore, band: &Band, gaps: GapCosts) {
        store.m.set(0, 0, 0.0);

        for j in band.columns(0).skip(1) {
            let cost = self.leading_cost(self.free_leading_seq2, j, gaps);
            store.m.set(0, j, cost);

            if !self.free_leading_seq2 {
                store.iy.set(0, j, cost);
            }
        }

        for i in 1..store.m.rows() {
            if !band.contains(i, 0) {
                break;
            }

            let cost = self.leading_cost(self.free_leading_seq1, i, gaps);
            store.m.set(i, 0, cost);

            if !self.free_leading_seq1 {
                store.ix.set(i, 0, cost);
            }
        }
    }

    #[inline]
    fn leading_cost(&self, free: bool, length: usize, gaps: GapCosts) -> Cost {
        if free {
            0.0
        } else {
            gaps.gap_open_cost(length)
        }
    }

    /// The cell traceback starts from, restricted to the top-left `(len1 + 1) x (len2 + 1)`
    /// block of the matrix.
    pub fn terminal_cell(&self, m: &DpMatrix, len1: usize, len2: usize) -> (usize, usize) {
        if self.restart {
            m.argmin(len1 + 1, len2 + 1)
        } else {
            (len1, len2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_init() {
        let gaps = GapCosts::Linear { gap: 2.0 };
        let band = Band::new(None, 2, 3).unwrap();
        let mut store = MatrixStore::new();
        store.reset_or_resize(3, 4, false);

        BoundaryPolicy::new(AlignmentType::Global).init_linear(&mut store, &band, gaps);
        assert_eq!(store.m().get(0, 3), 6.0);
        assert_eq!(store.m().get(2, 0), 4.0);
        assert!(store.m().get(1, 1).is_infinite());
    }

    #[test]
    fn test_semi_global_init() {
        let gaps = GapCosts::Affine { open: 3.0, elongate: 1.0 };
        let band = Band::new(None, 3, 2).unwrap();
        let mut store = MatrixStore::new();
        store.reset_or_resize(4, 3, true);

        BoundaryPolicy::new(AlignmentType::SemiGlobal).init_affine(&mut store, &band, gaps);
        assert_eq!(store.m().get(0, 2), 0.0);
        assert!(store.iy().get(0, 2).is_infinite());
        assert_eq!(store.m().get(3, 0), 5.0);
        assert_eq!(store.ix().get(3, 0), 5.0);
        assert!(store.iy().get(3, 0).is_infinite());
    }

    #[test]
    fn test_banded_init_leaves_outside_unreachable() {
        let gaps = GapCosts::Linear { gap: 1.0 };
        let band = Band::new(Some(1), 4, 4).unwrap();
        let mut store = MatrixStore::new();
        store.reset_or_resize(5, 5, false);

        BoundaryPolicy::new(AlignmentType::FreeShift).init_linear(&mut store, &band, gaps);
        assert_eq!(store.m().get(0, 1), 0.0);
        assert_eq!(store.m().get(1, 0), 0.0);
        assert!(store.m().get(0, 2).is_infinite());
        assert!(store.m().get(2, 0).is_infinite());
    }

    #[test]
    fn test_free_trailing_edges() {
        let free_shift = BoundaryPolicy::new(AlignmentType::FreeShift);
        assert!(free_shift.horizontal_gap_free(5, 5));
        assert!(!free_shift.horizontal_gap_free(4, 5));
        assert!(free_shift.vertical_gap_free(3, 3));

        let semi_global = BoundaryPolicy::new(AlignmentType::SemiGlobal);
        assert!(semi_global.horizontal_gap_free(5, 5));
        assert!(!semi_global.vertical_gap_free(3, 3));

        let local = BoundaryPolicy::new(AlignmentType::Local);
        assert!(!local.horizontal_gap_free(5, 5));
        assert!(local.restart);
    }
}
