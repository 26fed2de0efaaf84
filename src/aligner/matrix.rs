use tracing::trace;

use crate::aligner::scoring::{Cost, UNREACHABLE};

/// Dense row-major DP matrix. Cells that are never computed keep the value `UNREACHABLE`.
#[derive(Clone, Debug, Default)]
pub struct DpMatrix {
    values: Vec<Cost>,
    rows: usize,
    cols: usize,
}

impl DpMatrix {
    /// Resize to `rows x cols` and mark every cell unreachable. Existing allocations are
    /// reused when large enough.
    fn reset(&mut self, rows: usize, cols: usize) -> bool {
        let size = rows * cols;
        let grows = size > self.values.capacity();

        self.values.clear();
        self.values.resize(size, UNREACHABLE);
        self.rows = rows;
        self.cols = cols;

        grows
    }

    fn release(&mut self) {
        self.values.clear();
        self.rows = 0;
        self.cols = 0;
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> Cost {
        self.values[i * self.cols + j]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: Cost) {
        self.values[i * self.cols + j] = value;
    }

    /// Position of the minimum value within the top-left `rows x cols` block. Ties resolve to
    /// the first cell in row-major order.
    pub fn argmin(&self, rows: usize, cols: usize) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_value = self.get(0, 0);

        for i in 0..rows {
            for j in 0..cols {
                let value = self.get(i, j);
                if value < best_value {
                    best_value = value;
                    best = (i, j);
                }
            }
        }

        best
    }
}

/// Owns the DP matrices of an aligner: `m` holds the best cost per cell, `ix` and `iy` the
/// best cost ending in a vertical or horizontal gap (only used for affine gap costs).
#[derive(Clone, Debug, Default)]
pub struct MatrixStore {
    pub(crate) m: DpMatrix,
    pub(crate) ix: DpMatrix,
    pub(crate) iy: DpMatrix,
}

impl MatrixStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the matrices for a new computation of `rows x cols` cells.
    pub fn reset_or_resize(&mut self, rows: usize, cols: usize, affine: bool) {
        let mut grown = self.m.reset(rows, cols);

        if affine {
            grown |= self.ix.reset(rows, cols);
            grown |= self.iy.reset(rows, cols);
        } else {
            self.ix.release();
            self.iy.release();
        }

        if grown {
            trace!(rows, cols, affine, "allocated DP matrices");
        }
    }

    pub fn m(&self) -> &DpMatrix {
        &self.m
    }

    pub fn ix(&self) -> &DpMatrix {
        &self.ix
    }

    pub fn iy(&self) -> &DpMatrix {
        &self.iy
    }
}
