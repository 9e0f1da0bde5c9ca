//! Needleman-Wunsch DP over the full `(n+1) x (m+1)` rectangle.
//!
//! `linear` fills a single cost grid, `affine` fills the three coupled
//! `S`/`D`/`I` grids. Both keep every cell so that all co-optimal
//! alignments can be traced afterwards.

use coopt_types::*;
use std::ops::{Index, IndexMut};

pub mod affine;
pub mod linear;

pub use affine::AffineCostState;
pub use linear::CostMatrix;

/// Sentinel for cells that have not been reached.
pub const INF: Cost = Cost::MAX / 2;

/// `c + x`, keeping `INF` as an absorbing value.
#[inline]
pub(crate) fn add(c: Cost, x: Cost) -> Cost {
    if c >= INF {
        INF
    } else {
        c + x
    }
}

/// A dense row-major grid of costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cost>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, value: Cost) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Out-of-bound lookups return `None`.
    pub fn get(&self, i: usize, j: usize) -> Option<Cost> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[Cost] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// The bottom-right cell.
    pub fn last(&self) -> Cost {
        self[(self.rows - 1, self.cols - 1)]
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cost;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        debug_assert!(j < self.cols);
        &self.cells[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Cost {
        debug_assert!(j < self.cols);
        &mut self.cells[i * self.cols + j]
    }
}

/// The filled DP table(s) for one pair of sequences, together with the
/// costs they were computed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CostStructure {
    Linear(CostMatrix),
    Affine(AffineCostState),
}

impl CostStructure {
    /// The optimal global alignment cost.
    pub fn cost(&self) -> Cost {
        match self {
            CostStructure::Linear(c) => c.cost(),
            CostStructure::Affine(c) => c.cost(),
        }
    }

    /// `(n, m)`: the lengths of the two aligned sequences.
    pub fn dims(&self) -> (usize, usize) {
        match self {
            CostStructure::Linear(c) => c.dims(),
            CostStructure::Affine(c) => c.dims(),
        }
    }

    pub fn scoring(&self) -> Scoring {
        match self {
            CostStructure::Linear(c) => Scoring {
                matrix: *c.matrix(),
                gap: GapModel::Linear {
                    penalty: c.penalty(),
                },
            },
            CostStructure::Affine(c) => Scoring {
                matrix: *c.matrix(),
                gap: GapModel::Affine {
                    open: c.open(),
                    extend: c.extend(),
                },
            },
        }
    }
}

/// Fill the DP table(s) for aligning `a` to `b` under `scoring`.
pub fn compute_cost(a: &Sequence, b: &Sequence, scoring: &Scoring) -> CostStructure {
    match scoring.gap {
        GapModel::Linear { penalty } => {
            CostStructure::Linear(CostMatrix::compute(a, b, scoring.matrix, penalty))
        }
        GapModel::Affine { open, extend } => {
            CostStructure::Affine(AffineCostState::compute(a, b, scoring.matrix, open, extend))
        }
    }
}
