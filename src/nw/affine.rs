use super::{add, Grid, INF};
use coopt_types::*;
use std::cmp::min;

/// The three coupled grids of the affine (Gotoh) recurrence.
///
/// - `S`: best cost over all alignments of the prefixes.
/// - `D`: best cost ending in a deletion (gap in `b`).
/// - `I`: best cost ending in an insertion (gap in `a`).
///
/// A run of `k` gaps costs `open + k * extend`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineCostState {
    s: Grid,
    d: Grid,
    i: Grid,
    matrix: ScoreMatrix,
    open: Cost,
    extend: Cost,
}

impl AffineCostState {
    pub fn compute(
        a: &Sequence,
        b: &Sequence,
        matrix: ScoreMatrix,
        open: Cost,
        extend: Cost,
    ) -> Self {
        let (n, m) = (a.len(), b.len());
        let (ra, rb) = (a.ranks(), b.ranks());
        let mut s = Grid::new(n + 1, m + 1, INF);
        let mut d = Grid::new(n + 1, m + 1, INF);
        let mut ins = Grid::new(n + 1, m + 1, INF);
        s[(0, 0)] = 0;

        // Row 0 and column 0 are the `i == 0` and `j == 0` slices of the
        // same loop, so they are pure gap runs costed by the D/I recurrence.
        for i in 0..=n {
            for j in 0..=m {
                if i == 0 && j == 0 {
                    continue;
                }
                let mut best = INF;
                if i > 0 {
                    d[(i, j)] = min(
                        add(s[(i - 1, j)], open + extend),
                        add(d[(i - 1, j)], extend),
                    );
                    best = min(best, d[(i, j)]);
                }
                if j > 0 {
                    ins[(i, j)] = min(
                        add(s[(i, j - 1)], open + extend),
                        add(ins[(i, j - 1)], extend),
                    );
                    best = min(best, ins[(i, j)]);
                }
                if i > 0 && j > 0 {
                    best = min(
                        best,
                        add(s[(i - 1, j - 1)], matrix.sub(ra[i - 1], rb[j - 1])),
                    );
                }
                s[(i, j)] = best;
            }
        }
        log::debug!(
            "affine NW {n}x{m} (o={open}, e={extend}): cost {}",
            s[(n, m)]
        );
        Self {
            s,
            d,
            i: ins,
            matrix,
            open,
            extend,
        }
    }

    pub fn cost(&self) -> Cost {
        self.s.last()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.s.rows() - 1, self.s.cols() - 1)
    }

    /// The main layer.
    pub fn s(&self) -> &Grid {
        &self.s
    }

    /// The deletion layer.
    pub fn d(&self) -> &Grid {
        &self.d
    }

    /// The insertion layer.
    pub fn i(&self) -> &Grid {
        &self.i
    }

    /// The grid for the given layer.
    pub fn layer(&self, layer: Layer) -> &Grid {
        match layer {
            None => &self.s,
            Some(DeleteLayer) => &self.d,
            Some(InsertLayer) => &self.i,
        }
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    pub fn open(&self) -> Cost {
        self.open
    }

    pub fn extend(&self) -> Cost {
        self.extend
    }
}
