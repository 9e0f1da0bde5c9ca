use super::Grid;
use coopt_types::*;
use std::cmp::min;

/// The `(n+1) x (m+1)` cost grid under a constant per-symbol gap penalty.
///
/// `cost[i][j]` is the optimal cost of aligning `a[..i]` to `b[..j]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    grid: Grid,
    matrix: ScoreMatrix,
    penalty: Cost,
}

impl CostMatrix {
    pub fn compute(a: &Sequence, b: &Sequence, matrix: ScoreMatrix, penalty: Cost) -> Self {
        let (n, m) = (a.len(), b.len());
        let mut grid = Grid::new(n + 1, m + 1, 0);

        // Prefixes against the empty sequence.
        for j in 1..=m {
            grid[(0, j)] = j as Cost * penalty;
        }
        for (i, &ca) in a.ranks().iter().enumerate() {
            let i = i + 1;
            grid[(i, 0)] = i as Cost * penalty;
            for (j, &cb) in b.ranks().iter().enumerate() {
                let j = j + 1;
                grid[(i, j)] = min(
                    min(
                        // deletion
                        grid[(i - 1, j)] + penalty,
                        // insertion
                        grid[(i, j - 1)] + penalty,
                    ),
                    // match / substitution
                    grid[(i - 1, j - 1)] + matrix.sub(ca, cb),
                );
            }
        }
        log::debug!(
            "linear NW {n}x{m} (g={penalty}): cost {}",
            grid[(n, m)]
        );
        Self {
            grid,
            matrix,
            penalty,
        }
    }

    pub fn cost(&self) -> Cost {
        self.grid.last()
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.grid.rows() - 1, self.grid.cols() - 1)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }

    pub fn penalty(&self) -> Cost {
        self.penalty
    }
}
