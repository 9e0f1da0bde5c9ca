//! Number of monotone lattice paths from `(0, 0)` to `(n, m)` using
//! diagonal, vertical and horizontal unit steps (the Delannoy numbers).
//!
//! This upper bounds the number of (co-optimal) global alignments of
//! sequences of lengths `n` and `m`, independent of the costs.

use num_bigint::BigUint;
use num_traits::One;

/// Memoised Delannoy numbers.
///
/// The table is grown on demand; cells are filled in row-major order from
/// `count(i-1, j-1) + count(i-1, j) + count(i, j-1)`, with `count = 1` on
/// row and column `0`.
#[derive(Debug, Default, Clone)]
pub struct PathCounter {
    table: Vec<Vec<BigUint>>,
}

impl PathCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of computed `(i, j)` cells.
    pub fn memoized(&self) -> usize {
        self.table.iter().map(Vec::len).sum()
    }

    pub fn count(&mut self, n: usize, m: usize) -> &BigUint {
        self.grow(n, m);
        &self.table[n][m]
    }

    /// Make sure the cells `[0..=n] x [0..=m]` are present.
    fn grow(&mut self, n: usize, m: usize) {
        let cols = self.table.first().map_or(0, Vec::len).max(m + 1);
        let rows = self.table.len().max(n + 1);
        for i in 0..rows {
            if i == self.table.len() {
                self.table.push(Vec::with_capacity(cols));
            }
            for j in self.table[i].len()..cols {
                let v = if i == 0 || j == 0 {
                    BigUint::one()
                } else {
                    let prev = &self.table[i - 1];
                    &prev[j - 1] + &prev[j] + &self.table[i][j - 1]
                };
                self.table[i].push(v);
            }
        }
    }
}

/// `count_paths(n, m)` without keeping the memo around.
///
/// Only two rows are kept, so this takes `O(min(n, m))` big integers.
pub fn count_paths(n: usize, m: usize) -> BigUint {
    let (n, m) = if n < m { (m, n) } else { (n, m) };
    let mut prev = vec![BigUint::one(); m + 1];
    let mut next = prev.clone();
    for _ in 0..n {
        for j in 1..=m {
            next[j] = &prev[j - 1] + &prev[j] + &next[j - 1];
        }
        std::mem::swap(&mut prev, &mut next);
    }
    log::trace!("count_paths({n}, {m}) has {} bits", prev[m].bits());
    prev.swap_remove(m)
}
