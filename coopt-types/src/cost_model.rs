//! This module contains the substitution `ScoreMatrix`, the `GapModel`, and
//! the `Scoring` that bundles both.

use crate::{AlignError, Cost, Result, MAX_COST};
use serde::{Deserialize, Serialize};

/// An affine layer can either correspond to an insertion or deletion.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AffineLayerType {
    /// Gap in the first sequence.
    InsertLayer,
    /// Gap in the second sequence.
    DeleteLayer,
}

impl AffineLayerType {
    /// `(di, dj)` of one gap symbol in this layer.
    pub fn delta(&self) -> (usize, usize) {
        match self {
            InsertLayer => (0, 1),
            DeleteLayer => (1, 0),
        }
    }
}

pub use AffineLayerType::*;

/// A single cost parameter must lie in `0..=MAX_COST`.
fn check_cost(what: &'static str, value: Cost) -> Result<()> {
    if value < 0 {
        Err(AlignError::NegativeCost { what, value })
    } else if value > MAX_COST {
        Err(AlignError::CostTooLarge { what, value })
    } else {
        Ok(())
    }
}

/// Substitution costs between the four nucleotides, indexed by rank.
///
/// Costs are minimised, so a match is usually 0. The matrix does not have
/// to be symmetric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[[Cost; 4]; 4]", into = "[[Cost; 4]; 4]")]
pub struct ScoreMatrix {
    costs: [[Cost; 4]; 4],
}

impl ScoreMatrix {
    pub fn new(costs: [[Cost; 4]; 4]) -> Result<Self> {
        for &value in costs.iter().flatten() {
            check_cost("substitution cost", value)?;
        }
        Ok(Self { costs })
    }

    /// Transitions (A<->G, C<->T) cost 2, transversions 5, matches 0.
    pub const fn transition_transversion() -> Self {
        Self {
            costs: [[0, 5, 2, 5], [5, 0, 5, 2], [2, 5, 0, 5], [5, 2, 5, 0]],
        }
    }

    /// Cost of substituting rank `a` by rank `b`.
    #[inline]
    pub fn sub(&self, a: u8, b: u8) -> Cost {
        self.costs[a as usize][b as usize]
    }

    /// Cost of substituting symbol `a` by symbol `b`, ignoring case.
    ///
    /// `None` when either is not a nucleotide.
    #[inline]
    pub fn sub_symbols(&self, a: u8, b: u8) -> Option<Cost> {
        Some(self.sub(crate::rank(a)?, crate::rank(b)?))
    }

    pub fn costs(&self) -> &[[Cost; 4]; 4] {
        &self.costs
    }

    pub fn is_symmetric(&self) -> bool {
        (0..4).all(|a| (0..4).all(|b| self.costs[a][b] == self.costs[b][a]))
    }

    pub fn transposed(&self) -> Self {
        let mut costs = self.costs;
        for a in 0..4 {
            for b in 0..4 {
                costs[a][b] = self.costs[b][a];
            }
        }
        Self { costs }
    }
}

impl Default for ScoreMatrix {
    fn default() -> Self {
        Self::transition_transversion()
    }
}

impl TryFrom<[[Cost; 4]; 4]> for ScoreMatrix {
    type Error = AlignError;

    fn try_from(costs: [[Cost; 4]; 4]) -> Result<Self> {
        Self::new(costs)
    }
}

impl From<ScoreMatrix> for [[Cost; 4]; 4] {
    fn from(m: ScoreMatrix) -> Self {
        m.costs
    }
}

/// How runs of gap symbols are charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum GapModel {
    /// A run of `k` gaps costs `k * penalty`.
    Linear { penalty: Cost },
    /// A run of `k` gaps costs `open + k * extend`.
    Affine { open: Cost, extend: Cost },
}

impl GapModel {
    pub fn validate(&self) -> Result<()> {
        match *self {
            GapModel::Linear { penalty } => check_cost("gap penalty", penalty),
            GapModel::Affine { open, extend } => {
                check_cost("gap open cost", open)?;
                check_cost("gap extend cost", extend)
            }
        }
    }

    /// The cost of a single run of `k` gap symbols.
    pub fn gap_cost(&self, k: usize) -> Cost {
        if k == 0 {
            return 0;
        }
        match *self {
            GapModel::Linear { penalty } => k as Cost * penalty,
            GapModel::Affine { open, extend } => open + k as Cost * extend,
        }
    }
}

impl Default for GapModel {
    fn default() -> Self {
        GapModel::Linear { penalty: 5 }
    }
}

/// The full, immutable cost model passed into the engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    pub matrix: ScoreMatrix,
    pub gap: GapModel,
}

impl Scoring {
    pub fn new(matrix: ScoreMatrix, gap: GapModel) -> Result<Self> {
        gap.validate()?;
        Ok(Self { matrix, gap })
    }

    /// Default substitution costs with a linear gap penalty.
    pub fn linear(penalty: Cost) -> Result<Self> {
        Self::new(ScoreMatrix::default(), GapModel::Linear { penalty })
    }

    /// Default substitution costs with an affine gap penalty.
    pub fn affine(open: Cost, extend: Cost) -> Result<Self> {
        Self::new(ScoreMatrix::default(), GapModel::Affine { open, extend })
    }

    /// Same gap model with the given substitution costs.
    pub fn with_matrix(self, matrix: ScoreMatrix) -> Self {
        Self { matrix, ..self }
    }

    /// Cost of a full alignment given as two equal length rows.
    ///
    /// Returns `None` when the rows are not a valid alignment.
    pub fn alignment_cost(&self, top: &[u8], bottom: &[u8]) -> Option<Cost> {
        if top.len() != bottom.len() {
            return None;
        }
        let mut cost = 0;
        // Current gap run: layer and length.
        let mut run: Option<(AffineLayerType, usize)> = None;
        for (&a, &b) in top.iter().zip(bottom) {
            let layer = match (a == crate::GAP, b == crate::GAP) {
                (true, true) => return None,
                (false, false) => {
                    cost += self.matrix.sub_symbols(a, b)?;
                    None
                }
                (true, false) => Some(InsertLayer),
                (false, true) => Some(DeleteLayer),
            };
            match (run, layer) {
                (Some((l, k)), Some(layer)) if l == layer => run = Some((l, k + 1)),
                (old, layer) => {
                    if let Some((_, k)) = old {
                        cost += self.gap.gap_cost(k);
                    }
                    run = layer.map(|l| (l, 1));
                }
            }
        }
        if let Some((_, k)) = run {
            cost += self.gap.gap_cost(k);
        }
        Some(cost)
    }
}
