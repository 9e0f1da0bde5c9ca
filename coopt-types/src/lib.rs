//! Types shared between the DP engines and their callers: sequences over the
//! nucleotide alphabet, the substitution/gap cost model, and alignments.

pub mod alignment;
pub mod cost_model;
pub mod sequence;

// Re-export types for convenience of `use coopt_types::*;`.
pub use alignment::*;
pub use cost_model::*;
pub use sequence::*;

/// The type used for all costs.
///
/// Single costs are at most [`MAX_COST`], so sums along any path that fits
/// in memory stay far below `Cost::MAX / 2`.
pub type Cost = i64;

/// Upper bound on a single substitution, gap open or gap extend cost.
pub const MAX_COST: Cost = i32::MAX as Cost;

/// The gap symbol used in alignments.
pub const GAP: u8 = b'-';

/// `None` is the main layer; `Some` is one of the two gap layers of the
/// affine model.
pub type Layer = Option<AffineLayerType>;

/// State in the edit graph: a cell of the DP grid plus the layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub i: usize,
    pub j: usize,
    pub layer: Layer,
}

impl State {
    pub fn new(i: usize, j: usize, layer: Layer) -> Self {
        Self { i, j, layer }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A sequence contains a symbol outside `ACGT` (in either case).
    #[error("unknown symbol {:?} at position {position}", char::from(*.symbol))]
    UnknownSymbol { symbol: u8, position: usize },
    /// Costs are minimised and must not be negative.
    #[error("{what} must be non-negative, got {value}")]
    NegativeCost { what: &'static str, value: Cost },
    /// Costs above [`MAX_COST`] could overflow the DP sums.
    #[error("{what} must be at most {}, got {value}", MAX_COST)]
    CostTooLarge { what: &'static str, value: Cost },
}

pub type Result<T, E = AlignError> = std::result::Result<T, E>;
