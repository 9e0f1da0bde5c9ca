//! Exact global pairwise alignment of nucleotide sequences under linear and
//! affine gap costs, returning every alignment of optimal cost.
//!
//! ```
//! use coopt_aligner::*;
//!
//! let a: Sequence = "aataat".parse().unwrap();
//! let b: Sequence = "aagg".parse().unwrap();
//! let scoring = Scoring::linear(5).unwrap();
//! let cost = compute_cost(&a, &b, &scoring);
//! let alignments = backtrack(&cost, &a, &b);
//! assert_eq!(alignments.cost, 14);
//! assert!(alignments.contains("aataat", "aa-gg-"));
//! assert_eq!(count_paths(a.len(), b.len()).to_string(), "1289");
//! ```

pub mod cli;
pub mod config;
pub mod count;
pub mod nw;
pub mod report;
pub mod trace;

#[cfg(test)]
mod tests;

// Re-export types for convenience of `use coopt_aligner::*;`.
pub use coopt_types::*;
pub use count::{count_paths, PathCounter};
pub use nw::{compute_cost, AffineCostState, CostMatrix, CostStructure};
pub use trace::{backtrack, backtrack_limited, backtrack_one, TraceLimit};

/// Fill the DP table(s) and enumerate all optimal alignments.
pub fn align(a: &Sequence, b: &Sequence, scoring: &Scoring) -> (CostStructure, AlignmentSet) {
    let cost = compute_cost(a, b, scoring);
    let alignments = backtrack(&cost, a, b);
    (cost, alignments)
}
