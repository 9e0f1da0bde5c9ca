//! Enumerate all co-optimal alignments by retracing every cost-preserving
//! edge from `(n, m)` back to `(0, 0)`.
//!
//! Each visited state computes its valid incoming [`Step`]s once. The
//! enumeration is driven by an explicit stack of `(state, partial ops)` pairs,
//! so the recursion depth never grows with the sequence length.
//!
//! Gap runs are always traced as maximal runs: after leaving a gap layer
//! through [`Step::Open`], the main-layer state may not [`Step::Close`] into
//! the same layer again. Two adjacent runs of one layer spell the same
//! columns as their merge, and cost no less. This makes traced paths and
//! alignments one-to-one, also when opening a gap is free.
//!
//! NOTE: The number of co-optimal alignments is not polynomially bounded. Use
//! [`backtrack_limited`] when the inputs are large or highly repetitive.

use crate::nw::{add, AffineCostState, CostMatrix, CostStructure, INF};
use coopt_types::*;
use smallvec::{smallvec, SmallVec};

/// An edge into a state of the edit graph, seen from its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Match or substitution from `(i-1, j-1)`.
    Diagonal,
    /// Linear cost deletion from `(i-1, j)`.
    Up,
    /// Linear cost insertion from `(i, j-1)`.
    Left,
    /// From the gap layer at the same position into the main layer. Consumes
    /// no symbols.
    Close(AffineLayerType),
    /// Extend the gap: from the same gap layer, one symbol earlier.
    Extend(AffineLayerType),
    /// Open the gap: from the main layer, one symbol earlier.
    Open(AffineLayerType),
}

pub type Steps = SmallVec<[Step; 3]>;

impl Step {
    /// The state this edge starts in.
    #[inline]
    pub fn parent(&self, st: State) -> State {
        let State { i, j, layer } = st;
        match *self {
            Step::Diagonal => State::new(i - 1, j - 1, None),
            Step::Up => State::new(i - 1, j, None),
            Step::Left => State::new(i, j - 1, None),
            Step::Close(l) => State::new(i, j, Some(l)),
            Step::Extend(l) => {
                let (di, dj) = l.delta();
                State::new(i - di, j - dj, layer)
            }
            Step::Open(l) => {
                let (di, dj) = l.delta();
                State::new(i - di, j - dj, None)
            }
        }
    }

    /// The alignment column emitted by this edge, if any.
    #[inline]
    pub fn op(&self, a: &Sequence, b: &Sequence, st: State) -> Option<AlignOp> {
        Some(match *self {
            Step::Diagonal => {
                if a.ranks()[st.i - 1] == b.ranks()[st.j - 1] {
                    AlignOp::Match
                } else {
                    AlignOp::Sub
                }
            }
            Step::Up => AlignOp::Del,
            Step::Left => AlignOp::Ins,
            Step::Close(_) => return None,
            Step::Extend(l) | Step::Open(l) => match l {
                InsertLayer => AlignOp::Ins,
                DeleteLayer => AlignOp::Del,
            },
        })
    }
}

/// A filled DP table that can report the tight incoming edges of a state.
pub trait Traceback {
    /// `(n, m)`: the lengths of the sequences the table was built for.
    fn dims(&self) -> (usize, usize);

    /// The optimal cost.
    fn cost(&self) -> Cost;

    /// All incoming edges `p -> st` with `cost(p) + edge == cost(st)`.
    ///
    /// Every state on an optimal path has at least one, except `(0, 0)` in
    /// the main layer.
    fn parents(&self, a: &Sequence, b: &Sequence, st: State) -> Steps;
}

impl Traceback for CostMatrix {
    fn dims(&self) -> (usize, usize) {
        CostMatrix::dims(self)
    }

    fn cost(&self) -> Cost {
        CostMatrix::cost(self)
    }

    fn parents(&self, a: &Sequence, b: &Sequence, State { i, j, layer }: State) -> Steps {
        debug_assert!(layer.is_none());
        let c = self.grid();
        let g = self.penalty();
        let cur = c[(i, j)];
        let mut steps = Steps::new();
        if i > 0 && j > 0 {
            let sub = self.matrix().sub(a.ranks()[i - 1], b.ranks()[j - 1]);
            if cur == c[(i - 1, j - 1)] + sub {
                steps.push(Step::Diagonal);
            }
        }
        if i > 0 && cur == c[(i - 1, j)] + g {
            steps.push(Step::Up);
        }
        if j > 0 && cur == c[(i, j - 1)] + g {
            steps.push(Step::Left);
        }
        steps
    }
}

impl Traceback for AffineCostState {
    fn dims(&self) -> (usize, usize) {
        AffineCostState::dims(self)
    }

    fn cost(&self) -> Cost {
        AffineCostState::cost(self)
    }

    fn parents(&self, a: &Sequence, b: &Sequence, st: State) -> Steps {
        let State { i, j, layer } = st;
        let s = self.s();
        match layer {
            None => {
                let cur = s[(i, j)];
                let mut steps = Steps::new();
                if cur >= INF {
                    return steps;
                }
                if i > 0 && j > 0 {
                    let sub = self.matrix().sub(a.ranks()[i - 1], b.ranks()[j - 1]);
                    if cur == add(s[(i - 1, j - 1)], sub) {
                        steps.push(Step::Diagonal);
                    }
                }
                // Gap runs ending here: O(1) through the D/I grids instead of
                // scanning all run lengths.
                if i > 0 && cur == self.d()[(i, j)] {
                    steps.push(Step::Close(DeleteLayer));
                }
                if j > 0 && cur == self.i()[(i, j)] {
                    steps.push(Step::Close(InsertLayer));
                }
                steps
            }
            Some(l) => {
                let grid = self.layer(layer);
                let cur = grid[(i, j)];
                let (di, dj) = l.delta();
                // Unreached cells have no tight parents.
                if cur >= INF || i < di || j < dj {
                    return smallvec![];
                }
                let (pi, pj) = (i - di, j - dj);
                let mut steps: Steps = smallvec![];
                if cur == add(s[(pi, pj)], self.open() + self.extend()) {
                    steps.push(Step::Open(l));
                }
                if cur == add(grid[(pi, pj)], self.extend()) {
                    steps.push(Step::Extend(l));
                }
                steps
            }
        }
    }
}

/// How many distinct alignments to enumerate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceLimit {
    /// Exhaustive enumeration.
    #[default]
    All,
    /// Stop after this many distinct alignments.
    AtMost(usize),
}

impl TraceLimit {
    fn reached(&self, cnt: usize) -> bool {
        match *self {
            TraceLimit::All => false,
            TraceLimit::AtMost(k) => cnt >= k,
        }
    }
}

/// One entry of the enumeration stack.
struct Partial {
    st: State,
    /// Set when `st` was entered through `Open(l)`: `Close(l)` is not allowed.
    opened: Option<AffineLayerType>,
    /// Ops from `st` to the end, in reverse.
    ops: Vec<AlignOp>,
}

/// The steps out of `st` that continue a path of maximal gap runs.
///
/// `Open(l)` is dropped when its main-layer parent could only continue by
/// closing into `l` again, so every pushed state reaches `(0, 0)`.
fn maximal_steps<T: Traceback>(
    table: &T,
    a: &Sequence,
    b: &Sequence,
    st: State,
    opened: Option<AffineLayerType>,
) -> Steps {
    let start = State::new(0, 0, None);
    let mut steps = table.parents(a, b, st);
    steps.retain(|step| match *step {
        Step::Close(l) => opened != Some(l),
        Step::Open(l) => {
            let p = step.parent(st);
            p == start
                || table
                    .parents(a, b, p)
                    .iter()
                    .any(|s| *s != Step::Close(l))
        }
        _ => true,
    });
    steps
}

/// Enumerate the distinct optimal alignments of `a` and `b` in `table`.
///
/// With [`TraceLimit::AtMost`], `truncated` is set only when one more
/// distinct alignment exists.
pub fn enumerate<T: Traceback>(
    table: &T,
    a: &Sequence,
    b: &Sequence,
    limit: TraceLimit,
) -> AlignmentSet {
    let (n, m) = table.dims();
    assert_eq!(
        (a.len(), b.len()),
        (n, m),
        "Sequences do not match the dimensions of the cost table."
    );
    let start = State::new(0, 0, None);
    let end = State::new(n, m, None);

    let mut set = AlignmentSet {
        cost: table.cost(),
        alignments: vec![],
        truncated: false,
    };

    let mut stack = vec![Partial {
        st: end,
        opened: None,
        ops: Vec::with_capacity(n + m),
    }];
    let mut visited = 0usize;

    while let Some(Partial { st, opened, mut ops }) = stack.pop() {
        visited += 1;
        if st == start {
            if limit.reached(set.alignments.len()) {
                set.truncated = true;
                break;
            }
            ops.reverse();
            set.alignments.push(Alignment::from_ops(a, b, ops));
            continue;
        }

        let steps = maximal_steps(table, a, b, st, opened);
        assert!(
            !steps.is_empty(),
            "No tight parent for {st:?} at cost {}",
            table.cost()
        );
        // Push in reverse so the first step is explored first, and move the
        // partial ops into the last branch instead of cloning them.
        let mut steps = steps.into_iter().rev().peekable();
        while let Some(step) = steps.next() {
            let mut ops = if steps.peek().is_some() {
                ops.clone()
            } else {
                std::mem::take(&mut ops)
            };
            ops.extend(step.op(a, b, st));
            stack.push(Partial {
                st: step.parent(st),
                opened: match step {
                    Step::Open(l) => Some(l),
                    _ => None,
                },
                ops,
            });
        }
    }

    log::debug!(
        "traced {} alignments of cost {} over {visited} states",
        set.alignments.len(),
        set.cost
    );
    if set.truncated {
        log::warn!(
            "stopped after {} alignments; more optimal alignments exist",
            set.alignments.len()
        );
    }
    set
}

/// All distinct alignments of optimal cost.
pub fn backtrack(cost: &CostStructure, a: &Sequence, b: &Sequence) -> AlignmentSet {
    backtrack_limited(cost, a, b, TraceLimit::All)
}

/// At most `limit` distinct alignments of optimal cost.
pub fn backtrack_limited(
    cost: &CostStructure,
    a: &Sequence,
    b: &Sequence,
    limit: TraceLimit,
) -> AlignmentSet {
    match cost {
        CostStructure::Linear(c) => enumerate(c, a, b, limit),
        CostStructure::Affine(c) => enumerate(c, a, b, limit),
    }
}

/// A single optimal alignment, found in `O(n + m)` steps.
pub fn backtrack_one(cost: &CostStructure, a: &Sequence, b: &Sequence) -> Alignment {
    let mut set = backtrack_limited(cost, a, b, TraceLimit::AtMost(1));
    // Every table has at least one optimal path.
    set.alignments.swap_remove(0)
}
