use crate::{Cost, Sequence, GAP};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write};

/// One column of an alignment.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum AlignOp {
    Match,
    Sub,
    /// Gap in the first sequence.
    Ins,
    /// Gap in the second sequence.
    Del,
}

impl AlignOp {
    pub fn to_char(&self) -> char {
        match self {
            AlignOp::Match => '=',
            AlignOp::Sub => 'X',
            AlignOp::Ins => 'I',
            AlignOp::Del => 'D',
        }
    }

    /// `(di, dj)` consumed by this column.
    pub fn delta(&self) -> (usize, usize) {
        match self {
            AlignOp::Match | AlignOp::Sub => (1, 1),
            AlignOp::Ins => (0, 1),
            AlignOp::Del => (1, 0),
        }
    }
}

/// A global alignment as two equal length rows over the input symbols and `-`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alignment {
    top: Vec<u8>,
    bottom: Vec<u8>,
}

impl Alignment {
    /// Spell out the alignment of `a` and `b` given by `ops`, in order.
    ///
    /// Panics when the ops do not consume both sequences exactly.
    pub fn from_ops(a: &Sequence, b: &Sequence, ops: impl IntoIterator<Item = AlignOp>) -> Self {
        let (a, b) = (a.text(), b.text());
        let mut top = Vec::with_capacity(a.len() + b.len());
        let mut bottom = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        for op in ops {
            let (di, dj) = op.delta();
            top.push(if di == 1 { a[i] } else { GAP });
            bottom.push(if dj == 1 { b[j] } else { GAP });
            i += di;
            j += dj;
        }
        assert_eq!((i, j), (a.len(), b.len()), "ops do not span both sequences");
        Self { top, bottom }
    }

    pub fn top(&self) -> &[u8] {
        &self.top
    }

    pub fn bottom(&self) -> &[u8] {
        &self.bottom
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// The rows as strings, e.g. `("aataat", "aa-gg-")`.
    pub fn to_strings(&self) -> (String, String) {
        (
            String::from_utf8_lossy(&self.top).into_owned(),
            String::from_utf8_lossy(&self.bottom).into_owned(),
        )
    }

    /// Both rows with the gap symbols removed.
    pub fn strip_gaps(&self) -> (Vec<u8>, Vec<u8>) {
        let strip = |row: &[u8]| row.iter().copied().filter(|&c| c != GAP).collect();
        (strip(&self.top), strip(&self.bottom))
    }

    /// The same alignment with the two rows swapped.
    pub fn mirrored(&self) -> Self {
        Self {
            top: self.bottom.clone(),
            bottom: self.top.clone(),
        }
    }

    pub fn ops(&self) -> impl Iterator<Item = AlignOp> + '_ {
        self.top.iter().zip(&self.bottom).map(|(&a, &b)| {
            if a == GAP {
                AlignOp::Ins
            } else if b == GAP {
                AlignOp::Del
            } else if a.eq_ignore_ascii_case(&b) {
                AlignOp::Match
            } else {
                AlignOp::Sub
            }
        })
    }

    /// Run length encoded columns, e.g. `2=1D2X1D`.
    pub fn cigar(&self) -> String {
        let mut s = String::new();
        let mut ops = self.ops().peekable();
        while let Some(op) = ops.next() {
            let mut cnt = 1;
            while ops.next_if_eq(&op).is_some() {
                cnt += 1;
            }
            write!(s, "{cnt}{}", op.to_char()).unwrap();
        }
        s
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (top, bottom) = self.to_strings();
        write!(f, "{top}\n{bottom}")
    }
}

impl Serialize for Alignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_strings().serialize(serializer)
    }
}

/// All distinct alignments of optimal cost, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentSet {
    pub cost: Cost,
    pub alignments: Vec<Alignment>,
    /// Set when enumeration stopped at a caller supplied limit.
    pub truncated: bool,
}

impl AlignmentSet {
    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alignment> {
        self.alignments.iter()
    }

    pub fn contains(&self, top: &str, bottom: &str) -> bool {
        self.alignments
            .iter()
            .any(|a| a.top() == top.as_bytes() && a.bottom() == bottom.as_bytes())
    }

    /// The alignments as pairs of strings.
    pub fn to_strings(&self) -> Vec<(String, String)> {
        self.alignments.iter().map(Alignment::to_strings).collect()
    }
}

impl<'a> IntoIterator for &'a AlignmentSet {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}
