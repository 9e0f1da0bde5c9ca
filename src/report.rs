//! Text and JSON summaries of alignment results.

use crate::{count::count_paths, nw::compute_cost};
use coopt_types::*;
use itertools::Itertools;
use num_bigint::BigUint;
use serde::Serialize;
use std::fmt;

/// Width at which sequences are wrapped in reports.
pub const CHUNK_SIZE: usize = 50;
const WIDTH: usize = 80;

/// Insert a newline after every `CHUNK_SIZE` symbols.
pub fn format_seq(seq: &[u8]) -> String {
    seq.chunks(CHUNK_SIZE)
        .map(String::from_utf8_lossy)
        .join("\n")
}

/// Optimal costs between every pair of named sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreTable {
    pub names: Vec<String>,
    pub costs: Vec<Vec<Cost>>,
}

/// Align all pairs of `records` and collect the optimal costs.
///
/// The diagonal is 0 and the table is filled symmetrically, as only
/// `(i, j)` with `i < j` is aligned.
pub fn score_table(records: &[(String, Sequence)], scoring: &Scoring) -> ScoreTable {
    let k = records.len();
    let mut costs = vec![vec![0; k]; k];
    for ((i, (_, a)), (j, (_, b))) in records.iter().enumerate().tuple_combinations() {
        let c = compute_cost(a, b, scoring).cost();
        costs[i][j] = c;
        costs[j][i] = c;
    }
    log::debug!("score table over {k} sequences");
    ScoreTable {
        names: records.iter().map(|(name, _)| name.clone()).collect(),
        costs,
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_w = self.names.iter().map(String::len).max().unwrap_or(0);
        let col_w = self
            .costs
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .chain(self.names.iter().map(String::len))
            .max()
            .unwrap_or(1);
        write!(f, "{:name_w$}", "")?;
        for name in &self.names {
            write!(f, " {name:>col_w$}")?;
        }
        writeln!(f)?;
        for (name, row) in self.names.iter().zip(&self.costs) {
            write!(f, "{name:<name_w$}")?;
            for c in row {
                write!(f, " {c:>col_w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Everything reported about one aligned pair.
#[derive(Clone, Debug, Serialize)]
pub struct AlignmentReport<'a> {
    #[serde(skip)]
    pub a: &'a Sequence,
    #[serde(skip)]
    pub b: &'a Sequence,
    pub scoring: Scoring,
    #[serde(skip)]
    pub cost: Cost,
    /// Number of lattice paths for the two lengths.
    #[serde(serialize_with = "serialize_decimal")]
    pub path_bound: BigUint,
    #[serde(flatten)]
    pub alignments: &'a AlignmentSet,
}

fn serialize_decimal<S: serde::Serializer>(v: &BigUint, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&v.to_str_radix(10))
}

impl<'a> AlignmentReport<'a> {
    pub fn new(a: &'a Sequence, b: &'a Sequence, scoring: Scoring, set: &'a AlignmentSet) -> Self {
        Self {
            a,
            b,
            scoring,
            cost: set.cost,
            path_bound: count_paths(a.len(), b.len()),
            alignments: set,
        }
    }
}

impl fmt::Display for AlignmentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(WIDTH);
        writeln!(f, "{separator}")?;
        writeln!(f, "Input sequences:\n")?;
        writeln!(f, "Sequence 1 ({} bp):\n{}", self.a.len(), format_seq(self.a.text()))?;
        writeln!(f, "Sequence 2 ({} bp):\n{}", self.b.len(), format_seq(self.b.text()))?;
        writeln!(f, "{separator}")?;

        writeln!(f, "Parameters:\n")?;
        match self.scoring.gap {
            GapModel::Linear { penalty } => writeln!(f, "Gap cost: g(k) = {penalty}k")?,
            GapModel::Affine { open, extend } => {
                writeln!(f, "Gap cost: g(k) = {open} + {extend}k")?
            }
        }
        writeln!(f, "Score matrix:")?;
        writeln!(f, "   {}", ALPHABET.iter().map(|&c| format!("{:>3}", c as char)).join(""))?;
        for (&c, row) in ALPHABET.iter().zip(self.scoring.matrix.costs()) {
            writeln!(f, "{:>3}{}", c as char, row.iter().map(|v| format!("{v:>3}")).join(""))?;
        }
        writeln!(f, "{separator}")?;

        writeln!(f, "Optimal cost: {}", self.cost)?;
        let more = if self.alignments.truncated { "+" } else { "" };
        writeln!(f, "Optimal alignments: {}{more}", self.alignments.len())?;
        writeln!(f, "Alignment bound (Delannoy): {}", self.path_bound)?;
        if let Some(aln) = self.alignments.alignments.first() {
            writeln!(f, "{separator}")?;
            writeln!(f, "Optimal alignment ({}):\n", aln.cigar())?;
            writeln!(f, "Aligned sequence 1 ({} columns):\n{}", aln.len(), format_seq(aln.top()))?;
            writeln!(f, "Aligned sequence 2 ({} columns):\n{}", aln.len(), format_seq(aln.bottom()))?;
        }
        write!(f, "{separator}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align;

    fn records() -> Vec<(String, Sequence)> {
        [("seq1", "aataat"), ("seq2", "aagg"), ("seq3", "aataat")]
            .into_iter()
            .map(|(n, s)| (n.to_string(), s.parse().unwrap()))
            .collect()
    }

    #[test]
    fn wraps_in_chunks() {
        let s = vec![b'a'; 120];
        let f = format_seq(&s);
        assert_eq!(f.lines().map(str::len).collect::<Vec<_>>(), [50, 50, 20]);
        assert_eq!(format_seq(b""), "");
    }

    #[test]
    fn symmetric_score_table() {
        let t = score_table(&records(), &Scoring::linear(5).unwrap());
        assert_eq!(t.costs, vec![vec![0, 14, 0], vec![14, 0, 14], vec![0, 14, 0]]);
        let text = t.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().nth(1).unwrap().starts_with("seq1"));

        let t = score_table(&records(), &Scoring::affine(5, 5).unwrap());
        assert_eq!(t.costs[0][1], 22);
    }

    #[test]
    fn report_mentions_results() {
        let a: Sequence = "aataat".parse().unwrap();
        let b: Sequence = "aagg".parse().unwrap();
        let scoring = Scoring::affine(5, 5).unwrap();
        let (_, set) = align(&a, &b, &scoring);
        let report = AlignmentReport::new(&a, &b, scoring, &set);
        let text = report.to_string();
        assert!(text.contains("Optimal cost: 22"));
        assert!(text.contains("Optimal alignments: 3"));
        assert!(text.contains("g(k) = 5 + 5k"));
        assert!(text.contains("Alignment bound (Delannoy): 1289"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["cost"], 22);
        assert_eq!(json["path_bound"], "1289");
        assert_eq!(json["alignments"].as_array().unwrap().len(), 3);
        assert_eq!(json["truncated"], false);
    }
}
