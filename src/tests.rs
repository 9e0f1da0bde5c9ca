use crate::*;
use std::collections::BTreeSet;

fn seqs(a: &str, b: &str) -> (Sequence, Sequence) {
    (a.parse().unwrap(), b.parse().unwrap())
}

/// Align and return the cost and the sorted set of alignments.
fn run(a: &str, b: &str, scoring: &Scoring) -> (Cost, BTreeSet<(String, String)>) {
    let (a, b) = seqs(a, b);
    let (cost, set) = align(&a, &b, scoring);
    assert_eq!(cost.cost(), set.cost);
    let strings = set.to_strings();
    let unique: BTreeSet<_> = strings.iter().cloned().collect();
    assert_eq!(unique.len(), strings.len(), "duplicate alignments");
    for aln in &set {
        assert_eq!(scoring.alignment_cost(aln.top(), aln.bottom()), Some(set.cost));
    }
    (set.cost, unique)
}

fn expected(pairs: &[(&str, &str)]) -> BTreeSet<(String, String)> {
    pairs
        .iter()
        .map(|&(x, y)| (x.to_string(), y.to_string()))
        .collect()
}

fn linear() -> Scoring {
    Scoring::linear(5).unwrap()
}

fn affine() -> Scoring {
    Scoring::affine(5, 5).unwrap()
}

#[test]
fn linear_fixtures() {
    assert_eq!(
        run("aataat", "aagg", &linear()),
        (14, expected(&[("aataat", "aa-gg-")]))
    );
    assert_eq!(
        run("tccagaga", "tcgat", &linear()),
        (
            20,
            expected(&[
                ("tccagaga", "t-c-ga-t"),
                ("tccagaga", "t-c-gat-"),
                ("tccagaga", "tc--ga-t"),
                ("tccagaga", "tc--gat-"),
            ])
        )
    );
    assert_eq!(
        run("acgtgtcaacgt", "acgtcgtagcta", &linear()),
        (
            22,
            expected(&[
                ("acgt-gtcaacgt-", "acgtcgt-agc-ta"),
                ("acgt-gtcaacgt", "acgtcgt-agcta"),
            ])
        )
    );
}

#[test]
fn affine_fixtures() {
    assert_eq!(
        run("aataat", "aagg", &affine()),
        (
            22,
            expected(&[("aataat", "aagg--"), ("aataat", "aa--gg"), ("aataat", "a--agg")])
        )
    );
    assert_eq!(
        run("tccagaga", "tcgat", &affine()),
        (29, expected(&[("tccagaga", "tc---gat")]))
    );
    assert_eq!(
        run("acgtgtcaacgt", "acgtcgtagcta", &affine()),
        (24, expected(&[("acgtgtcaacgt", "acgtcgtagcta")]))
    );
}

#[test]
fn identical_sequences() {
    for scoring in [linear(), affine()] {
        let (cost, set) = run("ACGTACGT", "ACGTACGT", &scoring);
        assert_eq!(cost, 0);
        assert_eq!(set, expected(&[("ACGTACGT", "ACGTACGT")]));
    }
}

#[test]
fn single_gap_run() {
    // One deletion of length 2 in the middle.
    let (cost, set) = run("acgtt", "act", &linear());
    assert_eq!(cost, 10);
    assert!(set.contains(&("acgtt".into(), "ac--t".into())));
    let (cost, set) = run("acgtt", "act", &affine());
    assert_eq!(cost, 15);
    assert!(set.iter().all(|(_, b)| b.contains("--")));
}

#[test]
fn case_is_kept() {
    let (_, set) = run("AaTaat", "aAgg", &linear());
    assert_eq!(set, expected(&[("AaTaat", "aA-gg-")]));
}

#[test]
fn swapping_inputs_mirrors_alignments() {
    for scoring in [linear(), affine()] {
        let (ab_cost, ab) = run("tccagaga", "tcgat", &scoring);
        let (ba_cost, ba) = run("tcgat", "tccagaga", &scoring);
        assert_eq!(ab_cost, ba_cost);
        let mirrored: BTreeSet<_> = ab.into_iter().map(|(x, y)| (y, x)).collect();
        assert_eq!(mirrored, ba);
    }
}

#[test]
fn swapping_inputs_transposes_the_matrix() {
    // Asymmetric costs: substituting into `t` is cheap, out of it expensive.
    let matrix = ScoreMatrix::new([[0, 4, 3, 1], [4, 0, 4, 1], [3, 4, 0, 1], [9, 9, 9, 0]]).unwrap();
    assert!(!matrix.is_symmetric());
    for gap in [GapModel::Linear { penalty: 3 }, GapModel::Affine { open: 2, extend: 2 }] {
        let forward = Scoring::new(matrix, gap).unwrap();
        let backward = Scoring::new(matrix.transposed(), gap).unwrap();
        for (a, b) in [("acgta", "ttgt"), ("tccagaga", "tcgat")] {
            let (ab_cost, ab) = run(a, b, &forward);
            let (ba_cost, ba) = run(b, a, &backward);
            assert_eq!(ab_cost, ba_cost);
            let mirrored: BTreeSet<_> = ab.into_iter().map(|(x, y)| (y, x)).collect();
            assert_eq!(mirrored, ba);
        }
    }
}

#[test]
fn large_costs_keep_model_equivalence() {
    let lin = run("aaa", "", &Scoring::linear(600_000_000).unwrap());
    let aff = run("aaa", "", &Scoring::affine(0, 600_000_000).unwrap());
    assert_eq!(lin.0, 1_800_000_000);
    assert_eq!(lin, aff);
}

#[test]
fn zero_open_equals_linear() {
    for (a, b) in [("aataat", "aagg"), ("tccagaga", "tcgat"), ("acgtgtcaacgt", "acgtcgtagcta")] {
        for e in [1, 3, 5] {
            let lin = run(a, b, &Scoring::linear(e).unwrap());
            let aff = run(a, b, &Scoring::affine(0, e).unwrap());
            assert_eq!(lin, aff, "{a} {b} e={e}");
        }
    }
}

#[test]
fn alignments_spell_the_inputs() {
    let (a, b) = seqs("acgtgtcaacgt", "acgtcgtagcta");
    for scoring in [linear(), affine()] {
        let (_, set) = align(&a, &b, &scoring);
        for aln in &set {
            assert_eq!(aln.top().len(), aln.bottom().len());
            assert!(aln.top().iter().zip(aln.bottom()).all(|(x, y)| (*x, *y) != (GAP, GAP)));
            let (top, bottom) = aln.strip_gaps();
            assert_eq!(top, a.text());
            assert_eq!(bottom, b.text());
        }
    }
}

#[test]
fn count_bounds_alignments() {
    for (a, b) in [("aataat", "aagg"), ("tccagaga", "tcgat"), ("", "acg")] {
        let (sa, sb) = seqs(a, b);
        let bound = count_paths(sa.len(), sb.len());
        for scoring in [linear(), affine(), Scoring::affine(0, 0).unwrap()] {
            let (_, set) = align(&sa, &sb, &scoring);
            assert!(num_bigint::BigUint::from(set.len()) <= bound);
        }
    }
}

#[test]
fn free_gaps_enumerate_every_path() {
    // With all costs zero, every lattice path is optimal.
    let zero = ScoreMatrix::new([[0; 4]; 4]).unwrap();
    let scoring = Scoring::linear(0).unwrap().with_matrix(zero);
    let (a, b) = seqs("acg", "tt");
    let (_, set) = align(&a, &b, &scoring);
    assert_eq!(num_bigint::BigUint::from(set.len()), count_paths(3, 2));
}

#[test]
fn custom_matrix() {
    // Unit costs turn linear alignment into edit distance.
    let mut costs = [[1; 4]; 4];
    for (i, row) in costs.iter_mut().enumerate() {
        row[i] = 0;
    }
    let scoring = Scoring::linear(1)
        .unwrap()
        .with_matrix(ScoreMatrix::new(costs).unwrap());
    let (cost, _) = run("acgtacgt", "acttacg", &scoring);
    assert_eq!(cost, 2);
}

#[test]
fn unknown_symbols_are_rejected() {
    assert!(matches!(
        "acgu".parse::<Sequence>(),
        Err(AlignError::UnknownSymbol {
            symbol: b'u',
            position: 3
        })
    ));
    assert!(matches!(
        Scoring::affine(-1, 5),
        Err(AlignError::NegativeCost { .. })
    ));
    assert!(matches!(
        Scoring::affine(Cost::MAX - 10, 1),
        Err(AlignError::CostTooLarge { .. })
    ));
}
