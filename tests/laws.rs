use coopt_aligner::*;
use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_seq(rng: &mut impl Rng, n: usize) -> Sequence {
    let text: Vec<u8> = (0..n).map(|_| ALPHABET[rng.gen_range(0..4)]).collect();
    Sequence::new(text).unwrap()
}

/// Pairs of short random sequences, including empty ones.
fn pairs(seed: u64, count: usize) -> Vec<(Sequence, Sequence)> {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let n = rng.gen_range(0..9);
            let m = rng.gen_range(0..9);
            (random_seq(rng, n), random_seq(rng, m))
        })
        .collect()
}

fn scorings() -> Vec<Scoring> {
    vec![
        Scoring::linear(5).unwrap(),
        Scoring::linear(1).unwrap(),
        Scoring::affine(5, 5).unwrap(),
        Scoring::affine(3, 1).unwrap(),
        Scoring::affine(0, 2).unwrap(),
    ]
}

#[test]
fn every_alignment_has_the_optimal_cost() {
    for (a, b) in pairs(31415, 200) {
        for scoring in scorings() {
            let (cost, set) = align(&a, &b, &scoring);
            assert!(!set.is_empty());
            assert_eq!(set.cost, cost.cost());
            for aln in &set {
                assert_eq!(
                    scoring.alignment_cost(aln.top(), aln.bottom()),
                    Some(set.cost),
                    "{aln}"
                );
                let (top, bottom) = aln.strip_gaps();
                assert_eq!(top, a.text());
                assert_eq!(bottom, b.text());
            }
        }
    }
}

#[test]
fn alignments_are_distinct() {
    for (a, b) in pairs(2718, 200) {
        for scoring in scorings() {
            let set = align(&a, &b, &scoring).1;
            let mut strings = set.to_strings();
            strings.sort();
            strings.dedup();
            assert_eq!(strings.len(), set.len());
        }
    }
}

#[test]
fn swapping_inputs_mirrors_the_set() {
    for (a, b) in pairs(1618, 100) {
        for scoring in scorings() {
            let ab = align(&a, &b, &scoring).1;
            let ba = align(&b, &a, &scoring).1;
            assert_eq!(ab.cost, ba.cost);
            let mut mirrored: Vec<_> = ab.iter().map(|aln| aln.mirrored().to_strings()).collect();
            let mut swapped = ba.to_strings();
            mirrored.sort();
            swapped.sort();
            assert_eq!(mirrored, swapped);
        }
    }
}

#[test]
fn zero_gap_open_matches_linear() {
    for (a, b) in pairs(42, 200) {
        for e in [0, 1, 5] {
            let lin = align(&a, &b, &Scoring::linear(e).unwrap()).1;
            let aff = align(&a, &b, &Scoring::affine(0, e).unwrap()).1;
            assert_eq!(lin.cost, aff.cost);
            let mut lin = lin.to_strings();
            let mut aff = aff.to_strings();
            lin.sort();
            aff.sort();
            assert_eq!(lin, aff);
        }
    }
}

#[test]
fn affine_costs_at_least_linear() {
    for (a, b) in pairs(7, 200) {
        let lin = compute_cost(&a, &b, &Scoring::linear(5).unwrap()).cost();
        let aff = compute_cost(&a, &b, &Scoring::affine(3, 5).unwrap()).cost();
        assert!(lin <= aff);
    }
}

#[test]
fn path_count_bounds_the_set() {
    for (a, b) in pairs(99, 100) {
        let bound = count_paths(a.len(), b.len());
        for scoring in scorings() {
            let set = align(&a, &b, &scoring).1;
            assert!(BigUint::from(set.len()) <= bound);
        }
    }
}

#[test]
fn single_alignment_is_optimal() {
    for (a, b) in pairs(123, 100) {
        for scoring in scorings() {
            let cost = compute_cost(&a, &b, &scoring);
            let aln = backtrack_one(&cost, &a, &b);
            assert_eq!(
                scoring.alignment_cost(aln.top(), aln.bottom()),
                Some(cost.cost())
            );
        }
    }
}

#[test]
fn free_gap_open_on_long_runs() {
    // A long gap run between random flanks, with the gap open cost free.
    let rng = &mut ChaCha8Rng::seed_from_u64(8);
    for _ in 0..5 {
        let left = random_seq(rng, 4);
        let right = random_seq(rng, 4);
        let run = "a".repeat(300);
        let a: Sequence = format!("{left}{run}{right}").parse().unwrap();
        let b: Sequence = format!("{left}{right}").parse().unwrap();
        let lin = align(&a, &b, &Scoring::linear(5).unwrap()).1;
        let aff = align(&a, &b, &Scoring::affine(0, 5).unwrap()).1;
        assert_eq!(lin.cost, aff.cost);
        let mut lin = lin.to_strings();
        let mut aff = aff.to_strings();
        lin.sort();
        aff.sort();
        assert_eq!(lin, aff);
    }
}
