use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use slotpick::error::ErrorKind;
use slotpick::sample::{LEGACY_PASSES, SampleMode, pick_one, sample};

fn items(n: u32) -> Vec<u32> {
    (0..n).collect()
}

#[test]
fn k_zero_is_empty() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let out = sample(&items(5), 0, SampleMode::Shuffle, &mut rng).expect("sample");
    assert!(out.is_empty());

    let out = sample::<u32, _>(&[], 0, SampleMode::Shuffle, &mut rng).expect("sample");
    assert!(out.is_empty());
}

#[test]
fn k_equal_n_is_a_permutation() {
    for mode in [SampleMode::Shuffle, SampleMode::LegacyPasses(LEGACY_PASSES)] {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut out = sample(&items(12), 12, mode, &mut rng).expect("sample");
        out.sort_unstable();
        assert_eq!(out, items(12));
    }
}

#[test]
fn k_greater_than_n_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let err = match sample(&items(3), 4, SampleMode::Shuffle, &mut rng) {
        Ok(_) => panic!("expected invalid argument"),
        Err(e) => e,
    };
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("cannot sample 4 of 3"));
}

#[test]
fn output_is_distinct_subset() {
    let input = items(30);
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let out = sample(&input, 7, SampleMode::Shuffle, &mut rng).expect("sample");
        assert_eq!(out.len(), 7);
        let set = out.iter().collect::<HashSet<_>>();
        assert_eq!(set.len(), 7);
        assert!(out.iter().all(|x| input.contains(x)));
    }
}

#[test]
fn full_draw_does_not_keep_input_order() {
    let input = items(20);
    for mode in [SampleMode::Shuffle, SampleMode::LegacyPasses(LEGACY_PASSES)] {
        let moved = (0..10u64).any(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            sample(&input, 20, mode, &mut rng).expect("sample") != input
        });
        assert!(moved, "{mode:?} never permuted the input");
    }
}

#[test]
fn same_seed_same_draw_different_seeds_vary() {
    let input = items(25);
    let draw = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        sample(&input, 5, SampleMode::Shuffle, &mut rng).expect("sample")
    };
    assert_eq!(draw(11), draw(11));
    let distinct = (0..10).map(draw).collect::<HashSet<_>>();
    assert!(distinct.len() > 1);
}

#[test]
fn pick_one_draws_from_input() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let input = ["a.png", "b.png", "c.png"];
    for _ in 0..10 {
        let got = pick_one(&input, &mut rng).expect("pick");
        assert!(input.contains(&got));
    }

    let empty: [&str; 0] = [];
    let err = pick_one(&empty, &mut rng).err();
    assert_eq!(err.map(|e| e.kind()), Some(ErrorKind::InvalidArgument));
}
