#![cfg(feature = "heavy")]
use dfs_backtrack::problems::lis::find_all_longest_increasing_with;
use dfs_backtrack::utils::longest_increasing_len;
use dfs_backtrack::{find_all_longest_increasing, solve, SearchLimits, Square};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_values(rng: &mut StdRng, len: usize) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..1_000)).collect()
}

#[test]
fn heavy_increasing_input_visits_every_subset() {
    let values: Vec<u32> = (0..20).collect();
    let (best, stats) = find_all_longest_increasing_with(&values, SearchLimits::default()).unwrap();
    assert_eq!(stats.nodes, 1 << 20);
    assert_eq!(best.subsequences, vec![values]);
}

#[test]
fn heavy_random_inputs_match_patience_length() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..20 {
        let values = random_values(&mut rng, 40);
        let best = find_all_longest_increasing(&values);
        assert_eq!(best.length, longest_increasing_len(&values));
        assert!(!best.is_empty());
    }
}

#[test]
fn heavy_large_open_tour() {
    let tour = solve(40, Square::new(0, 0), false).unwrap().expect("open tour");
    assert!(tour.validate().is_ok());
}
