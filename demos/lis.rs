//! Example: every longest increasing subsequence of a short sequence.
//!
//! Run with:
//! `cargo run --example lis`

use dfs_backtrack::problems::lis::find_all_longest_increasing_with;
use dfs_backtrack::SearchLimits;

fn main() {
    let sequence = [4, 1, 13, 7, 0, 2, 8, 11, 3];

    let (best, stats) = find_all_longest_increasing_with(&sequence, SearchLimits::default())
        .expect("no limits configured");

    println!("Input: {sequence:?}");
    println!("Maximum length: {}", best.length);
    for (values, indices) in best.subsequences.iter().zip(&best.indices) {
        println!("  {values:?} at indices {indices:?}");
    }
    println!("Explored {} nodes in {:?}", stats.nodes, stats.elapsed);
}
