#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a whitespace-separated sequence of group indices.
pub fn load_sequence(filename: &str) -> Vec<usize> {
    let path = fixtures_dir().join(filename);
    let contents = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", path.display(), err));
    contents
        .split_whitespace()
        .enumerate()
        .map(|(idx, field)| {
            field.parse::<usize>().unwrap_or_else(|err| {
                panic!(
                    "failed to parse group at {} (entry {}): {}",
                    path.display(),
                    idx + 1,
                    err
                )
            })
        })
        .collect()
}

/// Longest number of consecutive repeats, counted as in `[1, 1, 1]` -> 2.
pub fn run_length<T: PartialEq>(groups: &[T]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for pair in groups.windows(2) {
        if pair[0] == pair[1] {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Share of `groups` equal to `group`.
pub fn share_of(groups: &[usize], group: usize) -> f64 {
    groups.iter().filter(|&&g| g == group).count() as f64 / groups.len() as f64
}

pub fn assert_share_within(groups: &[usize], group: usize, low: f64, high: f64) {
    let share = share_of(groups, group);
    assert!(
        share > low && share < high,
        "share of group {group} = {share} outside ({low}, {high})"
    );
}

pub fn assert_same_multiset<T: Ord + Clone + std::fmt::Debug>(actual: &[T], expected: &[T]) {
    let mut a = actual.to_vec();
    let mut e = expected.to_vec();
    a.sort();
    e.sort();
    assert_eq!(a, e, "sequences are not permutations of each other");
}
