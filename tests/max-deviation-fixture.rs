use allocation::max_deviation;
use approx::assert_abs_diff_eq;

mod common;

use common::load_sequence;

#[test]
fn interleaved_three_group_sequence_matches_reference() {
    let groups = load_sequence("max_deviation_interleaved.txt");
    assert_eq!(groups.len(), 30);

    let dev = max_deviation(&groups, &[1, 2, 3]).unwrap();
    assert_abs_diff_eq!(dev, 0.167, epsilon = 0.01);
}

#[test]
fn relabelling_does_not_change_the_deviation() {
    let groups = load_sequence("max_deviation_interleaved.txt");
    let letters: Vec<char> = groups
        .iter()
        .map(|&g| match g {
            1 => 'a',
            2 => 'b',
            _ => 'c',
        })
        .collect();

    let by_index = max_deviation(&groups, &[1, 2, 3]).unwrap();
    let by_letter = max_deviation(&letters, &['a', 'b', 'c']).unwrap();
    assert_abs_diff_eq!(by_index, by_letter, epsilon = 1e-12);
}
