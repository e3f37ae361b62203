use crate::error::ValidationError;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Add;

/// Running sums of `values`, returned as a new vector.
///
/// # Examples
///
/// ```
/// use allocation::cumsum;
///
/// assert_eq!(cumsum(&[1, 2, 3]), vec![1, 3, 6]);
/// assert!(cumsum::<f64>(&[]).is_empty());
/// ```
pub fn cumsum<T>(values: &[T]) -> Vec<T>
where
    T: Copy + Add<Output = T>,
{
    let mut sums = Vec::with_capacity(values.len());
    let mut running: Option<T> = None;
    for &value in values {
        let next = match running {
            Some(acc) => acc + value,
            None => value,
        };
        sums.push(next);
        running = Some(next);
    }
    sums
}

/// Worst transient imbalance of an assignment sequence.
///
/// For every prefix length `j` and every label `g`, the deviation is
///
/// ```text
/// |n_g(j) - j * N_g / N| / N_g
/// ```
///
/// where `n_g(j)` counts `g` among the first `j` assignments, `N_g` counts it
/// over the whole sequence and `N` is the sequence length. The maximum over all
/// prefixes and labels is returned. Labels absent from the sequence contribute
/// nothing, and an empty sequence has deviation zero.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownLabel`] when the sequence contains an
/// element that is not in `labels`.
///
/// # Examples
///
/// ```
/// use allocation::max_deviation;
///
/// let perfectly_alternating = [1, 2, 1, 2, 1, 2];
/// let dev = max_deviation(&perfectly_alternating, &[1, 2]).unwrap();
/// assert!((dev - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn max_deviation<T>(sequence: &[T], labels: &[T]) -> Result<f64, ValidationError>
where
    T: Eq + Hash,
{
    let slot: HashMap<&T, usize> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (label, idx))
        .collect();
    let positions = sequence
        .iter()
        .enumerate()
        .map(|(index, value)| {
            slot.get(value)
                .copied()
                .ok_or(ValidationError::UnknownLabel { index })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let mut totals = vec![0_usize; labels.len()];
    for &pos in &positions {
        totals[pos] += 1;
    }
    let n = positions.len() as f64;

    let mut counts = vec![0_usize; labels.len()];
    let mut worst = 0.0_f64;
    for (idx, &pos) in positions.iter().enumerate() {
        counts[pos] += 1;
        let prefix = (idx + 1) as f64;
        for (&count, &total) in counts.iter().zip(&totals) {
            if total == 0 {
                continue;
            }
            let total = total as f64;
            let expected = prefix * total / n;
            let deviation = (count as f64 - expected).abs() / total;
            worst = worst.max(deviation);
        }
    }
    Ok(worst)
}
