use rand::Rng;
use rand::seq::IndexedRandom;

/// Pick uniformly among tied candidate positions.
///
/// No randomness is consumed when exactly one position qualifies.
fn choose_among<R>(candidates: &[usize], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => candidates.choose(rng).copied(),
    }
}

/// Position of the largest value, ties broken uniformly at random.
///
/// NaN entries never win. Returns `None` only when no entry is comparable.
pub(crate) fn argmax<R>(values: &[f64], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let best = values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    let candidates: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value == best)
        .map(|(idx, _)| idx)
        .collect();
    choose_among(&candidates, rng)
}

/// Position of the smallest count, ties broken uniformly at random.
pub(crate) fn argmin<R>(values: &[u64], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let best = values.iter().copied().min()?;
    let candidates: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value == best)
        .map(|(idx, _)| idx)
        .collect();
    choose_among(&candidates, rng)
}
