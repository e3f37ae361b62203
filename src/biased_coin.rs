//! Two-group schemes that bias each draw towards the under-represented group.
//!
//! All three keep a running count of assignments to group 1 for the duration
//! of a single call. The counter never outlives the call.

use crate::error::ValidationError;
use crate::options::{EfronOptions, SmithOptions};
use rand::Rng;

/// Create a randomization list using Efron's biased coin.
///
/// When the running share of group 1 (counted over `i + 1` for the `i`-th
/// subject) is exactly one half, or for the very first subject, the coin is
/// fair. Otherwise the under-represented group is chosen with probability
/// `options.bias`.
///
/// Exact balance is not guaranteed, but lists are usually very close to it.
///
/// # Errors
///
/// [`ValidationError::OutOfRange`] when the bias is not strictly inside `(0, 1)`.
///
/// # Examples
///
/// ```
/// use allocation::{EfronOptions, efrons_biased_coin};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(12);
/// let groups = efrons_biased_coin(100, &EfronOptions::default(), &mut rng).unwrap();
/// assert_eq!(groups.len(), 100);
/// ```
pub fn efrons_biased_coin<R>(
    n_subjects: usize,
    options: &EfronOptions,
    rng: &mut R,
) -> Result<Vec<usize>, ValidationError>
where
    R: Rng + ?Sized,
{
    options.validate()?;
    let bias = options.bias;
    Ok(two_group_sequence(n_subjects, rng, |i, group_1_count, draw| {
        let share = group_1_count / (i + 1) as f64;
        let cut = if i == 0 || share == 0.5 {
            0.5
        } else if share < 0.5 {
            1.0 - bias
        } else {
            bias
        };
        draw > cut
    }))
}

/// Create a randomization list using Smith's exponent.
///
/// With `c` prior assignments to group 1 and exponent `rho`, subject `i`
/// (0-based) goes to group 2 with probability
///
/// ```text
/// c^rho / (c^rho + (i + 1 - c)^rho)
/// ```
///
/// An exponent of zero reduces to simple randomization. A negative exponent
/// is accepted but systematically over-represents one group.
///
/// # Errors
///
/// [`ValidationError::NonFiniteExponent`] for NaN or infinite exponents.
pub fn smiths_exponent<R>(
    n_subjects: usize,
    options: &SmithOptions,
    rng: &mut R,
) -> Result<Vec<usize>, ValidationError>
where
    R: Rng + ?Sized,
{
    options.validate()?;
    let rho = options.exponent;
    Ok(two_group_sequence(n_subjects, rng, |i, group_1_count, draw| {
        let weight = group_1_count.powf(rho);
        let cut = weight / (weight + ((i + 1) as f64 - group_1_count).powf(rho));
        draw > cut
    }))
}

/// Create a randomization list using Wei's urn.
///
/// After `n` subjects of which `c` went to group 1, the next subject goes to
/// group 1 with probability `1 - c / (n + 1)`; the first subject is a fair
/// coin.
///
/// # Examples
///
/// ```
/// use allocation::weis_urn;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(21);
/// let groups = weis_urn(50, &mut rng);
/// assert!(groups.iter().all(|&g| g == 1 || g == 2));
/// ```
pub fn weis_urn<R>(n_subjects: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    two_group_sequence(n_subjects, rng, |i, group_1_count, draw| {
        let cut = if i > 0 {
            1.0 - group_1_count / (i + 1) as f64
        } else {
            0.5
        };
        draw < cut
    })
}

/// Drive a two-group scheme. `assign_group_1` receives the 0-based subject
/// index, the running group-1 count and a fresh uniform draw.
fn two_group_sequence<R, F>(n_subjects: usize, rng: &mut R, mut assign_group_1: F) -> Vec<usize>
where
    R: Rng + ?Sized,
    F: FnMut(usize, f64, f64) -> bool,
{
    let mut group_1_count = 0.0_f64;
    (0..n_subjects)
        .map(|i| {
            let draw: f64 = rng.random();
            if assign_group_1(i, group_1_count, draw) {
                group_1_count += 1.0;
                1
            } else {
                2
            }
        })
        .collect()
}
