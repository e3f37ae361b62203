//! Non-adaptive randomization lists: simple, complete, block and stratified.

use crate::deviation::{cumsum, max_deviation};
use crate::error::ValidationError;
use crate::options::MaxDeviationOptions;
use crate::source::RandomSource;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, trace};

/// Seed offset separating consecutive strata in [`stratification`].
pub const STRATUM_SEED_OFFSET: u64 = 52490;

/// Create a randomization list using simple randomization.
///
/// Each subject is assigned independently of every other. Without weights
/// the group is a uniform integer in `1..=n_groups`. With weights `p` (one per
/// group, normalised internally) the unit interval is partitioned into
/// cumulative boundaries and a subject goes to the first group whose boundary
/// strictly exceeds a fresh uniform draw; a draw landing exactly on a boundary
/// belongs to the next group.
///
/// Simple randomization is prone to long runs of a single group and may yield
/// badly unbalanced lists.
///
/// # Errors
///
/// * [`ValidationError::ZeroGroups`] when `n_groups` is zero.
/// * [`ValidationError::LengthMismatch`] when `p.len() != n_groups`.
/// * [`ValidationError::InvalidWeights`] when a weight is negative or not
///   finite, or the weights sum to zero.
///
/// # Examples
///
/// ```
/// use allocation::simple;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let groups = simple(10, 3, None, &mut rng).unwrap();
/// assert_eq!(groups.len(), 10);
/// assert!(groups.iter().all(|g| (1..=3).contains(g)));
///
/// let weighted = simple(10, 2, Some(&[0.0, 1.0]), &mut rng).unwrap();
/// assert!(weighted.iter().all(|&g| g == 2));
/// ```
pub fn simple<R>(
    n_subjects: usize,
    n_groups: usize,
    p: Option<&[f64]>,
    rng: &mut R,
) -> Result<Vec<usize>, ValidationError>
where
    R: Rng + ?Sized,
{
    if n_groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }
    let Some(p) = p else {
        return Ok((0..n_subjects)
            .map(|_| rng.random_range(1..=n_groups))
            .collect());
    };

    if p.len() != n_groups {
        return Err(ValidationError::LengthMismatch {
            name: "p",
            expected: n_groups,
            actual: p.len(),
        });
    }
    if p.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(ValidationError::InvalidWeights);
    }
    // Scaling by the largest weight first keeps the sum finite for any finite weights.
    let largest = p.iter().copied().fold(0.0_f64, f64::max);
    if largest <= 0.0 {
        return Err(ValidationError::InvalidWeights);
    }
    let scaled: Vec<f64> = p.iter().map(|w| w / largest).collect();
    let total: f64 = scaled.iter().sum();
    let normalised: Vec<f64> = scaled.iter().map(|w| w / total).collect();
    let boundaries = cumsum(&normalised);
    let last = n_groups - 1;

    Ok((0..n_subjects)
        .map(|_| {
            let draw: f64 = rng.random();
            boundaries.partition_point(|&b| b <= draw).min(last) + 1
        })
        .collect())
}

/// Create a randomization list using complete randomization.
///
/// Returns a uniformly shuffled copy of `subjects`, so the list keeps exactly
/// the balance the caller put into it. The input is not modified.
///
/// # Examples
///
/// ```
/// use allocation::complete;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let subjects = ["a", "a", "a", "b", "b", "b"];
/// let mut rng = StdRng::seed_from_u64(9);
/// let mut shuffled = complete(&subjects, &mut rng);
/// shuffled.sort();
/// assert_eq!(shuffled, subjects);
/// ```
pub fn complete<T, R>(subjects: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut groups = subjects.to_vec();
    groups.shuffle(rng);
    groups
}

/// Simple randomization, retried until the list's maximum deviation is small.
///
/// Candidates are drawn with [`simple`] (unweighted) and the first whose
/// [`max_deviation`] is strictly below `options.max_allowed_deviation` is
/// returned. `Ok(None)` means no acceptable list was found within
/// `options.max_iterations` attempts.
///
/// # Errors
///
/// Options and `n_groups` are validated before any randomness is consumed; see
/// [`MaxDeviationOptions`] and [`simple`].
pub fn simple_max_deviation<R>(
    n_subjects: usize,
    n_groups: usize,
    options: &MaxDeviationOptions,
    rng: &mut R,
) -> Result<Option<Vec<usize>>, ValidationError>
where
    R: Rng + ?Sized,
{
    options.validate()?;
    if n_groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }
    let labels: Vec<usize> = (1..=n_groups).collect();
    first_acceptable(options, &labels, || {
        simple(n_subjects, n_groups, None, &mut *rng)
    })
}

/// Complete randomization, retried until the list's maximum deviation is small.
///
/// The label set is the distinct values of `subjects`. Returns `Ok(None)` when
/// no shuffle within `options.max_iterations` attempts is acceptable.
///
/// # Examples
///
/// ```
/// use allocation::{MaxDeviationOptions, complete_max_deviation};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let subjects: Vec<u8> = [1, 2].repeat(20);
/// let options = MaxDeviationOptions::default().with_max_allowed_deviation(0.5);
/// let mut rng = StdRng::seed_from_u64(3);
/// let list = complete_max_deviation(&subjects, &options, &mut rng).unwrap();
/// assert_eq!(list.map(|l| l.len()), Some(40));
/// ```
pub fn complete_max_deviation<T, R>(
    subjects: &[T],
    options: &MaxDeviationOptions,
    rng: &mut R,
) -> Result<Option<Vec<T>>, ValidationError>
where
    T: Clone + Eq + Hash,
    R: Rng + ?Sized,
{
    options.validate()?;
    let mut seen = HashSet::new();
    let labels: Vec<T> = subjects
        .iter()
        .filter(|&subject| seen.insert(subject))
        .cloned()
        .collect();
    first_acceptable(options, &labels, || Ok(complete(subjects, &mut *rng)))
}

fn first_acceptable<T, F>(
    options: &MaxDeviationOptions,
    labels: &[T],
    mut candidate: F,
) -> Result<Option<Vec<T>>, ValidationError>
where
    T: Eq + Hash,
    F: FnMut() -> Result<Vec<T>, ValidationError>,
{
    for iteration in 0..options.max_iterations {
        let groups = candidate()?;
        let deviation = max_deviation(&groups, labels)?;
        if deviation < options.max_allowed_deviation {
            trace!(iteration, deviation, "accepted randomization list");
            return Ok(Some(groups));
        }
    }
    debug!(
        max_iterations = options.max_iterations,
        max_allowed_deviation = options.max_allowed_deviation,
        "no randomization list met the deviation cap"
    );
    Ok(None)
}

fn block_template(n_groups: usize, block_length: usize) -> Vec<usize> {
    (0..block_length).map(|i| i % n_groups + 1).collect()
}

/// Create a randomization list using block randomization.
///
/// A block of `block_length` slots cycling through `1..=n_groups` is shuffled
/// and appended until at least `n_subjects` assignments exist, then the list
/// is truncated to exactly `n_subjects`. Balance within each block requires
/// `block_length` to be a multiple of `n_groups`; this is not checked.
///
/// # Errors
///
/// [`ValidationError::ZeroGroups`] or [`ValidationError::ZeroBlockLength`].
///
/// # Examples
///
/// ```
/// use allocation::block;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(4);
/// let groups = block(98, 2, 4, &mut rng).unwrap();
/// assert_eq!(groups.len(), 98);
/// let first_block = &groups[..4];
/// assert_eq!(first_block.iter().filter(|&&g| g == 1).count(), 2);
/// ```
pub fn block<R>(
    n_subjects: usize,
    n_groups: usize,
    block_length: usize,
    rng: &mut R,
) -> Result<Vec<usize>, ValidationError>
where
    R: Rng + ?Sized,
{
    if n_groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }
    if block_length == 0 {
        return Err(ValidationError::ZeroBlockLength { index: 0 });
    }

    let mut template = block_template(n_groups, block_length);
    let mut groups = Vec::with_capacity(n_subjects + block_length);
    while groups.len() < n_subjects {
        template.shuffle(rng);
        groups.extend_from_slice(&template);
    }
    groups.truncate(n_subjects);
    Ok(groups)
}

/// Create a randomization list by block randomization with random block lengths.
///
/// One template is built per distinct entry of `block_lengths`; every block
/// picks a template uniformly at random, so the block boundaries cannot be
/// inferred from the allocation history.
///
/// # Errors
///
/// [`ValidationError::ZeroGroups`], [`ValidationError::EmptyBlockLengths`] or
/// [`ValidationError::ZeroBlockLength`].
pub fn random_block<R>(
    n_subjects: usize,
    n_groups: usize,
    block_lengths: &[usize],
    rng: &mut R,
) -> Result<Vec<usize>, ValidationError>
where
    R: Rng + ?Sized,
{
    if n_groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }
    if block_lengths.is_empty() {
        return Err(ValidationError::EmptyBlockLengths);
    }
    if let Some(index) = block_lengths.iter().position(|&len| len == 0) {
        return Err(ValidationError::ZeroBlockLength { index });
    }

    let mut seen = HashSet::new();
    let mut templates: Vec<Vec<usize>> = block_lengths
        .iter()
        .filter(|&&len| seen.insert(len))
        .map(|&len| block_template(n_groups, len))
        .collect();

    let longest = templates.iter().map(Vec::len).max().unwrap_or(0);
    let mut groups = Vec::with_capacity(n_subjects + longest);
    while groups.len() < n_subjects {
        let pick = rng.random_range(0..templates.len());
        let template = &mut templates[pick];
        template.shuffle(rng);
        groups.extend_from_slice(template);
    }
    groups.truncate(n_subjects);
    Ok(groups)
}

/// Random treatment orders for subjects who receive every treatment.
///
/// Each of the `n_subjects` entries is an independent uniform permutation of
/// `1..=n_treatments`.
///
/// # Examples
///
/// ```
/// use allocation::random_treatment_order;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(2);
/// let orders = random_treatment_order(5, 3, &mut rng);
/// assert_eq!(orders.len(), 5);
/// let mut first = orders[0].clone();
/// first.sort();
/// assert_eq!(first, vec![1, 2, 3]);
/// ```
pub fn random_treatment_order<R>(
    n_subjects: usize,
    n_treatments: usize,
    rng: &mut R,
) -> Vec<Vec<usize>>
where
    R: Rng + ?Sized,
{
    let mut treatments: Vec<usize> = (1..=n_treatments).collect();
    (0..n_subjects)
        .map(|_| {
            treatments.shuffle(rng);
            treatments.clone()
        })
        .collect()
}

/// Block randomization applied independently to each stratum.
///
/// Stratum `k` (0-based) draws from a child of `source` offset by
/// `STRATUM_SEED_OFFSET * (k + 1)`, so with a seeded source the strata get
/// distinct but reproducible lists.
///
/// # Errors
///
/// Same as [`block`]; checked once before any stratum is randomized.
///
/// # Examples
///
/// ```
/// use allocation::{DEFAULT_BLOCK_LENGTH, RandomSource, stratification};
///
/// let mut source = RandomSource::from_seed(2024);
/// let lists = stratification(&[10, 12], 2, DEFAULT_BLOCK_LENGTH, &mut source).unwrap();
/// assert_eq!(lists[0].len(), 10);
/// assert_eq!(lists[1].len(), 12);
/// ```
pub fn stratification(
    n_subjects_per_strata: &[usize],
    n_groups: usize,
    block_length: usize,
    source: &mut RandomSource,
) -> Result<Vec<Vec<usize>>, ValidationError> {
    if n_groups == 0 {
        return Err(ValidationError::ZeroGroups);
    }
    if block_length == 0 {
        return Err(ValidationError::ZeroBlockLength { index: 0 });
    }

    n_subjects_per_strata
        .iter()
        .enumerate()
        .map(|(k, &n_subjects)| {
            let offset = STRATUM_SEED_OFFSET.wrapping_mul(k as u64 + 1);
            let mut stratum = source.derive(offset);
            block(n_subjects, n_groups, block_length, &mut stratum)
        })
        .collect()
}
