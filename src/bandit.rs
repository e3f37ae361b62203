//! Beta-Bernoulli multi-armed bandit allocation.

use crate::error::ValidationError;
use crate::options::{BanditMethod, BanditOptions};
use crate::tie_break;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use tracing::debug;

/// Posterior Beta parameters of one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posterior {
    /// Prior alpha plus observed successes.
    pub alpha: f64,
    /// Prior beta plus observed failures.
    pub beta: f64,
}

impl Posterior {
    /// Posterior mean `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn upper_confidence_bound(&self, trials: u64) -> f64 {
        let n = self.alpha + self.beta;
        self.mean() + (2.0 * (trials as f64).ln() / n).sqrt()
    }
}

/// Posterior parameters for every arm under a shared prior.
///
/// # Errors
///
/// * [`ValidationError::NoArms`] when no arms are supplied.
/// * [`ValidationError::LengthMismatch`] when `failures` and `successes`
///   differ in length.
/// * [`ValidationError::OutOfRange`] for non-positive or non-finite priors.
pub fn posteriors(
    successes: &[u64],
    failures: &[u64],
    options: &BanditOptions,
) -> Result<Vec<Posterior>, ValidationError> {
    if successes.is_empty() {
        return Err(ValidationError::NoArms);
    }
    if failures.len() != successes.len() {
        return Err(ValidationError::LengthMismatch {
            name: "failures",
            expected: successes.len(),
            actual: failures.len(),
        });
    }
    options.validate()?;

    Ok(successes
        .iter()
        .zip(failures)
        .map(|(&s, &f)| Posterior {
            alpha: options.prior_alpha + s as f64,
            beta: options.prior_beta + f as f64,
        })
        .collect())
}

/// Choose the arm for the next subject.
///
/// Arms are modelled as Bernoulli with a `Beta(prior_alpha, prior_beta)`
/// prior updated by the observed successes and failures. The policy in
/// `options.method` selects the arm:
///
/// * [`BanditMethod::CurrentBelief`]: largest posterior mean.
/// * [`BanditMethod::Thompson`]: largest single draw from each arm's
///   posterior.
/// * [`BanditMethod::Ucb`]: largest `mean + sqrt(2 ln t / (alpha + beta))`
///   where `t` is `options.trials` or, when that is absent or zero, the sum
///   of all successes and failures; any arm when `t` is still zero.
///
/// Ties are broken uniformly at random. The result is a 0-based arm index.
///
/// # Errors
///
/// See [`posteriors`].
///
/// # Examples
///
/// ```
/// use allocation::{BanditMethod, BanditOptions, multi_arm_bandit};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(79461734);
/// let options = BanditOptions::default();
/// let arm = multi_arm_bandit(&[2, 9, 4], &[8, 1, 6], &options, &mut rng).unwrap();
/// assert_eq!(arm, 1);
///
/// let thompson = options.with_method(BanditMethod::Thompson);
/// assert!(multi_arm_bandit(&[2, 9, 4], &[8, 1, 6], &thompson, &mut rng).unwrap() < 3);
/// ```
pub fn multi_arm_bandit<R>(
    successes: &[u64],
    failures: &[u64],
    options: &BanditOptions,
    rng: &mut R,
) -> Result<usize, ValidationError>
where
    R: Rng + ?Sized,
{
    let posteriors = posteriors(successes, failures, options)?;
    let trials = options.trials.filter(|&t| t > 0).unwrap_or_else(|| {
        successes
            .iter()
            .chain(failures)
            .fold(0_u64, |acc, &n| acc.saturating_add(n))
    });

    let scores: Vec<f64> = match options.method {
        BanditMethod::CurrentBelief => posteriors.iter().map(Posterior::mean).collect(),
        BanditMethod::Thompson => posteriors
            .iter()
            .map(|p| {
                Beta::new(p.alpha, p.beta)
                    .map(|dist| dist.sample(&mut *rng))
                    .map_err(|_| ValidationError::OutOfRange {
                        name: "posterior",
                        value: p.alpha.min(p.beta),
                        lower: 0.0,
                        upper: f64::INFINITY,
                    })
            })
            .collect::<Result<_, _>>()?,
        BanditMethod::Ucb if trials == 0 => vec![0.0; posteriors.len()],
        BanditMethod::Ucb => posteriors
            .iter()
            .map(|p| p.upper_confidence_bound(trials))
            .collect(),
    };

    let arm = tie_break::argmax(&scores, rng).unwrap_or(0);
    debug!(method = %options.method, trials, arm, "bandit allocation");
    Ok(arm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posterior_mean_adds_prior_to_counts() {
        let options = BanditOptions::default();
        let post = posteriors(&[3], &[1], &options).unwrap();
        assert_eq!(post[0], Posterior { alpha: 3.5, beta: 1.5 });
        assert!((post[0].mean() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn upper_confidence_bound_grows_with_total_trials() {
        let p = Posterior { alpha: 2.0, beta: 2.0 };
        assert!(p.upper_confidence_bound(100) > p.upper_confidence_bound(10));
        assert_eq!(p.upper_confidence_bound(1), 0.5);
    }
}
