//! Response-adaptive double biased coin designs.

use crate::error::ValidationError;
use crate::options::DoubleBiasedCoinOptions;
use crate::source::RandomSource;
use rand::Rng;
use tracing::debug;

/// Successes and trials observed on one arm so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmOutcomes {
    /// Number of successful outcomes.
    pub successes: u64,
    /// Number of subjects with an observed outcome.
    pub trials: u64,
}

impl ArmOutcomes {
    /// Bundle an arm's counts.
    pub fn new(successes: u64, trials: u64) -> Self {
        Self { successes, trials }
    }

    /// Empirical success rate, or one half while at most one trial is known.
    pub fn success_rate(&self) -> f64 {
        if self.trials > 1 {
            self.successes as f64 / self.trials as f64
        } else {
            0.5
        }
    }

    fn validate(&self, arm: &'static str) -> Result<(), ValidationError> {
        if self.trials < self.successes {
            return Err(ValidationError::TrialsBelowSuccesses {
                arm,
                successes: self.successes,
                trials: self.trials,
            });
        }
        Ok(())
    }
}

/// Allocate the next subject with the double biased coin minimization rule.
///
/// With empirical success rates `p_c` and `p_t`, the subject goes to control
/// with probability
///
/// ```text
/// sqrt(p_c) / (sqrt(p_c) + sqrt(p_t))
/// ```
///
/// A seeded `source` is offset by ten times the total number of trials before
/// drawing, so successive calls with growing counts do not replay the same
/// draw while staying reproducible.
///
/// # Errors
///
/// [`ValidationError::TrialsBelowSuccesses`] when either arm reports more
/// successes than trials.
///
/// # Examples
///
/// ```
/// use allocation::{ArmOutcomes, DoubleBiasedCoinOptions, RandomSource, double_biased_coin_minimize};
///
/// let options = DoubleBiasedCoinOptions::default();
/// let mut source = RandomSource::from_seed(5);
/// let group = double_biased_coin_minimize(
///     ArmOutcomes::new(5, 6),
///     ArmOutcomes::new(7, 8),
///     &options,
///     &mut source,
/// )
/// .unwrap();
/// assert!(group == "Control" || group == "Treatment");
/// ```
pub fn double_biased_coin_minimize<'o>(
    control: ArmOutcomes,
    treatment: ArmOutcomes,
    options: &'o DoubleBiasedCoinOptions,
    source: &mut RandomSource,
) -> Result<&'o str, ValidationError> {
    allocate(control, treatment, options, source, |p_c, p_t| {
        (p_c.sqrt(), p_c.sqrt() + p_t.sqrt())
    })
}

/// Allocate the next subject with the double biased coin urn rule.
///
/// With empirical success rates `p_c` and `p_t`, the subject goes to control
/// with probability
///
/// ```text
/// (1 - p_t) / ((1 - p_t) + (1 - p_c))
/// ```
///
/// Seeding and validation follow [`double_biased_coin_minimize`].
pub fn double_biased_coin_urn<'o>(
    control: ArmOutcomes,
    treatment: ArmOutcomes,
    options: &'o DoubleBiasedCoinOptions,
    source: &mut RandomSource,
) -> Result<&'o str, ValidationError> {
    allocate(control, treatment, options, source, |p_c, p_t| {
        (1.0 - p_t, (1.0 - p_t) + (1.0 - p_c))
    })
}

/// `ratio` returns the numerator and denominator of the control probability.
fn allocate<'o, F>(
    control: ArmOutcomes,
    treatment: ArmOutcomes,
    options: &'o DoubleBiasedCoinOptions,
    source: &mut RandomSource,
    ratio: F,
) -> Result<&'o str, ValidationError>
where
    F: FnOnce(f64, f64) -> (f64, f64),
{
    control.validate("control")?;
    treatment.validate("treatment")?;

    let (numerator, denominator) = ratio(control.success_rate(), treatment.success_rate());
    // Both arms at the degenerate rate: neither is preferred.
    let cut = if denominator > 0.0 {
        numerator / denominator
    } else {
        0.5
    };

    let offset = control
        .trials
        .wrapping_add(treatment.trials)
        .wrapping_mul(10);
    let mut rng = source.derive(offset);
    let draw: f64 = rng.random();
    debug!(cut, draw, "double biased coin allocation");

    Ok(if draw < cut {
        options.control_name.as_str()
    } else {
        options.treatment_name.as_str()
    })
}
