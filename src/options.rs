//! Tuning parameters for the allocation routines, with their conventional defaults.

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Default block length used by [`crate::stratification`] callers.
pub const DEFAULT_BLOCK_LENGTH: usize = 4;

/// Acceptance criteria for deviation-capped randomization.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxDeviationOptions {
    /// Candidates are accepted when their maximum deviation is strictly below
    /// this value. Must lie in `(0, 1)`.
    pub max_allowed_deviation: f64,
    /// Number of candidates to try before giving up. Must be positive.
    pub max_iterations: usize,
}

impl Default for MaxDeviationOptions {
    fn default() -> Self {
        Self {
            max_allowed_deviation: 0.20,
            max_iterations: 100,
        }
    }
}

impl MaxDeviationOptions {
    /// Override the acceptance threshold.
    pub fn with_max_allowed_deviation(mut self, value: f64) -> Self {
        self.max_allowed_deviation = value;
        self
    }

    /// Override the retry budget.
    pub fn with_max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = value;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_open_unit("max_allowed_deviation", self.max_allowed_deviation)?;
        if self.max_iterations == 0 {
            return Err(ValidationError::NonPositiveIterations);
        }
        Ok(())
    }
}

/// Parameters of Efron's biased coin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EfronOptions {
    /// Probability of assigning the next subject to the under-represented
    /// group. Must lie in `(0, 1)`.
    pub bias: f64,
}

impl Default for EfronOptions {
    fn default() -> Self {
        Self { bias: 0.67 }
    }
}

impl EfronOptions {
    /// Override the bias.
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_open_unit("bias", self.bias)
    }
}

/// Parameters of Smith's exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmithOptions {
    /// Smith's exponent, often written `rho`.
    ///
    /// Zero reduces to simple randomization. Negative values are accepted but
    /// push every subject into one group.
    pub exponent: f64,
}

impl Default for SmithOptions {
    fn default() -> Self {
        Self { exponent: 1.0 }
    }
}

impl SmithOptions {
    /// Override the exponent.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if !self.exponent.is_finite() {
            return Err(ValidationError::NonFiniteExponent {
                value: self.exponent,
            });
        }
        Ok(())
    }
}

/// Display labels for the two arms of a double biased coin.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleBiasedCoinOptions {
    /// Label returned for control assignments.
    pub control_name: String,
    /// Label returned for treatment assignments.
    pub treatment_name: String,
}

impl Default for DoubleBiasedCoinOptions {
    fn default() -> Self {
        Self {
            control_name: "Control".to_owned(),
            treatment_name: "Treatment".to_owned(),
        }
    }
}

impl DoubleBiasedCoinOptions {
    /// Override the control label.
    pub fn with_control_name(mut self, name: impl Into<String>) -> Self {
        self.control_name = name.into();
        self
    }

    /// Override the treatment label.
    pub fn with_treatment_name(mut self, name: impl Into<String>) -> Self {
        self.treatment_name = name.into();
        self
    }
}

/// Arm-selection policy of the multi-armed bandit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BanditMethod {
    /// Pick the arm with the largest posterior mean.
    #[default]
    CurrentBelief,
    /// Pick the arm with the largest draw from its posterior Beta distribution.
    Thompson,
    /// Pick the arm with the largest upper confidence bound.
    Ucb,
}

impl fmt::Display for BanditMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BanditMethod::CurrentBelief => "Current Belief",
            BanditMethod::Thompson => "Thompson",
            BanditMethod::Ucb => "UCB",
        })
    }
}

impl FromStr for BanditMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current Belief" => Ok(BanditMethod::CurrentBelief),
            "Thompson" => Ok(BanditMethod::Thompson),
            "UCB" => Ok(BanditMethod::Ucb),
            other => Err(ValidationError::UnknownBanditMethod(other.to_owned())),
        }
    }
}

/// Prior and policy for the multi-armed bandit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BanditOptions {
    /// Prior Beta `alpha` shared by every arm.
    pub prior_alpha: f64,
    /// Prior Beta `beta` shared by every arm.
    pub prior_beta: f64,
    /// Arm-selection policy.
    pub method: BanditMethod,
    /// Total number of trials so far. Defaults to the sum of all successes and
    /// failures when absent or zero.
    pub trials: Option<u64>,
}

impl Default for BanditOptions {
    fn default() -> Self {
        Self {
            prior_alpha: 0.5,
            prior_beta: 0.5,
            method: BanditMethod::default(),
            trials: None,
        }
    }
}

impl BanditOptions {
    /// Override both prior parameters.
    pub fn with_prior(mut self, alpha: f64, beta: f64) -> Self {
        self.prior_alpha = alpha;
        self.prior_beta = beta;
        self
    }

    /// Override the selection policy.
    pub fn with_method(mut self, method: BanditMethod) -> Self {
        self.method = method;
        self
    }

    /// Override the total trial count used by UCB. Zero keeps the default.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = Some(trials);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_positive("prior_alpha", self.prior_alpha)?;
        check_positive("prior_beta", self.prior_beta)
    }
}

fn check_open_unit(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            lower: 0.0,
            upper: 1.0,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            lower: 0.0,
            upper: f64::INFINITY,
        })
    }
}
