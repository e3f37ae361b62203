use thiserror::Error;

/// Errors raised when an allocation call receives structurally invalid input.
///
/// Validation always happens before any randomness is consumed, so a call that
/// returns one of these leaves the caller's random source untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Two inputs that must agree in length do not.
    #[error("`{name}` must have length {expected} (got {actual})")]
    LengthMismatch {
        /// Name of the offending argument.
        name: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A parameter fell outside its open interval.
    #[error("`{name}` must lie in ({lower}, {upper}) (got {value})")]
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Supplied value.
        value: f64,
        /// Exclusive lower bound.
        lower: f64,
        /// Exclusive upper bound.
        upper: f64,
    },
    /// The retry budget of a deviation-capped generator was zero.
    #[error("`max_iterations` must be a positive integer")]
    NonPositiveIterations,
    /// Smith's exponent was NaN or infinite.
    #[error("`exponent` must be a finite number (got {value})")]
    NonFiniteExponent {
        /// Supplied exponent.
        value: f64,
    },
    /// At least one group is required.
    #[error("`n_groups` must be at least 1")]
    ZeroGroups,
    /// Block templates need at least one slot.
    #[error("block length at index {index} must be positive")]
    ZeroBlockLength {
        /// Position of the offending length in the supplied list.
        index: usize,
    },
    /// Random block randomization needs at least one block length.
    #[error("`block_lengths` must contain at least one length")]
    EmptyBlockLengths,
    /// Selection weights were negative, non-finite or summed to zero.
    #[error("weights must be finite, non-negative and have a positive sum")]
    InvalidWeights,
    /// Tally rows disagree on the number of factors.
    #[error("each row of the tally must have {expected} factors (row {row} has {actual})")]
    RaggedTally {
        /// Index of the first offending row.
        row: usize,
        /// Factor count of the first row.
        expected: usize,
        /// Factor count of the offending row.
        actual: usize,
    },
    /// Minimization needs something to choose between.
    #[error("the tally must contain at least 2 treatments (got {actual})")]
    TooFewTreatments {
        /// Number of treatment rows supplied.
        actual: usize,
    },
    /// An arm reported more successes than trials.
    #[error("`{arm}` trials ({trials}) must be greater than or equal to successes ({successes})")]
    TrialsBelowSuccesses {
        /// Which arm was inconsistent.
        arm: &'static str,
        /// Reported successes.
        successes: u64,
        /// Reported trials.
        trials: u64,
    },
    /// The bandit was given no arms.
    #[error("at least one arm is required")]
    NoArms,
    /// A bandit method name was not recognised.
    #[error("unknown bandit method `{0}` (expected \"Current Belief\", \"Thompson\" or \"UCB\")")]
    UnknownBanditMethod(String),
    /// A sequence element is missing from the supplied label set.
    #[error("element at index {index} is not one of the supplied labels")]
    UnknownLabel {
        /// Position of the offending element.
        index: usize,
    },
}
