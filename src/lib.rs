#![warn(missing_docs)]

//! Subject allocation for clinical trials
//!
//! This crate implements randomization and adaptive allocation procedures
//! that assign incoming subjects to treatment groups: simple, complete, block
//! and stratified randomization, biased-coin and urn designs, minimization,
//! double biased coin response-adaptive randomization and a Beta-Bernoulli
//! multi-armed bandit.
//!
//! Every routine is stateless and takes its random source explicitly, so
//! results are reproducible with a seeded generator and independent across
//! concurrent callers.

mod assignment;
mod bandit;
mod biased_coin;
mod deviation;
mod double_biased_coin;
mod error;
mod minimization;
mod options;
mod randomization;
mod source;
mod tie_break;

pub use assignment::Assignment;
pub use bandit::{Posterior, multi_arm_bandit, posteriors};
pub use biased_coin::{efrons_biased_coin, smiths_exponent, weis_urn};
pub use deviation::{cumsum, max_deviation};
pub use double_biased_coin::{ArmOutcomes, double_biased_coin_minimize, double_biased_coin_urn};
pub use error::ValidationError;
pub use minimization::{Tally, minimization};
pub use options::{
    BanditMethod, BanditOptions, DEFAULT_BLOCK_LENGTH, DoubleBiasedCoinOptions, EfronOptions,
    MaxDeviationOptions, SmithOptions,
};
pub use randomization::{
    STRATUM_SEED_OFFSET, block, complete, complete_max_deviation, random_block,
    random_treatment_order, simple, simple_max_deviation, stratification,
};
pub use source::RandomSource;
