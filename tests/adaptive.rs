use allocation::{
    ArmOutcomes, Assignment, BanditMethod, BanditOptions, DoubleBiasedCoinOptions, RandomSource,
    Tally, ValidationError, double_biased_coin_minimize, double_biased_coin_urn, minimization,
    multi_arm_bandit,
};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

#[test]
fn minimization_picks_the_least_loaded_treatment() {
    let tally = Tally::new(vec![vec![10, 9], vec![2, 2]]).unwrap();
    let names = ["Treatment 1".to_owned(), "Treatment 2".to_owned()];
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        minimization(&tally, None, &mut rng).unwrap(),
        Assignment::Index(2)
    );
    assert_eq!(
        minimization(&tally, Some(&names[..]), &mut rng).unwrap(),
        Assignment::Label("Treatment 2".to_owned())
    );
}

#[test]
fn minimization_breaks_ties_among_minimal_treatments_only() {
    let tally = Tally::new(vec![vec![3, 1], vec![5, 5], vec![2, 2]]).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let mut seen = [0_usize; 4];
    for _ in 0..300 {
        let index = minimization(&tally, None, &mut rng).unwrap().index().unwrap();
        seen[index] += 1;
    }
    assert_eq!(seen[2], 0);
    assert!(seen[1] > 0 && seen[3] > 0);
}

#[test]
fn minimization_without_history_is_uniform() {
    let tally = Tally::new(vec![vec![0, 0]; 3]).unwrap();
    let mut rng = StdRng::seed_from_u64(10);
    let mut seen = [0_usize; 4];
    for _ in 0..3_000 {
        seen[minimization(&tally, None, &mut rng).unwrap().index().unwrap()] += 1;
    }
    for count in &seen[1..] {
        assert!((850..1150).contains(count), "counts = {seen:?}");
    }
}

#[test]
fn minimization_validates_its_inputs() {
    assert_eq!(
        Tally::new(vec![vec![1, 2], vec![3]]),
        Err(ValidationError::RaggedTally {
            row: 1,
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        Tally::new(vec![vec![1, 2]]),
        Err(ValidationError::TooFewTreatments { actual: 1 })
    );

    let tally = Tally::new(vec![vec![1], vec![2]]).unwrap();
    let labels = ["only one".to_owned()];
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        minimization(&tally, Some(&labels[..]), &mut rng),
        Err(ValidationError::LengthMismatch {
            name: "group_labels",
            expected: 2,
            actual: 1
        })
    ));
}

type DoubleBiasedCoin = for<'o> fn(
    ArmOutcomes,
    ArmOutcomes,
    &'o DoubleBiasedCoinOptions,
    &mut RandomSource,
) -> Result<&'o str, ValidationError>;

fn double_biased_coins() -> [DoubleBiasedCoin; 2] {
    [double_biased_coin_minimize, double_biased_coin_urn]
}

#[test]
fn double_biased_coin_returns_a_configured_label() {
    let options = DoubleBiasedCoinOptions::default();
    for allocate in double_biased_coins() {
        for (c, t) in [((5, 6), (7, 8)), ((6, 6), (7, 8)), ((6, 8), (7, 7))] {
            let mut source = RandomSource::from_seed(17);
            let group = allocate(
                ArmOutcomes::new(c.0, c.1),
                ArmOutcomes::new(t.0, t.1),
                &options,
                &mut source,
            )
            .unwrap();
            assert!(group == "Control" || group == "Treatment", "{group}");
        }
    }
}

#[test]
fn double_biased_coin_rejects_more_successes_than_trials() {
    let options = DoubleBiasedCoinOptions::default();
    for allocate in double_biased_coins() {
        for (c, t) in [((6, 5), (7, 8)), ((6, 7), (9, 8)), ((6, 5), (7, 5))] {
            let mut source = RandomSource::from_entropy();
            let result = allocate(
                ArmOutcomes::new(c.0, c.1),
                ArmOutcomes::new(t.0, t.1),
                &options,
                &mut source,
            );
            assert!(matches!(
                result,
                Err(ValidationError::TrialsBelowSuccesses { .. })
            ));
        }
    }
}

#[test]
fn double_biased_coin_uses_custom_labels() {
    let options = DoubleBiasedCoinOptions::default()
        .with_control_name("C")
        .with_treatment_name("T");
    let mut source = RandomSource::from_seed(3);
    let group = double_biased_coin_urn(
        ArmOutcomes::new(1, 4),
        ArmOutcomes::new(3, 4),
        &options,
        &mut source,
    )
    .unwrap();
    assert!(group == "C" || group == "T");
}

#[test]
fn double_biased_coin_replays_with_equal_seed_and_counts() {
    let options = DoubleBiasedCoinOptions::default();
    let draw = |seed: u64| {
        double_biased_coin_minimize(
            ArmOutcomes::new(5, 10),
            ArmOutcomes::new(5, 10),
            &options,
            &mut RandomSource::from_seed(seed),
        )
        .unwrap()
    };
    // Equal seeds and counts replay the same allocation.
    assert_eq!(draw(11), draw(11));
}

#[test]
fn double_biased_coin_offsets_the_seed_by_ten_times_the_trials() {
    let options = DoubleBiasedCoinOptions::default();
    let (control, treatment) = (ArmOutcomes::new(5, 10), ArmOutcomes::new(3, 10));
    let minimize_cut = 0.5_f64.sqrt() / (0.5_f64.sqrt() + 0.3_f64.sqrt());
    let urn_cut = (1.0 - 0.3) / ((1.0 - 0.3) + (1.0 - 0.5));

    for seed in 0..300_u64 {
        let draw: f64 = StdRng::seed_from_u64(seed + 10 * 20).random();
        let expected = |cut: f64| if draw < cut { "Control" } else { "Treatment" };

        let minimize = double_biased_coin_minimize(
            control,
            treatment,
            &options,
            &mut RandomSource::from_seed(seed),
        )
        .unwrap();
        assert_eq!(minimize, expected(minimize_cut), "seed {seed}");

        let urn =
            double_biased_coin_urn(control, treatment, &options, &mut RandomSource::from_seed(seed))
                .unwrap();
        assert_eq!(urn, expected(urn_cut), "seed {seed}");
    }
}

#[test]
fn double_biased_coin_draw_changes_with_the_trial_total() {
    let options = DoubleBiasedCoinOptions::default();
    let allocate = |seed: u64, trials: u64| {
        // Equal rates keep the cut at one half, so only the seed offset differs.
        double_biased_coin_minimize(
            ArmOutcomes::new(trials / 2, trials),
            ArmOutcomes::new(trials / 2, trials),
            &options,
            &mut RandomSource::from_seed(seed),
        )
        .unwrap()
    };
    let differing = (0..200_u64)
        .filter(|&seed| allocate(seed, 10) != allocate(seed, 20))
        .count();
    assert!((60..140).contains(&differing), "differing = {differing}");
}

#[test]
fn double_biased_coin_favours_the_better_arm() {
    let options = DoubleBiasedCoinOptions::default();
    let mut control = [0_usize; 2];
    for seed in 0..2_000 {
        // Control succeeds far more often than treatment.
        let minimize = double_biased_coin_minimize(
            ArmOutcomes::new(9, 10),
            ArmOutcomes::new(1, 10),
            &options,
            &mut RandomSource::from_seed(seed),
        )
        .unwrap();
        let urn = double_biased_coin_urn(
            ArmOutcomes::new(9, 10),
            ArmOutcomes::new(1, 10),
            &options,
            &mut RandomSource::from_seed(seed),
        )
        .unwrap();
        control[0] += usize::from(minimize == "Control");
        control[1] += usize::from(urn == "Control");
    }
    // sqrt(.9) / (sqrt(.9) + sqrt(.1)) = 0.75 and .9 / (.9 + .1) = 0.9.
    assert!((1_400..1_600).contains(&control[0]), "{control:?}");
    assert!((1_720..1_880).contains(&control[1]), "{control:?}");
}

#[test]
fn current_belief_picks_the_highest_posterior_mean() {
    let mut rng = StdRng::seed_from_u64(79461734);
    let options = BanditOptions::default();
    assert_eq!(
        multi_arm_bandit(&[1, 8, 3], &[9, 2, 7], &options, &mut rng),
        Ok(1)
    );
}

#[test]
fn current_belief_ties_are_broken_at_random() {
    let mut rng = StdRng::seed_from_u64(2);
    let options = BanditOptions::default();
    let mut seen = [false; 3];
    for _ in 0..200 {
        let arm = multi_arm_bandit(&[4, 4, 1], &[1, 1, 4], &options, &mut rng).unwrap();
        seen[arm] = true;
    }
    assert_eq!(seen, [true, true, false]);
}

#[test]
fn thompson_sampling_prefers_the_dominant_arm() {
    let mut rng = StdRng::seed_from_u64(8);
    let options = BanditOptions::default().with_method(BanditMethod::Thompson);
    let mut wins = [0_usize; 2];
    for _ in 0..1_000 {
        wins[multi_arm_bandit(&[40, 10], &[10, 40], &options, &mut rng).unwrap()] += 1;
    }
    assert!(wins[0] > 990, "{wins:?}");

    let mut wins = [0_usize; 2];
    for _ in 0..2_000 {
        wins[multi_arm_bandit(&[0, 0], &[0, 0], &options, &mut rng).unwrap()] += 1;
    }
    assert!((850..1_150).contains(&wins[0]), "{wins:?}");
}

#[test]
fn ucb_without_trials_picks_any_arm() {
    let mut rng = StdRng::seed_from_u64(4);
    let options = BanditOptions::default().with_method(BanditMethod::Ucb);
    let mut seen = [false; 4];
    for _ in 0..200 {
        seen[multi_arm_bandit(&[0; 4], &[0; 4], &options, &mut rng).unwrap()] = true;
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn ucb_rewards_under_explored_arms() {
    let mut rng = StdRng::seed_from_u64(4);
    let options = BanditOptions::default().with_method(BanditMethod::Ucb);
    // Arm 0 has the higher mean, arm 1 has barely been tried.
    let arm = multi_arm_bandit(&[60, 0], &[40, 1], &options, &mut rng).unwrap();
    assert_eq!(arm, 1);

    let explicit_trials = options.with_trials(1);
    let arm = multi_arm_bandit(&[60, 0], &[40, 1], &explicit_trials, &mut rng).unwrap();
    assert_eq!(arm, 0);
}

#[test]
fn ucb_with_zero_trials_falls_back_to_observed_counts() {
    let options = BanditOptions::default()
        .with_method(BanditMethod::Ucb)
        .with_trials(0);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(
            multi_arm_bandit(&[60, 0], &[40, 1], &options, &mut rng),
            Ok(1)
        );
    }
}

#[test]
fn bandit_validates_its_inputs() {
    let mut rng = StdRng::seed_from_u64(0);
    let options = BanditOptions::default();
    assert_eq!(
        multi_arm_bandit(&[], &[], &options, &mut rng),
        Err(ValidationError::NoArms)
    );
    assert!(matches!(
        multi_arm_bandit(&[1, 2], &[1], &options, &mut rng),
        Err(ValidationError::LengthMismatch { name: "failures", .. })
    ));
    let bad_prior = options.with_prior(0.0, 0.5);
    assert!(matches!(
        multi_arm_bandit(&[1], &[1], &bad_prior, &mut rng),
        Err(ValidationError::OutOfRange { name: "prior_alpha", .. })
    ));
}
