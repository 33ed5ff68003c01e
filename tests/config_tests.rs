use thompson_bandit::test_utils::{TestCase, run_table_tests};
use thompson_bandit::{BanditError, ExperimentConfig};

fn base() -> ExperimentConfig {
    ExperimentConfig::new([0.2, 0.8])
}

#[test]
fn valid_configurations_accepted() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "defaults",
            input: base(),
            expected: true,
        },
        TestCase {
            name: "single bandit",
            input: ExperimentConfig::new([0.5]),
            expected: true,
        },
        TestCase {
            name: "probabilities at both bounds",
            input: ExperimentConfig::new([0.0, 1.0]),
            expected: true,
        },
        TestCase {
            name: "one step",
            input: ExperimentConfig {
                steps: 1,
                ..base()
            },
            expected: true,
        },
        TestCase {
            name: "damping at both bounds",
            input: ExperimentConfig {
                alpha_damping: 0.0,
                beta_damping: 1.0,
                ..base()
            },
            expected: true,
        },
        TestCase {
            name: "zero priors",
            input: ExperimentConfig {
                alpha_init: Some(vec![0.0, 0.0]),
                beta_init: Some(vec![0.0, 0.0]),
                ..base()
            },
            expected: true,
        },
        TestCase {
            name: "optimistic with zero threshold",
            input: ExperimentConfig {
                optimistic: true,
                optimistic_threshold: 0.0,
                ..base()
            },
            expected: true,
        },
        TestCase {
            name: "threshold just below one",
            input: ExperimentConfig {
                optimistic: true,
                optimistic_threshold: 0.999,
                ..base()
            },
            expected: true,
        },
    ];

    run_table_tests(cases, |config| config.validate().is_ok())
}

#[test]
fn invalid_configurations_rejected() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "no bandits",
            input: ExperimentConfig::new(Vec::new()),
            expected: false,
        },
        TestCase {
            name: "probability above one",
            input: ExperimentConfig::new([0.2, 1.2]),
            expected: false,
        },
        TestCase {
            name: "negative probability",
            input: ExperimentConfig::new([-0.1]),
            expected: false,
        },
        TestCase {
            name: "nan probability",
            input: ExperimentConfig::new([f64::NAN]),
            expected: false,
        },
        TestCase {
            name: "infinite probability",
            input: ExperimentConfig::new([f64::INFINITY]),
            expected: false,
        },
        TestCase {
            name: "zero steps",
            input: ExperimentConfig {
                steps: 0,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "alpha damping above one",
            input: ExperimentConfig {
                alpha_damping: 1.5,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "negative beta damping",
            input: ExperimentConfig {
                beta_damping: -0.25,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "nan damping",
            input: ExperimentConfig {
                alpha_damping: f64::NAN,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "alpha init length mismatch",
            input: ExperimentConfig {
                alpha_init: Some(vec![1.0, 1.0, 1.0]),
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "negative beta init entry",
            input: ExperimentConfig {
                beta_init: Some(vec![1.0, -2.0]),
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "infinite alpha init entry",
            input: ExperimentConfig {
                alpha_init: Some(vec![1.0, f64::INFINITY]),
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "threshold at one",
            input: ExperimentConfig {
                optimistic: true,
                optimistic_threshold: 1.0,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "negative threshold",
            input: ExperimentConfig {
                optimistic: true,
                optimistic_threshold: -0.5,
                ..base()
            },
            expected: false,
        },
        TestCase {
            name: "invalid threshold with optimistic off",
            input: ExperimentConfig {
                optimistic: false,
                optimistic_threshold: 2.0,
                ..base()
            },
            expected: false,
        },
    ];

    run_table_tests(cases, |config| config.validate().is_ok())
}

#[test]
fn violations_surface_as_invalid_parameter() {
    let config = ExperimentConfig::new([1.7]);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, BanditError::InvalidParameter(_)));
    assert!(err.to_string().starts_with("invalid parameter:"));
}

#[test]
fn messages_name_the_offending_field() {
    let config = ExperimentConfig {
        beta_init: Some(vec![0.5]),
        ..ExperimentConfig::new([0.2, 0.8])
    };
    let message = config.validate().unwrap_err().to_string();
    assert!(message.contains("beta_init"));
    assert!(message.contains("length 1"));
}

#[test]
fn serde_round_trip_preserves_config() {
    let config = ExperimentConfig {
        steps: 250,
        alpha_damping: 0.5,
        optimistic: true,
        ..ExperimentConfig::new([0.1, 0.9])
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: ExperimentConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
