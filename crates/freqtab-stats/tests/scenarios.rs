use freqtab_stats::{
    CompletedRow, CzuberBoundary, EngineConfig, FreqTableError, FrequencyColumn, ModeEstimate,
    RawRow, StatisticsResult, Warning, analyze,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

fn run(
    rows: &[(&str, &str, &str)],
    config: &EngineConfig,
) -> Result<StatisticsResult, FreqTableError> {
    let rows = rows
        .iter()
        .map(|&(class, fi, faq)| RawRow::new(class, fi, faq))
        .collect::<Vec<_>>();
    analyze(&rows, config)
}

fn column(result: &StatisticsResult, f: impl Fn(&CompletedRow) -> f64) -> Vec<f64> {
    result.table.rows().iter().map(f).collect()
}

const SCENARIO_A: &[(&str, &str, &str)] =
    &[("8-10", "", "2"), ("10-12", "", "8"), ("12-14", "", "18")];

const SCENARIO_B: &[(&str, &str, &str)] = &[
    ("15-19", "5", ""),
    ("19-23", "13", ""),
    ("23-27", "13", ""),
    ("27-31", "11", ""),
    ("31-35", "10", ""),
];

#[test]
fn scenario_a_cumulative_only() {
    let result = run(SCENARIO_A, &EngineConfig::default()).unwrap();

    assert_eq!(column(&result, |r| r.fi), [2.0, 6.0, 10.0]);
    assert_eq!(column(&result, |r| r.midpoint), [9.0, 11.0, 13.0]);
    assert_eq!(column(&result, |r| r.weighted_value), [18.0, 66.0, 130.0]);
    assert_close(result.mean, 11.8889, 1e-4);
    assert_close(result.median.unwrap(), 12.2, 1e-9);
    assert_eq!(result.raw_modes, ModeEstimate::Unimodal(13.0));
    assert!(result.warnings.is_empty());

    // Last-row modal class: zero successor frequency, d1 = 4, d2 = 10
    assert_close(result.czuber_modes.values()[0], 12.0 + 8.0 / 14.0, 1e-9);
}

#[test]
fn scenario_a_raw_mode_fallback() {
    let config = EngineConfig {
        czuber_boundary: CzuberBoundary::RawModeFallback,
        ..EngineConfig::default()
    };
    let result = run(SCENARIO_A, &config).unwrap();
    assert_eq!(result.czuber_modes, ModeEstimate::Unimodal(13.0));
    assert_eq!(result.czuber_modes, result.raw_modes);
}

#[test]
fn scenario_b_multimodal() {
    let result = run(SCENARIO_B, &EngineConfig::default()).unwrap();

    assert_eq!(column(&result, |r| r.faq), [5.0, 18.0, 31.0, 42.0, 52.0]);
    assert_eq!(result.total_frequency, 52.0);
    assert_close(result.mean, 25.62, 1e-2);
    assert_close(result.median.unwrap(), 25.46, 1e-2);
    assert_eq!(result.raw_modes, ModeEstimate::Multimodal(vec![21.0, 25.0]));
    assert_eq!(result.czuber_modes, ModeEstimate::Unimodal(23.0));
    assert_close(result.std_dev, result.variance.sqrt(), 1e-12);
    assert_close(
        result.coefficient_of_variation.unwrap(),
        result.std_dev / result.mean * 100.0,
        1e-12,
    );
}

#[test]
fn input_order_does_not_matter() {
    let shuffled = [
        SCENARIO_B[3],
        SCENARIO_B[0],
        SCENARIO_B[4],
        SCENARIO_B[2],
        SCENARIO_B[1],
    ];
    let config = EngineConfig::default();
    assert_eq!(run(&shuffled, &config), run(SCENARIO_B, &config));
}

#[test]
fn alternative_separators_and_decimal_commas() {
    let rows = [
        ("1,5 a 2,5", "3", ""),
        ("2,5 até 3,5", "5", ""),
        ("3,5-4,5", "2", ""),
    ];
    let result = run(&rows, &EngineConfig::default()).unwrap();
    assert_eq!(column(&result, |r| r.lower), [1.5, 2.5, 3.5]);
    assert_eq!(column(&result, |r| r.upper), [2.5, 3.5, 4.5]);
    assert!(result.warnings.is_empty());
}

#[test]
fn amodal_distribution() {
    let rows = [
        ("0-10", "3", ""),
        ("10-20", "3", ""),
        ("20-30", "3", ""),
        ("30-40", "3", ""),
    ];
    let result = run(&rows, &EngineConfig::default()).unwrap();
    assert!(result.raw_modes.is_undefined());
    assert_eq!(result.czuber_modes, ModeEstimate::Unimodal(20.0));
    assert_eq!(result.warnings, [Warning::Amodal { frequency: 3.0 }]);
}

#[test]
fn gaps_in_both_columns_at_same_row() {
    let rows = [("0-10", "3", "3"), ("10-20", "", ""), ("20-30", "2", "9")];
    let err = run(&rows, &EngineConfig::default()).unwrap_err();
    assert!(err.is_incomplete_reconciliation());
}

#[test]
fn decreasing_cumulative_frequencies() {
    let rows = [("0-10", "", "3"), ("10-20", "", "2"), ("20-30", "", "9")];
    let err = run(&rows, &EngineConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FreqTableError::Order {
            label: "10-20".to_owned(),
            previous: 3.0,
            current: 2.0,
        }
    );
}

#[test]
fn contradictory_complete_columns() {
    let rows = [("0-10", "1", "1"), ("10-20", "3", "1")];
    let result = run(&rows, &EngineConfig::default()).unwrap();
    assert_eq!(column(&result, |r| r.faq), [1.0, 4.0]);
    assert_close(result.median.unwrap(), 10.0 + 10.0 / 3.0, 1e-9);
    assert_eq!(
        result.warnings,
        [Warning::FrequencyMismatch {
            label: "10-20".to_owned(),
            column: FrequencyColumn::Cumulative,
            supplied: 1.0,
            derived: 4.0,
        }]
    );
}

#[test]
fn unparseable_class_label() {
    let rows = [("8-10", "1", ""), ("ten to twelve", "2", "")];
    let err = run(&rows, &EngineConfig::default()).unwrap_err();
    assert_eq!(
        err,
        FreqTableError::Parse {
            label: "ten to twelve".to_owned(),
        }
    );
}

#[test]
fn no_frequencies_at_all() {
    let rows = [("8-10", "", ""), ("10-12", "", "")];
    let err = run(&rows, &EngineConfig::default()).unwrap_err();
    assert_eq!(err, FreqTableError::InsufficientData);
}

#[test]
fn config_from_json() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"czuber_boundary": "raw_mode_fallback", "width_tolerance": 0.5}"#)
            .unwrap();
    // widths 2 and 2.5 are within 50% of each other
    let rows = [("0-2", "1", ""), ("2-4,5", "3", ""), ("4,5-6,5", "1", "")];
    let result = run(&rows, &config).unwrap();
    assert!(result.warnings.is_empty());
    let result = run(&rows, &EngineConfig::default()).unwrap();
    assert!(result.warnings.iter().any(Warning::is_heterogeneous_width));
}
