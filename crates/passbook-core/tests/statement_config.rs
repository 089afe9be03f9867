use passbook_core::{AnalysisResult, Category, ConfigError, StatementConfig};

const FULL: &str = r#"
[parser]
statement_year = 2023

[anomaly]
outlier_fraction = 0.05
seed = 7
trees = 200
max_samples = 128
min_batch = 5

[input]
max_file_bytes = 2097152
"#;

#[test]
fn full_file_overrides_every_default() {
    let config = StatementConfig::from_toml_str(FULL).unwrap();
    assert_eq!(config.parser.statement_year, 2023);
    assert_eq!(config.anomaly.outlier_fraction, 0.05);
    assert_eq!(config.anomaly.seed, 7);
    assert_eq!(config.anomaly.trees, 200);
    assert_eq!(config.anomaly.max_samples, 128);
    assert_eq!(config.anomaly.min_batch, 5);
    assert_eq!(config.input.max_file_bytes, 2 * 1024 * 1024);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let config = StatementConfig::from_toml_str("[anomaly]\nseed = 1\n").unwrap();
    assert_eq!(config.anomaly.seed, 1);
    assert_eq!(config.anomaly.trees, 100);
    assert_eq!(config.parser.statement_year, 2024);
}

#[test]
fn out_of_range_fraction_names_the_field() {
    let err = StatementConfig::from_toml_str("[anomaly]\noutlier_fraction = 0.9\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "anomaly.outlier_fraction", .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = StatementConfig::from_toml_str("[anomaly\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn empty_result_json_shape() {
    let json = serde_json::to_value(AnalysisResult::empty()).unwrap();
    assert_eq!(json["total_income"], "0.00");
    assert_eq!(json["net_amount"], "0.00");
    for c in Category::ALL {
        assert_eq!(json["category_breakdown"][c.name()], "0.00");
    }
    assert_eq!(json["insights"], serde_json::json!({}));
}
