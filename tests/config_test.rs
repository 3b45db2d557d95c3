//! Comprehensive unit tests for config.rs module

use std::io::Write;

use chat_stats::config::{AppConfig, InputConfig, LoggingConfig, ReportConfig, TextAnalysisConfig};

#[test]
fn test_default_logging_config() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_path, None);
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_default_input_config() {
    let config = AppConfig::default();

    assert_eq!(config.input.dialogs_dir, "dialogs");
    assert_eq!(config.input.max_dialogs, None);
    assert!(!config.input.skip_malformed);
}

#[test]
fn test_default_report_config() {
    let config = AppConfig::default();

    assert_eq!(config.report.output_dir, "./charts");
    assert_eq!(config.report.group_size, 10);
    assert_eq!(config.report.pie_slice_limit, 25);
    assert!(config.report.single_result_bars);
    assert_eq!((config.report.width, config.report.height), (1024, 768));
}

#[test]
fn test_default_analysis_config() {
    let config = AppConfig::default();

    assert_eq!(config.analysis.tracked_languages, vec!["uk", "ru"]);
    assert_eq!(config.analysis.period_boundary, "2022-02-24");
    assert!(config.analysis.alcohol_terms.contains(&"пив".to_string()));
    assert_eq!(
        config.analysis.alcohol_aliases.get("водк").map(String::as_str),
        Some("водка")
    );
    assert_eq!(config.analysis.neologisms.len(), 4);
}

#[test]
fn test_config_validation_success() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_invalid_log_level() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_valid_log_levels() {
    for level in ["trace", "debug", "info", "warn", "error"] {
        let mut config = AppConfig::default();
        config.logging.level = level.to_string();
        assert!(config.validate().is_ok(), "level {level} should be valid");
    }
}

#[test]
fn test_config_validation_invalid_log_format() {
    let mut config = AppConfig::default();
    config.logging.format = "xml".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_max_dialogs() {
    let mut config = AppConfig::default();
    config.input.max_dialogs = Some(0);
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_group_size() {
    let mut config = AppConfig::default();
    config.report.group_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_pie_slice_limit() {
    let mut config = AppConfig::default();
    config.report.pie_slice_limit = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_zero_chart_size() {
    let mut config = AppConfig::default();
    config.report.height = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_empty_tracked_languages() {
    let mut config = AppConfig::default();
    config.analysis.tracked_languages.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_empty_term() {
    let mut config = AppConfig::default();
    config.analysis.neologisms.push(String::new());
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_bad_period_boundary() {
    let mut config = AppConfig::default();
    config.analysis.period_boundary = "24.02.2022".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_logging_config_with_file_path() {
    let config = LoggingConfig {
        level: "debug".to_string(),
        file_path: Some("/tmp/chat-stats.log".to_string()),
        format: "json".to_string(),
    };
    assert_eq!(config.file_path.as_deref(), Some("/tmp/chat-stats.log"));
}

#[test]
fn test_load_from_extra_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "input:\n  dialogs_dir: exports\n  max_dialogs: 3\nreport:\n  group_size: 5\n"
    )
    .unwrap();

    let config = AppConfig::load_from(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.input.dialogs_dir, "exports");
    assert_eq!(config.input.max_dialogs, Some(3));
    assert_eq!(config.report.group_size, 5);
    // Untouched sections keep their defaults
    assert_eq!(config.report.pie_slice_limit, 25);
    assert_eq!(config.analysis.period_boundary, "2022-02-24");
}

#[test]
fn test_load_from_invalid_file_fails_validation() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "report:\n  group_size: 0\n").unwrap();

    assert!(AppConfig::load_from(Some(file.path().to_path_buf())).is_err());
}

#[test]
fn test_to_yaml_contains_sections() {
    let yaml = AppConfig::default().to_yaml().unwrap();

    assert!(yaml.contains("logging:"));
    assert!(yaml.contains("group_size: 10"));
    assert!(yaml.contains("period_boundary:"));
}

#[test]
fn test_sections_build_independently() {
    let input = InputConfig {
        skip_malformed: true,
        ..InputConfig::default()
    };
    let report = ReportConfig {
        single_result_bars: false,
        ..ReportConfig::default()
    };
    let analysis = TextAnalysisConfig {
        tracked_languages: vec!["uk".to_string()],
        ..TextAnalysisConfig::default()
    };
    let config = AppConfig {
        input,
        report,
        analysis,
        ..AppConfig::default()
    };

    assert!(config.validate().is_ok());
    assert!(config.input.skip_malformed);
    assert!(!config.report.single_result_bars);
}

#[test]
fn test_config_clone() {
    let config = AppConfig::default();
    let cloned = config.clone();
    assert_eq!(cloned.input.dialogs_dir, config.input.dialogs_dir);
    assert_eq!(cloned.report.group_size, config.report.group_size);
}
