use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ChatStatsError, Result};

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub report: ReportConfig,
    pub analysis: TextAnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dialogs_dir: String,
    pub max_dialogs: Option<usize>,
    /// Drop rows that would abort the run instead of failing on them
    pub skip_malformed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: String,
    pub group_size: usize,
    pub pie_slice_limit: usize,
    /// Keep only the first bucket of every bar chart
    pub single_result_bars: bool,
    pub width: u32,
    pub height: u32,
}

/// Term lists and language settings for the text accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextAnalysisConfig {
    pub alcohol_terms: Vec<String>,
    /// Display name for a matched alcohol stem
    pub alcohol_aliases: HashMap<String, String>,
    pub neologisms: Vec<String>,
    /// ISO 639-1 codes
    pub tracked_languages: Vec<String>,
    /// `YYYY-MM-DD`; messages on or after this date fall into the second period
    pub period_boundary: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dialogs_dir: "dialogs".to_string(),
            max_dialogs: None,
            skip_malformed: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./charts".to_string(),
            group_size: 10,
            pie_slice_limit: 25,
            single_result_bars: true,
            width: 1024,
            height: 768,
        }
    }
}

impl Default for TextAnalysisConfig {
    fn default() -> Self {
        let terms = |list: &[&str]| list.iter().map(ToString::to_string).collect();
        Self {
            alcohol_terms: terms(&["пив", "водк", "вино", "ликер", "виски", "сидр"]),
            alcohol_aliases: HashMap::from([
                ("пив".to_string(), "пиво".to_string()),
                ("водк".to_string(), "водка".to_string()),
            ]),
            neologisms: terms(&["кек", "лол", "рофл", "кринж"]),
            tracked_languages: terms(&["uk", "ru"]),
            period_boundary: "2022-02-24".to_string(),
        }
    }
}

impl TextAnalysisConfig {
    /// Parsed `period_boundary`
    pub fn boundary_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.period_boundary, "%Y-%m-%d").map_err(|e| {
            ChatStatsError::InvalidConfig(format!(
                "period_boundary {:?} is not YYYY-MM-DD: {e}",
                self.period_boundary
            ))
        })
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Same as [`AppConfig::load`], with an extra explicit file layered on top
    pub fn load_from(extra_file: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder()
            // Missing keys fall back to the serde defaults above
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("chat_stats").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let app_config: Self = builder
            .add_source(Environment::with_prefix("CHAT_STATS").separator("__"))
            .build()?
            .try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ChatStatsError::InvalidConfig(msg));

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return invalid(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return invalid(format!(
                "Invalid log format: {}. Must be one of: {valid_formats:?}",
                self.logging.format
            ));
        }

        if self.input.max_dialogs == Some(0) {
            return invalid("max_dialogs must be greater than 0".to_string());
        }

        if self.report.group_size == 0 {
            return invalid("group_size must be greater than 0".to_string());
        }
        if self.report.pie_slice_limit == 0 {
            return invalid("pie_slice_limit must be greater than 0".to_string());
        }
        if self.report.width == 0 || self.report.height == 0 {
            return invalid("chart width and height must be greater than 0".to_string());
        }

        if self.analysis.tracked_languages.is_empty() {
            return invalid("tracked_languages cannot be empty".to_string());
        }
        if self.analysis.alcohol_terms.iter().chain(&self.analysis.neologisms).any(String::is_empty) {
            return invalid("search terms cannot be empty strings".to_string());
        }
        self.analysis.boundary_date()?;

        Ok(())
    }

    /// Get log level from environment or config
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Effective configuration rendered as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ChatStatsError::InvalidConfig(e.to_string()))
    }
}
