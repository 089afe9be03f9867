use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for the statement text parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Year applied to dates printed without one (`Wed Jun 26`).
    pub statement_year: i32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { statement_year: 2024 }
    }
}

/// Settings for the amount outlier model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Expected share of outliers in a batch.
    pub outlier_fraction: f64,
    pub seed: u64,
    pub trees: usize,
    pub max_samples: usize,
    /// Batches smaller than this are never scored.
    pub min_batch: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            outlier_fraction: 0.10,
            seed: 42,
            trees: 100,
            max_samples: 256,
            min_batch: 3,
        }
    }
}

/// Limits applied by front-ends before statement text reaches the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { max_file_bytes: 1024 * 1024 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    pub parser: ParserConfig,
    pub anomaly: AnomalyConfig,
    pub input: InputConfig,
}

impl StatementConfig {
    pub fn from_toml_str(toml_content: &str) -> Result<Self, ConfigError> {
        let config: StatementConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = self.anomaly.outlier_fraction;
        if !(fraction > 0.0 && fraction <= 0.5) {
            return Err(ConfigError::Invalid {
                field: "anomaly.outlier_fraction",
                reason: format!("{fraction} is outside (0, 0.5]"),
            });
        }
        if self.anomaly.trees == 0 {
            return Err(ConfigError::Invalid {
                field: "anomaly.trees",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.anomaly.max_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "anomaly.max_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=9999).contains(&self.parser.statement_year) {
            return Err(ConfigError::Invalid {
                field: "parser.statement_year",
                reason: format!("{} is not a four-digit year", self.parser.statement_year),
            });
        }
        Ok(())
    }
}
