//! Pipeline configuration
//!
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! input_path: data/enriched_transactions.jsonl
//! output_path: data/graph_metadata.jsonl
//! sample:
//!   fraction: 0.0035
//!   seed: 42
//!   limit: 100000
//! pagerank:
//!   reset_probability: 0.15
//!   max_iterations: 3
//! components:
//!   max_iterations: null
//! report:
//!   top_articles: 10
//!   customer_sample: 10
//! ```

use crate::algo::{PageRankConfig, WccConfig};
use crate::table::SampleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sizes of the reported result sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Articles kept from the PageRank ranking
    pub top_articles: usize,
    /// Customers shown from the community labelling
    pub customer_sample: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_articles: 10,
            customer_sample: 10,
        }
    }
}

/// Full configuration of one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub sample: SampleConfig,
    pub pagerank: PageRankConfig,
    pub components: WccConfig,
    pub report: ReportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/enriched_transactions.jsonl"),
            output_path: PathBuf::from("data/graph_metadata.jsonl"),
            sample: SampleConfig::default(),
            pagerank: PageRankConfig::default(),
            components: WccConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let fraction = self.sample.fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "sample.fraction must be in (0, 1], got {}",
                fraction
            )));
        }

        let reset = self.pagerank.reset_probability;
        if !(0.0..=1.0).contains(&reset) {
            return Err(ConfigError::Invalid(format!(
                "pagerank.reset_probability must be in [0, 1], got {}",
                reset
            )));
        }

        if self.pagerank.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "pagerank.max_iterations must be at least 1".to_string(),
            ));
        }

        if self.components.max_iterations == Some(0) {
            return Err(ConfigError::Invalid(
                "components.max_iterations must be at least 1".to_string(),
            ));
        }

        if self.report.top_articles == 0 {
            return Err(ConfigError::Invalid(
                "report.top_articles must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
