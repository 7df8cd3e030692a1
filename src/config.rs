//! Scoring thresholds and weights.
//!
//! The defaults reproduce the stock rule table. A TOML file may override any
//! subset of the fields:
//!
//! ```toml
//! word_count_min = 500
//! keyword_density_max = 2.5
//! readability_good_min = 50.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid range for {name}: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub word_count_min: usize,
    pub word_count_max: usize,
    pub word_count_weight: f64,
    /// Fraction of `word_count_weight` awarded when the text is over-long.
    pub word_count_overflow_ratio: f64,
    pub title_length_min: usize,
    pub title_length_max: usize,
    pub title_length_weight: f64,
    pub keyword_in_title_weight: f64,
    pub description_length_min: usize,
    pub description_length_max: usize,
    pub description_length_weight: f64,
    pub keyword_in_description_weight: f64,
    /// Percent.
    pub keyword_density_min: f64,
    /// Percent.
    pub keyword_density_max: f64,
    pub keyword_density_weight: f64,
    pub h1_weight: f64,
    pub heading_hierarchy_weight: f64,
    pub keyword_in_headings_weight: f64,
    pub readability_good_min: f64,
    pub readability_fair_min: f64,
    pub readability_weight: f64,
    pub reading_words_per_minute: usize,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            word_count_min: 300,
            word_count_max: 2000,
            word_count_weight: 20.0,
            word_count_overflow_ratio: 0.7,
            title_length_min: 30,
            title_length_max: 60,
            title_length_weight: 15.0,
            keyword_in_title_weight: 10.0,
            description_length_min: 120,
            description_length_max: 160,
            description_length_weight: 15.0,
            keyword_in_description_weight: 5.0,
            keyword_density_min: 1.0,
            keyword_density_max: 3.0,
            keyword_density_weight: 20.0,
            h1_weight: 10.0,
            heading_hierarchy_weight: 5.0,
            keyword_in_headings_weight: 5.0,
            readability_good_min: 60.0,
            readability_fair_min: 30.0,
            readability_weight: 5.0,
            reading_words_per_minute: 200,
        }
    }
}

impl ScoringRules {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let rules: ScoringRules = toml::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded scoring rules");
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "word_count",
            self.word_count_min as f64,
            self.word_count_max as f64,
        )?;
        check_range(
            "title_length",
            self.title_length_min as f64,
            self.title_length_max as f64,
        )?;
        check_range(
            "description_length",
            self.description_length_min as f64,
            self.description_length_max as f64,
        )?;
        check_range(
            "keyword_density",
            self.keyword_density_min,
            self.keyword_density_max,
        )?;
        check_range(
            "readability",
            self.readability_fair_min,
            self.readability_good_min,
        )?;

        if self.reading_words_per_minute == 0 {
            return Err(ConfigError::InvalidValue {
                name: "reading_words_per_minute",
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.word_count_overflow_ratio) {
            return Err(ConfigError::InvalidValue {
                name: "word_count_overflow_ratio",
                reason: format!("{} is outside 0..=1", self.word_count_overflow_ratio),
            });
        }

        let weights = [
            ("word_count_weight", self.word_count_weight),
            ("title_length_weight", self.title_length_weight),
            ("keyword_in_title_weight", self.keyword_in_title_weight),
            ("description_length_weight", self.description_length_weight),
            (
                "keyword_in_description_weight",
                self.keyword_in_description_weight,
            ),
            ("keyword_density_weight", self.keyword_density_weight),
            ("h1_weight", self.h1_weight),
            ("heading_hierarchy_weight", self.heading_hierarchy_weight),
            ("keyword_in_headings_weight", self.keyword_in_headings_weight),
            ("readability_weight", self.readability_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("weight {weight} must be a non-negative number"),
                });
            }
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("bounds {min}..={max} must be finite numbers"),
        });
    }
    if min > max {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}
