use crate::core::sample::{
    default_completions, DEFAULT_COMPLETIONS_YEAR, DEFAULT_END, DEFAULT_START, DEFAULT_TOTAL,
    DEFAULT_WEEKDAY,
};
use crate::core::{ConfigProvider, RawObservation};
use crate::domain::model::SampleKind;
use crate::utils::error::{BurndownError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_output_formats, validate_path, validate_weekday, Validate,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub chart: ChartConfig,
    pub source: Option<SourceConfig>,
    pub sample: Option<SampleConfig>,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub total: Option<i64>,
    pub tick_weekday: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub csv_path: Option<String>,
    pub observations: Option<Vec<RawObservation>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleConfig {
    pub kind: String,
    pub year: Option<i32>,
    pub completions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub tsv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

const DEFAULT_TITLE: &str = "Burndown Chart";

impl TomlConfig {
    /// Loads a config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BurndownError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders from the environment; undefined ones stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BurndownError::Config {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// `[sample]` as a typed kind; `None` when the section is absent.
    pub fn sample_kind(&self) -> Result<Option<SampleKind>> {
        let Some(sample) = &self.sample else {
            return Ok(None);
        };

        match sample.kind.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Some(SampleKind::Weekly)),
            "completions" => Ok(Some(SampleKind::Completions {
                year: sample.year.unwrap_or(DEFAULT_COMPLETIONS_YEAR),
                entries: sample
                    .completions
                    .clone()
                    .unwrap_or_else(default_completions),
            })),
            other => Err(BurndownError::InvalidConfigValue {
                field: "sample.kind".to_string(),
                value: other.to_string(),
                reason: "Expected 'weekly' or 'completions'".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("load.output_path", &self.load.output_path)?;
        validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(weekday) = &self.chart.tick_weekday {
            validate_weekday("chart.tick_weekday", weekday)?;
        }

        if let Some(compression) = &self.load.compression {
            if compression.enabled {
                validate_non_empty_string("load.compression.filename", &compression.filename)?;
            }
        }

        if let Some(source) = &self.source {
            if let Some(csv_path) = &source.csv_path {
                validate_path("source.csv_path", csv_path)?;
            }
        }

        self.sample_kind()?;
        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn sample_default(&self, value: &'static str) -> &'static str {
        if self.sample.is_some() {
            value
        } else {
            ""
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn title(&self) -> &str {
        self.chart.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    fn start_date(&self) -> &str {
        self.chart
            .start
            .as_deref()
            .unwrap_or_else(|| self.sample_default(DEFAULT_START))
    }

    fn end_date(&self) -> &str {
        self.chart
            .end
            .as_deref()
            .unwrap_or_else(|| self.sample_default(DEFAULT_END))
    }

    fn total(&self) -> i64 {
        match (self.chart.total, &self.sample) {
            (Some(total), _) => total,
            (None, Some(_)) => DEFAULT_TOTAL,
            (None, None) => 0,
        }
    }

    fn inline_observations(&self) -> Vec<RawObservation> {
        self.source
            .as_ref()
            .and_then(|s| s.observations.clone())
            .unwrap_or_default()
    }

    fn observations_file(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.csv_path.as_deref())
    }

    fn sample(&self) -> Result<Option<SampleKind>> {
        self.sample_kind()
    }

    fn tick_weekday(&self) -> Result<Weekday> {
        match self.chart.tick_weekday.as_deref() {
            Some(weekday) => validate_weekday("chart.tick_weekday", weekday),
            None => Ok(DEFAULT_WEEKDAY),
        }
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn zip_filename(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn filename_for(&self, format: &str) -> String {
        let configured = self.load.filenames.as_ref().and_then(|f| match format {
            "csv" => f.csv.clone(),
            "tsv" => f.tsv.clone(),
            "json" => f.json.clone(),
            _ => None,
        });
        configured.unwrap_or_else(|| format!("burndown.{}", format))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
