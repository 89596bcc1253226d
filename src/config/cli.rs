use crate::core::sample::{DEFAULT_END, DEFAULT_START, DEFAULT_TOTAL, DEFAULT_WEEKDAY};
use crate::core::{ConfigProvider, RawObservation};
use crate::domain::model::SampleKind;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_output_formats, validate_path, Validate,
};
use chrono::Weekday;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "burndown")]
#[command(about = "Compute ideal vs actual burndown series and export them")]
pub struct CliConfig {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Estimated completion date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Total number of units to complete
    #[arg(long)]
    pub total: Option<i64>,

    /// Cumulative completed count as DATE=COUNT, repeatable
    #[arg(long = "actual", value_parser = parse_actual)]
    pub actuals: Vec<RawObservation>,

    /// CSV file with a `date,count` header
    #[arg(long)]
    pub actuals_csv: Option<String>,

    /// Generate input instead: `weekly` or `completions`
    #[arg(long, value_parser = parse_sample)]
    pub sample: Option<SampleKind>,

    #[arg(long, default_value = "Burndown Chart")]
    pub title: String,

    /// Weekday that gets an axis label
    #[arg(long, default_value_t = DEFAULT_WEEKDAY, value_parser = parse_weekday)]
    pub tick_weekday: Weekday,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub formats: Vec<String>,

    /// Bundle every output into one ZIP archive
    #[arg(long)]
    pub zip: bool,

    #[arg(long, default_value = "burndown.zip")]
    pub zip_name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn parse_actual(value: &str) -> std::result::Result<RawObservation, String> {
    let (date, count) = value
        .split_once('=')
        .ok_or_else(|| format!("expected DATE=COUNT, got '{}'", value))?;
    let count = count
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid count in '{}': {}", value, e))?;
    Ok(RawObservation::new(date.trim(), count))
}

fn parse_sample(value: &str) -> std::result::Result<SampleKind, String> {
    value.parse::<SampleKind>().map_err(|e| e.to_string())
}

fn parse_weekday(value: &str) -> std::result::Result<Weekday, String> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| format!("'{}' is not a weekday", value))
}

impl CliConfig {
    fn default_or_empty(&self, value: &'static str) -> &'static str {
        if self.sample.is_some() {
            value
        } else {
            ""
        }
    }
}

impl ConfigProvider for CliConfig {
    fn title(&self) -> &str {
        &self.title
    }

    fn start_date(&self) -> &str {
        self.start
            .as_deref()
            .unwrap_or_else(|| self.default_or_empty(DEFAULT_START))
    }

    fn end_date(&self) -> &str {
        self.end
            .as_deref()
            .unwrap_or_else(|| self.default_or_empty(DEFAULT_END))
    }

    fn total(&self) -> i64 {
        match (self.total, &self.sample) {
            (Some(total), _) => total,
            (None, Some(_)) => DEFAULT_TOTAL,
            (None, None) => 0,
        }
    }

    fn inline_observations(&self) -> Vec<RawObservation> {
        self.actuals.clone()
    }

    fn observations_file(&self) -> Option<&str> {
        self.actuals_csv.as_deref()
    }

    fn sample(&self) -> Result<Option<SampleKind>> {
        Ok(self.sample.clone())
    }

    fn tick_weekday(&self) -> Result<Weekday> {
        Ok(self.tick_weekday)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn zip_filename(&self) -> Option<&str> {
        self.zip.then_some(self.zip_name.as_str())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("formats", &self.formats)?;
        if self.zip {
            validate_non_empty_string("zip_name", &self.zip_name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_arguments() {
        let config = CliConfig::parse_from([
            "burndown",
            "--start",
            "2026-02-12",
            "--end",
            "2026-02-19",
            "--total",
            "10",
            "--actual",
            "2026-02-19=10",
            "--formats",
            "csv,json",
        ]);

        assert_eq!(config.start_date(), "2026-02-12");
        assert_eq!(config.total(), 10);
        assert_eq!(
            config.inline_observations(),
            vec![RawObservation::new("2026-02-19", 10)]
        );
        assert_eq!(config.output_formats(), &["csv".to_string(), "json".to_string()]);
        assert_eq!(config.tick_weekday().unwrap(), DEFAULT_WEEKDAY);
        assert!(config.zip_filename().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_fills_in_defaults() {
        let config = CliConfig::parse_from(["burndown", "--sample", "weekly", "--zip"]);
        assert_eq!(config.start_date(), DEFAULT_START);
        assert_eq!(config.end_date(), DEFAULT_END);
        assert_eq!(config.total(), DEFAULT_TOTAL);
        assert_eq!(config.zip_filename(), Some("burndown.zip"));
    }

    #[test]
    fn test_missing_dates_stay_empty_without_sample() {
        let config = CliConfig::parse_from(["burndown", "--total", "3"]);
        assert_eq!(config.start_date(), "");
        assert_eq!(config.end_date(), "");
    }

    #[test]
    fn test_rejects_malformed_actual() {
        let result = CliConfig::try_parse_from(["burndown", "--actual", "2026-02-19"]);
        assert!(result.is_err());
        let result = CliConfig::try_parse_from(["burndown", "--actual", "2026-02-19=lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let config = CliConfig::parse_from(["burndown", "--formats", "png"]);
        assert!(config.validate().is_err());
    }
}
