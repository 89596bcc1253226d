use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::error::{BurndownError, Result};
use crate::utils::validation::parse_iso_date;

/// Remaining units, one entry per day of a [`DateRange`].
pub type Series = Vec<u64>;

/// Inclusive calendar range. `start <= end` is checked by the engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Builds a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_iso_date("Start date", start)?,
            end: parse_iso_date("Estimated completion date", end)?,
        })
    }
}

/// Cumulative units completed as of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub count: i64,
}

impl Observation {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }
}

/// An observation as it arrives from a CSV row, a TOML entry or a CLI flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    #[serde(default)]
    pub count: i64,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, count: i64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

impl From<Observation> for RawObservation {
    fn from(obs: Observation) -> Self {
        Self {
            date: obs.date.format("%Y-%m-%d").to_string(),
            count: obs.count,
        }
    }
}

/// Everything the engine needs for one chart, still in caller form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurndownRequest {
    pub start: String,
    pub end: String,
    pub total: i64,
    pub observations: Vec<RawObservation>,
}

/// Engine output: aligned per-day series, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burndown {
    pub total: u64,
    pub days: Vec<NaiveDate>,
    pub ideal: Series,
    pub actual: Series,
}

impl Burndown {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Actual remaining work on the last day of the range.
    pub fn latest_remaining(&self) -> Option<u64> {
        self.actual.last().copied()
    }
}

/// Built-in data sets for trying the tool without real observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleKind {
    /// Cumulative counts spread evenly over one weekday per week.
    Weekly,
    /// Individual completions written `D-Mon`, tallied per date.
    Completions { year: i32, entries: Vec<String> },
}

impl std::str::FromStr for SampleKind {
    type Err = BurndownError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "completions" => Ok(Self::Completions {
                year: crate::core::sample::DEFAULT_COMPLETIONS_YEAR,
                entries: crate::core::sample::default_completions(),
            }),
            other => Err(BurndownError::InvalidConfigValue {
                field: "sample".to_string(),
                value: other.to_string(),
                reason: "Expected 'weekly' or 'completions'".to_string(),
            }),
        }
    }
}
