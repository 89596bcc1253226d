use std::io::Write;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::domain::model::Burndown;
use crate::utils::error::{BurndownError, Result};

/// Axis label per day: `12 Feb` on `weekday`, blank on every other day.
pub fn tick_labels(days: &[NaiveDate], weekday: Weekday) -> Vec<String> {
    days.iter()
        .map(|day| {
            if day.weekday() == weekday {
                day.format("%-d %b").to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    date: String,
    label: &'a str,
    ideal: u64,
    actual: u64,
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    title: &'a str,
    total: u64,
    days: Vec<String>,
    labels: &'a [String],
    ideal: &'a [u64],
    actual: &'a [u64],
}

/// Rendered tables for one burndown, one field per output format.
#[derive(Debug, Clone)]
pub struct Report {
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
}

impl Report {
    pub fn from_burndown(title: &str, burndown: &Burndown, weekday: Weekday) -> Result<Self> {
        let labels = tick_labels(&burndown.days, weekday);
        let iso_days: Vec<String> = burndown
            .days
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        let csv_output = Self::delimited(burndown, &iso_days, &labels, b',')?;
        let tsv_output = Self::delimited(burndown, &iso_days, &labels, b'\t')?;

        let document = ReportDocument {
            title,
            total: burndown.total,
            days: iso_days,
            labels: &labels,
            ideal: &burndown.ideal,
            actual: &burndown.actual,
        };
        let json_output = serde_json::to_string_pretty(&document)?;

        Ok(Self {
            csv_output,
            tsv_output,
            json_output,
        })
    }

    fn delimited(
        burndown: &Burndown,
        iso_days: &[String],
        labels: &[String],
        delimiter: u8,
    ) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        for (i, date) in iso_days.iter().enumerate() {
            writer.serialize(ReportRow {
                date: date.clone(),
                label: &labels[i],
                ideal: burndown.ideal[i],
                actual: burndown.actual[i],
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| BurndownError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| {
            BurndownError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Rendered body for `format`; anything outside csv/tsv/json is a config error.
    pub fn body_for(&self, format: &str) -> Result<&str> {
        match format {
            "csv" => Ok(&self.csv_output),
            "tsv" => Ok(&self.tsv_output),
            "json" => Ok(&self.json_output),
            other => Err(BurndownError::InvalidConfigValue {
                field: "load.output_formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            }),
        }
    }

    /// Bundles the named `(file name, format)` pairs into one ZIP archive.
    pub fn to_zip(&self, entries: &[(String, String)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for (name, format) in entries {
            let body = self.body_for(format)?;
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(body.as_bytes())?;
        }

        // finish and take back the inner Vec<u8>
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
