use std::path::Path;

use crate::adapters::observations_csv::parse_observations;
use crate::core::engine::build_burndown;
use crate::core::report::Report;
use crate::core::sample::SampleData;
use crate::core::{Burndown, BurndownRequest, ConfigProvider, DateRange, Pipeline, Storage};
use crate::utils::error::Result;

/// Collects chart input from a config, runs the engine and writes the
/// selected report formats through `storage`.
///
/// Paths handed to `storage` are relative to its root: the observations file
/// as configured and outputs under `output_path`.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn sample_request(&self) -> Result<Option<BurndownRequest>> {
        let Some(kind) = self.config.sample()? else {
            return Ok(None);
        };

        let range = DateRange::parse(self.config.start_date(), self.config.end_date())?;
        let sample = SampleData::from_kind(
            &kind,
            range,
            self.config.total(),
            self.config.tick_weekday()?,
        );
        tracing::info!(
            "🧪 Using {:?} sample data: {} observations, total {}",
            kind,
            sample.observations.len(),
            sample.total
        );

        Ok(Some(BurndownRequest {
            start: self.config.start_date().to_string(),
            end: self.config.end_date().to_string(),
            total: sample.total,
            observations: sample.raw_observations(),
        }))
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn extract(&self) -> Result<BurndownRequest> {
        if let Some(request) = self.sample_request()? {
            return Ok(request);
        }

        let mut observations = Vec::new();

        if let Some(path) = self.config.observations_file() {
            tracing::debug!("Reading observations from: {}", path);
            let data = self.storage.read_file(path)?;
            let from_file = parse_observations(&data)?;
            tracing::debug!("Read {} observations from {}", from_file.len(), path);
            observations.extend(from_file);
        }

        observations.extend(self.config.inline_observations());

        Ok(BurndownRequest {
            start: self.config.start_date().to_string(),
            end: self.config.end_date().to_string(),
            total: self.config.total(),
            observations,
        })
    }

    fn transform(&self, request: BurndownRequest) -> Result<Burndown> {
        let range = DateRange::parse(&request.start, &request.end)?;
        build_burndown(&range, request.total, &request.observations)
    }

    fn load(&self, burndown: Burndown) -> Result<String> {
        let report = Report::from_burndown(
            self.config.title(),
            &burndown,
            self.config.tick_weekday()?,
        )?;

        let entries: Vec<(String, String)> = self
            .config
            .output_formats()
            .iter()
            .map(|format| (self.config.filename_for(format), format.clone()))
            .collect();

        if let Some(zip_name) = self.config.zip_filename() {
            // every format goes into one archive
            let zip_data = report.to_zip(&entries)?;
            let output_path = self.output_file(zip_name);
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&output_path, &zip_data)?;
            return Ok(output_path);
        }

        // resolve every body first so an unknown format writes nothing
        let bodies = entries
            .iter()
            .map(|(name, format)| Ok((name, format, report.body_for(format)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(bodies.len());
        for (name, format, body) in bodies {
            let output_path = self.output_file(name);
            tracing::debug!("Writing {} report to {}", format, output_path);
            self.storage.write_file(&output_path, body.as_bytes())?;
            written.push(output_path);
        }

        Ok(written.join(", "))
    }
}
