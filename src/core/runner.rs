use crate::core::{Burndown, Pipeline};
use crate::utils::error::Result;

/// What one run produced: the computed chart data and where it was written.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub burndown: Burndown,
    pub output_path: String,
}

pub struct BurndownRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BurndownRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Computes the series without writing anything.
    pub fn compute(&self) -> Result<Burndown> {
        tracing::info!("📥 Collecting chart input...");
        let request = self.pipeline.extract()?;
        tracing::info!(
            "Collected {} observations for {}..{} (total {})",
            request.observations.len(),
            request.start,
            request.end,
            request.total
        );

        tracing::info!("📉 Computing burndown...");
        let burndown = self.pipeline.transform(request)?;
        tracing::info!(
            "Computed {} days, remaining on last day: {}",
            burndown.len(),
            burndown.latest_remaining().unwrap_or(burndown.total)
        );
        Ok(burndown)
    }

    pub fn run(&self) -> Result<RunOutcome> {
        let burndown = self.compute()?;

        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(burndown.clone())?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunOutcome {
            burndown,
            output_path,
        })
    }
}
