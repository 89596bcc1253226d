use chrono::Weekday;

use crate::domain::model::{Burndown, BurndownRequest, RawObservation, SampleKind};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn title(&self) -> &str;
    fn start_date(&self) -> &str;
    fn end_date(&self) -> &str;
    fn total(&self) -> i64;
    fn inline_observations(&self) -> Vec<RawObservation>;
    fn observations_file(&self) -> Option<&str>;
    /// Sample generator replacing the configured observations, if any.
    fn sample(&self) -> Result<Option<SampleKind>>;
    fn tick_weekday(&self) -> Result<Weekday>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Archive name when all outputs are bundled into one ZIP.
    fn zip_filename(&self) -> Option<&str>;
    fn filename_for(&self, format: &str) -> String {
        format!("burndown.{}", format)
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<BurndownRequest>;
    fn transform(&self, request: BurndownRequest) -> Result<Burndown>;
    fn load(&self, burndown: Burndown) -> Result<String>;
}
