pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::LocalStorage;
pub use crate::core::engine::{
    build_burndown, compute_actual_series, compute_ideal_series, enumerate_days,
    normalize_observations,
};
pub use crate::core::{pipeline::ReportPipeline, runner::BurndownRunner};
pub use crate::domain::model::{
    Burndown, BurndownRequest, DateRange, Observation, RawObservation, Series,
};
pub use crate::utils::error::{BurndownError, Result};
