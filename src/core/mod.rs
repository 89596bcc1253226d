pub mod engine;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod sample;

pub use crate::domain::model::{
    Burndown, BurndownRequest, DateRange, Observation, RawObservation, Series,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
