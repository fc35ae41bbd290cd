pub mod engine;
pub mod imaging;
pub mod paths;
pub mod walk;

pub use crate::domain::model::{
    ConversionJob, ConversionOutcome, DryRunReport, PurgeReport, RunReport,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
