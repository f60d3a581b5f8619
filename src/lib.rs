pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{AppSettings, SubmissionConfig};
pub use crate::core::{
    calculator::RoiCalculator, engine::project, session::Session, sink::SubmissionSink,
};
pub use domain::model::{InputField, InputRecord, RoiProjection, SubmissionRecord};
pub use utils::error::{Result, RoiError};
