pub mod calculator;
pub mod display;
pub mod engine;
pub mod session;
pub mod sink;

pub use crate::domain::model::{InputField, InputRecord, RoiProjection, SubmissionRecord};
pub use crate::domain::ports::SubmissionTransport;
pub use crate::utils::error::Result;
