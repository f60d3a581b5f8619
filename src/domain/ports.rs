use crate::domain::model::SubmissionRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Delivers one submission record to the lead-capture backend.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn deliver(&self, record: &SubmissionRecord) -> Result<()>;

    /// Short name used in log lines.
    fn name(&self) -> &str;
}
