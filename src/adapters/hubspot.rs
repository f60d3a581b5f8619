use crate::config::SubmissionConfig;
use crate::domain::model::SubmissionRecord;
use crate::domain::ports::SubmissionTransport;
use crate::utils::error::{Result, RoiError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Name of the single form field that carries the serialized record.
pub const PAYLOAD_FIELD_NAME: &str = "roi_payload";

#[derive(Debug, Serialize)]
pub struct FormSubmission {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormSubmission {
    /// Wraps the record as one opaque JSON string field.
    pub fn wrap(record: &SubmissionRecord) -> Result<Self> {
        Ok(Self {
            fields: vec![FormField {
                name: PAYLOAD_FIELD_NAME.to_string(),
                value: serde_json::to_string(record)?,
            }],
        })
    }
}

/// HubSpot Forms "submit" integration endpoint client.
pub struct HubSpotFormsClient {
    config: SubmissionConfig,
    client: Client,
}

impl HubSpotFormsClient {
    pub fn new(config: SubmissionConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/submissions/v3/integration/submit/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.portal_id,
            self.config.form_id
        )
    }
}

#[async_trait]
impl SubmissionTransport for HubSpotFormsClient {
    async fn deliver(&self, record: &SubmissionRecord) -> Result<()> {
        let endpoint = self.endpoint();
        let body = FormSubmission::wrap(record)?;

        tracing::debug!("📡 POST {}", endpoint);
        // .json() 會帶上 Content-Type: application/json
        let response = self.client.post(&endpoint).json(&body).send().await?;

        tracing::debug!("📡 HubSpot response status: {}", response.status());

        if !response.status().is_success() {
            return Err(RoiError::SubmissionRejected {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "hubspot"
    }
}
