#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::InputRecord;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path_segment, validate_url, Validate};

pub const DEFAULT_SUBMIT_BASE_URL: &str = "https://api.hsforms.com";

pub const PORTAL_ID_ENV: &str = "HUBSPOT_PORTAL_ID";
pub const FORM_ID_ENV: &str = "HUBSPOT_FORM_ID";
pub const BASE_URL_ENV: &str = "HUBSPOT_SUBMIT_BASE_URL";

/// Where calculation results are forwarded. Only exists when both
/// identifiers are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub portal_id: String,
    pub form_id: String,
    pub base_url: String,
}

impl SubmissionConfig {
    /// 任一識別碼缺少、為空白或仍是未替換的 `${VAR}` 時回傳 None
    pub fn from_parts(
        portal_id: Option<String>,
        form_id: Option<String>,
        base_url: Option<String>,
    ) -> Option<Self> {
        let portal_id = usable(portal_id)?;
        let form_id = usable(form_id)?;
        let base_url = usable(base_url).unwrap_or_else(|| DEFAULT_SUBMIT_BASE_URL.to_string());

        Some(Self {
            portal_id,
            form_id,
            base_url,
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_parts(
            std::env::var(PORTAL_ID_ENV).ok(),
            std::env::var(FORM_ID_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        )
    }
}

fn usable(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.contains("${"))
}

impl Validate for SubmissionConfig {
    fn validate(&self) -> Result<()> {
        validate_path_segment("submission.portal_id", &self.portal_id)?;
        validate_path_segment("submission.form_id", &self.form_id)?;
        validate_url("submission.base_url", &self.base_url)?;
        Ok(())
    }
}

/// Everything the front end needs to start a session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub inputs: InputRecord,
    pub submission: Option<SubmissionConfig>,
    pub show_advanced: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            inputs: InputRecord::default(),
            submission: None,
            show_advanced: false,
        }
    }
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        if let Some(submission) = &self.submission {
            submission.validate()?;
        }
        Ok(())
    }
}
