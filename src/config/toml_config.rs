use crate::config::{AppSettings, SubmissionConfig};
use crate::domain::model::InputRecord;
use crate::utils::error::{Result, RoiError};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;

/// Optional calculator config file.
///
/// ```toml
/// [assumptions]
/// copies_sold = 800
///
/// [submission]
/// portal_id = "${HUBSPOT_PORTAL_ID}"
/// form_id = "${HUBSPOT_FORM_ID}"
///
/// [display]
/// show_advanced = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub assumptions: InputRecord,
    pub submission: Option<SubmissionSection>,
    pub display: Option<DisplaySection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionSection {
    pub portal_id: Option<String>,
    pub form_id: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplaySection {
    pub show_advanced: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RoiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RoiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HUBSPOT_PORTAL_ID})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RoiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn submission_config(&self) -> Option<SubmissionConfig> {
        let section = self.submission.clone()?;
        SubmissionConfig::from_parts(section.portal_id, section.form_id, section.base_url)
    }

    pub fn show_advanced(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|d| d.show_advanced)
            .unwrap_or(false)
    }

    pub fn to_settings(&self) -> AppSettings {
        AppSettings {
            inputs: self.assumptions,
            submission: self.submission_config(),
            show_advanced: self.show_advanced(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings().validate()
    }
}
