use crate::config::toml_config::TomlConfig;
use crate::config::{AppSettings, SubmissionConfig, BASE_URL_ENV, FORM_ID_ENV, PORTAL_ID_ENV};
use crate::domain::model::{InputField, InputRecord};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "book-roi")]
#[command(about = "Projects the revenue and ROI of publishing a book")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with assumptions and submission settings")]
    pub config: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    pub copies_sold: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub book_price: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub new_clients: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub client_value: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub speaking_gigs: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub speaking_fee: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub package_cost: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub email_subscribers: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub value_per_subscriber: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub deal_size_lift_pct: Option<f64>,

    #[arg(long, env = PORTAL_ID_ENV)]
    pub portal_id: Option<String>,

    #[arg(long, env = FORM_ID_ENV)]
    pub form_id: Option<String>,

    #[arg(long, env = BASE_URL_ENV)]
    pub submit_base_url: Option<String>,

    #[arg(long, help = "Start an interactive session instead of calculating once")]
    pub interactive: bool,

    #[arg(long, help = "Show the advanced assumptions")]
    pub show_advanced: bool,

    #[arg(
        long,
        default_value = "5",
        help = "Seconds to wait for pending submissions before exiting"
    )]
    pub drain_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    fn overrides(&self) -> [(InputField, Option<f64>); 10] {
        [
            (InputField::CopiesSold, self.copies_sold),
            (InputField::BookPrice, self.book_price),
            (InputField::NewClients, self.new_clients),
            (InputField::ClientValue, self.client_value),
            (InputField::SpeakingGigs, self.speaking_gigs),
            (InputField::SpeakingFee, self.speaking_fee),
            (InputField::PackageCost, self.package_cost),
            (InputField::EmailSubscribers, self.email_subscribers),
            (InputField::ValuePerSubscriber, self.value_per_subscriber),
            (InputField::DealSizeLiftPct, self.deal_size_lift_pct),
        ]
    }

    /// Flags win over the config file, which wins over the built-in defaults.
    pub fn merge(&self, file: Option<&TomlConfig>) -> AppSettings {
        let base = file.map(TomlConfig::to_settings).unwrap_or_default();

        let inputs = self
            .overrides()
            .into_iter()
            .fold(base.inputs, |record: InputRecord, (field, value)| match value {
                Some(v) => record.with(field, v),
                None => record,
            });

        // 命令列或環境變數只要有給任一值，就整組取代檔案中的設定
        let submission = if self.portal_id.is_some()
            || self.form_id.is_some()
            || self.submit_base_url.is_some()
        {
            let from_file = file.and_then(|f| f.submission.clone()).unwrap_or_default();
            SubmissionConfig::from_parts(
                self.portal_id.clone().or(from_file.portal_id),
                self.form_id.clone().or(from_file.form_id),
                self.submit_base_url.clone().or(from_file.base_url),
            )
        } else {
            base.submission
        };

        AppSettings {
            inputs,
            submission,
            show_advanced: self.show_advanced || base.show_advanced,
        }
    }

    pub fn resolve(&self) -> Result<AppSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        Ok(self.merge(file.as_ref()))
    }
}
