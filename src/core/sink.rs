use crate::adapters::hubspot::HubSpotFormsClient;
use crate::config::SubmissionConfig;
use crate::domain::model::SubmissionRecord;
use crate::domain::ports::SubmissionTransport;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinSet;

/// Best-effort forwarder for calculation results.
///
/// `submit` never blocks and never fails: the delivery runs on a detached
/// tokio task and any error is only logged. Without a transport the sink
/// is inert and `submit` returns immediately.
pub struct SubmissionSink {
    transport: Option<Arc<dyn SubmissionTransport>>,
    in_flight: Mutex<JoinSet<()>>,
}

impl SubmissionSink {
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self {
            transport: Some(transport),
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    pub fn inert() -> Self {
        Self {
            transport: None,
            in_flight: Mutex::new(JoinSet::new()),
        }
    }

    /// 沒有 portal/form 設定時回傳 inert sink (例如本機開發)
    pub fn from_config(config: Option<SubmissionConfig>) -> Self {
        match config {
            Some(config) => {
                tracing::debug!(
                    "📮 Submissions enabled for portal {} / form {}",
                    config.portal_id,
                    config.form_id
                );
                Self::new(Arc::new(HubSpotFormsClient::new(config)))
            }
            None => {
                tracing::debug!("📮 No submission config, results stay local");
                Self::inert()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Fires one delivery attempt for `record` and returns without waiting.
    pub fn submit(&self, record: SubmissionRecord) {
        let Some(transport) = &self.transport else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("📮 No async runtime available, submission skipped");
            return;
        };

        let transport = Arc::clone(transport);
        let task = async move {
            match transport.deliver(&record).await {
                Ok(()) => tracing::debug!("📮 {}: submission delivered", transport.name()),
                Err(e) => tracing::warn!("📮 {}: submission failed: {}", transport.name(), e),
            }
        };

        match self.in_flight.lock() {
            Ok(mut in_flight) => {
                // 清掉已完成的任務，避免 JoinSet 無限成長
                while in_flight.try_join_next().is_some() {}
                in_flight.spawn_on(task, &runtime);
            }
            Err(_) => {
                drop(runtime.spawn(task));
            }
        }
    }

    /// Gives in-flight submissions up to `grace` to finish; whatever is still
    /// pending afterwards is aborted. Returns how many were abandoned.
    ///
    /// Meant for process shutdown only.
    pub async fn drain(&self, grace: Duration) -> usize {
        let mut pending = match self.in_flight.lock() {
            Ok(mut in_flight) => std::mem::take(&mut *in_flight),
            Err(_) => return 0,
        };

        if pending.is_empty() {
            return 0;
        }

        tracing::debug!("📮 Waiting for {} pending submission(s)", pending.len());
        let finished = tokio::time::timeout(grace, async {
            while pending.join_next().await.is_some() {}
        })
        .await;

        if finished.is_ok() {
            0
        } else {
            let abandoned = pending.len();
            tracing::warn!("📮 Abandoning {} submission(s) still pending", abandoned);
            pending.abort_all();
            abandoned
        }
    }
}
