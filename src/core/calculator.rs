use crate::core::engine;
use crate::core::sink::SubmissionSink;
use crate::domain::model::{InputRecord, RoiProjection, SubmissionRecord};

/// Runs the engine and hands every result to the submission sink without
/// waiting on it.
pub struct RoiCalculator {
    sink: SubmissionSink,
}

impl RoiCalculator {
    pub fn new(sink: SubmissionSink) -> Self {
        Self { sink }
    }

    pub fn calculate(&self, input: InputRecord) -> RoiProjection {
        let projection = engine::project(&input);

        tracing::debug!(
            "🧮 gross_revenue={} roi_percent={}",
            projection.gross_revenue,
            projection.roi_percent
        );
        if !projection.roi_percent.is_finite() {
            tracing::warn!(
                "🧮 ROI is not a finite number (package cost {})",
                input.package_cost
            );
        }

        self.sink.submit(SubmissionRecord::new(&input, &projection));
        projection
    }

    pub fn sink(&self) -> &SubmissionSink {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InputField;
    use crate::domain::ports::SubmissionTransport;
    use crate::utils::error::{Result, RoiError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FailingTransport {
        attempts: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SubmissionTransport for FailingTransport {
        async fn deliver(&self, _record: &SubmissionRecord) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(RoiError::ConfigError {
                message: "simulated outage".to_string(),
            })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_inert_calculator_returns_projection() {
        let calculator = RoiCalculator::new(SubmissionSink::inert());
        let projection = calculator.calculate(InputRecord::default());

        assert_eq!(projection.gross_revenue, 80_000.0);
        assert_eq!(projection.roi_percent, 60.0);
    }

    #[test]
    fn test_zero_package_cost_does_not_panic() {
        let calculator = RoiCalculator::new(SubmissionSink::inert());
        let projection =
            calculator.calculate(InputRecord::default().with(InputField::PackageCost, 0.0));

        assert!(!projection.roi_percent.is_finite());
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_projection_untouched() {
        let transport = Arc::new(FailingTransport {
            attempts: AtomicUsize::new(0),
        });
        let calculator = RoiCalculator::new(SubmissionSink::new(transport.clone()));

        let projection = calculator.calculate(InputRecord::default());
        calculator.sink().drain(Duration::from_secs(5)).await;

        assert_eq!(projection, crate::core::engine::project(&InputRecord::default()));
        assert_eq!(transport.attempts.load(Ordering::SeqCst), 1);
    }
}
