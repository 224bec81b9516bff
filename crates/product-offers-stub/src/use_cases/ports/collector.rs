use crate::entities::CollectedRequest;

/// Trait for recording the requests the stub receives
pub trait Collector: Send + Sync {
    /// The output type returned when the collector is consumed
    type Output: Send;

    /// Called once per received request, before it is answered
    fn collect(&self, request: CollectedRequest);

    /// Consume the collector and return the collected output
    fn into_output(self) -> Self::Output;
}
