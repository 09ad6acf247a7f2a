use metrics::{Counter, Histogram};
use metrics_derive::Metrics;

/// The metrics for the [`super::BatchProcessor`].
#[derive(Metrics, Clone)]
#[metrics(scope = "batch_processor")]
pub struct BatchProcessorMetrics {
    /// A counter on the committed blocks.
    pub committed_blocks: Counter,
    /// A counter on the rejected blocks.
    pub rejected_blocks: Counter,
    /// A counter on the priority operations consumed by committed blocks.
    pub consumed_priority_operations: Counter,
    /// The block processing duration.
    pub processing_duration: Histogram,
}
