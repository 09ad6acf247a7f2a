use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// The metrics for the [`super::PriorityQueue`].
#[derive(Metrics, Clone)]
#[metrics(scope = "priority_queue")]
pub struct PriorityQueueMetrics {
    /// The amount of enqueued priority requests.
    #[metrics(describe = "Number of priority requests enqueued")]
    pub enqueued_requests: Counter,
    /// The amount of priority requests consumed by committed blocks.
    #[metrics(describe = "Number of priority requests committed")]
    pub committed_requests: Counter,
    /// The amount of pending priority requests.
    pub pending_requests: Gauge,
}
