//! Primitive types shared by the bridge priority queue and batch processor.

pub use config::{BridgeConfig, DEFAULT_EXPIRATION_WINDOW};
mod config;

pub use event::{NewPriorityRequest, PriorityQueueEvent};
mod event;

pub use request::{L1Origin, PriorityRequest};
mod request;
