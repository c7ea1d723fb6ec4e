//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics in `DashMap`s and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{CounterVec, GatewayMetrics};
