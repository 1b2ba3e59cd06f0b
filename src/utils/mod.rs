//! Utility helpers: proxy ids, scoped trace timers and statistics.

pub mod allocator;
pub mod logging;
pub mod profiling;

pub use allocator::{ProxyId, NULL_PROXY};
pub use profiling::BroadPhaseStats;
