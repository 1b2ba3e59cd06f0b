//! Quantized Sweep-and-Prune – a 2D broad phase for Rust.
//!
//! Tracks a fixed-capacity pool of axis-aligned boxes and maintains the set of
//! overlapping pairs incrementally as boxes move, reporting pair additions and
//! removals through a buffered pair manager committed once per step.

pub mod collision;
pub mod config;
pub mod error;
pub mod utils;

pub use glam::Vec2;

pub use collision::{
    aabb::Aabb,
    broadphase::BroadPhase,
    pair_manager::{
        BufferedPairManager, NoopCallback, PairCallback, PairEvent, PairEventKind, PairEventLog,
        PairManager, ProxyPair,
    },
    quantizer::{QuantizedAabb, Quantizer},
};
pub use config::BroadPhaseConfig;
pub use error::{BroadPhaseError, Result};
pub use utils::{allocator::ProxyId, profiling::BroadPhaseStats};
