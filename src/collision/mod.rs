//! Broad-phase collision culling: quantized bounds, proxy pool, range queries,
//! the sweep-and-prune driver and its pair-manager boundary.

pub mod aabb;
pub mod bound;
pub mod broadphase;
pub mod pair_manager;
pub mod proxy;
pub mod quantizer;
pub mod query;

pub use aabb::Aabb;
pub use bound::{Bound, BoundKind};
pub use broadphase::BroadPhase;
pub use pair_manager::{
    BufferedPairManager, NoopCallback, PairCallback, PairEvent, PairEventKind, PairEventLog,
    PairManager, ProxyPair,
};
pub use quantizer::{QuantizedAabb, Quantizer};
