//! Error types returned by the broad phase.

use glam::Vec2;
use thiserror::Error;

use crate::utils::allocator::ProxyId;

/// Errors that can occur while maintaining the broad phase.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BroadPhaseError {
    /// Every proxy slot is already live.
    #[error("proxy pool exhausted: capacity {capacity}")]
    PoolExhausted {
        /// Fixed pool capacity.
        capacity: usize,
    },

    /// The box is non-finite or has `max <= min` on some axis.
    #[error("invalid geometry: min {min:?}, max {max:?}")]
    InvalidGeometry {
        /// Lower corner that was supplied.
        min: Vec2,
        /// Upper corner that was supplied.
        max: Vec2,
    },

    /// The id is out of range, refers to a free slot, or is stale.
    #[error("invalid proxy reference: {0}")]
    InvalidProxy(ProxyId),

    /// Construction parameters cannot describe a usable broad phase.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `validate` found the bound arrays out of sync with the proxy pool.
    #[error("broad phase corrupted on axis {axis} at bound {index}: {reason}")]
    Corrupted {
        /// Axis whose bound array failed the check.
        axis: usize,
        /// Offending bound index.
        index: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BroadPhaseError>;
