//! Global configuration constants and construction parameters for the broad phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    collision::{aabb::Aabb, quantizer::Quantizer},
    error::{BroadPhaseError, Result},
};

/// Default proxy pool capacity.
pub const DEFAULT_MAX_PROXIES: usize = 512;

/// Largest pool the 16-bit bound indices can address (two bounds per proxy per axis).
pub const MAX_PROXY_CAPACITY: usize = (u16::MAX as usize) / 2;

/// Upper end of the quantized coordinate range.
pub const QUANTIZATION_MAX: u16 = u16::MAX;

/// Default world lower corner.
pub const DEFAULT_WORLD_MIN: [f32; 2] = [-1000.0, -1000.0];

/// Default world upper corner.
pub const DEFAULT_WORLD_MAX: [f32; 2] = [1000.0, 1000.0];

/// Construction parameters for a [`BroadPhase`](crate::collision::broadphase::BroadPhase).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BroadPhaseConfig {
    /// Fixed quantization frame. Proxies outside it are clamped.
    pub world: Aabb,
    /// Hard ceiling on live proxies.
    pub max_proxies: usize,
    /// Run a full consistency check after every public mutation.
    /// Linear in the proxy count; meant for debugging only.
    pub validate_each_operation: bool,
}

impl Default for BroadPhaseConfig {
    fn default() -> Self {
        Self {
            world: Aabb::new(
                Vec2::from_array(DEFAULT_WORLD_MIN),
                Vec2::from_array(DEFAULT_WORLD_MAX),
            ),
            max_proxies: DEFAULT_MAX_PROXIES,
            validate_each_operation: false,
        }
    }
}

impl BroadPhaseConfig {
    /// Builds a configuration for the given world and capacity.
    pub fn new(world: Aabb, max_proxies: usize) -> Self {
        Self {
            world,
            max_proxies,
            ..Self::default()
        }
    }

    /// Checks that the world is a usable quantization frame and the capacity fits.
    ///
    /// The world must be finite with `max > min`, and its extent must itself be
    /// finite so the quantization scale is a positive finite number.
    pub fn validate(&self) -> Result<()> {
        Quantizer::new(self.world)?;
        if self.max_proxies == 0 || self.max_proxies > MAX_PROXY_CAPACITY {
            return Err(BroadPhaseError::InvalidConfig(format!(
                "max_proxies must be in 1..={MAX_PROXY_CAPACITY}, got {}",
                self.max_proxies
            )));
        }
        Ok(())
    }
}
