use glam::Vec2;

use crate::{
    collision::aabb::Aabb,
    config::QUANTIZATION_MAX,
    error::{BroadPhaseError, Result},
};

/// Per-axis 16-bit bound values for one box.
///
/// Lower values are always even and upper values always odd, so a lower and an
/// upper bound that land on the same integer still sort lower-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizedAabb {
    pub lower: [u16; 2],
    pub upper: [u16; 2],
    /// Some coordinate lay outside the world and was clamped.
    pub clamped: bool,
}

impl QuantizedAabb {
    pub fn overlaps(&self, other: &QuantizedAabb) -> bool {
        (0..2).all(|axis| {
            self.lower[axis] <= other.upper[axis] && other.lower[axis] <= self.upper[axis]
        })
    }
}

/// Maps world-space boxes into the fixed 16-bit frame chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    world: Aabb,
    factor: Vec2,
}

impl Quantizer {
    pub fn new(world: Aabb) -> Result<Self> {
        if !world.is_valid() {
            return Err(BroadPhaseError::InvalidConfig(format!(
                "world bounds must be finite with max > min, got {:?}..{:?}",
                world.min, world.max
            )));
        }

        // A finite pair of corners can still span more than f32 can hold, or
        // so little that the scale overflows. Either way every box would
        // quantize to the same values.
        let size = world.size();
        let factor = Vec2::splat(QUANTIZATION_MAX as f32) / size;
        if !size.is_finite() || !factor.is_finite() || !factor.cmpgt(Vec2::ZERO).all() {
            return Err(BroadPhaseError::InvalidConfig(format!(
                "world extent {size:?} cannot be quantized (scale {factor:?})"
            )));
        }

        Ok(Self { world, factor })
    }

    pub fn world(&self) -> &Aabb {
        &self.world
    }

    /// Quantized units per world unit on each axis.
    pub fn factor(&self) -> Vec2 {
        self.factor
    }

    /// Clamps `aabb` into the world and maps it onto `[0, 65535]` per axis.
    pub fn quantize(&self, aabb: &Aabb) -> QuantizedAabb {
        let clamped_box = aabb.clamped_to(&self.world);
        let min = (clamped_box.min - self.world.min) * self.factor;
        let max = (clamped_box.max - self.world.min) * self.factor;

        // `as u16` saturates, which absorbs float error at the top of the range.
        QuantizedAabb {
            lower: [
                (min.x as u16) & (QUANTIZATION_MAX - 1),
                (min.y as u16) & (QUANTIZATION_MAX - 1),
            ],
            upper: [(max.x as u16) | 1, (max.y as u16) | 1],
            clamped: clamped_box != *aabb,
        }
    }

    /// Whether `aabb` touches the world at all, edges included. Boxes entirely
    /// outside collapse onto the world edge when quantized.
    pub fn in_range(&self, aabb: &Aabb) -> bool {
        let d = (aabb.min - self.world.max).max(self.world.min - aabb.max);
        d.max_element() <= 0.0
    }

    /// World-space coordinate of a quantized value on `axis`.
    pub fn dequantize(&self, value: u16, axis: usize) -> f32 {
        self.world.min[axis] + value as f32 / self.factor[axis]
    }
}
