//! Tilt input: raw accelerometer samples to horizontal world gravity.

use crate::core::config::GameConfig;
use crate::physics::Vec2;

/// Source of raw device-tilt samples (the x axis of an accelerometer, in g).
pub trait TiltSource {
    /// Latest sample, or `None` when the device has not reported one.
    fn sample(&mut self) -> Option<f64>;
}

/// A fixed sample, for scripted runs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedTilt(pub Option<f64>);

impl TiltSource for FixedTilt {
    fn sample(&mut self) -> Option<f64> {
        self.0
    }
}

/// Result of mapping one tilt sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltResponse {
    /// Horizontal acceleration in m/s^2.
    pub acceleration_x: f64,
    /// Player sprite rotation in radians.
    pub rotation: f64,
}

/// Scale a raw sample into horizontal acceleration.
///
/// Readings past the gravity magnitude snap to `gravity + overshoot` rather
/// than saturating at gravity, so a hard tilt pushes noticeably harder.
pub fn map_tilt(sample: f64, config: &GameConfig) -> TiltResponse {
    let limit = config.gravity;
    let mut acceleration_x = sample * config.tilt_scale;
    if acceleration_x > limit {
        acceleration_x = limit + config.tilt_overshoot;
    } else if acceleration_x < -limit {
        acceleration_x = -limit - config.tilt_overshoot;
    }

    TiltResponse {
        acceleration_x,
        rotation: -acceleration_x / config.tilt_rotation_divisor,
    }
}

/// World gravity for a mapped tilt.
pub fn world_gravity(acceleration_x: f64, super_jump_active: bool, config: &GameConfig) -> Vec2 {
    let y = if super_jump_active {
        config.super_jump_gravity_y
    } else {
        -config.gravity
    };
    Vec2::new(acceleration_x, y)
}
