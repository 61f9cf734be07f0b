//! Camera-follow by moving the world: while the player rises past the
//! scroll line, every platform and the floor shift down, and platforms that
//! leave the bottom of the scene are recycled above it.

use super::platform::Platform;
use super::player::SuperJump;
use crate::core::config::GameConfig;
use crate::physics::{Body, Vec2};
use rand::Rng;

/// What a single scroll step did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollStep {
    /// Points the world moved down this frame (0 when it did not move).
    pub distance: f64,
    /// Platforms recycled above the camera this frame.
    pub recycled: usize,
}

/// Per-frame scroll line and distance.
///
/// Normally the world scrolls once the player is above mid-screen, by a
/// fiftieth of the rising speed. During a super-jump it scrolls from any
/// height at a fixed rate that slows a little every frame.
pub fn scroll_schedule(
    player_velocity_y: f64,
    super_jump: &mut SuperJump,
    config: &GameConfig,
) -> (f64, f64) {
    if super_jump.is_active() {
        let distance = config.super_jump_scroll_start - super_jump.scroll_counter;
        super_jump.scroll_counter += config.super_jump_scroll_decay;
        (0.0, distance)
    } else {
        (
            config.scene.height / 2.0,
            player_velocity_y / config.scroll_velocity_divisor,
        )
    }
}

pub fn scroll_world<R: Rng>(
    player_position: Vec2,
    player_velocity_y: f64,
    super_jump: &mut SuperJump,
    platforms: &mut [Platform],
    floor: &mut Body,
    config: &GameConfig,
    rng: &mut R,
) -> ScrollStep {
    let (min_height, distance) = scroll_schedule(player_velocity_y, super_jump, config);

    if player_position.y <= min_height || player_velocity_y <= 0.0 {
        return ScrollStep::default();
    }

    let mut recycled = 0;
    for platform in platforms.iter_mut() {
        platform.body.position.y -= distance;
        if platform.is_below_frame() {
            platform.recycle(config, rng);
            recycled += 1;
        }
    }
    floor.position.y -= distance;

    ScrollStep { distance, recycled }
}

/// Background offset for the slow parallax layer.
pub fn parallax_offset(player_y: f64, config: &GameConfig) -> Option<f64> {
    if player_y > config.parallax_threshold {
        Some(-((player_y - config.parallax_threshold) / config.parallax_divisor))
    } else {
        None
    }
}
