//! Player controller: launch and bounce impulses, horizontal clamp and
//! screen wrap, and the timed super-jump state.

use crate::core::config::{GameConfig, Size};
use crate::physics::{category, Body, Shape, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub size: Size,
    /// Sprite rotation in radians, driven by tilt.
    pub rotation: f64,
}

impl Player {
    /// Player resting just above the floor, horizontally centred.
    pub fn new(config: &GameConfig) -> Self {
        let size = config.player_body_size();
        let position = Vec2::new(config.scene.width / 2.0, 20.0 + size.height / 2.0);
        Self {
            body: Body {
                position,
                velocity: Vec2::ZERO,
                shape: Shape::Circle {
                    radius: size.width / 2.0,
                },
                category: category::PLAYER,
                contact_test: category::PALLET | category::DIRT | category::GRASS,
                dynamic: true,
            },
            size,
            rotation: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Vertical launch sized so the apex lands around `jump_height_factor`
    /// screen heights above the scene origin.
    pub fn jump(&mut self, config: &GameConfig) {
        self.body.velocity.y =
            config.scene.height * config.jump_height_factor - self.body.position.y;
    }

    pub fn super_jump(&mut self, config: &GameConfig) {
        self.body.velocity.y = config.super_jump_impulse;
    }

    pub fn clamp_horizontal_speed(&mut self, max: f64) {
        self.body.velocity.x = self.body.velocity.x.clamp(-max, max);
    }

    /// Re-enter from the opposite edge once the body has fully left the scene.
    /// Returns true if the player was moved.
    pub fn wrap_horizontal(&mut self, scene_width: f64) -> bool {
        let half = self.size.width / 2.0;
        let x = self.body.position.x;
        if x - half > scene_width {
            self.body.position.x = -half + 1.0;
            true
        } else if x + half < 0.0 {
            self.body.position.x = scene_width + half - 1.0;
            true
        } else {
            false
        }
    }

    /// The player dropped a full body width below the bottom of the scene.
    pub fn has_fallen(&self) -> bool {
        self.body.position.y + self.size.width < 0.0
    }
}

/// Timed super-jump: reduced gravity and a fast, decaying scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SuperJump {
    remaining_secs: f64,
    /// Grows each frame, slowing the super-jump scroll.
    pub scroll_counter: f64,
}

impl SuperJump {
    pub fn is_active(&self) -> bool {
        self.remaining_secs > 0.0
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs.max(0.0)
    }

    /// Start, or restart, the super-jump window. The scroll counter keeps
    /// decaying across a restart until the window finally expires.
    pub fn activate(&mut self, duration_secs: f64) {
        self.remaining_secs = duration_secs;
    }

    /// Advance the timer. Returns true on the frame the window expires.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_secs -= dt;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.scroll_counter = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_above_floor() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        assert!((player.position().x - 160.0).abs() < 1e-9);
        assert!((player.position().y - 42.0).abs() < 1e-9);
        assert_eq!(player.body.category, category::PLAYER);
        assert!(player.body.dynamic);
    }

    #[test]
    fn test_jump_targets_above_screen() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.position.y = 100.0;
        player.jump(&config);
        assert!((player.velocity().y - (568.0 * 1.2 - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_speed_clamped_both_ways() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.velocity.x = 2500.0;
        player.clamp_horizontal_speed(1000.0);
        assert_eq!(player.velocity().x, 1000.0);

        player.body.velocity.x = -1200.0;
        player.clamp_horizontal_speed(1000.0);
        assert_eq!(player.velocity().x, -1000.0);

        player.body.velocity.x = 10.0;
        player.clamp_horizontal_speed(1000.0);
        assert_eq!(player.velocity().x, 10.0);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.position.x = 320.0 + 23.0;
        assert!(player.wrap_horizontal(320.0));
        assert!((player.position().x - (-21.0)).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_left_to_right() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.position.x = -23.0;
        assert!(player.wrap_horizontal(320.0));
        assert!((player.position().x - 341.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_wrap_while_partially_visible() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.position.x = 330.0;
        assert!(!player.wrap_horizontal(320.0));
        assert_eq!(player.position().x, 330.0);
    }

    #[test]
    fn test_has_fallen_threshold() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.body.position.y = -43.0;
        assert!(!player.has_fallen());
        player.body.position.y = -45.0;
        assert!(player.has_fallen());
    }

    #[test]
    fn test_super_jump_expires_and_resets_counter() {
        let mut sj = SuperJump::default();
        assert!(!sj.is_active());

        sj.activate(0.05);
        sj.scroll_counter = 1.5;
        assert!(sj.is_active());
        assert!(!sj.tick(0.02));
        assert!(!sj.tick(0.02));
        assert!(sj.tick(0.02));
        assert!(!sj.is_active());
        assert_eq!(sj.scroll_counter, 0.0);
        assert!(!sj.tick(0.02));
    }

    #[test]
    fn test_super_jump_reactivation_extends_window() {
        let mut sj = SuperJump::default();
        sj.activate(1.0);
        sj.tick(0.9);
        sj.activate(1.0);
        assert!(!sj.tick(0.5));
        assert!(sj.is_active());
    }
}
