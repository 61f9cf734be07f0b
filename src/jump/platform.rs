//! Platforms ("pallets"): kinds, initial layout, recycling above the camera,
//! and the timed behaviors (lateral oscillation, break fade).

use crate::core::config::{GameConfig, Size};
use crate::physics::{category, Body, Shape, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Height of a platform's contact surface. Only the top edge matters.
pub const CONTACT_THICKNESS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Dirt: bounces once, then breaks and fades.
    Breakable,
    /// Grass: launches a super-jump.
    Bouncy,
    /// Slides across the scene and back.
    Moving,
}

impl PlatformKind {
    pub fn category(&self) -> u32 {
        match self {
            Self::Normal | Self::Moving => category::PALLET,
            Self::Breakable => category::DIRT,
            Self::Bouncy => category::GRASS,
        }
    }

    pub fn size(&self, config: &GameConfig) -> Size {
        match self {
            Self::Moving => config.moving_platform_body_size(),
            _ => config.platform_size,
        }
    }

    /// Roll a kind for a recycled platform. Odds are checked in order:
    /// grass, then moving, then dirt.
    pub fn roll<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        if rng.gen_range(1..=config.grass_odds) == 1 {
            Self::Bouncy
        } else if rng.gen_range(1..=config.moving_odds) == 1 {
            Self::Moving
        } else if rng.gen_range(1..=config.dirt_odds) == 1 {
            Self::Breakable
        } else {
            Self::Normal
        }
    }
}

/// Endless back-and-forth sweep of a moving platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub origin_x: f64,
    /// Signed sweep distance (positive = rightward first).
    pub distance: f64,
    pub half_period_secs: f64,
    pub elapsed_secs: f64,
}

impl Oscillation {
    /// Offset from `origin_x` at the current time.
    pub fn offset(&self) -> f64 {
        let period = self.half_period_secs * 2.0;
        let t = self.elapsed_secs.rem_euclid(period);
        let progress = if t <= self.half_period_secs {
            t / self.half_period_secs
        } else {
            1.0 - (t - self.half_period_secs) / self.half_period_secs
        };
        self.distance * progress
    }

    fn advance(&mut self, dt: f64) {
        self.elapsed_secs = (self.elapsed_secs + dt).rem_euclid(self.half_period_secs * 2.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub remaining_secs: f64,
    pub total_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub kind: PlatformKind,
    pub body: Body,
    pub size: Size,
    /// 1.0 = opaque.
    pub alpha: f64,
    pub motion: Option<Oscillation>,
    pub fade: Option<Fade>,
}

impl Platform {
    pub fn new(kind: PlatformKind, position: Vec2, config: &GameConfig) -> Self {
        let size = kind.size(config);
        Self {
            kind,
            body: contact_body(position, size, kind.category()),
            size,
            alpha: 1.0,
            motion: None,
            fade: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_broken(&self) -> bool {
        self.kind == PlatformKind::Breakable && self.body.category == category::NONE
    }

    /// Entirely below the bottom edge of the scene.
    pub fn is_below_frame(&self) -> bool {
        self.body.position.y < -self.size.height / 2.0
    }

    /// Stop reporting contacts and start fading out.
    pub fn break_apart(&mut self, fade_secs: f64) {
        self.body.category = category::NONE;
        self.fade = Some(Fade {
            remaining_secs: fade_secs,
            total_secs: fade_secs,
        });
    }

    /// Move a platform that fell off the bottom back above the camera with a
    /// fresh position and kind. The overshoot below the frame is carried over
    /// so row spacing is preserved.
    pub fn recycle<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        let width = config.scene.width;
        let mut x = rng.gen_range(0.0..=width);
        let heading_right = x <= width / 2.0;

        self.motion = None;
        self.fade = None;
        self.alpha = 1.0;

        let kind = PlatformKind::roll(config, rng);
        if kind == PlatformKind::Moving {
            let (origin_x, distance) = if heading_right {
                (0.0, width)
            } else {
                (width, -width)
            };
            x = origin_x;
            self.motion = Some(Oscillation {
                origin_x,
                distance,
                half_period_secs: config.moving_platform_half_period_secs,
                elapsed_secs: 0.0,
            });
        }

        self.kind = kind;
        self.size = kind.size(config);
        let y = config.scene.height + self.size.height / 2.0 + self.body.position.y;
        self.body = contact_body(Vec2::new(x, y), self.size, kind.category());
    }

    /// Advance oscillation and fade by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if let Some(motion) = self.motion.as_mut() {
            motion.advance(dt);
            self.body.position.x = motion.origin_x + motion.offset();
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.remaining_secs = (fade.remaining_secs - dt).max(0.0);
            self.alpha = if fade.total_secs > 0.0 {
                fade.remaining_secs / fade.total_secs
            } else {
                0.0
            };
            if fade.remaining_secs == 0.0 {
                self.fade = None;
            }
        }
    }
}

fn contact_body(position: Vec2, size: Size, category: u32) -> Body {
    Body::new_static(
        position,
        Shape::Rect {
            width: size.width,
            height: CONTACT_THICKNESS,
        },
        category,
    )
}

/// Spread normal platforms over the first screen, one per horizontal band.
pub fn initial_layout<R: Rng>(config: &GameConfig, rng: &mut R) -> Vec<Platform> {
    let space = config.scene.height / config.platform_rows as f64;
    let margin = config.platform_row_margin;

    (0..config.platform_rows)
        .map(|i| {
            let x = rng.gen_range(0.0..=config.scene.width);
            let low = i as f64 * space + margin;
            let high = (i + 1) as f64 * space - margin;
            let y = rng.gen_range(low..=high);
            Platform::new(PlatformKind::Normal, Vec2::new(x, y), config)
        })
        .collect()
}
