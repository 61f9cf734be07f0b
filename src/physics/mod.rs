//! 2D physics seam.
//!
//! The game logic never integrates motion or tests overlaps itself. It hands
//! the player body and a snapshot of the static obstacles to a
//! [`PhysicsWorld`] once per frame and reacts to the contact events that come
//! back. [`ArcadePhysics`] is the default world used by the terminal build
//! and the tests.

pub mod arcade;

pub use arcade::ArcadePhysics;

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Physics category bitmasks.
pub mod category {
    pub const NONE: u32 = 0;
    pub const PLAYER: u32 = 0x1;
    pub const PALLET: u32 = 0x1 << 1;
    pub const DIRT: u32 = 0x1 << 2;
    pub const GRASS: u32 = 0x1 << 3;
}

/// A 2D vector in scene points (or m/s^2 for gravity).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Collision shape, centred on the body's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
}

/// Identifies which scene object a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    Player,
    Floor,
    Platform(usize),
}

/// A physics body as seen by the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    /// Points per second.
    pub velocity: Vec2,
    pub shape: Shape,
    pub category: u32,
    /// Categories this body reports contacts with.
    pub contact_test: u32,
    /// Static bodies are never integrated.
    pub dynamic: bool,
}

impl Body {
    pub fn new_static(position: Vec2, shape: Shape, category: u32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            shape,
            category,
            contact_test: category::NONE,
            dynamic: false,
        }
    }
}

/// One side of a contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub id: BodyId,
    pub category: u32,
}

/// A contact that began during the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub body_a: ContactBody,
    pub body_b: ContactBody,
}

impl Contact {
    /// Union of both categories, used to classify the pair.
    pub fn mask(&self) -> u32 {
        self.body_a.category | self.body_b.category
    }

    /// The body that is not the player, if any.
    pub fn other_than_player(&self) -> Option<BodyId> {
        if self.body_a.id != BodyId::Player {
            Some(self.body_a.id)
        } else if self.body_b.id != BodyId::Player {
            Some(self.body_b.id)
        } else {
            None
        }
    }
}

/// The external 2D physics service the game is layered on.
pub trait PhysicsWorld {
    /// World gravity in m/s^2.
    fn gravity(&self) -> Vec2;

    fn set_gravity(&mut self, gravity: Vec2);

    /// Advance `player` by `dt` seconds and report contacts that began
    /// against `obstacles` during this step.
    fn step(&mut self, player: &mut Body, obstacles: &[(BodyId, Body)], dt: f64) -> Vec<Contact>;

    /// Forget gravity and any tracked contact state.
    fn reset(&mut self);
}
