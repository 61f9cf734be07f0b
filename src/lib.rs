//! CuteJump - endless jumper for the terminal.
//!
//! The scene logic lives in `jump` and is driven by fixed frames through
//! `JumpGame::tick`. Rigid-body simulation sits behind `physics::PhysicsWorld`.

pub mod core;
pub mod input;
pub mod jump;
pub mod physics;
pub mod ui;
pub mod utils;
