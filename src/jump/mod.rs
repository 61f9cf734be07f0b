//! Endless-jumper game logic.
//!
//! The player bounces upward off platforms while device tilt steers them
//! sideways. The world scrolls down as the player climbs, platforms that
//! fall off the bottom come back above the camera as a random kind, and the
//! score is the total height climbed.

pub mod contact;
pub mod events;
pub mod game;
pub mod highscore;
pub mod input;
pub mod platform;
pub mod player;
pub mod scoring;
pub mod scroll;
pub mod session;

pub use contact::{ContactKind, ContactTarget};
pub use events::{GameEvent, Sound};
pub use game::JumpGame;
pub use highscore::{JsonScoreStore, MemoryScoreStore, ScoreRecord, ScoreStore};
pub use input::{FixedTilt, TiltSource};
pub use platform::{Platform, PlatformKind};
pub use player::{Player, SuperJump};
pub use scoring::{format_score, ScoreTracker, ScoreTrend};
pub use session::Session;
