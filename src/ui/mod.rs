pub mod game_common;
pub mod jump_scene;

use crate::jump::{JumpGame, ScoreRecord};
use crate::physics::PhysicsWorld;
use jump_scene::{render_jump, HudState};
use ratatui::Frame;

/// Draw one frame of the game screen.
pub fn draw_ui<W: PhysicsWorld>(
    frame: &mut Frame,
    game: &JumpGame<W>,
    record: &ScoreRecord,
    hud: &HudState,
) {
    let area = frame.size();
    render_jump(frame, area, game, record, hud);
}
