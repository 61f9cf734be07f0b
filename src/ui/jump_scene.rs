//! Terminal rendering for the jumper, plus the short-lived HUD messages the
//! scene's audio/haptic events turn into.

use crate::core::config::{GameConfig, Size, Variant};
use crate::jump::{
    format_score, GameEvent, JumpGame, PlatformKind, ScoreRecord, ScoreTrend, Sound,
};
use crate::physics::PhysicsWorld;
use crate::ui::game_common::{
    create_game_layout, render_banner, render_info_panel_frame, render_status_bar,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Frames a flash message stays in the status bar.
const FLASH_FRAMES: u32 = 45;
/// Frames the game-over banner stays up.
const BANNER_FRAMES: u32 = 150;
/// Faded platforms below this alpha are not drawn.
const MIN_VISIBLE_ALPHA: f64 = 0.25;

const FLOOR_COLOR: Color = Color::Rgb(25, 105, 74);
const FALLING_SCORE_COLOR: Color = Color::Rgb(136, 24, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub text: &'static str,
    pub color: Color,
    pub frames_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverBanner {
    pub run_best: u64,
    pub new_high: bool,
    pub frames_left: u32,
}

/// Transient HUD state fed by scene events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudState {
    pub flash: Option<Flash>,
    pub banner: Option<GameOverBanner>,
    /// Frames of screen shake left from the last impact.
    pub shake_frames: u32,
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to this frame's events. `record` is the score record after any
    /// game over in `events` has been persisted.
    pub fn observe(&mut self, events: &[GameEvent], record: &ScoreRecord) {
        for event in events {
            match event {
                GameEvent::Launched => {
                    self.banner = None;
                }
                GameEvent::Sound(Sound::Break) => {
                    self.set_flash("Crack!", Color::Rgb(160, 110, 60));
                }
                GameEvent::Sound(Sound::SuperJump) => {
                    self.set_flash("SUPER JUMP!", Color::LightGreen);
                }
                GameEvent::Haptic => {
                    self.shake_frames = 3;
                }
                GameEvent::GameOver { run_best } => {
                    self.banner = Some(GameOverBanner {
                        run_best: *run_best,
                        new_high: *run_best > 0 && *run_best >= record.high_score,
                        frames_left: BANNER_FRAMES,
                    });
                }
                _ => {}
            }
        }
    }

    /// Age messages by `frames`.
    pub fn advance(&mut self, frames: u32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.frames_left = flash.frames_left.saturating_sub(frames);
            if flash.frames_left == 0 {
                self.flash = None;
            }
        }
        if let Some(banner) = self.banner.as_mut() {
            banner.frames_left = banner.frames_left.saturating_sub(frames);
            if banner.frames_left == 0 {
                self.banner = None;
            }
        }
        self.shake_frames = self.shake_frames.saturating_sub(frames);
    }

    fn set_flash(&mut self, text: &'static str, color: Color) {
        self.flash = Some(Flash {
            text,
            color,
            frames_left: FLASH_FRAMES,
        });
    }
}

fn theme_border(variant: Variant) -> Color {
    match variant {
        Variant::Classic => Color::Cyan,
        Variant::Meadow => Color::LightGreen,
        Variant::Compact => Color::Magenta,
    }
}

/// Render the whole game screen.
pub fn render_jump<W: PhysicsWorld>(
    frame: &mut Frame,
    area: Rect,
    game: &JumpGame<W>,
    record: &ScoreRecord,
    hud: &HudState,
) {
    let layout = create_game_layout(
        frame,
        area,
        " Cute Jump ",
        theme_border(game.config.variant),
        24,
    );

    render_play_field(frame, layout.content, game, hud);
    render_status(frame, layout.status_bar, game, hud);
    render_info_panel(frame, layout.info_panel, game, record);

    if let Some(banner) = hud.banner {
        let title = if banner.new_high {
            "NEW HIGH SCORE!"
        } else {
            "You fell!"
        };
        let message = format!("Best this run: {}", format_score(banner.run_best));
        render_banner(frame, layout.content, title, &message, Color::Yellow);
    }
}

/// Map a scene point (origin bottom-left, y up) to a cell in `area`.
pub fn world_to_cell(x: f64, y: f64, scene: Size, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 || x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / scene.width * area.width as f64).floor();
    let row = ((scene.height - y) / scene.height * area.height as f64).floor();
    if col < 0.0 || row < 0.0 || col >= area.width as f64 || row >= area.height as f64 {
        return None;
    }
    Some((col as u16, row as u16))
}

fn platform_glyph(kind: PlatformKind) -> (char, Color) {
    match kind {
        PlatformKind::Normal => ('▬', Color::White),
        PlatformKind::Breakable => ('▒', Color::Rgb(160, 110, 60)),
        PlatformKind::Bouncy => ('▓', Color::LightGreen),
        PlatformKind::Moving => ('═', Color::LightCyan),
    }
}

fn player_glyph(rotation: f64) -> char {
    if rotation > 0.5 {
        '◀'
    } else if rotation < -0.5 {
        '▶'
    } else {
        '●'
    }
}

fn render_play_field<W: PhysicsWorld>(
    frame: &mut Frame,
    area: Rect,
    game: &JumpGame<W>,
    hud: &HudState,
) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }
    let config: &GameConfig = &game.config;
    let scene = config.scene;

    let mut cells: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); width]; height];

    // Parallax backdrop: a sparse star field that drifts at a tenth of the climb.
    let cell_height = scene.height / height as f64;
    let drift = (-game.background_offset / cell_height).round() as i64;
    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let seed = (col as i64 * 7 + (row as i64 - drift) * 13).rem_euclid(41);
            if seed == 0 {
                *cell = ('·', Style::default().fg(Color::DarkGray));
            }
        }
    }

    let floor_top = game.floor.position.y + config.floor_height / 2.0;
    if let Some((_, row)) = world_to_cell(0.0, floor_top, scene, area) {
        for line in cells.iter_mut().skip(row as usize) {
            for cell in line.iter_mut() {
                *cell = ('▀', Style::default().fg(FLOOR_COLOR));
            }
        }
    }

    for platform in &game.platforms {
        if platform.alpha < MIN_VISIBLE_ALPHA {
            continue;
        }
        let (glyph, color) = platform_glyph(platform.kind);
        let mut style = Style::default().fg(color);
        if platform.fade.is_some() {
            style = style.add_modifier(Modifier::DIM);
        }
        let pos = platform.position();
        let half = platform.size.width / 2.0;
        let left = world_to_cell((pos.x - half).max(0.0), pos.y, scene, area);
        let right = world_to_cell((pos.x + half).min(scene.width - 0.001), pos.y, scene, area);
        if let (Some((l, row)), Some((r, _))) = (left, right) {
            for col in l..=r {
                cells[row as usize][col as usize] = (glyph, style);
            }
        }
    }

    let player = game.player.position();
    if let Some((col, row)) = world_to_cell(
        player.x.clamp(0.0, scene.width - 0.001),
        player.y,
        scene,
        area,
    ) {
        let color = if game.super_jump.is_active() {
            Color::LightGreen
        } else {
            Color::Yellow
        };
        cells[row as usize][col as usize] = (
            player_glyph(game.player.rotation),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }

    // Impact shake: nudge the whole field one column.
    let shift = usize::from(hud.shake_frames % 2 == 1);
    let lines: Vec<Line> = cells
        .into_iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(width);
            if shift == 1 {
                spans.push(Span::raw(" "));
            }
            spans.extend(
                row.into_iter()
                    .take(width - shift)
                    .map(|(ch, style)| Span::styled(ch.to_string(), style)),
            );
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status<W: PhysicsWorld>(
    frame: &mut Frame,
    area: Rect,
    game: &JumpGame<W>,
    hud: &HudState,
) {
    let controls: &[(&str, &str)] = &[
        ("[←/→]", "Tilt"),
        ("[Shift]", "Hard"),
        ("[Space]", "Jump"),
        ("[Q]", "Quit"),
    ];

    if let Some(flash) = &hud.flash {
        render_status_bar(frame, area, flash.text, flash.color, controls);
    } else if !game.started {
        render_status_bar(frame, area, "Press Space to jump!", Color::Yellow, controls);
    } else {
        render_status_bar(frame, area, "Climb!", Color::Green, controls);
    }
}

fn render_info_panel<W: PhysicsWorld>(
    frame: &mut Frame,
    area: Rect,
    game: &JumpGame<W>,
    record: &ScoreRecord,
) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let (star, score_color) = match game.score.trend {
        ScoreTrend::Rising => (
            Span::styled(" ★ ", Style::default().fg(Color::Yellow)),
            Color::White,
        ),
        ScoreTrend::Falling => (
            Span::styled(" ☆ ", Style::default().fg(Color::DarkGray)),
            FALLING_SCORE_COLOR,
        ),
    };
    let label = Style::default().fg(Color::DarkGray);
    let high = record.high_score.max(game.score.best);

    let mut lines = vec![
        Line::from(vec![
            star,
            Span::styled(
                format_score(game.score.score),
                Style::default()
                    .fg(score_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Run best: ", label),
            Span::styled(format_score(game.score.best), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" High:     ", label),
            Span::styled(format_score(high), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled(" Last:     ", label),
            Span::styled(
                format_score(record.last_score),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Runs:     ", label),
            Span::raw(game.runs.to_string()),
        ]),
        Line::from(vec![
            Span::styled(" Variant:  ", label),
            Span::raw(game.config.variant.name()),
        ]),
    ];

    if game.super_jump.is_active() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" Super {:.1}s", game.super_jump.remaining_secs()),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
