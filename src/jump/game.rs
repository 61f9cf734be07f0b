//! The scene: world setup and the per-frame update loop.

use super::contact::{resolve_contact, ContactTarget};
use super::events::{GameEvent, Sound};
use super::input::{map_tilt, world_gravity, TiltSource};
use super::platform::{initial_layout, Platform};
use super::player::{Player, SuperJump};
use super::scoring::ScoreTracker;
use super::scroll::{parallax_offset, scroll_world};
use crate::core::config::GameConfig;
use crate::core::constants::{FRAME_DT, FRAME_TICK_US, MAX_FRAME_GAP_MS};
use crate::physics::{category, ArcadePhysics, Body, BodyId, PhysicsWorld, Shape, Vec2};
use rand::Rng;

/// Vertical centre of the floor strip.
const FLOOR_Y: f64 = 10.0;

pub struct JumpGame<W: PhysicsWorld = ArcadePhysics> {
    pub config: GameConfig,
    pub world: W,
    pub player: Player,
    pub floor: Body,
    pub platforms: Vec<Platform>,
    pub score: ScoreTracker,
    pub super_jump: SuperJump,
    /// False until the first touch; physics is idle and nothing scrolls.
    pub started: bool,
    /// Parallax layer offset (points, negative = scrolled down).
    pub background_offset: f64,
    /// Completed runs this session.
    pub runs: u32,
    pub frame_count: u64,
    /// Sub-frame wall-clock time carried to the next tick (microseconds).
    pub accumulated_time_us: u64,
    events: Vec<GameEvent>,
}

impl JumpGame<ArcadePhysics> {
    pub fn with_arcade_physics<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let world = ArcadePhysics::new(config.points_per_meter);
        Self::new(config, world, rng)
    }
}

impl<W: PhysicsWorld> JumpGame<W> {
    pub fn new<R: Rng>(config: GameConfig, world: W, rng: &mut R) -> Self {
        let player = Player::new(&config);
        let floor = floor_body(&config);
        let platforms = initial_layout(&config, rng);
        let mut game = Self {
            config,
            world,
            player,
            floor,
            platforms,
            score: ScoreTracker::new(),
            super_jump: SuperJump::default(),
            started: false,
            background_offset: 0.0,
            runs: 0,
            frame_count: 0,
            accumulated_time_us: 0,
            events: Vec::new(),
        };
        game.world.reset();
        game
    }

    /// Throw away the current run and lay out a fresh world.
    pub fn rebuild_world<R: Rng>(&mut self, rng: &mut R) {
        self.world.reset();
        self.player = Player::new(&self.config);
        self.floor = floor_body(&self.config);
        self.platforms = initial_layout(&self.config, rng);
        self.score = ScoreTracker::new();
        self.super_jump = SuperJump::default();
        self.started = false;
        self.background_offset = 0.0;
        self.accumulated_time_us = 0;
    }

    /// First touch: launch the player. Ignored once a run is under way.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.player.jump(&self.config);
        self.started = true;
        tracing::info!(run = self.runs + 1, "Run started");
        self.events.push(GameEvent::Launched);
        self.events.push(GameEvent::Sound(Sound::Jump));
        true
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Advance by `dt_ms` of wall-clock time in fixed frames, sampling tilt
    /// once per frame. Returns the number of frames stepped.
    pub fn tick<T: TiltSource + ?Sized, R: Rng>(
        &mut self,
        dt_ms: u64,
        tilt: &mut T,
        rng: &mut R,
    ) -> u32 {
        self.accumulated_time_us += dt_ms.min(MAX_FRAME_GAP_MS) * 1_000;
        let mut frames = 0;
        while self.accumulated_time_us >= FRAME_TICK_US {
            self.accumulated_time_us -= FRAME_TICK_US;
            self.tick_frame(tilt.sample(), rng);
            frames += 1;
        }
        frames
    }

    /// One simulation frame.
    pub fn tick_frame<R: Rng>(&mut self, tilt_sample: Option<f64>, rng: &mut R) {
        self.frame_count += 1;
        self.apply_tilt(tilt_sample);

        if self.started {
            if self.player.has_fallen() {
                self.game_over(rng);
                return;
            }
            self.score.update(
                self.player.position(),
                self.player.size,
                self.floor.position,
                self.config.floor_height,
            );
            self.player.wrap_horizontal(self.config.scene.width);
            self.player
                .clamp_horizontal_speed(self.config.max_horizontal_speed);
            scroll_world(
                self.player.position(),
                self.player.velocity().y,
                &mut self.super_jump,
                &mut self.platforms,
                &mut self.floor,
                &self.config,
                rng,
            );
        }

        if let Some(offset) = parallax_offset(self.player.position().y, &self.config) {
            self.background_offset = offset;
        }

        self.advance_timers(FRAME_DT);
        self.step_physics(FRAME_DT);
    }

    fn apply_tilt(&mut self, sample: Option<f64>) {
        let Some(sample) = sample else {
            return;
        };
        let response = map_tilt(sample, &self.config);
        self.player.rotation = response.rotation;
        if self.started {
            let gravity = world_gravity(
                response.acceleration_x,
                self.super_jump.is_active(),
                &self.config,
            );
            self.world.set_gravity(gravity);
        }
    }

    fn advance_timers(&mut self, dt: f64) {
        for platform in &mut self.platforms {
            platform.advance(dt);
        }
        if self.super_jump.tick(dt) {
            self.events.push(GameEvent::SuperJumpEnded);
        }
    }

    fn step_physics(&mut self, dt: f64) {
        let obstacles = self.obstacles();
        let contacts = self.world.step(&mut self.player.body, &obstacles, dt);
        for contact in &contacts {
            resolve_contact(
                contact,
                ContactTarget {
                    player: &mut self.player,
                    platforms: &mut self.platforms,
                    super_jump: &mut self.super_jump,
                },
                &self.config,
                &mut self.events,
            );
        }
    }

    /// Snapshot of every static body the player can touch.
    pub fn obstacles(&self) -> Vec<(BodyId, Body)> {
        std::iter::once((BodyId::Floor, self.floor))
            .chain(
                self.platforms
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (BodyId::Platform(i), p.body)),
            )
            .collect()
    }

    fn game_over<R: Rng>(&mut self, rng: &mut R) {
        let run_best = self.score.best;
        self.runs += 1;
        tracing::info!(run = self.runs, run_best, "Game over");
        self.events.push(GameEvent::Sound(Sound::GameOver));
        self.events.push(GameEvent::GameOver { run_best });
        self.rebuild_world(rng);
    }
}

fn floor_body(config: &GameConfig) -> Body {
    Body::new_static(
        Vec2::new(config.scene.width / 2.0, FLOOR_Y),
        Shape::Rect {
            width: config.scene.width,
            height: config.floor_height,
        },
        category::PALLET,
    )
}
