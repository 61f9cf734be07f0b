//! A play session: the scene plus where finished runs are recorded.

use super::events::GameEvent;
use super::game::JumpGame;
use super::highscore::{ScoreRecord, ScoreStore};
use crate::physics::PhysicsWorld;
use std::io;

pub struct Session<S: ScoreStore, W: PhysicsWorld> {
    pub game: JumpGame<W>,
    pub store: S,
    /// Last record read from or written to the store.
    pub record: ScoreRecord,
}

impl<S: ScoreStore, W: PhysicsWorld> Session<S, W> {
    pub fn new(game: JumpGame<W>, store: S) -> io::Result<Self> {
        let record = store.load()?;
        Ok(Self {
            game,
            store,
            record,
        })
    }

    /// Drain the scene's events, persisting any finished run, and hand the
    /// events on to the frontend. A failed save is logged and leaves
    /// `record` as it was; the events are delivered either way.
    pub fn process_events(&mut self) -> Vec<GameEvent> {
        let events = self.game.drain_events();
        for event in &events {
            if let GameEvent::GameOver { run_best } = event {
                match self.store.record_run(*run_best) {
                    Ok(record) => self.record = record,
                    Err(e) => {
                        tracing::warn!(run_best, error = %e, "Could not save score");
                    }
                }
            }
        }
        events
    }

    /// Best known score, counting the run in progress.
    pub fn display_high_score(&self) -> u64 {
        self.record.high_score.max(self.game.score.best)
    }
}
