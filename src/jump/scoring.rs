//! Height-based scoring.

use crate::core::config::Size;
use crate::physics::Vec2;

/// Whether the score went up on the last update. The frontend shows a gold
/// star and white label while rising, a dull star and red label otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreTrend {
    Rising,
    #[default]
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    pub score: u64,
    /// Highest score reached this run. Resets with every new run, so the
    /// saved last score is that run's best, not the session's.
    pub best: u64,
    pub trend: ScoreTrend,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the score from the player's height above the floor's
    /// bottom edge. The floor scrolls down with the world, so this is the
    /// total height climbed. Returns true if the run best improved.
    pub fn update(
        &mut self,
        player_position: Vec2,
        player_size: Size,
        floor_position: Vec2,
        floor_height: f64,
    ) -> bool {
        let old = self.score;
        self.score = height_score(player_position, player_size, floor_position, floor_height);

        if self.score > old {
            self.trend = ScoreTrend::Rising;
            if self.score > self.best {
                self.best = self.score;
                return true;
            }
        } else {
            self.trend = ScoreTrend::Falling;
        }
        false
    }
}

/// Whole-point height of the player's feet above the floor's bottom edge,
/// never negative.
pub fn height_score(
    player_position: Vec2,
    player_size: Size,
    floor_position: Vec2,
    floor_height: f64,
) -> u64 {
    let feet = player_position.y as i64 - (player_size.height / 2.0) as i64;
    let floor_bottom = floor_position.y as i64 - (floor_height as i64) / 2;
    (feet - floor_bottom).max(0) as u64
}

/// en_US decimal grouping: `1234567` becomes `"1,234,567"`.
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
