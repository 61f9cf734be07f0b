//! Events the scene emits for its outer collaborators (audio, haptics,
//! score persistence, UI flashes). The frontend drains them once per frame.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Break,
    SuperJump,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The first touch launched the player.
    Launched,
    Sound(Sound),
    /// Heavy impact feedback for any contact.
    Haptic,
    PlatformBroken { index: usize },
    SuperJumpStarted,
    SuperJumpEnded,
    /// The player fell out of the scene. The world has been rebuilt.
    GameOver { run_best: u64 },
}
