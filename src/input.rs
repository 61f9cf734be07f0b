//! Terminal input: key presses to game actions, and arrow keys standing in
//! for the accelerometer.

use crate::core::constants::{KEY_HARD_TILT_SAMPLE, KEY_TILT_SAMPLE, TILT_HOLD_FRAMES};
use crate::jump::input::TiltSource;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpInput {
    /// Tilt the "device" by a raw accelerometer sample (negative = left).
    Tilt(f64),
    /// Level the device immediately.
    Level,
    /// Touch the screen (starts a run).
    Touch,
    Quit,
    Other,
}

pub fn map_key(key: KeyEvent) -> JumpInput {
    if key.kind == KeyEventKind::Release {
        return JumpInput::Other;
    }
    let hard = key.modifiers.contains(KeyModifiers::SHIFT);
    let magnitude = if hard {
        KEY_HARD_TILT_SAMPLE
    } else {
        KEY_TILT_SAMPLE
    };

    match key.code {
        KeyCode::Left | KeyCode::Char('a') => JumpInput::Tilt(-magnitude),
        KeyCode::Char('A') => JumpInput::Tilt(-KEY_HARD_TILT_SAMPLE),
        KeyCode::Right | KeyCode::Char('d') => JumpInput::Tilt(magnitude),
        KeyCode::Char('D') => JumpInput::Tilt(KEY_HARD_TILT_SAMPLE),
        KeyCode::Down | KeyCode::Char('s') => JumpInput::Level,
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => JumpInput::Touch,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => JumpInput::Quit,
        _ => JumpInput::Other,
    }
}

/// Keyboard-driven tilt.
///
/// Terminals only report key presses, so a press holds its tilt for
/// `TILT_HOLD_FRAMES` frames; key-repeat refreshes the hold while the key
/// stays down. When the hold runs out the device reads level again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyboardTilt {
    current: f64,
    hold_frames: u32,
}

impl KeyboardTilt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, sample: f64) {
        self.current = sample;
        self.hold_frames = TILT_HOLD_FRAMES;
    }

    pub fn level(&mut self) {
        self.current = 0.0;
        self.hold_frames = 0;
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

impl TiltSource for KeyboardTilt {
    fn sample(&mut self) -> Option<f64> {
        let sample = self.current;
        if self.hold_frames > 0 {
            self.hold_frames -= 1;
            if self.hold_frames == 0 {
                self.current = 0.0;
            }
        }
        Some(sample)
    }
}
