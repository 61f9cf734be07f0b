// Frame timing
/// Wall-clock microseconds per simulation frame (60 FPS).
pub const FRAME_TICK_US: u64 = 16_667;
/// Simulated seconds per frame. Per-frame tuning assumes 60 frames a second.
pub const FRAME_DT: f64 = 1.0 / 60.0;
/// Longest wall-clock gap fed to the accumulator after a stall.
pub const MAX_FRAME_GAP_MS: u64 = 100;

// Terminal input
/// Frames a tilt key press keeps the device "tilted" (~200ms).
pub const TILT_HOLD_FRAMES: u32 = 12;
/// Raw accelerometer sample emulated by a held arrow key.
pub const KEY_TILT_SAMPLE: f64 = 0.6;
/// Raw sample emulated by a held shifted arrow key (hard tilt).
pub const KEY_HARD_TILT_SAMPLE: f64 = 1.2;

// Persistence
pub const SAVE_DIR_NAME: &str = ".cutejump";
pub const SCORES_FILE: &str = "scores.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "cutejump.log";
pub const LOG_ENV_VAR: &str = "CUTEJUMP_LOG";
