//! Tuning parameters for the jumper.
//!
//! Every constant the scene loop uses lives here so the shipped variants can
//! differ by data alone. Values are loaded from `~/.cutejump/config.json`
//! when present.

use crate::utils::persistence::load_json;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Width and height in scene points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Shipped parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Classic,
    Meadow,
    Compact,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Meadow, Variant::Compact];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Meadow => "meadow",
            Self::Compact => "compact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,

    // Scene
    pub scene: Size,
    pub points_per_meter: f64,
    pub floor_height: f64,

    // Gravity and tilt
    /// Downward gravity in m/s^2 once the game has started.
    pub gravity: f64,
    /// Vertical gravity while super-jump is active (positive = upward).
    pub super_jump_gravity_y: f64,
    /// Multiplier from raw accelerometer sample to m/s^2.
    pub tilt_scale: f64,
    /// Added to `gravity` when a tilt exceeds it.
    pub tilt_overshoot: f64,
    pub tilt_rotation_divisor: f64,

    // Player
    pub player_size: Size,
    pub player_scale: f64,
    pub max_horizontal_speed: f64,
    /// Jump impulse reaches `scene.height * jump_height_factor` above the floor.
    pub jump_height_factor: f64,
    pub super_jump_impulse: f64,
    pub super_jump_secs: f64,

    // Scrolling
    pub scroll_velocity_divisor: f64,
    pub super_jump_scroll_start: f64,
    pub super_jump_scroll_decay: f64,
    pub parallax_threshold: f64,
    pub parallax_divisor: f64,

    // Platforms
    pub platform_rows: u32,
    pub platform_row_margin: f64,
    pub platform_size: Size,
    pub moving_platform_size: Size,
    pub moving_platform_scale: f64,
    /// Seconds for a moving platform to cross the scene in one direction.
    pub moving_platform_half_period_secs: f64,
    pub break_fade_secs: f64,
    /// 1-in-N odds, evaluated in this order on recycle.
    pub grass_odds: u32,
    pub moving_odds: u32,
    pub dirt_odds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Variant::Classic)
    }
}

impl GameConfig {
    pub fn preset(variant: Variant) -> Self {
        let base = Self {
            variant,
            scene: Size::new(320.0, 568.0),
            points_per_meter: 150.0,
            floor_height: 20.0,

            gravity: 9.8,
            super_jump_gravity_y: 0.1,
            tilt_scale: 10.0,
            tilt_overshoot: 10.0,
            tilt_rotation_divisor: 5.0,

            player_size: Size::new(40.0, 40.0),
            player_scale: 1.1,
            max_horizontal_speed: 1000.0,
            jump_height_factor: 1.2,
            super_jump_impulse: 10.0,
            super_jump_secs: 2.0,

            scroll_velocity_divisor: 50.0,
            super_jump_scroll_start: 30.0,
            super_jump_scroll_decay: 0.16,
            parallax_threshold: 200.0,
            parallax_divisor: 10.0,

            platform_rows: 10,
            platform_row_margin: 10.0,
            platform_size: Size::new(60.0, 14.0),
            moving_platform_size: Size::new(24.0, 6.0),
            moving_platform_scale: 2.5,
            moving_platform_half_period_secs: 2.0,
            break_fade_secs: 0.5,
            grass_odds: 35,
            moving_odds: 5,
            dirt_odds: 5,
        };

        match variant {
            Variant::Classic => base,
            Variant::Meadow => Self {
                platform_size: Size::new(72.0, 16.0),
                ..base
            },
            Variant::Compact => Self {
                platform_size: Size::new(48.0, 12.0),
                moving_platform_size: Size::new(20.0, 5.0),
                ..base
            },
        }
    }

    /// Player footprint after sprite scaling.
    pub fn player_body_size(&self) -> Size {
        self.player_size.scaled(self.player_scale)
    }

    pub fn moving_platform_body_size(&self) -> Size {
        self.moving_platform_size.scaled(self.moving_platform_scale)
    }

    pub fn validate(&self) -> io::Result<()> {
        let positive = [
            ("scene.width", self.scene.width),
            ("scene.height", self.scene.height),
            ("points_per_meter", self.points_per_meter),
            ("player_size.width", self.player_size.width),
            ("player_scale", self.player_scale),
            ("platform_size.width", self.platform_size.width),
            ("platform_size.height", self.platform_size.height),
            ("moving_platform_scale", self.moving_platform_scale),
            ("moving_platform_half_period_secs", self.moving_platform_half_period_secs),
            ("scroll_velocity_divisor", self.scroll_velocity_divisor),
            ("parallax_divisor", self.parallax_divisor),
            ("tilt_rotation_divisor", self.tilt_rotation_divisor),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if self.platform_rows == 0 {
            return Err(invalid("platform_rows must be at least 1".to_string()));
        }
        if !(self.platform_row_margin >= 0.0) {
            return Err(invalid(format!(
                "platform_row_margin must not be negative, got {}",
                self.platform_row_margin
            )));
        }
        let row_space = self.scene.height / self.platform_rows as f64;
        if self.platform_row_margin * 2.0 > row_space {
            return Err(invalid(format!(
                "platform_row_margin {} does not fit a row of {}",
                self.platform_row_margin, row_space
            )));
        }

        for (name, odds) in [
            ("grass_odds", self.grass_odds),
            ("moving_odds", self.moving_odds),
            ("dirt_odds", self.dirt_odds),
        ] {
            if odds == 0 {
                return Err(invalid(format!("{} must be at least 1", name)));
            }
        }

        Ok(())
    }
}

/// Read a config file, falling back to the Classic preset when the file is
/// missing, unreadable or invalid.
pub fn load_config(path: &Path) -> GameConfig {
    match load_json::<GameConfig>(path) {
        Ok(Some(config)) => match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                GameConfig::default()
            }
        },
        Ok(None) => GameConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read config");
            GameConfig::default()
        }
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_and_valid() {
        let config = GameConfig::default();
        assert_eq!(config.variant, Variant::Classic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_presets_valid() {
        for variant in Variant::ALL {
            let config = GameConfig::preset(variant);
            assert_eq!(config.variant, variant);
            assert!(config.validate().is_ok(), "{:?} should validate", variant);
        }
    }

    #[test]
    fn test_variant_names_roundtrip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
        }
        assert_eq!(Variant::from_name("MEADOW"), Some(Variant::Meadow));
        assert_eq!(Variant::from_name("lava"), None);
    }

    #[test]
    fn test_player_body_size_scaled() {
        let config = GameConfig::default();
        let size = config.player_body_size();
        assert!((size.width - 44.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_platform_scaled() {
        let config = GameConfig::default();
        let size = config.moving_platform_body_size();
        assert!((size.width - 60.0).abs() < 1e-9);
        assert!((size.height - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_odds_rejected() {
        let config = GameConfig {
            grass_odds: 0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_negative_scene_rejected() {
        let config = GameConfig {
            scene: Size::new(-1.0, 568.0),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_margin_rejected() {
        let config = GameConfig {
            platform_row_margin: -1e308,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let config = GameConfig {
            platform_row_margin: -1.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_negative_margin_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"platform_row_margin": -1e308}"#).unwrap();

        assert_eq!(load_config(&path), GameConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grass_odds": 3}"#).unwrap();
        assert_eq!(config.grass_odds, 3);
        assert_eq!(config.moving_odds, 5);
        assert_eq!(config.scene, Size::new(320.0, 568.0));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("config.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_config_reads_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"variant": "compact", "dirt_odds": 2}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.variant, Variant::Compact);
        assert_eq!(config.dirt_odds, 2);
    }

    #[test]
    fn test_load_config_invalid_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"platform_rows": 0}"#).unwrap();

        assert_eq!(load_config(&path), GameConfig::default());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_string(&Variant::Compact).unwrap();
        assert_eq!(json, "\"compact\"");
    }
}
