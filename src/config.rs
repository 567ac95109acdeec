//! Startup configuration
//!
//! Everything is optional in the TOML file; missing keys fall back to the
//! values in `constants`. Example:
//!
//! ```toml
//! window_title = "Ball Hunt"
//!
//! [tuning]
//! robot_speed = 0.2
//! round_duration = 15.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{assets, ball, camera, game, movement, robot, window, world};
use crate::error::{EngineError, EngineResult};

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub robot_speed: f32,
    pub position_lerp: f32,
    pub rotation_lerp: f32,
    pub floor_y: f32,
    pub min_robot_height: f32,
    pub max_robot_height: f32,
    pub robot_radius: f32,
    pub ball_radius: f32,
    pub hover_amplitude_idle: f32,
    pub hover_amplitude_moving: f32,
    pub hover_speed: f32,
    pub round_duration: f32,
    pub result_display_duration: f32,
    pub tick_interval: f32,
    pub spawn_min_distance: f32,
    pub spawn_fallback_distance: f32,
    pub spawn_max_attempts: u32,
    pub map_target_size: f32,
    pub map_margin: f32,
    pub map_ceiling_headroom: f32,
    pub robot_target_height: f32,
    pub robot_float_height: f32,
    pub min_camera_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            robot_speed: movement::ROBOT_SPEED,
            position_lerp: movement::POSITION_LERP_FACTOR,
            rotation_lerp: movement::ROTATION_LERP_FACTOR,
            floor_y: world::FLOOR_Y,
            min_robot_height: movement::MIN_ROBOT_HEIGHT,
            max_robot_height: movement::MAX_ROBOT_HEIGHT,
            robot_radius: robot::RADIUS,
            ball_radius: ball::RADIUS,
            hover_amplitude_idle: robot::HOVER_AMPLITUDE_IDLE,
            hover_amplitude_moving: robot::HOVER_AMPLITUDE_MOVING,
            hover_speed: robot::HOVER_SPEED,
            round_duration: game::ROUND_DURATION,
            result_display_duration: game::RESULT_DISPLAY_DURATION,
            tick_interval: game::TICK_INTERVAL,
            spawn_min_distance: game::SPAWN_MIN_DISTANCE,
            spawn_fallback_distance: game::SPAWN_FALLBACK_DISTANCE,
            spawn_max_attempts: game::SPAWN_MAX_ATTEMPTS,
            map_target_size: world::MAP_TARGET_SIZE,
            map_margin: world::MAP_MARGIN,
            map_ceiling_headroom: world::MAP_CEILING_HEADROOM,
            robot_target_height: robot::TARGET_HEIGHT,
            robot_float_height: robot::FLOAT_HEIGHT,
            min_camera_height: camera::MIN_HEIGHT,
        }
    }
}

impl Tuning {
    /// Lowest target height the robot may reach
    pub fn min_target_y(&self) -> f32 {
        self.floor_y + self.min_robot_height
    }

    /// Highest target height the robot may reach
    pub fn max_target_y(&self) -> f32 {
        self.floor_y + self.max_robot_height
    }

    /// Distance below which robot and ball touch
    pub fn collision_distance(&self) -> f32 {
        self.robot_radius + self.ball_radius
    }

    /// Reject values that would break the motion or game rules
    pub fn validate(&self) -> EngineResult<()> {
        let floats = [
            ("robot_speed", self.robot_speed),
            ("position_lerp", self.position_lerp),
            ("rotation_lerp", self.rotation_lerp),
            ("floor_y", self.floor_y),
            ("min_robot_height", self.min_robot_height),
            ("max_robot_height", self.max_robot_height),
            ("robot_radius", self.robot_radius),
            ("ball_radius", self.ball_radius),
            ("hover_amplitude_idle", self.hover_amplitude_idle),
            ("hover_amplitude_moving", self.hover_amplitude_moving),
            ("hover_speed", self.hover_speed),
            ("round_duration", self.round_duration),
            ("result_display_duration", self.result_display_duration),
            ("tick_interval", self.tick_interval),
            ("spawn_min_distance", self.spawn_min_distance),
            ("spawn_fallback_distance", self.spawn_fallback_distance),
            ("map_target_size", self.map_target_size),
            ("map_margin", self.map_margin),
            ("map_ceiling_headroom", self.map_ceiling_headroom),
            ("robot_target_height", self.robot_target_height),
            ("robot_float_height", self.robot_float_height),
            ("min_camera_height", self.min_camera_height),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(EngineError::Config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let lerps = [
            ("position_lerp", self.position_lerp),
            ("rotation_lerp", self.rotation_lerp),
        ];
        for (name, value) in lerps {
            if !(value > 0.0 && value <= 1.0) {
                return Err(EngineError::Config(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        let positives = [
            ("robot_radius", self.robot_radius),
            ("ball_radius", self.ball_radius),
            ("round_duration", self.round_duration),
            ("tick_interval", self.tick_interval),
            ("map_target_size", self.map_target_size),
            ("robot_target_height", self.robot_target_height),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(EngineError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !(self.min_robot_height < self.max_robot_height) {
            return Err(EngineError::Config(format!(
                "min_robot_height ({}) must be below max_robot_height ({})",
                self.min_robot_height, self.max_robot_height
            )));
        }

        if !(self.result_display_duration >= 0.0) {
            return Err(EngineError::Config(
                "result_display_duration cannot be negative".to_string(),
            ));
        }

        if self.spawn_max_attempts == 0 {
            return Err(EngineError::Config(
                "spawn_max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Directory the model paths are resolved against
    pub asset_root: PathBuf,
    pub map_model: String,
    pub robot_model: String,
    /// Fixed RNG seed for reproducible ball placement
    pub seed: Option<u64>,
    pub tuning: Tuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: window::TITLE.to_string(),
            window_width: window::WIDTH,
            window_height: window::HEIGHT,
            asset_root: PathBuf::from("."),
            map_model: assets::MAP_MODEL.to_string(),
            robot_model: assets::ROBOT_MODEL.to_string(),
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Load a config file; the file must exist
    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text).map_err(|e| match e {
            EngineError::Config(message) => {
                EngineError::Config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;
        log::info!("[config] Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> EngineResult<Self> {
        if !path.exists() {
            log::info!(
                "[config] No config file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Config path from the environment, or the default file name
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(assets::CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(assets::CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.robot_speed, 0.15);
        assert_eq!(tuning.collision_distance(), 2.5);
        assert_eq!(tuning.min_target_y(), -1.5);
        assert_eq!(tuning.max_target_y(), 13.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            window_title = "Test"
            seed = 7

            [tuning]
            round_duration = 15.0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.window_title, "Test");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tuning.round_duration, 15.0);
        assert_eq!(config.tuning.robot_speed, movement::ROBOT_SPEED);
        assert_eq!(config.window_width, window::WIDTH);
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [tuning]
            min_robot_height = 20.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));

        let result = EngineConfig::from_toml_str(
            r#"
            [tuning]
            position_lerp = 0.0
            "#,
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn non_finite_tuning_is_rejected() {
        for field in ["min_robot_height", "floor_y", "result_display_duration", "hover_speed"] {
            for value in ["nan", "inf", "-inf"] {
                let text = format!("[tuning]\n{} = {}", field, value);
                let result = EngineConfig::from_toml_str(&text);
                assert!(
                    matches!(result, Err(EngineError::Config(_))),
                    "{} = {} was accepted",
                    field,
                    value
                );
            }
        }
    }

    #[test]
    fn load_error_names_the_file_once() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[tuning]").expect("write");
        writeln!(file, "min_robot_height = nan").expect("write");

        let err = EngineConfig::load(file.path()).expect_err("nan must be rejected");
        let message = err.to_string();
        assert_eq!(message.matches("configuration error").count(), 1, "{}", message);
        assert!(message.contains(&file.path().display().to_string()));
        assert!(message.contains("min_robot_height"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = EngineConfig::from_toml_str("window_width = \"wide\"");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let config = EngineConfig::load_or_default(&path).expect("defaults");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn existing_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "window_width = 640").expect("write");
        writeln!(file, "[tuning]").expect("write");
        writeln!(file, "ball_radius = 2.0").expect("write");

        let config = EngineConfig::load_or_default(file.path()).expect("load");
        assert_eq!(config.window_width, 640);
        assert_eq!(config.tuning.ball_radius, 2.0);
        assert_eq!(config.tuning.collision_distance(), 3.5);
    }
}
