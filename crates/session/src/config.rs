use std::path::Path;

use mazerun_kernel::GeneratorConfig;
use mazerun_render::LayoutConfig;
use serde::{Deserialize, Serialize};

use crate::PowerupConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything tunable about a game. Defaults reproduce the shipped game.
///
/// Loaded from YAML; missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub depth: usize,
    /// Cells added to both dimensions on every reset.
    pub growth: usize,
    /// Neither dimension grows past this.
    pub max_dimension: usize,
    /// Countdown length, also the bonus granted per reset.
    pub timer_secs: f32,
    /// Minimap height in pixels.
    pub minimap_size: u32,
    pub layout: LayoutConfig,
    pub generator: GeneratorConfig,
    pub powerups: PowerupConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 15,
            depth: 10,
            growth: 1,
            max_dimension: 60,
            timer_secs: 60.0,
            minimap_size: 250,
            layout: LayoutConfig::default(),
            generator: GeneratorConfig::default(),
            powerups: PowerupConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading game config");
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values no game can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.width == 0 || self.depth == 0 {
            return invalid(format!(
                "maze must be at least 1x1, got {}x{}",
                self.width, self.depth
            ));
        }
        if self.width.max(self.depth) > self.max_dimension {
            return invalid(format!(
                "maze {}x{} exceeds max_dimension {}",
                self.width, self.depth, self.max_dimension
            ));
        }
        if !(self.timer_secs.is_finite() && self.timer_secs > 0.0) {
            return invalid(format!("timer_secs must be positive, got {}", self.timer_secs));
        }
        if self.minimap_size == 0 {
            return invalid("minimap_size must be positive".to_string());
        }
        let layout = &self.layout;
        for (name, value) in [
            ("room_size", layout.room_size),
            ("room_height", layout.room_height),
            ("wall_depth", layout.wall_depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("layout.{name} must be positive, got {value}"));
            }
        }
        let generator = &self.generator;
        let shortcuts = &generator.shortcuts;
        for (name, value) in [
            ("branch_probability", generator.branch_probability),
            ("shortcuts.base_probability", shortcuts.base_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("generator.{name} must be within [0, 1], got {value}"));
            }
        }
        if !(shortcuts.probability_step.is_finite() && shortcuts.probability_step >= 0.0) {
            return invalid(format!(
                "generator.shortcuts.probability_step must not be negative, got {}",
                shortcuts.probability_step
            ));
        }
        if shortcuts.hall_span_divisor == 0 {
            return invalid("generator.shortcuts.hall_span_divisor must be positive".to_string());
        }
        let bonus = self.powerups.bonus;
        if !(bonus.is_finite() && bonus >= 0.0) {
            return invalid(format!("powerups.bonus must not be negative, got {bonus}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_kernel::RampReset;
    use std::io::Write;

    #[test]
    fn defaults_match_shipped_game() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.depth), (15, 10));
        assert_eq!(config.minimap_size, 250);
        assert_eq!(config.timer_secs, 60.0);
        assert_eq!(config.layout.room_size, 15.0);
        assert_eq!(config.powerups.bonus, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "\
width: 8
depth: 6
generator:
  shortcuts:
    ramp_reset:
      policy: each_column
";
        let config = GameConfig::from_yaml_str(yaml).unwrap();
        assert_eq!((config.width, config.depth), (8, 6));
        assert_eq!(config.generator.branch_probability, 0.3);
        assert_eq!(config.generator.shortcuts.min_hall_gap, 6);
        assert_eq!(config.generator.shortcuts.ramp_reset, RampReset::EachColumn);
        assert_eq!(config.layout.wall_depth, 0.2);
    }

    #[test]
    fn ramp_cap_from_yaml() {
        let yaml = "\
generator:
  shortcuts:
    ramp_reset:
      policy: above_cap
      cap: 0.4
";
        let config = GameConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.generator.shortcuts.ramp_reset,
            RampReset::AboveCap { cap: 0.4 }
        );
    }

    #[test]
    fn yaml_round_trip() {
        let mut config = GameConfig::default();
        config.growth = 3;
        let yaml = config.to_yaml().unwrap();
        assert_eq!(GameConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = GameConfig::from_yaml_str("width: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_yaml_str("width: 80\n").unwrap_err();
        assert!(err.to_string().contains("max_dimension"));

        let err = GameConfig::from_yaml_str("generator:\n  branch_probability: 1.5\n").unwrap_err();
        assert!(err.to_string().contains("branch_probability"));

        let err = GameConfig::from_yaml_str("layout:\n  room_size: -1.0\n").unwrap_err();
        assert!(err.to_string().contains("room_size"));

        let err = GameConfig::from_yaml_str("powerups:\n  bonus: -0.5\n").unwrap_err();
        assert!(err.to_string().contains("powerups.bonus"));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = GameConfig::from_yaml_str("width: [1, 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width: 5\ndepth: 4\ntimer_secs: 30").unwrap();
        let config = GameConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!((config.width, config.depth), (5, 4));
        assert_eq!(config.timer_secs, 30.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::from_yaml_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
