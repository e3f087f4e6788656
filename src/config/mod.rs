//! Configuration model for `termglow.toml`.
//!
//! Every section has serde defaults, so a missing file, a partial file and
//! an empty file all load. Values are checked by [`GlowConfig::validate`]
//! before any animation is built from them.

pub mod field;
pub mod metadata;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};

use crate::feedback::{AnimationError, BarStyle, SpeedFactor, SpinnerStyle};
use crate::terminal::{ColorKey, Theme};

/// Default config file path, relative to the working directory.
pub const CONFIG_FILE: &str = "termglow.toml";

/// Global display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour theme.
    pub theme: Theme,
    /// Animation speed multiplier.
    pub speed_factor: f64,
    /// Keep the cursor visible.
    pub debug: bool,
    /// Emit colour escape sequences.
    pub color: bool,
    /// Override the detected terminal width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            speed_factor: 1.0,
            debug: false,
            color: true,
            width: None,
        }
    }
}

/// Spinner defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Glyph style.
    pub style: SpinnerStyle,
    /// Glyph colour.
    pub color: ColorKey,
    /// Milliseconds between frames at speed 1.0.
    pub tick_interval_ms: u64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            style: SpinnerStyle::Dots,
            color: ColorKey::Accent,
            tick_interval_ms: 100,
        }
    }
}

/// Progress bar defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Fill/empty glyph style.
    pub style: BarStyle,
    /// Colour of an incomplete bar.
    pub color: ColorKey,
    /// Minimum milliseconds between throttled repaints at speed 1.0.
    pub throttle_ms: u64,
    /// Draw the percentage column.
    pub show_percentage: bool,
    /// Draw the ETA column.
    pub show_eta: bool,
    /// Fixed bar width; unset sizes the bar from the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            style: BarStyle::Blocks,
            color: ColorKey::Accent,
            throttle_ms: 50,
            show_percentage: true,
            show_eta: true,
            width: None,
        }
    }
}

/// Full-screen effect defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Chance per column of a rain drop.
    pub matrix_density: f64,
    /// Rain run time in seconds at speed 1.0.
    pub matrix_duration_secs: f64,
    /// Rain colour.
    pub matrix_color: ColorKey,
    /// Fire rows.
    pub fire_height: usize,
    /// Fire run time in seconds at speed 1.0.
    pub fire_duration_secs: f64,
    /// Upper bound of random cooling per cell per tick.
    pub fire_max_cooling: u8,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            matrix_density: 0.1,
            matrix_duration_secs: 5.0,
            matrix_color: ColorKey::Primary,
            fire_height: 10,
            fire_duration_secs: 3.0,
            fire_max_cooling: 2,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Global display settings.
    pub display: DisplayConfig,
    /// Spinner defaults.
    pub spinner: SpinnerConfig,
    /// Progress bar defaults.
    pub progress: ProgressConfig,
    /// Effect defaults.
    pub effects: EffectsConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading or writing the config file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file TOML.
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Error serialising the config to TOML.
    #[error("Failed to serialise config TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    /// A value parsed but cannot drive an animation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] AnimationError),
    /// A numeric value is outside its allowed range.
    #[error("Invalid value for {key}: {reason}")]
    OutOfRange {
        /// Dot-notation key.
        key: &'static str,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

/// Convert seconds to a duration, rejecting negative and non-finite input.
pub fn duration_from_secs(secs: f64) -> Result<Duration, AnimationError> {
    Duration::try_from_secs_f64(secs).map_err(|_| AnimationError::InvalidDuration(secs))
}

impl GlowConfig {
    /// Load configuration from a file, or return defaults if file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `termglow.toml` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: GlowConfig = toml::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialise to a TOML document.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value that constrains an animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        SpeedFactor::new(self.display.speed_factor)?;
        if self.spinner.tick_interval_ms == 0 {
            return Err(ConfigError::OutOfRange {
                key: "spinner.tick_interval_ms",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.effects.matrix_density) {
            return Err(AnimationError::InvalidDensity(self.effects.matrix_density).into());
        }
        if self.effects.fire_height == 0 {
            return Err(AnimationError::InvalidHeight(0).into());
        }
        if self.progress.width == Some(0) {
            return Err(ConfigError::OutOfRange {
                key: "progress.width",
                reason: "must be at least 1",
            });
        }
        duration_from_secs(self.effects.matrix_duration_secs)?;
        duration_from_secs(self.effects.fire_duration_secs)?;
        Ok(())
    }

    /// The validated speed factor.
    pub fn speed(&self) -> Result<SpeedFactor, AnimationError> {
        SpeedFactor::new(self.display.speed_factor)
    }

    /// Get a config value by dot-notation path.
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "display" => self.display.get_field(key),
            "spinner" => self.spinner.get_field(key),
            "progress" => self.progress.get_field(key),
            "effects" => self.effects.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "display" => self.display.set_field(key, value),
            "spinner" => self.spinner.set_field(key, value),
            "progress" => self.progress.set_field(key, value),
            "effects" => self.effects.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["display", "spinner", "progress", "effects"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "display" => Some(DisplayConfig::field_names()),
            "spinner" => Some(SpinnerConfig::field_names()),
            "progress" => Some(ProgressConfig::field_names()),
            "effects" => Some(EffectsConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        let mut keys = Vec::new();
        for section in Self::section_names() {
            if let Some(fields) = Self::fields_for_section(section) {
                for field in fields {
                    keys.push(format!("{section}.{field}"));
                }
            }
        }
        keys
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        let default = Self::default();
        match section {
            "display" => self.display.reset_from(&default.display, key),
            "spinner" => self.spinner.reset_from(&default.spinner, key),
            "progress" => self.progress.reset_from(&default.progress, key),
            "effects" => self.effects.reset_from(&default.effects, key),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
        .map_err(|_| FieldError::UnknownKey(path.into()))
    }
}

/// Copy one field's value from another instance of the same section.
trait ResetFrom: ConfigField {
    fn reset_from(&mut self, default: &Self, key: &str) -> Result<(), FieldError>
    where
        Self: Sized,
    {
        match default.get_field(key) {
            Some(value) => self.set_field(key, &value),
            None => Err(FieldError::UnknownKey(key.into())),
        }
    }
}

impl<T: ConfigField> ResetFrom for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GlowConfig::default();
        assert_eq!(config.display.theme, Theme::Default);
        assert_eq!(config.display.speed_factor, 1.0);
        assert_eq!(config.spinner.style, SpinnerStyle::Dots);
        assert_eq!(config.spinner.tick_interval_ms, 100);
        assert_eq!(config.progress.throttle_ms, 50);
        assert_eq!(config.effects.fire_height, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = GlowConfig::load(Some(&temp.path().join("nope.toml"))).unwrap();
        assert_eq!(config, GlowConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("termglow.toml");
        fs::write(
            &path,
            "[display]\ntheme = \"neon\"\n\n[progress]\nstyle = \"arrows\"\nwidth = 20\n",
        )
        .unwrap();

        let config = GlowConfig::load(Some(&path)).unwrap();
        assert_eq!(config.display.theme, Theme::Neon);
        assert_eq!(config.display.speed_factor, 1.0);
        assert_eq!(config.progress.style, BarStyle::Arrows);
        assert_eq!(config.progress.width, Some(20));
        assert_eq!(config.spinner, SpinnerConfig::default());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("termglow.toml");
        fs::write(&path, "[display\ntheme = ").unwrap();
        assert!(matches!(
            GlowConfig::load(Some(&path)),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_style() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("termglow.toml");
        fs::write(&path, "[spinner]\nstyle = \"wobble\"\n").unwrap();
        assert!(GlowConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("termglow.toml");
        let mut config = GlowConfig::default();
        config.display.theme = Theme::Matrix;
        config.effects.matrix_density = 0.3;
        config.save(Some(&path)).unwrap();

        let loaded = GlowConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GlowConfig::default();
        config.display.speed_factor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(AnimationError::InvalidSpeedFactor(_)))
        ));

        let mut config = GlowConfig::default();
        config.effects.matrix_density = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(AnimationError::InvalidDensity(_)))
        ));

        let mut config = GlowConfig::default();
        config.effects.fire_height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(AnimationError::InvalidHeight(0)))
        ));

        let mut config = GlowConfig::default();
        config.spinner.tick_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));

        let mut config = GlowConfig::default();
        config.effects.fire_duration_secs = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(AnimationError::InvalidDuration(_)))
        ));
    }

    #[test]
    fn test_get_and_set_by_path() {
        let mut config = GlowConfig::default();
        config.set_by_path("progress.throttle_ms", "20").unwrap();
        assert_eq!(config.get_by_path("progress.throttle_ms").unwrap(), "20");
        config.set_by_path("display.theme", "retro").unwrap();
        assert_eq!(config.display.theme, Theme::Retro);
    }

    #[test]
    fn test_unknown_paths() {
        let mut config = GlowConfig::default();
        assert!(matches!(
            config.get_by_path("nope.key"),
            Err(FieldError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set_by_path("display.nope", "1"),
            Err(FieldError::UnknownKey(_))
        ));
        assert!(matches!(
            config.get_by_path("display"),
            Err(FieldError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_all_keys_resolve() {
        let config = GlowConfig::default();
        let keys = GlowConfig::all_keys();
        assert!(keys.contains(&"spinner.style".to_string()));
        for key in keys {
            assert!(config.get_by_path(&key).is_ok(), "{key} should resolve");
        }
    }

    #[test]
    fn test_reset_field() {
        let mut config = GlowConfig::default();
        config.set_by_path("effects.fire_height", "4").unwrap();
        config.set_by_path("progress.width", "12").unwrap();
        config.reset_field("effects.fire_height").unwrap();
        config.reset_field("progress.width").unwrap();
        assert_eq!(config.effects.fire_height, 10);
        assert_eq!(config.progress.width, None);
        assert!(config.reset_field("effects.nope").is_err());
    }

    #[test]
    fn test_duration_from_secs() {
        assert_eq!(duration_from_secs(1.5).unwrap(), Duration::from_millis(1500));
        assert!(duration_from_secs(-0.5).is_err());
        assert!(duration_from_secs(f64::NAN).is_err());
    }
}
