//! ConfigField trait implementations for config sections.
//!
//! Each section maps its field names to display strings and parses user
//! input back with a readable expectation on failure.

use super::field::{format_optional, parse_bool, parse_optional, parse_value, ConfigField, FieldError};
use super::{DisplayConfig, EffectsConfig, ProgressConfig, SpinnerConfig};

const THEMES: &str = "default | matrix | cyberpunk | retro | minimal | ocean | sunset | neon";
const COLOR_KEYS: &str = "a colour key (primary, accent, success, ...)";

fn bool_field(key: &str, value: &str) -> Result<bool, FieldError> {
    parse_bool(value).map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: "true or false".into(),
    })
}

impl ConfigField for DisplayConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "theme" => Some(self.theme.to_string()),
            "speed_factor" => Some(self.speed_factor.to_string()),
            "debug" => Some(self.debug.to_string()),
            "color" => Some(self.color.to_string()),
            "width" => Some(format_optional(&self.width)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "theme" => self.theme = parse_value(key, value, THEMES)?,
            "speed_factor" => {
                let factor: f64 = parse_value(key, value, "positive number")?;
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "positive number".into(),
                    });
                }
                self.speed_factor = factor;
            }
            "debug" => self.debug = bool_field(key, value)?,
            "color" => self.color = bool_field(key, value)?,
            "width" => self.width = parse_optional(key, value, "column count or none")?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["theme", "speed_factor", "debug", "color", "width"]
    }

    fn section_name() -> &'static str {
        "display"
    }
}

impl ConfigField for SpinnerConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "style" => Some(self.style.to_string()),
            "color" => Some(self.color.to_string()),
            "tick_interval_ms" => Some(self.tick_interval_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "style" => self.style = parse_value(key, value, "a spinner style (see `termglow styles`)")?,
            "color" => self.color = parse_value(key, value, COLOR_KEYS)?,
            "tick_interval_ms" => {
                let ms: u64 = parse_value(key, value, "positive integer (milliseconds)")?;
                if ms == 0 {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "positive integer (milliseconds)".into(),
                    });
                }
                self.tick_interval_ms = ms;
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["style", "color", "tick_interval_ms"]
    }

    fn section_name() -> &'static str {
        "spinner"
    }
}

impl ConfigField for ProgressConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "style" => Some(self.style.to_string()),
            "color" => Some(self.color.to_string()),
            "throttle_ms" => Some(self.throttle_ms.to_string()),
            "show_percentage" => Some(self.show_percentage.to_string()),
            "show_eta" => Some(self.show_eta.to_string()),
            "width" => Some(format_optional(&self.width)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "style" => self.style = parse_value(key, value, "a bar style (see `termglow styles`)")?,
            "color" => self.color = parse_value(key, value, COLOR_KEYS)?,
            "throttle_ms" => self.throttle_ms = parse_value(key, value, "integer (milliseconds)")?,
            "show_percentage" => self.show_percentage = bool_field(key, value)?,
            "show_eta" => self.show_eta = bool_field(key, value)?,
            "width" => {
                let width: Option<usize> = parse_optional(key, value, "positive integer or none")?;
                if width == Some(0) {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "positive integer or none".into(),
                    });
                }
                self.width = width;
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "style",
            "color",
            "throttle_ms",
            "show_percentage",
            "show_eta",
            "width",
        ]
    }

    fn section_name() -> &'static str {
        "progress"
    }
}

impl ConfigField for EffectsConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "matrix_density" => Some(self.matrix_density.to_string()),
            "matrix_duration_secs" => Some(self.matrix_duration_secs.to_string()),
            "matrix_color" => Some(self.matrix_color.to_string()),
            "fire_height" => Some(self.fire_height.to_string()),
            "fire_duration_secs" => Some(self.fire_duration_secs.to_string()),
            "fire_max_cooling" => Some(self.fire_max_cooling.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let invalid = |expected: &str| FieldError::InvalidValue {
            key: key.into(),
            expected: expected.into(),
        };
        match key {
            "matrix_density" => {
                let density: f64 = parse_value(key, value, "number between 0 and 1")?;
                if !(0.0..=1.0).contains(&density) {
                    return Err(invalid("number between 0 and 1"));
                }
                self.matrix_density = density;
            }
            "matrix_duration_secs" | "fire_duration_secs" => {
                let secs: f64 = parse_value(key, value, "non-negative number (seconds)")?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(invalid("non-negative number (seconds)"));
                }
                if key == "matrix_duration_secs" {
                    self.matrix_duration_secs = secs;
                } else {
                    self.fire_duration_secs = secs;
                }
            }
            "matrix_color" => self.matrix_color = parse_value(key, value, COLOR_KEYS)?,
            "fire_height" => {
                let height: usize = parse_value(key, value, "positive integer (rows)")?;
                if height == 0 {
                    return Err(invalid("positive integer (rows)"));
                }
                self.fire_height = height;
            }
            "fire_max_cooling" => {
                self.fire_max_cooling = parse_value(key, value, "integer between 0 and 255")?;
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "matrix_density",
            "matrix_duration_secs",
            "matrix_color",
            "fire_height",
            "fire_duration_secs",
            "fire_max_cooling",
        ]
    }

    fn section_name() -> &'static str {
        "effects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{BarStyle, SpinnerStyle};
    use crate::terminal::{ColorKey, Theme};

    #[test]
    fn test_display_fields() {
        let mut display = DisplayConfig::default();
        display.set_field("theme", "ocean").unwrap();
        display.set_field("debug", "yes").unwrap();
        display.set_field("width", "120").unwrap();
        assert_eq!(display.theme, Theme::Ocean);
        assert!(display.debug);
        assert_eq!(display.get_field("width").as_deref(), Some("120"));
        display.set_field("width", "none").unwrap();
        assert_eq!(display.get_field("width").as_deref(), Some("(not set)"));
    }

    #[test]
    fn test_display_rejects_bad_speed() {
        let mut display = DisplayConfig::default();
        assert!(display.set_field("speed_factor", "0").is_err());
        assert!(display.set_field("speed_factor", "-2").is_err());
        assert!(display.set_field("speed_factor", "fast").is_err());
        display.set_field("speed_factor", "2.5").unwrap();
        assert_eq!(display.speed_factor, 2.5);
    }

    #[test]
    fn test_display_rejects_unknown_theme() {
        let mut display = DisplayConfig::default();
        let err = display.set_field("theme", "plaid").unwrap_err();
        assert!(err.to_string().contains("cyberpunk"));
    }

    #[test]
    fn test_spinner_fields() {
        let mut spinner = SpinnerConfig::default();
        spinner.set_field("style", "moon").unwrap();
        spinner.set_field("color", "warning").unwrap();
        assert_eq!(spinner.style, SpinnerStyle::Moon);
        assert_eq!(spinner.color, ColorKey::Warning);
        assert!(spinner.set_field("tick_interval_ms", "0").is_err());
        assert!(spinner.set_field("style", "wobble").is_err());
    }

    #[test]
    fn test_progress_fields() {
        let mut progress = ProgressConfig::default();
        progress.set_field("style", "diamonds").unwrap();
        progress.set_field("show_eta", "off").unwrap();
        assert_eq!(progress.style, BarStyle::Diamonds);
        assert!(!progress.show_eta);
        assert!(progress.set_field("width", "0").is_err());
        assert!(matches!(
            progress.set_field("nope", "1"),
            Err(FieldError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_effects_fields() {
        let mut effects = EffectsConfig::default();
        effects.set_field("matrix_density", "0.4").unwrap();
        effects.set_field("fire_duration_secs", "1.5").unwrap();
        assert_eq!(effects.matrix_density, 0.4);
        assert_eq!(effects.fire_duration_secs, 1.5);
        assert!(effects.set_field("matrix_density", "1.1").is_err());
        assert!(effects.set_field("fire_height", "0").is_err());
        assert!(effects.set_field("matrix_duration_secs", "-1").is_err());
    }

    #[test]
    fn test_field_names_round_trip() {
        let effects = EffectsConfig::default();
        for name in EffectsConfig::field_names() {
            assert!(effects.get_field(name).is_some(), "{name} should be readable");
        }
        assert_eq!(EffectsConfig::section_name(), "effects");
    }
}
