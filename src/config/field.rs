//! ConfigField trait for dynamic get/set access to config sections.
//!
//! Powers the `termglow config get|set|unset` commands: each section maps
//! field names to string values and parses strings back.

use std::str::FromStr;

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("progress.throttle_ms") // Ok(("progress", "throttle_ms"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Format an optional value for display.
pub fn format_optional<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "(not set)".to_string(), ToString::to_string)
}

/// Parse a boolean from various string representations.
pub fn parse_bool(value: &str) -> Result<bool, FieldError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(FieldError::InvalidValue {
            key: "bool".into(),
            expected: "true/false, yes/no, 1/0, on/off".into(),
        }),
    }
}

/// Parse any `FromStr` value, reporting `expected` on failure.
pub fn parse_value<T: FromStr>(key: &str, value: &str, expected: &str) -> Result<T, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    })
}

/// Parse an optional value; `none`, `(not set)` and the empty string unset it.
pub fn parse_optional<T: FromStr>(
    key: &str,
    value: &str,
    expected: &str,
) -> Result<Option<T>, FieldError> {
    match value.trim() {
        "" | "none" | "(not set)" => Ok(None),
        other => parse_value(key, other, expected).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("progress.throttle_ms").unwrap();
        assert_eq!(section, "progress");
        assert_eq!(field, "throttle_ms");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_format_optional_some() {
        assert_eq!(format_optional(&Some(40u16)), "40");
    }

    #[test]
    fn test_format_optional_none() {
        let opt: Option<String> = None;
        assert_eq!(format_optional(&opt), "(not set)");
    }

    #[test]
    fn test_parse_bool_true_variants() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("True").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("on").unwrap());
    }

    #[test]
    fn test_parse_bool_false_variants() {
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_value_reports_expectation() {
        let err = parse_value::<u64>("throttle_ms", "fast", "milliseconds").unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for throttle_ms: expected milliseconds");
        assert_eq!(parse_value::<u64>("throttle_ms", " 25 ", "milliseconds").unwrap(), 25);
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional::<u16>("width", "none", "columns").unwrap(), None);
        assert_eq!(parse_optional::<u16>("width", "", "columns").unwrap(), None);
        assert_eq!(parse_optional::<u16>("width", "100", "columns").unwrap(), Some(100));
        assert!(parse_optional::<u16>("width", "wide", "columns").is_err());
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("foo.bar".into());
        assert_eq!(err.to_string(), "Unknown config key: foo.bar");

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
