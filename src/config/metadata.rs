//! Config key metadata for documentation and help.
//!
//! Descriptions, types, defaults and examples for every config key, used
//! by `termglow config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "progress.throttle_ms").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "u64", "bool", "string").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // display section
    KeyMetadata {
        key: "display.theme",
        description: "Colour theme every animation is painted with.",
        value_type: "default | matrix | cyberpunk | retro | minimal | ocean | sunset | neon",
        default: "default",
        examples: &["matrix", "neon", "minimal"],
    },
    KeyMetadata {
        key: "display.speed_factor",
        description: "Global speed multiplier. Frame intervals and effect durations are \
                      divided by it. Values below 0.1 are raised to 0.1.",
        value_type: "positive number",
        default: "1",
        examples: &["0.5", "2", "4"],
    },
    KeyMetadata {
        key: "display.debug",
        description: "Keep the cursor visible while animations run.",
        value_type: "bool",
        default: "false",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "display.color",
        description: "Emit colour escape sequences. Turn off for logs and dumb terminals.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "display.width",
        description: "Terminal width to assume instead of querying the terminal.",
        value_type: "column count (optional)",
        default: "(not set)",
        examples: &["80", "120", "none"],
    },
    // spinner section
    KeyMetadata {
        key: "spinner.style",
        description: "Glyph sequence spinners cycle through.",
        value_type: "spinner style name",
        default: "dots",
        examples: &["classic", "moon", "matrix"],
    },
    KeyMetadata {
        key: "spinner.color",
        description: "Colour key for the spinner glyph.",
        value_type: "colour key",
        default: "accent",
        examples: &["primary", "success", "info"],
    },
    KeyMetadata {
        key: "spinner.tick_interval_ms",
        description: "Milliseconds between spinner frames at speed 1.",
        value_type: "positive integer",
        default: "100",
        examples: &["50", "80", "150"],
    },
    // progress section
    KeyMetadata {
        key: "progress.style",
        description: "Fill and empty glyphs of the bar.",
        value_type: "bar style name",
        default: "blocks",
        examples: &["arrows", "equals", "gradient"],
    },
    KeyMetadata {
        key: "progress.color",
        description: "Colour key of an incomplete bar. Complete bars use the success colour.",
        value_type: "colour key",
        default: "accent",
        examples: &["primary", "info", "warning"],
    },
    KeyMetadata {
        key: "progress.throttle_ms",
        description: "Minimum milliseconds between repaints triggered by updates at speed 1. \
                      Reaching the total always repaints.",
        value_type: "integer",
        default: "50",
        examples: &["0", "50", "200"],
    },
    KeyMetadata {
        key: "progress.show_percentage",
        description: "Draw the percentage column.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "progress.show_eta",
        description: "Draw the ETA, or the elapsed time once complete.",
        value_type: "bool",
        default: "true",
        examples: &["true", "false"],
    },
    KeyMetadata {
        key: "progress.width",
        description: "Bar width in cells. When unset the bar is min(40, columns - 30) wide.",
        value_type: "positive integer (optional)",
        default: "(not set)",
        examples: &["20", "40", "none"],
    },
    // effects section
    KeyMetadata {
        key: "effects.matrix_density",
        description: "Chance that a column carries a falling drop.",
        value_type: "number between 0 and 1",
        default: "0.1",
        examples: &["0.05", "0.3", "1"],
    },
    KeyMetadata {
        key: "effects.matrix_duration_secs",
        description: "How long the matrix rain runs at speed 1.",
        value_type: "non-negative number",
        default: "5",
        examples: &["2", "10"],
    },
    KeyMetadata {
        key: "effects.matrix_color",
        description: "Colour key of the rain glyphs.",
        value_type: "colour key",
        default: "primary",
        examples: &["success", "accent"],
    },
    KeyMetadata {
        key: "effects.fire_height",
        description: "Rows of fire, including the burning bottom row.",
        value_type: "positive integer",
        default: "10",
        examples: &["5", "15", "30"],
    },
    KeyMetadata {
        key: "effects.fire_duration_secs",
        description: "How long the fire burns at speed 1.",
        value_type: "non-negative number",
        default: "3",
        examples: &["1.5", "10"],
    },
    KeyMetadata {
        key: "effects.fire_max_cooling",
        description: "Upper bound of the random cooling each cell loses per frame. \
                      Higher values give shorter flames.",
        value_type: "integer 0-255",
        default: "2",
        examples: &["0", "1", "3"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Get all keys in the metadata table.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    METADATA.iter().map(|m| m.key)
}

/// Search for keys matching a query (prefix or contains).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}
