//! Config command implementations.
//!
//! This module implements the `termglow config` subcommands for managing
//! configuration without editing TOML directly.

use std::path::Path;

use crate::config::{
    metadata::{self, KeyMetadata},
    FieldError, GlowConfig,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be read or written.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The section name is not one of the config sections.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(path: Option<&Path>, section_filter: Option<&str>) -> ConfigCommandResult {
    let config = GlowConfig::load(path)?;

    let sections: Vec<&str> = match section_filter {
        Some(filter) if GlowConfig::fields_for_section(filter).is_some() => vec![filter],
        Some(filter) => return Err(ConfigCommandError::UnknownSection(filter.into())),
        None => GlowConfig::section_names().to_vec(),
    };

    println!("\x1b[1m=== termglow config ===\x1b[0m");
    println!();
    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = GlowConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
                println!("  {field:<24} {value}");
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let config = GlowConfig::load(path)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value and save the file.
pub fn config_set(path: Option<&Path>, key: &str, value: &str) -> ConfigCommandResult {
    let mut config = GlowConfig::load(path)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.save(path)?;

    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}"),
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset a key, or every key of a section, to its default and save.
pub fn config_unset(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let mut config = GlowConfig::load(path)?;

    if let Some(fields) = GlowConfig::fields_for_section(key) {
        for field in fields {
            config.reset_field(&format!("{key}.{field}"))?;
        }
        config.save(path)?;
        println!("\x1b[32m✓\x1b[0m Reset section '{key}' to defaults");
        return Ok(());
    }

    if !key.contains('.') {
        return Err(ConfigCommandError::UnknownSection(key.into()));
    }
    config.reset_field(key)?;
    config.save(path)?;
    let new_value = config.get_by_path(key)?;
    println!("\x1b[32m✓\x1b[0m Reset {key} to default: {new_value}");
    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(path: Option<&Path>, key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(path, k),
        None => explain_all(),
    }
}

fn explain_key(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(path, meta);
        return Ok(());
    }

    if GlowConfig::fields_for_section(key).is_some() {
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        for meta in metadata::keys_for_section(key) {
            let field = meta
                .key
                .strip_prefix(&format!("{key}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!("Run \x1b[36mtermglow config explain\x1b[0m to see all available keys.");
        return Err(FieldError::UnknownKey(key.into()).into());
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn explain_all() -> ConfigCommandResult {
    println!("\x1b[1m=== termglow config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36mtermglow config explain <key>\x1b[0m for details.");
    println!();

    for &section in GlowConfig::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        for meta in metadata::keys_for_section(section) {
            let field = meta
                .key
                .strip_prefix(&format!("{section}."))
                .unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
        }
        println!();
    }

    Ok(())
}

/// Text up to and including the first full stop that ends a sentence.
fn first_sentence(text: &str) -> &str {
    text.find(". ").map_or(text, |end| &text[..=end])
}

fn print_key_help(path: Option<&Path>, meta: &KeyMetadata) {
    let current = GlowConfig::load(path)
        .ok()
        .and_then(|c| c.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    if let Some(curr) = current {
        if curr == meta.default {
            println!("  \x1b[2mCurrent:\x1b[0m  {curr} \x1b[2m(default)\x1b[0m");
        } else {
            println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{curr}\x1b[0m");
        }
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        println!("    termglow config set {} {}", meta.key, example);
    }
}

/// List all valid config keys.
pub fn config_keys() -> ConfigCommandResult {
    for key in GlowConfig::all_keys() {
        println!("{key}");
    }
    Ok(())
}
