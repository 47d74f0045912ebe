//! Engine configuration.
//!
//! Loads settings from `tactile.toml` as an alternative to environment
//! variables; `TACTILE_*` variables override file values for temporary
//! tweaks without editing the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::easing::Easing;

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-run defaults.
    pub run: RunSettings,
}

/// Defaults applied to runs whose descriptor leaves a field empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Prefix of generated animation names (`<prefix>-<run id>`).
    pub name_prefix: String,
    /// Duration for descriptors with an empty duration list, in
    /// milliseconds.
    pub default_duration_ms: f64,
    /// Delay for descriptors with a zero delay, in milliseconds.
    pub default_delay_ms: f64,
    /// Timing function for descriptors with an empty timing list.
    pub default_easing: Easing,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            name_prefix: "tactile-run".to_string(),
            default_duration_ms: 300.0,
            default_delay_ms: 0.0,
            default_easing: Easing::Ease,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load from `tactile.toml` in the current directory, or fall back to
    /// defaults when the file doesn't exist.
    pub fn load_or_default() -> Self {
        Self::load_from_file("tactile.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables.
    ///
    /// Environment variables take precedence over file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(prefix) = std::env::var("TACTILE_NAME_PREFIX") {
            if !prefix.is_empty() {
                self.run.name_prefix = prefix;
            }
        }
        if let Ok(val) = std::env::var("TACTILE_DEFAULT_DURATION_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.run.default_duration_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("TACTILE_DEFAULT_DELAY_MS") {
            if let Ok(ms) = val.parse::<f64>() {
                self.run.default_delay_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("TACTILE_DEFAULT_EASING") {
            match Easing::parse(&val) {
                Ok(easing) => self.run.default_easing = easing,
                Err(err) => tracing::warn!("ignoring TACTILE_DEFAULT_EASING: {err}"),
            }
        }
    }

    /// Load configuration with environment variable overrides.
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.run.name_prefix, "tactile-run");
        assert_eq!(config.run.default_duration_ms, 300.0);
        assert_eq!(config.run.default_easing, Easing::Ease);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.run.name_prefix, "tactile-run");
        assert_eq!(parsed.run.default_duration_ms, 300.0);
    }

    #[test]
    fn test_partial_toml() {
        let parsed: EngineConfig = toml::from_str(
            r#"
            [run]
            default_duration_ms = 450.0
            "#,
        )
        .unwrap();
        assert_eq!(parsed.run.default_duration_ms, 450.0);
        assert_eq!(parsed.run.name_prefix, "tactile-run");
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("TACTILE_NAME_PREFIX", "flick");
            std::env::set_var("TACTILE_DEFAULT_DURATION_MS", "120");
        }

        let mut config = EngineConfig::default();
        config.merge_with_env();

        assert_eq!(config.run.name_prefix, "flick");
        assert_eq!(config.run.default_duration_ms, 120.0);

        unsafe {
            std::env::remove_var("TACTILE_NAME_PREFIX");
            std::env::remove_var("TACTILE_DEFAULT_DURATION_MS");
        }
    }
}
