//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{BufferDef, TempoConfig};
use std::path::Path;
use tempo_common::is_half_period;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "tempo.toml";

/// Loads and validates a `tempo.toml` configuration from a project directory.
///
/// Reads `<project_dir>/tempo.toml`, parses it, and validates it.
pub fn load_config(project_dir: &Path) -> Result<TempoConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tempo.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<TempoConfig, ConfigError> {
    let config: TempoConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TempoConfig) -> Result<(), ConfigError> {
    validate_buffer("library.input_buffer", &config.library.input_buffer)?;
    validate_buffer("library.global_buffer", &config.library.global_buffer)?;

    for (name, clock) in &config.clocks {
        if clock.wire.is_empty() {
            return Err(ConfigError::MissingField(format!("clocks.{name}.wire")));
        }
        let period = clock.period.ns();
        if period <= 0.0 || !period.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "clock '{name}' has non-positive period {period}"
            )));
        }
        if let Some([rising, falling]) = clock.waveform {
            if !is_half_period(period, rising, falling) {
                return Err(ConfigError::ValidationError(format!(
                    "clock '{name}' waveform {{{rising} {falling}}} is not 50% duty for period {period}"
                )));
            }
        }
    }

    if config.propagation.natural_rounds == 0 {
        return Err(ConfigError::ValidationError(
            "propagation.natural_rounds must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_buffer(section: &str, buffer: &BufferDef) -> Result<(), ConfigError> {
    if buffer.cell.is_empty() {
        return Err(ConfigError::MissingField(format!("{section}.cell")));
    }
    if buffer.output.is_empty() {
        return Err(ConfigError::MissingField(format!("{section}.output")));
    }
    let delay = buffer.delay.ns();
    if delay < 0.0 || !delay.is_finite() {
        return Err(ConfigError::ValidationError(format!(
            "{section}.delay must be a finite, non-negative time, got {delay}"
        )));
    }
    Ok(())
}
