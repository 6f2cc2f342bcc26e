// Engine settings, loaded from an optional JSON file and overridden from the command line
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Periods of every indicator written to the TA files.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub ema_long: usize,
    pub ema_medium: usize,
    pub ema_short: usize,
    pub volume_ema_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            rsi_period: 14,
            ema_long: 50,
            ema_medium: 21,
            ema_short: 9,
            volume_ema_period: 10,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("ema_long", self.ema_long),
            ("ema_medium", self.ema_medium),
            ("ema_short", self.ema_short),
            ("volume_ema_period", self.volume_ema_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(EngineError::ConfigError(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound on instruments processed at the same time.
    pub workers: usize,
    /// Stop the whole run at the first failed instrument instead of skipping it.
    pub abort_on_error: bool,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub log_level: String,
    pub indicators: IndicatorSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            workers: 8,
            abort_on_error: false,
            log_level: "info".to_string(),
            indicators: IndicatorSettings::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let settings: EngineSettings =
            serde_json::from_str(raw).context("Failed to parse engine settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::ConfigError("workers must be greater than 0".to_string()));
        }
        self.indicators.validate()
    }
}
