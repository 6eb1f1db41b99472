use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "faasbench.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Window width in seconds.
    pub window_secs: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { window_secs: 10.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Remove an existing output directory before writing a run's charts.
    pub clean: bool,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clean: true,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Max log files analyzed at once.
    pub max_concurrency: usize,
    /// File extension (without dot) picked up when walking the input tree.
    pub extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            extension: "csv".into(),
        }
    }
}

impl AppConfig {
    /// `CONFIG_FILE` if set (must exist), else `faasbench.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var("CONFIG_FILE") {
            let s = std::fs::read_to_string(&path)?;
            return Self::load_from_str(&s);
        }
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            let s = std::fs::read_to_string(DEFAULT_CONFIG_FILE)?;
            return Self::load_from_str(&s);
        }
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.analysis.window_secs.is_finite() && self.analysis.window_secs > 0.0,
            "analysis.window_secs must be > 0, got {}",
            self.analysis.window_secs
        );
        anyhow::ensure!(
            self.batch.max_concurrency > 0,
            "batch.max_concurrency must be > 0, got {}",
            self.batch.max_concurrency
        );
        anyhow::ensure!(
            !self.batch.extension.is_empty() && !self.batch.extension.starts_with('.'),
            "batch.extension must be non-empty and without a leading dot, got {:?}",
            self.batch.extension
        );
        Ok(())
    }
}
