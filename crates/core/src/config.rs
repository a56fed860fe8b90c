use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Display names for each session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLabels {
    pub midday: String,
    pub evening: String,
}

impl Default for SessionLabels {
    fn default() -> Self {
        Self {
            midday: "Midday".to_string(),
            evening: "Evening".to_string(),
        }
    }
}

impl SessionLabels {
    pub fn label(&self, session: Session) -> &str {
        match session {
            Session::Midday => &self.midday,
            Session::Evening => &self.evening,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: '{other}'")),
        }
    }
}

/// Where each session's results are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub midday: String,
    pub evening: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            midday: "pick3_midday_historical.csv".to_string(),
            evening: "pick3_evening_historical.csv".to_string(),
            format: OutputFormat::Csv,
        }
    }
}

impl OutputConfig {
    /// Destination for one session. A `.csv` name is switched to `.json` when
    /// the JSON format is selected.
    pub fn path_for(&self, session: Session) -> PathBuf {
        let file = match session {
            Session::Midday => &self.midday,
            Session::Evening => &self.evening,
        };
        let path = self.dir.join(file);
        let is_csv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if self.format == OutputFormat::Json && is_csv {
            path.with_extension("json")
        } else {
            path
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder the table extractor writes into empty cells.
    pub missing_marker: String,
    /// Process pages on the rayon pool.
    pub parallel: bool,
    pub labels: SessionLabels,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            missing_marker: "nan".to_string(),
            parallel: false,
            labels: SessionLabels::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
