use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Template workbook looked up in the working directory when not configured
pub const DEFAULT_TEMPLATE: &str = "risk_template.xlsx";

const DEFAULT_FLASH: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Template workbook with an Assessment sheet
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// JSON question library (built-in library when unset)
    #[serde(default)]
    pub questions: Option<PathBuf>,

    /// Where the high-risk CSV export is written
    #[serde(default)]
    pub export_path: Option<PathBuf>,

    /// How long status messages stay visible, e.g. "3s"
    #[serde(default)]
    pub flash_duration: Option<String>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE))
    }

    pub fn questions_path(&self) -> Option<&Path> {
        self.questions.as_deref()
    }

    pub fn export_path(&self) -> PathBuf {
        self.export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::assessment::export::DEFAULT_EXPORT_FILE))
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    /// Flash duration; falls back to 3s when unset or unparseable
    pub fn flash_duration(&self) -> Duration {
        self.flash_duration
            .as_deref()
            .and_then(|s| humantime::parse_duration(s).ok())
            .unwrap_or(DEFAULT_FLASH)
    }
}
