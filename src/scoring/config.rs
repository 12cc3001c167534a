use serde::{Deserialize, Serialize};

/// Default lower bound of the high band.
pub const DEFAULT_HIGH: f64 = 40.0;

/// Default lower bound of the medium band.
pub const DEFAULT_MEDIUM: f64 = 15.0;

/// Band thresholds for risk scores.
///
/// Scores at or above `high` are high risks (and end up in the CSV export),
/// scores at or above `medium` are medium, anything else above zero is low.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   high: 40
///   medium: 15
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Lower bound (inclusive) of the high band
    #[serde(default = "default_high")]
    pub high: f64,

    /// Lower bound (inclusive) of the medium band
    #[serde(default = "default_medium")]
    pub medium: f64,
}

fn default_high() -> f64 {
    DEFAULT_HIGH
}

fn default_medium() -> f64 {
    DEFAULT_MEDIUM
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH,
            medium: DEFAULT_MEDIUM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.high, 40.0);
        assert_eq!(config.medium, 15.0);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = "high: 50\n";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.high, 50.0);
        assert_eq!(config.medium, 15.0);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("critical: 80\n");
        assert!(result.is_err());
    }
}
