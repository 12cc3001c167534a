use super::config::ScoringConfig;

/// Severity band of a risk score (traffic light pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    High,
    Medium,
    Low,
    None,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::High => "high",
            RiskBand::Medium => "medium",
            RiskBand::Low => "low",
            RiskBand::None => "none",
        }
    }
}

/// Map a score to its band. Pure; NaN falls into `None`.
pub fn colour_for(score: f64, config: &ScoringConfig) -> RiskBand {
    if score >= config.high {
        RiskBand::High
    } else if score >= config.medium {
        RiskBand::Medium
    } else if score > 0.0 {
        RiskBand::Low
    } else {
        RiskBand::None
    }
}
