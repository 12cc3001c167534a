use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !(config.high > 0.0) {
        errors.push(format!("scoring.high: must be positive, got {}", config.high));
    }

    if !(config.medium > 0.0) {
        errors.push(format!("scoring.medium: must be positive, got {}", config.medium));
    }

    if config.high <= config.medium {
        errors.push(format!(
            "scoring: high ({}) must be greater than medium ({})",
            config.high, config.medium
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
