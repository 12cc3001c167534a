//! Column names shared by the template workbook, the question library and the
//! scoring rules.

pub const SHEET_NAME: &str = "Assessment";

pub const SEVERITY: &str = "Severity (S)";
pub const PROBABILITY: &str = "Probability (P)";
pub const DETECTABILITY: &str = "Detectability (D)";
pub const MITIGATION: &str = "Mitigation";
pub const RISK_SCORE: &str = "Risk Score";
pub const RESIDUAL_SEVERITY: &str = "Residual S";
pub const RESIDUAL_PROBABILITY: &str = "Residual P";
pub const RESIDUAL_DETECTABILITY: &str = "Residual D";
pub const RESIDUAL_SCORE: &str = "Residual Score";

/// Inherent rating columns, in S/P/D order.
pub const RATING_FIELDS: [&str; 3] = [SEVERITY, PROBABILITY, DETECTABILITY];

/// Residual rating columns, in S/P/D order.
pub const RESIDUAL_FIELDS: [&str; 3] = [RESIDUAL_SEVERITY, RESIDUAL_PROBABILITY, RESIDUAL_DETECTABILITY];

/// Columns whose cells are coloured by risk band.
pub const SCORE_FIELDS: [&str; 2] = [RISK_SCORE, RESIDUAL_SCORE];

pub fn is_rating_field(field: &str) -> bool {
    RATING_FIELDS.contains(&field)
}
