pub mod config;
pub mod band;
pub mod engine;
pub mod validation;

pub use config::*;
pub use band::{colour_for, RiskBand};
pub use engine::{residual_from, risk_score, Ratings};
pub use validation::validate_scoring;
