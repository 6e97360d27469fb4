use crate::error::LapOptError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), LapOptError>;
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), LapOptError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LapOptError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), LapOptError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(LapOptError::Configuration(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}
