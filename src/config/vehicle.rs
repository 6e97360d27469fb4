use super::traits::{check_positive, ConfigSection};
use crate::engines::dynamics::VehicleParams;
use crate::error::LapOptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub friction_coefficient: f64,
    pub gravity: f64,
    pub max_acceleration: f64,
    /// Braking limit; either sign is accepted, only the magnitude is used.
    pub max_deceleration: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let params = VehicleParams::default();
        Self {
            friction_coefficient: params.friction_coefficient,
            gravity: params.gravity,
            max_acceleration: params.max_acceleration,
            max_deceleration: params.max_deceleration,
        }
    }
}

impl VehicleConfig {
    pub fn to_params(&self) -> VehicleParams {
        VehicleParams {
            friction_coefficient: self.friction_coefficient,
            gravity: self.gravity,
            max_acceleration: self.max_acceleration,
            max_deceleration: self.max_deceleration,
        }
    }
}

impl ConfigSection for VehicleConfig {
    fn section_name() -> &'static str {
        "vehicle"
    }

    fn validate(&self) -> Result<(), LapOptError> {
        check_positive("Friction coefficient", self.friction_coefficient)?;
        check_positive("Gravity", self.gravity)?;
        check_positive("Max acceleration", self.max_acceleration)?;
        check_positive("Max deceleration magnitude", self.max_deceleration.abs())?;
        Ok(())
    }
}
