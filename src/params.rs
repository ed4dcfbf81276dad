//! Model parameters for a single soil reflectance simulation.
//!
//! Two parameter groups feed each simulation: the per-call soil description
//! (brightness, basis orientation, moisture) and the empirical constants of
//! the moisture transform (capacity analogue and effective film thickness).
//! Both are plain immutable value types; a simulation is a pure function of
//! them and the spectral library.

use std::fmt;

use serde::Deserialize;

use crate::error::BsmError;

/// Per-simulation soil description.
///
/// `b` is the soil brightness and `lat`/`lon` (degrees) orient the mixing
/// weights on the GSV sphere; values outside the typical ranges stay
/// geometrically valid but physically implausible. `smp` is the volumetric
/// moisture in percent and must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SoilParameters {
    pub b: f64,
    pub lat: f64,
    pub lon: f64,
    pub smp: f64,
}

/// Empirical constants of the moisture transform.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmpiricalConstants {
    /// Soil-moisture-capacity analogue scaling the Poisson mean.
    pub smc: f64,
    /// Effective water film thickness for Beer-Lambert attenuation.
    pub film: f64,
}

impl SoilParameters {
    pub fn validate(&self) -> Result<(), BsmError> {
        if self.smp < 0.0 {
            return Err(BsmError::NegativeParameter {
                name: "SMp",
                value: self.smp,
            });
        }
        Ok(())
    }
}

impl EmpiricalConstants {
    pub fn validate(&self) -> Result<(), BsmError> {
        if self.smc < 0.0 {
            return Err(BsmError::NegativeParameter {
                name: "SMC",
                value: self.smc,
            });
        }
        if self.film < 0.0 {
            return Err(BsmError::NegativeParameter {
                name: "film",
                value: self.film,
            });
        }
        Ok(())
    }
}

impl fmt::Display for SoilParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B={}, lat={}, lon={}, SMp={}",
            self.b, self.lat, self.lon, self.smp
        )
    }
}
