//! Soil parameters and the reservoir capacities derived from them

use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, unit_fraction, ConfigError};

const SET: &str = "soil";

/// Static soil description of a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilParams {
    /// Soil name (for logs and output only)
    pub name: String,
    /// Available water capacity (ru, mm of water per m of soil)
    pub water_holding_capacity: f64,
    /// Depth of the evaporating surface layer (mm)
    pub surface_depth: f64,
    /// Depth of the layer below it (mm)
    pub deep_depth: f64,
    /// Water in the surface reservoir at simulation start (mm)
    pub initial_surface_stock: f64,
    /// Water in the whole profile at simulation start (mm)
    pub initial_profile_stock: f64,
    /// Rainfall above which runoff occurs (mm)
    pub runoff_threshold: f64,
    /// Fraction of the water above the threshold that runs off
    pub runoff_fraction: f64,
}

impl Default for SoilParams {
    fn default() -> Self {
        Self::sandy_loam()
    }
}

impl SoilParams {
    /// Sahelian sandy loam
    pub fn sandy_loam() -> Self {
        SoilParams {
            name: "Sandy loam".to_string(),
            water_holding_capacity: 120.0,
            surface_depth: 200.0,
            deep_depth: 1300.0,
            initial_surface_stock: 5.0,
            initial_profile_stock: 20.0,
            runoff_threshold: 20.0,
            runoff_fraction: 0.2,
        }
    }

    /// Clay soil with high retention and strong runoff
    pub fn clay() -> Self {
        SoilParams {
            name: "Clay".to_string(),
            water_holding_capacity: 180.0,
            runoff_threshold: 10.0,
            runoff_fraction: 0.4,
            ..Self::sandy_loam()
        }
    }

    /// Surface reservoir capacity (ruSurf, mm)
    #[inline]
    pub fn surface_capacity(&self) -> f64 {
        self.water_holding_capacity * self.surface_depth / 1000.0
    }

    /// Whole-profile reservoir capacity (stRuMax, mm)
    #[inline]
    pub fn profile_capacity(&self) -> f64 {
        self.water_holding_capacity * (self.surface_depth + self.deep_depth) / 1000.0
    }

    /// Reject parameters outside their domain or mutually inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(SET, "water_holding_capacity", self.water_holding_capacity)?;
        positive(SET, "surface_depth", self.surface_depth)?;
        non_negative(SET, "deep_depth", self.deep_depth)?;
        non_negative(SET, "initial_surface_stock", self.initial_surface_stock)?;
        non_negative(SET, "initial_profile_stock", self.initial_profile_stock)?;
        non_negative(SET, "runoff_threshold", self.runoff_threshold)?;
        unit_fraction(SET, "runoff_fraction", self.runoff_fraction)?;

        if self.initial_surface_stock > 1.1 * self.surface_capacity() {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!(
                    "initial surface stock {} mm exceeds 110% of surface capacity {} mm",
                    self.initial_surface_stock,
                    self.surface_capacity()
                ),
            });
        }
        if self.initial_profile_stock > self.profile_capacity() {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!(
                    "initial profile stock {} mm exceeds profile capacity {} mm",
                    self.initial_profile_stock,
                    self.profile_capacity()
                ),
            });
        }
        Ok(())
    }
}
