//! Crop management (ITK) parameters
//!
//! Sowing rule, plant density, rooting at sowing, irrigation policy, mulch
//! cover, intensification level and the juvenile mortality window.

use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, unit_fraction, ConfigError};

const SET: &str = "management";

/// Automatic irrigation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrigationPolicy {
    /// Irrigate automatically when the target reservoir runs low
    pub automatic: bool,
    /// Filling fraction below which irrigation is triggered
    pub target_fraction: f64,
    /// Largest automatic application per day (mm)
    pub max_daily: f64,
}

impl Default for IrrigationPolicy {
    fn default() -> Self {
        IrrigationPolicy {
            automatic: false,
            target_fraction: 0.7,
            max_daily: 80.0,
        }
    }
}

/// Crop residue mulch on the soil surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mulch {
    /// Residue biomass (biomMc, kg/ha)
    pub biomass: f64,
    /// Specific covering area (surfMc, ha/t)
    pub specific_area: f64,
    /// Water retained per unit residue at saturation (humSatMc)
    pub saturation_capacity: f64,
    /// Extinction of soil evaporation by the cover (coefMc)
    pub cover_coefficient: f64,
    /// Soil evaporation multiplier in percent
    pub evaporation_percent: f64,
}

impl Mulch {
    /// Bare soil without residues
    pub const NONE: Mulch = Mulch {
        biomass: 0.0,
        specific_area: 0.0,
        saturation_capacity: 0.0,
        cover_coefficient: 0.0,
        evaporation_percent: 100.0,
    };

    /// Mulch reservoir capacity (mm)
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.saturation_capacity * self.biomass / 10000.0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_negative(SET, "mulch.biomass", self.biomass)?;
        non_negative(SET, "mulch.specific_area", self.specific_area)?;
        non_negative(SET, "mulch.saturation_capacity", self.saturation_capacity)?;
        non_negative(SET, "mulch.cover_coefficient", self.cover_coefficient)?;
        non_negative(SET, "mulch.evaporation_percent", self.evaporation_percent)
    }
}

impl Default for Mulch {
    fn default() -> Self {
        Self::NONE
    }
}

/// Management of a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagementParams {
    /// First day (offset from simulation start) at which sowing may occur
    pub sowing_day: usize,
    /// Plants per hectare
    pub density: f64,
    /// Surface water needed to sow (mm)
    pub sowing_water_threshold: f64,
    /// Rooting depth at sowing (mm)
    pub initial_root_depth: f64,
    pub irrigation: IrrigationPolicy,
    pub mulch: Mulch,
    /// Intensification index (NI); overrides the cultivar conversion efficiency
    pub intensification_index: Option<f64>,
    /// Days after emergence during which juvenile mortality is tested
    pub mortality_window_days: u32,
}

impl Default for ManagementParams {
    fn default() -> Self {
        Self::rainfed(0)
    }
}

impl ManagementParams {
    /// Rainfed crop sown from `sowing_day` on, no mulch
    pub fn rainfed(sowing_day: usize) -> Self {
        ManagementParams {
            sowing_day,
            density: 60000.0,
            sowing_water_threshold: 10.0,
            initial_root_depth: 50.0,
            irrigation: IrrigationPolicy::default(),
            mulch: Mulch::NONE,
            intensification_index: None,
            mortality_window_days: 10,
        }
    }

    /// Rainfed management with automatic irrigation enabled
    pub fn irrigated(sowing_day: usize, target_fraction: f64) -> Self {
        ManagementParams {
            irrigation: IrrigationPolicy {
                automatic: true,
                target_fraction,
                ..IrrigationPolicy::default()
            },
            ..Self::rainfed(sowing_day)
        }
    }

    /// Reject parameters outside their domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive(SET, "density", self.density)?;
        non_negative(SET, "sowing_water_threshold", self.sowing_water_threshold)?;
        non_negative(SET, "initial_root_depth", self.initial_root_depth)?;
        unit_fraction(SET, "irrigation.target_fraction", self.irrigation.target_fraction)?;
        non_negative(SET, "irrigation.max_daily", self.irrigation.max_daily)?;
        self.mulch.validate()?;
        if let Some(index) = self.intensification_index {
            non_negative(SET, "intensification_index", index)?;
        }
        Ok(())
    }
}
