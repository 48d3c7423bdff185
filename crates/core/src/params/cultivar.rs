//! Cultivar (variety) parameters
//!
//! Everything the phenology and carbon engines need to know about the plant:
//! cardinal temperatures, phase thermal durations, photoperiod response,
//! root elongation per phase, radiation use, respiration, partitioning
//! allometry, specific leaf area and yield potential.
//!
//! Units follow the SARRA-H conventions: biomass in kg/ha, thermal time in
//! degree-days, root elongation in mm/day, SLA in ha/kg.

use serde::{Deserialize, Serialize};

use crate::core_types::Phase;
use crate::error::{finite, non_negative, positive, unit_fraction, ConfigError};

const SET: &str = "cultivar";

/// Photoperiod sensitivity at or above which a cultivar is treated as
/// indeterminate (potential yield capped by stem biomass).
pub const INDETERMINATE_SENSITIVITY: f64 = 2.5;

/// Root front elongation speed per phase (mm/day)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootGrowthRates {
    pub germination: f64,
    pub basic_vegetative: f64,
    pub photoperiod_sensitive: f64,
    pub reproductive: f64,
    pub grain_filling: f64,
    pub grain_drying: f64,
}

impl RootGrowthRates {
    /// Elongation speed for a phase; no growth on bare soil or at harvest
    pub fn for_phase(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Germination => self.germination,
            Phase::BasicVegetative => self.basic_vegetative,
            Phase::PhotoperiodSensitive => self.photoperiod_sensitive,
            Phase::Reproductive => self.reproductive,
            Phase::GrainFilling => self.grain_filling,
            Phase::GrainDrying => self.grain_drying,
            Phase::BareSoil | Phase::Harvest => 0.0,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_negative(SET, "root_growth.germination", self.germination)?;
        non_negative(SET, "root_growth.basic_vegetative", self.basic_vegetative)?;
        non_negative(SET, "root_growth.photoperiod_sensitive", self.photoperiod_sensitive)?;
        non_negative(SET, "root_growth.reproductive", self.reproductive)?;
        non_negative(SET, "root_growth.grain_filling", self.grain_filling)?;
        non_negative(SET, "root_growth.grain_drying", self.grain_drying)
    }
}

impl Default for RootGrowthRates {
    fn default() -> Self {
        RootGrowthRates {
            germination: 15.0,
            basic_vegetative: 25.0,
            photoperiod_sensitive: 25.0,
            reproductive: 20.0,
            grain_filling: 10.0,
            grain_drying: 0.0,
        }
    }
}

/// Conversion efficiency response to the intensification index (NI)
///
/// `NIYo + NIp·(1 − exp(−NIp·NI)) − exp(−0.5·((NI − LGauss)/AGauss)²)/(AGauss·√(2π))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensificationResponse {
    /// Intercept (NIYo)
    pub intercept: f64,
    /// Saturation amplitude and rate (NIp)
    pub amplitude: f64,
    /// Centre of the Gaussian penalty (LGauss)
    pub gauss_center: f64,
    /// Width of the Gaussian penalty (AGauss)
    pub gauss_width: f64,
}

impl IntensificationResponse {
    /// Effective conversion efficiency for an intensification index
    pub fn conversion(&self, index: f64) -> f64 {
        let z = (index - self.gauss_center) / self.gauss_width;
        self.intercept + self.amplitude * (1.0 - (-self.amplitude * index).exp())
            - (-0.5 * z * z).exp() / (self.gauss_width * (2.0 * std::f64::consts::PI).sqrt())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        finite(SET, "intensification.intercept", self.intercept)?;
        finite(SET, "intensification.amplitude", self.amplitude)?;
        finite(SET, "intensification.gauss_center", self.gauss_center)?;
        positive(SET, "intensification.gauss_width", self.gauss_width)
    }
}

/// Static parameters of a cultivar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CultivarParams {
    /// Cultivar name (for logs and output only)
    pub name: String,

    // Cardinal temperatures (°C)
    pub base_temperature: f64,
    pub optimal_temperature_low: f64,
    pub optimal_temperature_high: f64,
    pub lethal_temperature: f64,

    // Thermal duration of each phase (°Cd)
    pub emergence_thermal_time: f64,
    pub vegetative_thermal_time: f64,
    pub reproductive_thermal_time: f64,
    pub maturation1_thermal_time: f64,
    pub maturation2_thermal_time: f64,

    // Photoperiod response
    pub photoperiod_exponent: f64,
    /// Day length below which the photoperiod phase ends (h)
    pub critical_day_length: f64,
    /// Day length at which the photoperiod response saturates (h)
    pub threshold_day_length: f64,
    pub photoperiod_sensitivity: f64,

    /// Consecutive days of shrinking aerial biomass that kill a young crop
    pub mortality_stress_days: u32,

    pub root_growth: RootGrowthRates,

    // Water use
    /// Light extinction coefficient (kdf)
    pub extinction_coefficient: f64,
    /// Maximal crop coefficient (kcMax)
    pub max_crop_coefficient: f64,
    /// Base soil-water depletion factor (PFactor)
    pub depletion_factor: f64,

    // Assimilation (g/MJ and dimensionless phase coefficients)
    pub conversion_efficiency: f64,
    pub assimilation_vegetative: f64,
    pub assimilation_maturation1: f64,
    pub assimilation_maturation2: f64,

    // Maintenance respiration
    pub maintenance_respiration_rate: f64,
    pub maintenance_temperature: f64,

    // Seed reserve at emergence
    pub seed_reserve_fraction: f64,
    /// Seed dry weight (g)
    pub seed_dry_weight: f64,

    // Aerial fraction = min(0.9, slope·total + base)
    pub aerial_fraction_slope: f64,
    pub aerial_fraction_base: f64,

    // Leaf/aerial allometry (feuilAeroPente, feuilAeroBase)
    pub leaf_fraction_slope: f64,
    pub leaf_fraction_base: f64,

    // Specific leaf area (ha/kg)
    pub sla_max: f64,
    pub sla_min: f64,
    pub sla_decay: f64,

    // Potential yield fixed at flowering
    pub yield_slope: f64,
    pub yield_intercept: f64,
    pub yield_biomass_coefficient: f64,

    // Reallocation to grain
    pub reallocation_rate: f64,
    pub leaf_reallocation_share: f64,

    /// Sowing density giving unit density correction (plants/ha)
    pub optimal_density: Option<f64>,
    /// Strength of the density correction
    pub density_response: f64,

    /// Conversion efficiency as a function of the intensification index
    pub intensification: Option<IntensificationResponse>,
}

impl Default for CultivarParams {
    fn default() -> Self {
        Self::sorghum()
    }
}

impl CultivarParams {
    /// Photoperiod-sensitive West African sorghum
    pub fn sorghum() -> Self {
        CultivarParams {
            name: "Sorghum".to_string(),
            base_temperature: 11.0,
            optimal_temperature_low: 30.0,
            optimal_temperature_high: 35.0,
            lethal_temperature: 44.0,
            emergence_thermal_time: 50.0,
            vegetative_thermal_time: 450.0,
            reproductive_thermal_time: 450.0,
            maturation1_thermal_time: 450.0,
            maturation2_thermal_time: 250.0,
            photoperiod_exponent: 0.17,
            critical_day_length: 11.5,
            threshold_day_length: 13.5,
            photoperiod_sensitivity: 0.4,
            mortality_stress_days: 4,
            root_growth: RootGrowthRates::default(),
            extinction_coefficient: 0.45,
            max_crop_coefficient: 1.0,
            depletion_factor: 0.5,
            conversion_efficiency: 3.5,
            assimilation_vegetative: 1.0,
            assimilation_maturation1: 0.8,
            assimilation_maturation2: 0.2,
            maintenance_respiration_rate: 0.002,
            maintenance_temperature: 25.0,
            seed_reserve_fraction: 0.25,
            seed_dry_weight: 0.03,
            aerial_fraction_slope: 0.0001,
            aerial_fraction_base: 0.5,
            leaf_fraction_slope: -0.0001, // cM ≈ 0.71
            leaf_fraction_base: 0.5,
            sla_max: 0.004,
            sla_min: 0.002,
            sla_decay: 0.05,
            yield_slope: 0.5,
            yield_intercept: 0.0,
            yield_biomass_coefficient: 0.15,
            reallocation_rate: 0.5,
            leaf_reallocation_share: 0.6,
            optimal_density: None,
            density_response: 0.0,
            intensification: None,
        }
    }

    /// Short-cycle millet, photoperiod-insensitive
    pub fn millet() -> Self {
        CultivarParams {
            name: "Millet".to_string(),
            base_temperature: 10.0,
            emergence_thermal_time: 40.0,
            vegetative_thermal_time: 350.0,
            reproductive_thermal_time: 350.0,
            maturation1_thermal_time: 350.0,
            maturation2_thermal_time: 200.0,
            photoperiod_sensitivity: 1.5, // leaves the photoperiod phase on its first day
            conversion_efficiency: 3.2,
            sla_max: 0.0045,
            ..Self::sorghum()
        }
    }

    /// Cultivar whose potential yield is capped by stem biomass
    pub fn is_indeterminate(&self) -> bool {
        self.photoperiod_sensitivity >= INDETERMINATE_SENSITIVITY
    }

    /// Leaf allometry coefficients `(bM, cM)`
    ///
    /// `bM = feuilAeroBase − 0.1`, `cM = ((feuilAeroPente·1000)/bM + 0.78)/0.75`.
    /// Only meaningful once `validate` has accepted the cultivar.
    pub fn leaf_allometry(&self) -> (f64, f64) {
        let b = self.leaf_fraction_base - 0.1;
        let c = ((self.leaf_fraction_slope * 1000.0) / b + 0.78) / 0.75;
        (b, c)
    }

    /// Conversion efficiency for a management intensification index
    ///
    /// The intensification response replaces the plain efficiency only when
    /// both the cultivar curve and the index are present.
    pub fn effective_conversion(&self, intensification_index: Option<f64>) -> f64 {
        match (self.intensification, intensification_index) {
            (Some(curve), Some(index)) => curve.conversion(index),
            _ => self.conversion_efficiency,
        }
    }

    /// Reject parameters outside their domain or mutually inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite(SET, "base_temperature", self.base_temperature)?;
        finite(SET, "optimal_temperature_low", self.optimal_temperature_low)?;
        finite(SET, "optimal_temperature_high", self.optimal_temperature_high)?;
        finite(SET, "lethal_temperature", self.lethal_temperature)?;
        if !(self.base_temperature < self.optimal_temperature_low
            && self.optimal_temperature_low <= self.optimal_temperature_high
            && self.optimal_temperature_high < self.lethal_temperature)
        {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!(
                    "cardinal temperatures must satisfy base < opt1 <= opt2 < lethal, got {} / {} / {} / {}",
                    self.base_temperature,
                    self.optimal_temperature_low,
                    self.optimal_temperature_high,
                    self.lethal_temperature
                ),
            });
        }

        positive(SET, "emergence_thermal_time", self.emergence_thermal_time)?;
        positive(SET, "vegetative_thermal_time", self.vegetative_thermal_time)?;
        positive(SET, "reproductive_thermal_time", self.reproductive_thermal_time)?;
        positive(SET, "maturation1_thermal_time", self.maturation1_thermal_time)?;
        positive(SET, "maturation2_thermal_time", self.maturation2_thermal_time)?;

        non_negative(SET, "photoperiod_exponent", self.photoperiod_exponent)?;
        finite(SET, "critical_day_length", self.critical_day_length)?;
        finite(SET, "threshold_day_length", self.threshold_day_length)?;
        non_negative(SET, "photoperiod_sensitivity", self.photoperiod_sensitivity)?;
        if self.threshold_day_length <= self.critical_day_length {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!(
                    "threshold day length {} h must exceed critical day length {} h",
                    self.threshold_day_length, self.critical_day_length
                ),
            });
        }
        if self.mortality_stress_days == 0 {
            return Err(ConfigError::out_of_domain(
                SET,
                "mortality_stress_days",
                0.0,
                "must be at least 1",
            ));
        }

        self.root_growth.validate()?;

        positive(SET, "extinction_coefficient", self.extinction_coefficient)?;
        positive(SET, "max_crop_coefficient", self.max_crop_coefficient)?;
        unit_fraction(SET, "depletion_factor", self.depletion_factor)?;

        positive(SET, "conversion_efficiency", self.conversion_efficiency)?;
        non_negative(SET, "assimilation_vegetative", self.assimilation_vegetative)?;
        non_negative(SET, "assimilation_maturation1", self.assimilation_maturation1)?;
        non_negative(SET, "assimilation_maturation2", self.assimilation_maturation2)?;

        non_negative(SET, "maintenance_respiration_rate", self.maintenance_respiration_rate)?;
        finite(SET, "maintenance_temperature", self.maintenance_temperature)?;

        non_negative(SET, "seed_reserve_fraction", self.seed_reserve_fraction)?;
        positive(SET, "seed_dry_weight", self.seed_dry_weight)?;

        finite(SET, "aerial_fraction_slope", self.aerial_fraction_slope)?;
        unit_fraction(SET, "aerial_fraction_base", self.aerial_fraction_base)?;

        finite(SET, "leaf_fraction_slope", self.leaf_fraction_slope)?;
        finite(SET, "leaf_fraction_base", self.leaf_fraction_base)?;
        let (b, c) = self.leaf_allometry();
        if b.abs() < f64::EPSILON {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: "leaf_fraction_base = 0.1 makes the leaf allometry degenerate".to_string(),
            });
        }
        if !(c.is_finite() && c > 0.0) {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!("leaf allometry exponent base must be > 0, got {c}"),
            });
        }

        positive(SET, "sla_min", self.sla_min)?;
        positive(SET, "sla_max", self.sla_max)?;
        if self.sla_min > self.sla_max {
            return Err(ConfigError::Inconsistent {
                set: SET,
                reason: format!("sla_min {} exceeds sla_max {}", self.sla_min, self.sla_max),
            });
        }
        unit_fraction(SET, "sla_decay", self.sla_decay)?;

        finite(SET, "yield_slope", self.yield_slope)?;
        finite(SET, "yield_intercept", self.yield_intercept)?;
        finite(SET, "yield_biomass_coefficient", self.yield_biomass_coefficient)?;

        unit_fraction(SET, "reallocation_rate", self.reallocation_rate)?;
        unit_fraction(SET, "leaf_reallocation_share", self.leaf_reallocation_share)?;

        if let Some(density) = self.optimal_density {
            positive(SET, "optimal_density", density)?;
        }
        non_negative(SET, "density_response", self.density_response)?;

        if let Some(curve) = &self.intensification {
            curve.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(CultivarParams::sorghum().validate().is_ok());
        assert!(CultivarParams::millet().validate().is_ok());
        assert!(!CultivarParams::sorghum().is_indeterminate());
    }

    #[test]
    fn test_allometry_coefficients() {
        let (b, c) = CultivarParams::sorghum().leaf_allometry();
        assert!((b - 0.4).abs() < 1e-12);
        assert!((c - (0.78 - 0.25) / 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_allometry_rejected() {
        let cultivar = CultivarParams {
            leaf_fraction_base: 0.1,
            ..CultivarParams::sorghum()
        };
        assert!(matches!(
            cultivar.validate(),
            Err(ConfigError::Inconsistent { .. })
        ));

        let cultivar = CultivarParams {
            leaf_fraction_slope: -0.001,
            ..CultivarParams::sorghum()
        };
        assert!(cultivar.validate().is_err(), "negative cM must be rejected");
    }

    #[test]
    fn test_temperature_ordering_rejected() {
        let cultivar = CultivarParams {
            optimal_temperature_high: 25.0,
            ..CultivarParams::sorghum()
        };
        assert!(cultivar.validate().is_err());
    }

    #[test]
    fn test_intensification_override() {
        let curve = IntensificationResponse {
            intercept: 2.0,
            amplitude: 1.5,
            gauss_center: 0.0,
            gauss_width: 1.0,
        };
        let cultivar = CultivarParams {
            intensification: Some(curve),
            ..CultivarParams::sorghum()
        };
        assert_eq!(cultivar.effective_conversion(None), 3.5);

        let ni = 2.0;
        let expected = 2.0 + 1.5 * (1.0 - (-1.5f64 * ni).exp())
            - (-0.5f64 * ni * ni).exp() / 2.506_628_274_631;
        assert!((cultivar.effective_conversion(Some(ni)) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_root_growth_has_no_rate_outside_crop() {
        let rates = RootGrowthRates::default();
        assert_eq!(rates.for_phase(Phase::BareSoil), 0.0);
        assert_eq!(rates.for_phase(Phase::Harvest), 0.0);
        assert_eq!(rates.for_phase(Phase::Germination), 15.0);
    }
}
