//! Soil evaporation, mulch drying and crop transpiration demand
//!
//! Both the soil and the crop coefficients are driven by the fraction of
//! radiation transmitted through the canopy (ltr) of the previous day's
//! leaf area. Mulch drying is driven by today's runoff (lr) instead, so a
//! day without runoff leaves the mulch stock untouched.

use crate::core_types::Phase;
use crate::params::{CultivarParams, Mulch};
use crate::state::WaterState;

use super::MIN_CAPACITY;

/// Soil evaporation coefficient under canopy and mulch
pub fn soil_evaporation_coefficient(transmitted: f64, mulch: &Mulch) -> f64 {
    mulch.evaporation_percent / 100.0
        * transmitted
        * (-mulch.cover_coefficient * mulch.specific_area * mulch.biomass / 1000.0).exp()
}

/// Crop transpiration coefficient; 0 without a crop
pub fn crop_coefficient(phase: Phase, transmitted: f64, cultivar: &CultivarParams) -> f64 {
    if phase.has_crop() {
        (cultivar.max_crop_coefficient * (1.0 - transmitted)).max(0.3)
    } else {
        0.0
    }
}

/// Soil-water depletion factor corrected for evaporative demand
pub fn depletion_factor(base: f64, kcp: f64, et0: f64) -> f64 {
    (base + 0.04 * (5.0 - kcp.max(1.0) * et0)).clamp(0.1, 0.8)
}

/// Step 7 of the water balance: soil evaporation and mulch drying.
pub(crate) fn evaporate(water: &mut WaterState, et0: f64, transmitted: f64, mulch: &Mulch) {
    water.fesw = water.surface_stock / (1.1 * water.surface_capacity).max(MIN_CAPACITY);
    water.kce = soil_evaporation_coefficient(transmitted, mulch);
    water.evaporation_potential = et0 * water.kce;

    if water.mulch_stock > 0.0 {
        let drying = mulch.saturation_capacity * mulch.biomass * 0.001 / water.mulch_stock;
        water.mulch_stock = (water.mulch_stock - water.runoff * et0 * drying * drying).max(0.0);
    }

    water.evaporation =
        (water.evaporation_potential * water.fesw * water.fesw).min(water.surface_stock);
}

/// Step 8 of the water balance: transpiration demand and drought stress.
pub(crate) fn transpire(
    water: &mut WaterState,
    et0: f64,
    transmitted: f64,
    phase: Phase,
    cultivar: &CultivarParams,
) {
    water.ftsw = if water.root_capacity > 0.0 {
        water.root_stock / water.root_capacity
    } else {
        0.0
    };
    water.kcp = crop_coefficient(phase, transmitted, cultivar);
    water.transpiration_potential = water.kcp * et0;
    water.depletion = depletion_factor(cultivar.depletion_factor, water.kcp, et0);
    water.stress = (water.ftsw / (1.0 - water.depletion)).clamp(0.0, 1.0);
    water.transpiration = water.transpiration_potential * water.stress;

    water.kc_total = water.kcp + water.kce;
    water.etm = water.transpiration_potential + water.evaporation_potential;
}
