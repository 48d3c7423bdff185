//! Radiation interception, assimilation and maintenance respiration

use crate::core_types::Phase;
use crate::params::{CellParams, CultivarParams, EPSILON};
use crate::state::{CarbonState, PhenologyState, WaterState};

/// Fraction of radiation transmitted through a canopy of leaf area `lai`
#[inline]
pub fn transmitted_fraction(lai: f64, extinction: f64) -> f64 {
    (-extinction * lai).exp()
}

/// Phase-dependent assimilation coefficient
///
/// Constant through the vegetative phases, then linear in thermal time
/// across each maturation phase.
pub fn assimilation_coefficient(phenology: &PhenologyState, cultivar: &CultivarParams) -> f64 {
    let progress = || {
        let span = (phenology.next_threshold - phenology.previous_threshold).max(EPSILON);
        ((phenology.thermal_time_sum - phenology.previous_threshold) / span).clamp(0.0, 1.0)
    };
    match phenology.phase {
        Phase::BasicVegetative => 1.0,
        Phase::PhotoperiodSensitive | Phase::Reproductive => cultivar.assimilation_vegetative,
        Phase::GrainFilling => {
            let from = cultivar.assimilation_vegetative;
            from + progress() * (cultivar.assimilation_maturation1 - from)
        }
        Phase::GrainDrying => {
            let from = cultivar.assimilation_maturation1;
            from + progress() * (cultivar.assimilation_maturation2 - from)
        }
        Phase::BareSoil | Phase::Germination | Phase::Harvest => 0.0,
    }
}

/// Maintenance respiration (kg/ha/day), doubling every 10 °C
pub fn maintenance_respiration(total: f64, leaf: f64, temperature: f64, cultivar: &CultivarParams) -> f64 {
    cultivar.maintenance_respiration_rate
        * (total + leaf)
        * 2f64.powf((temperature - cultivar.maintenance_temperature) / 10.0)
}

/// Canopy transmission and intercepted PAR.
pub(crate) fn intercept(carbon: &mut CarbonState, radiation: f64, cultivar: &CultivarParams) {
    carbon.transmitted_fraction = transmitted_fraction(carbon.lai, cultivar.extinction_coefficient);
    carbon.par = 0.5 * (1.0 - carbon.transmitted_fraction) * radiation;
}

/// Potential and water-limited assimilation.
pub(crate) fn assimilate(
    carbon: &mut CarbonState,
    phenology: &PhenologyState,
    water: &WaterState,
    params: &CellParams<'_>,
) {
    carbon.assimilation_coefficient = assimilation_coefficient(phenology, params.cultivar);
    carbon.conversion = carbon.assimilation_coefficient * params.conversion;
    carbon.assimilation_potential = carbon.par * carbon.conversion * 10.0;
    carbon.assimilation = if water.transpiration_potential > 0.0 {
        carbon.assimilation_potential * water.transpiration / water.transpiration_potential
    } else {
        0.0
    };
}

/// Maintenance respiration of the day; none once a post-flowering crop has
/// lost all its leaves.
pub(crate) fn respire(carbon: &mut CarbonState, phase: Phase, temperature: f64, cultivar: &CultivarParams) {
    carbon.respiration = if phase.is_post_flowering() && carbon.leaf == 0.0 {
        0.0
    } else {
        maintenance_respiration(carbon.total, carbon.leaf, temperature, cultivar)
    };
}
