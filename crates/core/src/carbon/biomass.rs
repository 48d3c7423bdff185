//! Total biomass and its aerial/root partition

use crate::core_types::Phase;
use crate::params::CellParams;
use crate::state::CarbonState;

/// Seed reserve at emergence (kg/ha)
pub fn seed_reserve(params: &CellParams<'_>) -> f64 {
    params.management.density * params.cultivar.seed_reserve_fraction * params.cultivar.seed_dry_weight
        / 1000.0
}

/// Update total biomass from the day's net assimilation.
///
/// On the emergence day the pool starts from the seed reserve, expressed in
/// the density-corrected basis the carbon step works in.
pub(crate) fn update_total(carbon: &mut CarbonState, phase: Phase, phase_changed: bool, params: &CellParams<'_>) {
    let previous = carbon.total;
    carbon.total = if phase == Phase::BasicVegetative && phase_changed {
        seed_reserve(params) * params.density_factor
    } else {
        (carbon.total + carbon.assimilation - carbon.respiration).max(0.0)
    };
    carbon.delta_total = carbon.total - previous;
}

/// Split total biomass into aerial and root pools.
pub(crate) fn partition_aerial(carbon: &mut CarbonState, phase: Phase, params: &CellParams<'_>) {
    let cultivar = params.cultivar;
    let previous = carbon.aerial;

    let aerial = if phase.is_allometric() {
        let fraction = (cultivar.aerial_fraction_slope * carbon.total + cultivar.aerial_fraction_base).min(0.9);
        fraction * carbon.total
    } else if phase.is_post_flowering() {
        carbon.aerial + carbon.delta_total
    } else {
        0.0
    };

    carbon.aerial = aerial.clamp(0.0, carbon.total);
    carbon.root = carbon.total - carbon.aerial;
    carbon.delta_aerial = carbon.aerial - previous;
}
