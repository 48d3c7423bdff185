//! Sowing-density correction
//!
//! The carbon step works in a basis normalised to the cultivar's optimal
//! density: pools and leaf area are multiplied by the density factor before
//! the step and divided by it afterwards.

use crate::state::CarbonState;

/// Multiply every density-dependent pool, flux and the leaf area by `factor`.
pub(crate) fn rescale(carbon: &mut CarbonState, factor: f64) {
    if factor == 1.0 {
        return;
    }
    for value in [
        &mut carbon.assimilation_potential,
        &mut carbon.assimilation,
        &mut carbon.respiration,
        &mut carbon.total,
        &mut carbon.aerial,
        &mut carbon.root,
        &mut carbon.leaf,
        &mut carbon.stem,
        &mut carbon.vegetative,
        &mut carbon.grain_yield,
        &mut carbon.delta_total,
        &mut carbon.delta_aerial,
        &mut carbon.new_leaf,
        &mut carbon.yield_potential,
        &mut carbon.yield_potential_increment,
        &mut carbon.shortfall,
        &mut carbon.reallocation,
        &mut carbon.lai,
        &mut carbon.biomass_at_initiation,
        &mut carbon.biomass_at_flowering,
    ] {
        *value *= factor;
    }
}
