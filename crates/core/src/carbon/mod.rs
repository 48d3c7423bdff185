//! Carbon-balance engine
//!
//! Intercepted radiation, limited by the day's transpiration ratio, becomes
//! assimilated biomass. Net of maintenance respiration it accumulates into
//! total biomass, which is split into root and aerial pools, the aerial
//! pool into leaves and stems, and after flowering into grain with leaf and
//! stem reserves reallocated to cover the grain demand.
//!
//! Two entry points run each day: [`update_root_growth_rate`] right after
//! phenology (the water engine needs the root front speed the same day),
//! and [`step`] after the water balance.

pub mod assimilation;
pub mod biomass;
pub mod density;
pub mod grain;
pub mod leaf_area;

use crate::forcing::DailyForcing;
use crate::params::CellParams;
use crate::state::CellState;

/// Set today's root front elongation speed from the phase.
pub fn update_root_growth_rate(state: &mut CellState, params: &CellParams<'_>) {
    state.carbon.root_growth_rate = params.cultivar.root_growth.for_phase(state.phenology.phase);
}

/// Run the carbon balance of one cell for one day.
pub fn step(state: &mut CellState, forcing: &DailyForcing, params: &CellParams<'_>) {
    let cultivar = params.cultivar;
    let phase = state.phenology.phase;
    let phase_changed = state.phenology.phase_changed;
    let ddj = state.phenology.daily_thermal_time;
    let k = params.density_factor;

    let carbon = &mut state.carbon;
    carbon.density_factor = k;
    density::rescale(carbon, k);

    assimilation::intercept(carbon, *forcing.radiation, cultivar);
    assimilation::assimilate(carbon, &state.phenology, &state.water, params);
    assimilation::respire(carbon, phase, *forcing.temperature, cultivar);

    biomass::update_total(carbon, phase, phase_changed, params);
    grain::mark_stages(carbon, phase, phase_changed, cultivar);
    grain::demand(carbon, phase, ddj, &state.water, cultivar);
    biomass::partition_aerial(carbon, phase, params);
    grain::reallocate(carbon, phase, cultivar);
    leaf_area::partition_leaf_stem(carbon, phase, params);
    leaf_area::update_leaf_area(carbon, phase, cultivar);
    grain::fill(carbon, phase);

    density::rescale(carbon, 1.0 / k);
}
