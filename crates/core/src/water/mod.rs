//! Water-balance engine
//!
//! Daily sequence for one cell, in strict order:
//! 1. irrigation policy
//! 2. available water (rain + irrigation)
//! 3. mulch interception
//! 4. runoff
//! 5. root-zone growth
//! 6. reservoir filling, drainage and humectation front
//! 7. soil evaporation and mulch drying
//! 8. transpiration demand and drought stress
//! 9. consumption from the reservoirs
//!
//! Divisions by a reservoir capacity use [`MIN_CAPACITY`] as the floor;
//! stocks are clamped at 0.

pub mod consumption;
pub mod evapotranspiration;
pub mod intake;
pub mod irrigation;
pub mod reservoirs;

use crate::forcing::DailyForcing;
use crate::params::CellParams;
use crate::state::CellState;

/// Smallest capacity used as a divisor (mm)
pub const MIN_CAPACITY: f64 = 1e-3;

/// Run the water balance of one cell for one day.
///
/// Expects the phenology step and the root-growth rate update to have run.
/// Uses yesterday's leaf area for the canopy transmission and yesterday's
/// drought stress for root growth.
pub fn step(state: &mut CellState, forcing: &DailyForcing, params: &CellParams<'_>) {
    let phase = state.phenology.phase;
    let phase_changed = state.phenology.phase_changed;
    let root_growth_rate = state.carbon.root_growth_rate;
    let transmitted = (-params.cultivar.extinction_coefficient * state.carbon.lai).exp();
    let et0 = *forcing.et0;
    let mulch = &params.management.mulch;

    let water = &mut state.water;
    irrigation::apply(water, phase, &params.management.irrigation, *forcing.irrigation);
    intake::apply(water, *forcing.rain, params);
    reservoirs::grow_root_zone(water, phase, phase_changed, root_growth_rate, params);
    reservoirs::fill(water);
    evapotranspiration::evaporate(water, et0, transmitted, mulch);
    evapotranspiration::transpire(water, et0, transmitted, phase, params.cultivar);
    consumption::consume(water);
}
