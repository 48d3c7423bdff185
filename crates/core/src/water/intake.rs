//! Water reaching the soil: mulch interception and runoff
//!
//! These are pure functions so the phenology engine can evaluate the same
//! intake when it tests the sowing condition, before the water balance of
//! the day has run.

use crate::forcing::DailyForcing;
use crate::params::{CellParams, Mulch, SoilParams};
use crate::state::WaterState;

/// Water captured by the mulch (mm), limited by its remaining capacity
pub fn mulch_capture(available: f64, mulch: &Mulch, mulch_stock: f64) -> f64 {
    let cover = 1.0 - (-mulch.specific_area * mulch.biomass / 1000.0).exp();
    (available * cover).min(mulch.capacity() - mulch_stock).max(0.0)
}

/// Runoff (mm) when rainfall exceeds the soil threshold
pub fn runoff(rain: f64, available: f64, soil: &SoilParams) -> f64 {
    if rain > soil.runoff_threshold {
        ((available - soil.runoff_threshold) * soil.runoff_fraction).max(0.0)
    } else {
        0.0
    }
}

/// Surface stock after today's rain and scheduled irrigation, without
/// automatic irrigation and before any consumption
pub fn prospective_surface_stock(water: &WaterState, forcing: &DailyForcing, params: &CellParams<'_>) -> f64 {
    let rain = *forcing.rain;
    let mut available = rain + *forcing.irrigation;
    available -= mulch_capture(available, &params.management.mulch, water.mulch_stock);
    available -= runoff(rain, available, params.soil);
    (water.surface_stock + available).min(1.1 * water.surface_capacity)
}

/// Steps 2-4 of the water balance: available water, mulch, runoff.
pub(crate) fn apply(water: &mut WaterState, rain: f64, params: &CellParams<'_>) {
    let mut available = rain + water.irrigation;

    let captured = mulch_capture(available, &params.management.mulch, water.mulch_stock);
    available -= captured;
    water.mulch_capture = captured;
    water.mulch_stock += captured;

    let lost = runoff(rain, available, params.soil);
    available -= lost;
    water.runoff = lost;

    water.available_water = available;
}
