//! Root-zone growth and reservoir filling
//!
//! Three nested reservoirs share the soil water: the surface layer (which
//! may hold up to 110% of its capacity), the root zone (growing with the
//! root front) and the whole profile. The first tenth of the surface
//! reservoir is not transpirable.

use crate::core_types::Phase;
use crate::params::CellParams;
use crate::state::WaterState;

use super::MIN_CAPACITY;

/// Root stock while roots are shallower than the surface reservoir:
/// the transpirable part of the surface stock, scaled to the root share.
pub fn root_stock_within_surface(surface_stock: f64, surface_capacity: f64, root_capacity: f64) -> f64 {
    ((surface_stock - surface_capacity / 10.0) * root_capacity / surface_capacity.max(MIN_CAPACITY))
        .max(0.0)
}

/// Step 5 of the water balance: root-zone capacity growth.
///
/// # Arguments
/// * `water` - Water state, `stress` still holds yesterday's value
/// * `phase` - Today's phase after the phenology step
/// * `phase_changed` - Phase changed today
/// * `root_growth_rate` - Root front elongation speed (mm/day)
pub(crate) fn grow_root_zone(
    water: &mut WaterState,
    phase: Phase,
    phase_changed: bool,
    root_growth_rate: f64,
    params: &CellParams<'_>,
) {
    water.root_growth = 0.0;
    if phase == Phase::BareSoil {
        return;
    }
    let ru = params.soil.water_holding_capacity;

    if phase == Phase::Germination && phase_changed {
        water.root_capacity = params.management.initial_root_depth / 1000.0 * ru;
        return;
    }

    let deep_roots = water.root_capacity > water.surface_capacity;
    let growth = if deep_roots {
        let potential = root_growth_rate / 1000.0 * ru * (water.stress + 0.3).min(1.0);
        potential.min((water.humectation_front - water.root_capacity).max(0.0))
    } else {
        root_growth_rate / 1000.0 * ru
    };

    water.root_growth = growth;
    water.root_capacity += growth;

    water.root_stock = if water.root_capacity > water.surface_capacity {
        water.root_stock + growth
    } else {
        root_stock_within_surface(water.surface_stock, water.surface_capacity, water.root_capacity)
    };
}

/// Step 6 of the water balance: fill the reservoirs with today's water.
pub(crate) fn fill(water: &mut WaterState) {
    let available = water.available_water;
    let tenth = water.surface_capacity / 10.0;
    let previous_surface = water.surface_stock;

    water.surface_stock = (water.surface_stock + available).min(1.1 * water.surface_capacity);

    let intake = if previous_surface < tenth {
        (available - (tenth - previous_surface)).max(0.0)
    } else {
        available
    };

    let profile = water.profile_stock + intake;
    water.drainage = (profile - water.profile_capacity).max(0.0);
    water.profile_stock = profile.min(water.profile_capacity);
    water.humectation_front = water.humectation_front.max(water.profile_stock);

    let root = if water.root_capacity <= water.surface_capacity {
        root_stock_within_surface(water.surface_stock, water.surface_capacity, water.root_capacity)
    } else {
        (water.root_stock + intake).min(water.root_capacity)
    };
    water.root_stock = root.min(water.profile_stock);
}
