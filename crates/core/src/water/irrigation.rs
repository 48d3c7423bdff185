//! Irrigation policy
//!
//! The policy watches the larger of the surface and root-zone reservoirs
//! and refills it to 90% of its deficit when its filling drops below the
//! target, net of the irrigation already scheduled for the day.

use crate::core_types::Phase;
use crate::params::IrrigationPolicy;
use crate::state::WaterState;

use super::MIN_CAPACITY;

/// Reservoir watched by the policy: `(capacity, stock)`
pub fn target_reservoir(water: &WaterState) -> (f64, f64) {
    let capacity = water.surface_capacity.max(water.root_capacity);
    let stock = if water.root_capacity < water.surface_capacity {
        water.surface_stock
    } else {
        water.root_stock
    };
    (capacity, stock)
}

/// Automatic irrigation amount (mm) for a reservoir
///
/// `min(max(0, 0.9·(capacity − stock) − scheduled), maxIrrig)` when the
/// filling fraction is below the target, 0 otherwise.
pub fn automatic_amount(capacity: f64, stock: f64, scheduled: f64, policy: &IrrigationPolicy) -> f64 {
    if stock / capacity.max(MIN_CAPACITY) < policy.target_fraction {
        (0.9 * (capacity - stock) - scheduled)
            .max(0.0)
            .min(policy.max_daily)
    } else {
        0.0
    }
}

/// Step 1 of the water balance: today's irrigation.
pub(crate) fn apply(water: &mut WaterState, phase: Phase, policy: &IrrigationPolicy, scheduled: f64) {
    let (capacity, stock) = target_reservoir(water);
    water.irrigation_capacity = capacity;
    water.irrigation_stock = stock;

    let in_season = !matches!(phase, Phase::BareSoil | Phase::GrainDrying | Phase::Harvest);
    let automatic = if policy.automatic && in_season {
        automatic_amount(capacity, stock, scheduled, policy)
    } else {
        0.0
    };

    water.irrigation = scheduled + automatic;
    water.cumulative_irrigation += water.irrigation;
}
