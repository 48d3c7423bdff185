//! Juvenile mortality
//!
//! A young crop whose aerial biomass shrinks for several consecutive days
//! inside the observation window after emergence is declared dead.

use crate::state::PhenologyState;

/// Update the counters from yesterday's aerial biomass change and report
/// whether the crop dies today.
pub(crate) fn crop_dies(
    phenology: &mut PhenologyState,
    delta_aerial: f64,
    window_days: u32,
    threshold_days: u32,
) -> bool {
    if !phenology.phase.is_emerged() {
        return false;
    }
    phenology.days_since_emergence += 1;
    if phenology.days_since_emergence < window_days {
        if delta_aerial < 0.0 {
            phenology.stress_days += 1;
        } else {
            phenology.stress_days = 0;
        }
    }
    phenology.stress_days >= threshold_days
}
