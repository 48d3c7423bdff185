//! Photoperiod response of the photoperiod-sensitive phase
//!
//! The phase ends once the day-length signal, damped by the thermal time
//! already spent in the phase, falls below the cultivar sensitivity.

use crate::params::{CultivarParams, EPSILON};
use crate::state::PhenologyState;

const MIN_SPAN: f64 = 0.01;

/// `(100 / Δsdj)^PPExp · (dayLength − PPCrit) / (SeuilPP − PPCrit)`
pub fn photoperiod_score(
    thermal_time_in_phase: f64,
    day_length: f64,
    cultivar: &CultivarParams,
) -> f64 {
    let elapsed = thermal_time_in_phase.max(MIN_SPAN);
    let excess = (day_length - cultivar.critical_day_length).max(MIN_SPAN);
    let span = (cultivar.threshold_day_length - cultivar.critical_day_length).max(EPSILON);
    (100.0 / elapsed).powf(cultivar.photoperiod_exponent) * excess / span
}

/// Recompute the score and clear the photoperiod flag when it drops below
/// the cultivar sensitivity. Only acts while the flag is set.
pub(crate) fn update(phenology: &mut PhenologyState, day_length: f64, cultivar: &CultivarParams) {
    if !phenology.photoperiod_active {
        return;
    }
    let score = photoperiod_score(
        phenology.thermal_time_sum - phenology.previous_threshold,
        day_length,
        cultivar,
    );
    phenology.photoperiod_score = score;
    if score < cultivar.photoperiod_sensitivity {
        phenology.photoperiod_active = false;
    }
}
