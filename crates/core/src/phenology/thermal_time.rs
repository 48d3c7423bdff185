//! Daily thermal time
//!
//! Linear increase from the base temperature to the lower optimum, plateau
//! up to the upper optimum, linear decrease to zero at the lethal
//! temperature.

use crate::core_types::units::{Celsius, DegreeDays};
use crate::params::{CultivarParams, EPSILON};

/// Degree-days gained on a day of mean temperature `temperature`
pub fn daily_thermal_time(temperature: Celsius, cultivar: &CultivarParams) -> DegreeDays {
    let temperature = *temperature;
    let t_base = cultivar.base_temperature;
    let t_opt1 = cultivar.optimal_temperature_low;
    let t_opt2 = cultivar.optimal_temperature_high;
    let t_lim = cultivar.lethal_temperature;

    let ddj = if temperature <= t_opt2 {
        temperature.min(t_opt1).max(t_base) - t_base
    } else {
        let decline = (temperature.min(t_lim) - t_opt2) / (t_lim - t_opt2).max(EPSILON);
        (t_opt1 - t_base) * (1.0 - decline)
    };
    DegreeDays::new(ddj)
}
