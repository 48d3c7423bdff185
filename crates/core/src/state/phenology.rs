use serde::{Deserialize, Serialize};

use crate::core_types::Phase;

/// Harvest outcome of a completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecord {
    /// Simulation day on which phase 7 was reached
    pub day: usize,
    /// Grain yield (kg/ha)
    pub grain_yield: f64,
    /// Total biomass at harvest (kg/ha)
    pub total_biomass: f64,
}

/// Phase machine state of one cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhenologyState {
    pub phase: Phase,
    /// Phase changed today (day-scoped)
    pub phase_changed: bool,
    /// Thermal time gained today (ddj, °Cd)
    pub daily_thermal_time: f64,
    /// Thermal time since sowing (sdj, °Cd)
    pub thermal_time_sum: f64,
    /// Cumulative thermal time ending the current phase
    pub next_threshold: f64,
    /// Threshold that ended the previous phase
    pub previous_threshold: f64,
    /// Photoperiod phase still running (phase 3 only)
    pub photoperiod_active: bool,
    pub photoperiod_score: f64,
    /// Days elapsed since emergence, for the mortality window
    pub days_since_emergence: u32,
    /// Consecutive days of shrinking aerial biomass
    pub stress_days: u32,
    /// First day at which sowing may occur
    pub sowing_day: usize,
    /// Day the current crop was sown, if any
    pub sown_on: Option<usize>,
    /// Completed cycles (harvests)
    pub cycles_completed: u32,
    pub last_harvest: Option<HarvestRecord>,
}

impl PhenologyState {
    pub fn new(sowing_day: usize) -> Self {
        PhenologyState {
            sowing_day,
            ..Self::default()
        }
    }
}
