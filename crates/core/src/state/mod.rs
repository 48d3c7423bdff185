//! Typed per-cell state and its daily series
//!
//! A [`CellState`] is one day's snapshot of a cell. Day *n* starts as
//! `carry_forward()` of day *n − 1*: persistent pools, stocks and counters
//! are copied and day-scoped fluxes are zeroed, so an engine that skips a
//! branch leaves a clean zero instead of yesterday's value.

pub mod carbon;
pub mod phenology;
pub mod water;

pub use carbon::CarbonState;
pub use phenology::{HarvestRecord, PhenologyState};
pub use water::WaterState;

use serde::{Deserialize, Serialize};

use crate::params::CellParams;

/// State of one grid cell on one day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellState {
    pub phenology: PhenologyState,
    pub water: WaterState,
    pub carbon: CarbonState,
}

impl CellState {
    /// Initial state from static parameters: capacities and initial stocks
    /// from the soil, everything dynamic at zero.
    pub fn new(params: &CellParams<'_>) -> Self {
        let soil = params.soil;
        let surface_capacity = soil.surface_capacity();
        let profile_capacity = soil.profile_capacity();
        let profile_stock = soil.initial_profile_stock.min(profile_capacity);

        CellState {
            phenology: PhenologyState::new(params.management.sowing_day),
            water: WaterState {
                surface_capacity,
                profile_capacity,
                mulch_capacity: params.management.mulch.capacity(),
                surface_stock: soil.initial_surface_stock.min(1.1 * surface_capacity),
                profile_stock,
                humectation_front: profile_stock,
                stress: 1.0,
                ..WaterState::default()
            },
            carbon: CarbonState {
                transmitted_fraction: 1.0,
                density_factor: params.density_factor,
                ..CarbonState::default()
            },
        }
    }

    /// Copy of this state to start the next day from
    pub fn carry_forward(&self) -> Self {
        let mut next = self.clone();
        next.phenology.phase_changed = false;
        next.phenology.daily_thermal_time = 0.0;
        next.water.clear_fluxes();
        next.carbon.clear_fluxes();
        next
    }
}

/// Append-only series of daily grid snapshots, indexed `[day][cell]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSeries {
    days: Vec<Vec<CellState>>,
}

impl StateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, day: Vec<CellState>) {
        self.days.push(day);
    }

    /// Number of simulated days
    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Snapshot of every cell on `day`
    pub fn day(&self, day: usize) -> Option<&[CellState]> {
        self.days.get(day).map(Vec::as_slice)
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&[CellState]> {
        self.days.last().map(Vec::as_slice)
    }

    /// Daily states of one cell
    pub fn cell(&self, cell: usize) -> impl Iterator<Item = &CellState> + '_ {
        self.days.iter().filter_map(move |day| day.get(cell))
    }

    /// All snapshots, day by day
    pub fn iter(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.days.iter().map(Vec::as_slice)
    }
}
