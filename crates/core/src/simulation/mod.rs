//! Daily orchestrator
//!
//! [`Simulation`] owns the grid, the forcing and the state series. Each day
//! every cell is carried forward from its previous state and run through the
//! engines in a fixed order:
//!
//! 1. Phenology (phase transitions, resets)
//! 2. Carbon root-growth rate (needed by the water balance the same day)
//! 3. Water balance
//! 4. Carbon balance
//!
//! Cells never read each other's state, so a day is a parallel map over the
//! grid. Collecting the map is the day barrier.

pub mod grid;
pub mod invariants;
pub mod output;
pub mod summary;

pub use grid::{CellSetup, SimulationGrid};
pub use invariants::{check_invariants, InvariantViolation};
pub use output::{OutputVariable, UnknownVariable};
pub use summary::SeasonSummary;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::forcing::{DailyForcing, ForcingGrid};
use crate::params::CellParams;
use crate::state::{CellState, StateSeries};
use crate::{carbon, phenology, water};

/// Run one cell through one day.
///
/// # Arguments
/// * `previous` - The cell's state at the end of the previous day
/// * `forcing` - Today's weather of the cell
/// * `params` - Static parameters of the cell
/// * `day` - Simulation day index
///
/// # Returns
/// The cell's state at the end of `day`
pub fn step_cell(previous: &CellState, forcing: &DailyForcing, params: &CellParams<'_>, day: usize) -> CellState {
    let mut state = previous.carry_forward();
    phenology::step(&mut state, forcing, params, day);
    carbon::update_root_growth_rate(&mut state, params);
    water::step(&mut state, forcing, params);
    carbon::step(&mut state, forcing, params);
    state
}

/// Grid simulation over the forcing period
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: SimulationGrid,
    forcing: ForcingGrid,
    initial: Vec<CellState>,
    series: StateSeries,
}

impl Simulation {
    /// Validate the configuration and build the initial cell states.
    ///
    /// # Errors
    /// Any out-of-domain parameter, dangling parameter-set index, or forcing
    /// whose cell count does not match the grid.
    pub fn new(grid: SimulationGrid, forcing: ForcingGrid) -> Result<Self, ConfigError> {
        grid.validate()?;
        if forcing.n_cells() != grid.n_cells() {
            return Err(ConfigError::ForcingShape {
                variable: "cells",
                actual: forcing.n_cells(),
                expected: grid.n_cells(),
            });
        }

        let initial: Vec<CellState> = (0..grid.n_cells())
            .map(|cell| CellState::new(&grid.cell_params(cell)))
            .collect();

        info!(
            "Crop simulation initialized: {}x{} grid, {} days, {} soils, {} cultivars, {} management plans",
            grid.width,
            grid.height,
            forcing.n_days(),
            grid.soils.len(),
            grid.cultivars.len(),
            grid.managements.len()
        );

        Ok(Simulation {
            grid,
            forcing,
            initial,
            series: StateSeries::new(),
        })
    }

    pub fn grid(&self) -> &SimulationGrid {
        &self.grid
    }

    pub fn forcing(&self) -> &ForcingGrid {
        &self.forcing
    }

    /// Next day to simulate
    pub fn current_day(&self) -> usize {
        self.series.n_days()
    }

    pub fn is_finished(&self) -> bool {
        self.current_day() >= self.forcing.n_days()
    }

    /// Simulate one day for every cell.
    ///
    /// # Returns
    /// `false` once the forcing period is exhausted
    pub fn step_day(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        let day = self.current_day();

        let gaps = self.forcing.gap_count(day);
        if gaps > 0 {
            warn!(day, cells = gaps, "forcing gaps, affected cells propagate NaN");
        }

        let previous = self.series.last().unwrap_or(self.initial.as_slice());
        let grid = &self.grid;
        let forcing = &self.forcing;

        let today: Vec<CellState> = previous
            .par_iter()
            .enumerate()
            .map(|(cell, state)| step_cell(state, &forcing.get(day, cell), &grid.cell_params(cell), day))
            .collect();

        let drift: Vec<(usize, InvariantViolation)> = today
            .par_iter()
            .zip(previous.par_iter())
            .enumerate()
            .flat_map_iter(|(cell, (state, before))| {
                check_invariants(state, Some(before))
                    .into_iter()
                    .map(move |violation| (cell, violation))
            })
            .collect();
        if let Some((cell, violation)) = drift.first() {
            warn!(day, cell, violations = drift.len(), "invariant drift: {}", violation);
        }

        debug!(
            day,
            cropped = today.iter().filter(|s| s.phenology.phase.has_crop()).count(),
            "day complete"
        );

        self.series.push(today);
        true
    }

    /// Simulate every remaining day of the forcing period.
    pub fn run(&mut self) -> &StateSeries {
        while self.step_day() {}

        let harvests: u32 = self
            .series
            .last()
            .map_or(0, |cells| cells.iter().map(|s| s.phenology.cycles_completed).sum());
        info!(
            "Crop simulation finished: {} days, {} cells, {} harvests",
            self.series.n_days(),
            self.grid.n_cells(),
            harvests
        );
        &self.series
    }

    /// Daily states so far
    pub fn series(&self) -> &StateSeries {
        &self.series
    }

    /// Hand over the state series.
    pub fn into_series(self) -> StateSeries {
        self.series
    }

    /// Season summary of every cell
    pub fn summaries(&self) -> Vec<SeasonSummary> {
        (0..self.grid.n_cells())
            .into_par_iter()
            .map(|cell| SeasonSummary::from_series(&self.series, &self.forcing, cell))
            .collect()
    }
}
