//! Shared fixtures for the integration tests
#![allow(dead_code)]

use crop_sim_core::{
    Celsius, DailyForcing, ForcingGrid, Hours, MegajoulesPerSquareMeter, Millimeters, Simulation,
    SimulationGrid, StateSeries,
};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Warm, wet-season day
pub fn day(rain: f64, temperature: f64) -> DailyForcing {
    DailyForcing {
        rain: Millimeters::new(rain),
        temperature: Celsius::new(temperature),
        radiation: MegajoulesPerSquareMeter::new(20.0),
        et0: Millimeters::new(5.0),
        day_length: Hours::new(12.5),
        irrigation: Millimeters::ZERO,
    }
}

/// Run `grid` over the same daily forcing on every cell.
pub fn run_uniform(grid: SimulationGrid, days: &[DailyForcing]) -> StateSeries {
    let forcing = ForcingGrid::uniform(grid.n_cells(), days);
    run(grid, forcing)
}

pub fn run(grid: SimulationGrid, forcing: ForcingGrid) -> StateSeries {
    let mut sim = Simulation::new(grid, forcing).expect("valid configuration");
    sim.run();
    sim.into_series()
}
