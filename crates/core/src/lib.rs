//! Crop Simulation Core Library
//!
//! Day-stepped simulation of a cereal crop (sorghum, millet) over a grid of
//! independent cells, following the SARRA family of models.
//!
//! ## Engines
//!
//! Each day, every cell runs through:
//! - **Phenology**: thermal time, photoperiod sensitivity, phase transitions,
//!   juvenile mortality and harvest rollover
//! - **Water balance**: irrigation, mulch interception, runoff, surface /
//!   root-zone / profile reservoirs, evaporation, transpiration and the
//!   drought-stress coefficient
//! - **Carbon balance**: radiation interception, assimilation, respiration,
//!   biomass partitioning, leaf area and grain filling
//!
//! [`Simulation`] drives the engines over the grid in parallel and keeps
//! the full daily [`StateSeries`].

// Core types and utilities
pub mod core_types;
pub mod error;

// Inputs
pub mod forcing;
pub mod params;

// Per-cell state and engines
pub mod carbon;
pub mod phenology;
pub mod state;
pub mod water;

// Orchestration and outputs
pub mod simulation;

// Re-export core types
pub use core_types::{Celsius, DegreeDays, Hours, MegajoulesPerSquareMeter, Millimeters, Phase};
pub use error::ConfigError;

// Re-export inputs
pub use forcing::{DailyForcing, ForcingGrid, ForcingSeries, SyntheticWeather};
pub use params::{
    CellParams, CultivarParams, IntensificationResponse, IrrigationPolicy, ManagementParams, Mulch,
    RootGrowthRates, SoilParams,
};

// Re-export state and orchestration
pub use simulation::{
    check_invariants, step_cell, CellSetup, InvariantViolation, OutputVariable, SeasonSummary,
    Simulation, SimulationGrid,
};
pub use state::{CarbonState, CellState, HarvestRecord, PhenologyState, StateSeries, WaterState};
