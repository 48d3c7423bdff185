//! Per-cell season summaries

use serde::{Deserialize, Serialize};

use crate::core_types::Phase;
use crate::forcing::ForcingGrid;
use crate::state::{HarvestRecord, StateSeries};

/// Totals and harvests of one cell over the simulated period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub cell: usize,
    /// Every completed harvest, in order
    pub harvests: Vec<HarvestRecord>,
    /// Day on which the first sowing happened, if any
    pub first_sowing: Option<usize>,
    pub peak_lai: f64,
    pub rain: f64,
    pub irrigation: f64,
    pub runoff: f64,
    pub drainage: f64,
    pub transpiration: f64,
    pub evaporation: f64,
    /// Days the phenology was reset by juvenile mortality
    pub mortality_resets: u32,
}

impl SeasonSummary {
    /// Fold the daily states of `cell`.
    ///
    /// Rain comes from the forcing since the state only keeps what reached
    /// the soil. Gap days contribute NaN to the sums that depend on them.
    pub fn from_series(states: &StateSeries, forcing: &ForcingGrid, cell: usize) -> Self {
        let mut summary = SeasonSummary {
            cell,
            ..SeasonSummary::default()
        };
        let mut previous_phase = Phase::BareSoil;

        for (day, state) in states.cell(cell).enumerate() {
            let (phenology, water) = (&state.phenology, &state.water);

            if phenology.phase == Phase::Harvest && phenology.phase_changed {
                if let Some(record) = phenology.last_harvest {
                    summary.harvests.push(record);
                }
            }
            if summary.first_sowing.is_none() {
                summary.first_sowing = phenology.sown_on;
            }
            if phenology.phase == Phase::BareSoil && previous_phase.has_crop() {
                summary.mortality_resets += 1;
            }
            previous_phase = phenology.phase;

            summary.peak_lai = summary.peak_lai.max(state.carbon.lai);
            if day < forcing.n_days() {
                summary.rain += forcing.get(day, cell).rain.value();
            }
            summary.irrigation += water.irrigation;
            summary.runoff += water.runoff;
            summary.drainage += water.drainage;
            summary.transpiration += water.transpiration;
            summary.evaporation += water.evaporation;
        }
        summary
    }

    /// Grain yield of the last harvest, 0 if none
    pub fn last_yield(&self) -> f64 {
        self.harvests.last().map_or(0.0, |h| h.grain_yield)
    }
}
