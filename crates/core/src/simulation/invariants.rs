//! Per-cell state invariants
//!
//! Engines clamp locally, so a violation here means drift rather than a
//! fatal error. The orchestrator reports violations at `warn` level; tests
//! assert there are none.

use std::fmt;

use crate::core_types::Phase;
use crate::state::CellState;

/// Relative tolerance of the biomass partition check
const PARTITION_TOLERANCE: f64 = 1e-6;

/// Reservoir stocks may exceed capacity by this factor before drainage.
const STOCK_OVERSHOOT: f64 = 1.1;

/// One broken invariant
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// total != aerial + root
    BiomassPartition { total: f64, aerial: f64, root: f64 },
    /// Stock negative or above 1.1 x capacity
    ReservoirBounds {
        reservoir: &'static str,
        stock: f64,
        capacity: f64,
    },
    /// LAI or SLA non-zero with no leaf biomass
    LeafAreaWithoutLeaves { lai: f64, sla: f64 },
    /// Phase went backwards without passing through bare soil
    PhaseRegression { previous: Phase, current: Phase },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BiomassPartition { total, aerial, root } => {
                write!(f, "total biomass {total} != aerial {aerial} + root {root}")
            }
            Self::ReservoirBounds {
                reservoir,
                stock,
                capacity,
            } => write!(f, "{reservoir} stock {stock} outside [0, 1.1 x {capacity}]"),
            Self::LeafAreaWithoutLeaves { lai, sla } => {
                write!(f, "lai {lai} / sla {sla} with zero leaf biomass")
            }
            Self::PhaseRegression { previous, current } => {
                write!(f, "phase went from {previous:?} to {current:?}")
            }
        }
    }
}

/// Check one cell's state, optionally against its previous day.
pub fn check_invariants(state: &CellState, previous: Option<&CellState>) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let carbon = &state.carbon;

    let scale = carbon.total.abs().max(1.0);
    if (carbon.total - carbon.aerial - carbon.root).abs() > PARTITION_TOLERANCE * scale {
        violations.push(InvariantViolation::BiomassPartition {
            total: carbon.total,
            aerial: carbon.aerial,
            root: carbon.root,
        });
    }

    let water = &state.water;
    for (reservoir, stock, capacity) in [
        ("surface", water.surface_stock, water.surface_capacity),
        ("root", water.root_stock, water.root_capacity),
        ("profile", water.profile_stock, water.profile_capacity),
        ("mulch", water.mulch_stock, water.mulch_capacity),
    ] {
        // NaN from forcing gaps is not a bound violation
        if stock < 0.0 || stock > STOCK_OVERSHOOT * capacity + PARTITION_TOLERANCE {
            violations.push(InvariantViolation::ReservoirBounds {
                reservoir,
                stock,
                capacity,
            });
        }
    }

    if carbon.leaf == 0.0 && (carbon.lai != 0.0 || carbon.sla != 0.0) {
        violations.push(InvariantViolation::LeafAreaWithoutLeaves {
            lai: carbon.lai,
            sla: carbon.sla,
        });
    }

    if let Some(previous) = previous {
        let (before, after) = (previous.phenology.phase, state.phenology.phase);
        if after < before && after != Phase::BareSoil {
            violations.push(InvariantViolation::PhaseRegression {
                previous: before,
                current: after,
            });
        }
    }

    violations
}
