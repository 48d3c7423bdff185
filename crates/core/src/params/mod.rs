//! Static per-cell parameter sets
//!
//! Parameter sets are plain serde structs so an external loader can build
//! them from YAML or JSON. A grid holds tables of sets and every cell
//! references one soil, one cultivar and one management entry by index
//! so large grids share a handful of sets.
//!
//! [`CellParams`] bundles a cell's three sets with the coefficients derived
//! from them once at start-up (conversion efficiency, leaf allometry, density
//! correction) so the daily engines never recompute them.

pub mod cultivar;
pub mod management;
pub mod soil;

pub use cultivar::{CultivarParams, IntensificationResponse, RootGrowthRates};
pub use management::{IrrigationPolicy, ManagementParams, Mulch};
pub use soil::SoilParams;

/// Smallest value used for divisors that can legitimately reach zero
pub(crate) const EPSILON: f64 = 1e-10;

/// Parameters of one cell plus the coefficients derived from them
#[derive(Debug, Clone, Copy)]
pub struct CellParams<'a> {
    pub soil: &'a SoilParams,
    pub cultivar: &'a CultivarParams,
    pub management: &'a ManagementParams,
    /// Conversion efficiency after the intensification override
    pub conversion: f64,
    /// Leaf allometry `bM`
    pub leaf_allometry_b: f64,
    /// Leaf allometry `cM`
    pub leaf_allometry_c: f64,
    /// Sowing-density correction factor `k`
    pub density_factor: f64,
}

impl<'a> CellParams<'a> {
    /// Resolve derived coefficients. The sets must already be validated.
    pub fn new(
        soil: &'a SoilParams,
        cultivar: &'a CultivarParams,
        management: &'a ManagementParams,
    ) -> Self {
        let (leaf_allometry_b, leaf_allometry_c) = cultivar.leaf_allometry();
        CellParams {
            soil,
            cultivar,
            management,
            conversion: cultivar.effective_conversion(management.intensification_index),
            leaf_allometry_b,
            leaf_allometry_c,
            density_factor: density_factor(cultivar, management),
        }
    }
}

/// `k = max(ε, 1 + response·(densOpt/density − 1))`, 1 without an optimal density
pub fn density_factor(cultivar: &CultivarParams, management: &ManagementParams) -> f64 {
    match cultivar.optimal_density {
        Some(optimal) => {
            let ratio = optimal / management.density.max(EPSILON);
            (1.0 + cultivar.density_response * (ratio - 1.0)).max(EPSILON)
        }
        None => 1.0,
    }
}
