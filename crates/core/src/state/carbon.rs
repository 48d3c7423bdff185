use serde::{Deserialize, Serialize};

/// Biomass pools and daily carbon fluxes of one cell (kg/ha unless noted)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CarbonState {
    /// Fraction of radiation transmitted through the canopy (ltr)
    pub transmitted_fraction: f64,
    /// Intercepted photosynthetically active radiation (MJ/m²)
    pub par: f64,
    pub assimilation_coefficient: f64,
    /// Conversion efficiency applied today (g/MJ)
    pub conversion: f64,
    pub assimilation_potential: f64,
    pub assimilation: f64,
    pub respiration: f64,

    pub total: f64,
    pub aerial: f64,
    pub root: f64,
    pub leaf: f64,
    pub stem: f64,
    pub vegetative: f64,
    pub grain_yield: f64,

    pub delta_total: f64,
    /// Change of aerial biomass, read by the next day's mortality test
    pub delta_aerial: f64,
    pub new_leaf: f64,

    pub yield_potential: f64,
    pub yield_potential_increment: f64,
    /// Assimilates missing to meet the grain demand
    pub shortfall: f64,
    pub reallocation: f64,

    /// Specific leaf area (ha/kg)
    pub sla: f64,
    pub lai: f64,

    /// Total biomass at panicle initiation (entry to phase 4)
    pub biomass_at_initiation: f64,
    /// Total biomass at flowering (entry to phase 5)
    pub biomass_at_flowering: f64,

    /// Root front elongation speed today (mm/day)
    pub root_growth_rate: f64,
    pub density_factor: f64,
}

impl CarbonState {
    /// Zero the day-scoped fluxes, keep pools.
    pub(crate) fn clear_fluxes(&mut self) {
        self.par = 0.0;
        self.assimilation_potential = 0.0;
        self.assimilation = 0.0;
        self.respiration = 0.0;
        self.delta_total = 0.0;
        self.new_leaf = 0.0;
        self.yield_potential_increment = 0.0;
        self.shortfall = 0.0;
        self.reallocation = 0.0;
    }

    /// Empty every pool and flux, keeping the density factor.
    pub(crate) fn clear(&mut self) {
        *self = CarbonState {
            density_factor: self.density_factor,
            ..CarbonState::default()
        };
    }
}
