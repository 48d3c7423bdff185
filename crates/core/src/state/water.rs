use serde::{Deserialize, Serialize};

/// Soil and mulch water state of one cell (all depths in mm)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaterState {
    // Reservoir capacities
    /// Surface layer (ruSurf)
    pub surface_capacity: f64,
    /// Root zone (ruRac), grows with the root front
    pub root_capacity: f64,
    /// Whole profile (stRuMax)
    pub profile_capacity: f64,
    pub mulch_capacity: f64,
    /// Reservoir watched by the irrigation policy (ruIrr)
    pub irrigation_capacity: f64,

    // Stocks
    pub surface_stock: f64,
    pub root_stock: f64,
    pub profile_stock: f64,
    pub mulch_stock: f64,
    pub irrigation_stock: f64,

    /// Deepest water front reached so far (hum)
    pub humectation_front: f64,

    // Daily fluxes
    pub irrigation: f64,
    pub cumulative_irrigation: f64,
    /// Rain plus irrigation, less mulch capture and runoff
    pub available_water: f64,
    pub mulch_capture: f64,
    pub runoff: f64,
    pub drainage: f64,
    /// Root zone capacity gained today
    pub root_growth: f64,

    // Coefficients
    /// Fraction of evaporable soil water
    pub fesw: f64,
    /// Fraction of transpirable soil water
    pub ftsw: f64,
    /// Soil evaporation coefficient
    pub kce: f64,
    /// Crop transpiration coefficient
    pub kcp: f64,
    pub kc_total: f64,
    /// Soil-water depletion factor (p)
    pub depletion: f64,
    /// Drought stress coefficient (cstr, 1 = no stress)
    pub stress: f64,

    pub evaporation_potential: f64,
    pub evaporation: f64,
    pub transpiration_potential: f64,
    pub transpiration: f64,
    /// Actual evapotranspiration
    pub etr: f64,
    /// Maximal evapotranspiration
    pub etm: f64,
}

impl WaterState {
    /// Zero the day-scoped fluxes, keep stocks and coefficients.
    pub(crate) fn clear_fluxes(&mut self) {
        self.irrigation = 0.0;
        self.available_water = 0.0;
        self.mulch_capture = 0.0;
        self.runoff = 0.0;
        self.drainage = 0.0;
        self.root_growth = 0.0;
        self.evaporation_potential = 0.0;
        self.evaporation = 0.0;
        self.transpiration_potential = 0.0;
        self.transpiration = 0.0;
        self.etr = 0.0;
        self.etm = 0.0;
    }
}
