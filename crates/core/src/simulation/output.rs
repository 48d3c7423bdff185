//! Named output series
//!
//! Maps state fields to the variable names used by SARRA-H reports so a
//! comparison tool can pull a series by name without knowing the state
//! layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::state::{CellState, StateSeries};

/// Reportable daily variable, named as in SARRA-H output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputVariable {
    DegresDuJour,
    SumDegresDay,
    NumPhase,
    Lai,
    Sla,
    Ftsw,
    Fesw,
    Cstr,
    Eto,
    Etm,
    Etr,
    Kce,
    Kc,
    Evap,
    TrPot,
    Tr,
    StockSurface,
    StockRac,
    Hum,
    VitesseRacinaire,
    Assim,
    BiomasseTotale,
    BiomasseAerienne,
    BiomasseRacinaire,
    BiomasseFeuilles,
    BiomasseTiges,
    BiomasseVegetative,
    DBiomTot,
    DRdtPot,
    Rdt,
}

impl OutputVariable {
    pub const ALL: [OutputVariable; 30] = [
        Self::DegresDuJour,
        Self::SumDegresDay,
        Self::NumPhase,
        Self::Lai,
        Self::Sla,
        Self::Ftsw,
        Self::Fesw,
        Self::Cstr,
        Self::Eto,
        Self::Etm,
        Self::Etr,
        Self::Kce,
        Self::Kc,
        Self::Evap,
        Self::TrPot,
        Self::Tr,
        Self::StockSurface,
        Self::StockRac,
        Self::Hum,
        Self::VitesseRacinaire,
        Self::Assim,
        Self::BiomasseTotale,
        Self::BiomasseAerienne,
        Self::BiomasseRacinaire,
        Self::BiomasseFeuilles,
        Self::BiomasseTiges,
        Self::BiomasseVegetative,
        Self::DBiomTot,
        Self::DRdtPot,
        Self::Rdt,
    ];

    /// SARRA-H variable name
    pub fn name(self) -> &'static str {
        match self {
            Self::DegresDuJour => "DegresDuJour",
            Self::SumDegresDay => "SumDegresDay",
            Self::NumPhase => "NumPhase",
            Self::Lai => "Lai",
            Self::Sla => "Sla",
            Self::Ftsw => "FTSW",
            Self::Fesw => "FESW",
            Self::Cstr => "Cstr",
            Self::Eto => "Eto",
            Self::Etm => "ETM",
            Self::Etr => "ETR",
            Self::Kce => "Kce",
            Self::Kc => "Kc",
            Self::Evap => "Evap",
            Self::TrPot => "TrPot",
            Self::Tr => "Tr",
            Self::StockSurface => "StockSurface",
            Self::StockRac => "StockRac",
            Self::Hum => "Hum",
            Self::VitesseRacinaire => "VitesseRacinaire",
            Self::Assim => "Assim",
            Self::BiomasseTotale => "BiomasseTotale",
            Self::BiomasseAerienne => "BiomasseAerienne",
            Self::BiomasseRacinaire => "BiomasseRacinaire",
            Self::BiomasseFeuilles => "BiomasseFeuilles",
            Self::BiomasseTiges => "BiomasseTiges",
            Self::BiomasseVegetative => "BiomasseVegetative",
            Self::DBiomTot => "DBiomTot",
            Self::DRdtPot => "DRdtPot",
            Self::Rdt => "Rdt",
        }
    }

    /// Value of this variable in one cell-day.
    ///
    /// `Eto` is the reference evapotranspiration, which the state does not
    /// keep; it is recovered as `ETM / Kc` and is 0 on days without demand.
    pub fn extract(self, state: &CellState) -> f64 {
        let (p, w, c) = (&state.phenology, &state.water, &state.carbon);
        match self {
            Self::DegresDuJour => p.daily_thermal_time,
            Self::SumDegresDay => p.thermal_time_sum,
            Self::NumPhase => f64::from(p.phase.index()),
            Self::Lai => c.lai,
            Self::Sla => c.sla,
            Self::Ftsw => w.ftsw,
            Self::Fesw => w.fesw,
            Self::Cstr => w.stress,
            Self::Eto => {
                if w.kc_total > 0.0 {
                    w.etm / w.kc_total
                } else {
                    0.0
                }
            }
            Self::Etm => w.etm,
            Self::Etr => w.etr,
            Self::Kce => w.kce,
            Self::Kc => w.kc_total,
            Self::Evap => w.evaporation,
            Self::TrPot => w.transpiration_potential,
            Self::Tr => w.transpiration,
            Self::StockSurface => w.surface_stock,
            Self::StockRac => w.root_stock,
            Self::Hum => w.humectation_front,
            Self::VitesseRacinaire => c.root_growth_rate,
            Self::Assim => c.assimilation,
            Self::BiomasseTotale => c.total,
            Self::BiomasseAerienne => c.aerial,
            Self::BiomasseRacinaire => c.root,
            Self::BiomasseFeuilles => c.leaf,
            Self::BiomasseTiges => c.stem,
            Self::BiomasseVegetative => c.vegetative,
            Self::DBiomTot => c.delta_total,
            Self::DRdtPot => c.yield_potential_increment,
            Self::Rdt => c.grain_yield,
        }
    }

    /// Daily series of one cell
    pub fn series(self, states: &StateSeries, cell: usize) -> Vec<f64> {
        states.cell(cell).map(|state| self.extract(state)).collect()
    }
}

impl fmt::Display for OutputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised output variable name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output variable `{0}`")]
pub struct UnknownVariable(pub String);

impl FromStr for OutputVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variable| variable.name() == s)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}
