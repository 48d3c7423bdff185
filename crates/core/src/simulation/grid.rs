//! Grid layout and parameter-set tables
//!
//! Cells are stored row-major. Each cell references one entry of each
//! parameter table by index, so a region with a handful of soils, cultivars
//! and management plans does not duplicate parameter sets per cell.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{CellParams, CultivarParams, ManagementParams, SoilParams};

/// Parameter-set indices of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellSetup {
    pub soil: usize,
    pub cultivar: usize,
    pub management: usize,
}

/// Grid of independent cells with their static parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationGrid {
    pub width: usize,
    pub height: usize,
    pub soils: Vec<SoilParams>,
    pub cultivars: Vec<CultivarParams>,
    pub managements: Vec<ManagementParams>,
    /// One entry per cell, row-major
    pub cells: Vec<CellSetup>,
}

impl SimulationGrid {
    /// Every cell shares the same three parameter sets.
    pub fn uniform(
        width: usize,
        height: usize,
        soil: SoilParams,
        cultivar: CultivarParams,
        management: ManagementParams,
    ) -> Self {
        SimulationGrid {
            width,
            height,
            soils: vec![soil],
            cultivars: vec![cultivar],
            managements: vec![management],
            cells: vec![CellSetup::default(); width * height],
        }
    }

    /// Single-cell grid
    pub fn single(soil: SoilParams, cultivar: CultivarParams, management: ManagementParams) -> Self {
        Self::uniform(1, 1, soil, cultivar, management)
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell index
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resolved parameters of a validated cell
    ///
    /// # Panics
    /// Panics if the cell or one of its set indices is out of range; call
    /// [`SimulationGrid::validate`] first.
    pub fn cell_params(&self, cell: usize) -> CellParams<'_> {
        let setup = self.cells[cell];
        CellParams::new(
            &self.soils[setup.soil],
            &self.cultivars[setup.cultivar],
            &self.managements[setup.management],
        )
    }

    /// Check dimensions, every parameter set and every cell reference.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.width * self.height != self.cells.len() {
            return Err(ConfigError::GridShape {
                width: self.width,
                height: self.height,
                cells: self.cells.len(),
            });
        }

        for soil in &self.soils {
            soil.validate()?;
        }
        for cultivar in &self.cultivars {
            cultivar.validate()?;
        }
        for management in &self.managements {
            management.validate()?;
        }

        for (cell, setup) in self.cells.iter().enumerate() {
            let check = |set: &'static str, index: usize, available: usize| {
                if index < available {
                    Ok(())
                } else {
                    Err(ConfigError::UnknownParameterSet {
                        cell,
                        set,
                        index,
                        available,
                    })
                }
            };
            check("soil", setup.soil, self.soils.len())?;
            check("cultivar", setup.cultivar, self.cultivars.len())?;
            check("management", setup.management, self.managements.len())?;
        }
        Ok(())
    }
}
