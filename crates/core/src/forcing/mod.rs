//! Daily weather forcing for every cell of the grid
//!
//! Forcing is stored structure-of-arrays, one flat vector per variable,
//! day-major (`index = day · n_cells + cell`) so a whole day is a contiguous
//! slice. Missing observations are carried as NaN: the affected cell sees
//! the gap and nothing is interpolated across cells.

pub mod synthetic;

pub use synthetic::SyntheticWeather;

use serde::{Deserialize, Serialize};

use crate::core_types::units::{Celsius, Hours, MegajoulesPerSquareMeter, Millimeters};
use crate::error::ConfigError;

/// Weather of one cell on one day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyForcing {
    pub rain: Millimeters,
    pub temperature: Celsius,
    pub radiation: MegajoulesPerSquareMeter,
    /// Reference evapotranspiration
    pub et0: Millimeters,
    pub day_length: Hours,
    /// Scheduled irrigation, applied on top of the automatic policy
    pub irrigation: Millimeters,
}

impl DailyForcing {
    /// True when any variable is a gap
    pub fn has_gap(&self) -> bool {
        self.rain.is_missing()
            || self.temperature.is_missing()
            || self.radiation.is_missing()
            || self.et0.is_missing()
            || self.day_length.is_missing()
            || self.irrigation.is_missing()
    }
}

/// Raw flat forcing arrays as delivered by an external provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForcingSeries {
    pub rain: Vec<f64>,
    pub temperature: Vec<f64>,
    pub radiation: Vec<f64>,
    pub et0: Vec<f64>,
    pub day_length: Vec<f64>,
    /// Optional scheduled irrigation; absent means none
    #[serde(default)]
    pub irrigation: Option<Vec<f64>>,
}

/// Validated forcing for `n_cells` cells over `n_days` days
#[derive(Debug, Clone, Serialize)]
pub struct ForcingGrid {
    n_cells: usize,
    n_days: usize,
    series: ForcingSeries,
}

impl ForcingGrid {
    /// Wrap flat arrays after checking that each holds `n_cells · n_days` values.
    pub fn new(n_cells: usize, n_days: usize, series: ForcingSeries) -> Result<Self, ConfigError> {
        let expected = n_cells * n_days;
        let check = |variable: &'static str, values: &[f64]| {
            if values.len() == expected {
                Ok(())
            } else {
                Err(ConfigError::ForcingShape {
                    variable,
                    actual: values.len(),
                    expected,
                })
            }
        };
        check("rain", &series.rain)?;
        check("temperature", &series.temperature)?;
        check("radiation", &series.radiation)?;
        check("et0", &series.et0)?;
        check("day_length", &series.day_length)?;
        if let Some(irrigation) = &series.irrigation {
            check("irrigation", irrigation)?;
        }
        Ok(ForcingGrid {
            n_cells,
            n_days,
            series,
        })
    }

    /// Build forcing from a per-(day, cell) generator.
    pub fn from_fn<F>(n_cells: usize, n_days: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> DailyForcing,
    {
        let len = n_cells * n_days;
        let mut series = ForcingSeries {
            rain: Vec::with_capacity(len),
            temperature: Vec::with_capacity(len),
            radiation: Vec::with_capacity(len),
            et0: Vec::with_capacity(len),
            day_length: Vec::with_capacity(len),
            irrigation: None,
        };
        let mut irrigation = Vec::with_capacity(len);
        for day in 0..n_days {
            for cell in 0..n_cells {
                let d = f(day, cell);
                series.rain.push(d.rain.value());
                series.temperature.push(d.temperature.value());
                series.radiation.push(d.radiation.value());
                series.et0.push(d.et0.value());
                series.day_length.push(d.day_length.value());
                irrigation.push(d.irrigation.value());
            }
        }
        series.irrigation = irrigation.iter().any(|&v| v != 0.0).then_some(irrigation);
        ForcingGrid {
            n_cells,
            n_days,
            series,
        }
    }

    /// Same daily weather on every cell.
    pub fn uniform(n_cells: usize, days: &[DailyForcing]) -> Self {
        Self::from_fn(n_cells, days.len(), |day, _| days[day])
    }

    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Forcing of `cell` on `day`
    ///
    /// # Panics
    /// Panics if `day` or `cell` is out of range.
    pub fn get(&self, day: usize, cell: usize) -> DailyForcing {
        assert!(cell < self.n_cells, "cell {cell} out of range");
        let i = day * self.n_cells + cell;
        DailyForcing {
            rain: Millimeters::new(self.series.rain[i]),
            temperature: Celsius::new(self.series.temperature[i]),
            radiation: MegajoulesPerSquareMeter::new(self.series.radiation[i]),
            et0: Millimeters::new(self.series.et0[i]),
            day_length: Hours::new(self.series.day_length[i]),
            irrigation: Millimeters::new(
                self.series.irrigation.as_ref().map_or(0.0, |v| v[i]),
            ),
        }
    }

    /// Number of cells with at least one missing variable on `day`
    pub fn gap_count(&self, day: usize) -> usize {
        (0..self.n_cells)
            .filter(|&cell| self.get(day, cell).has_gap())
            .count()
    }

    /// Raw arrays
    pub fn series(&self) -> &ForcingSeries {
        &self.series
    }
}
