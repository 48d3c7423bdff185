//! Configuration errors
//!
//! The engine itself never fails once the daily loop has started: numeric
//! degeneracy is floor-clamped and invariant drift is clamped in place.
//! Everything that can be rejected is rejected by `Simulation::new`.

use thiserror::Error;

/// Invalid parameter set or forcing layout, detected before the daily loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A parameter is outside its valid domain
    #[error("{set} parameter `{name}` = {value}: {reason}")]
    OutOfDomain {
        /// Parameter set (cultivar, soil, management)
        set: &'static str,
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// Two parameters are individually valid but inconsistent together
    #[error("{set} parameters inconsistent: {reason}")]
    Inconsistent {
        /// Parameter set (cultivar, soil, management)
        set: &'static str,
        /// Description of the inconsistency
        reason: String,
    },

    /// Forcing arrays do not match the grid and run length
    #[error("forcing `{variable}` has {actual} values, expected {expected}")]
    ForcingShape {
        /// Forcing variable name
        variable: &'static str,
        /// Number of values supplied
        actual: usize,
        /// Cells x days
        expected: usize,
    },

    /// A grid cell references a parameter set that does not exist
    #[error("cell {cell} references {set} set #{index}, only {available} defined")]
    UnknownParameterSet {
        /// Cell index (row-major)
        cell: usize,
        /// Parameter set kind
        set: &'static str,
        /// Referenced index
        index: usize,
        /// Number of sets defined
        available: usize,
    },

    /// Grid dimensions are empty or do not match the cell list
    #[error("grid {width}x{height} does not match {cells} cells")]
    GridShape {
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
        /// Number of cell setups supplied
        cells: usize,
    },
}

impl ConfigError {
    /// Shorthand for an out-of-domain parameter
    pub(crate) fn out_of_domain(
        set: &'static str,
        name: &'static str,
        value: f64,
        reason: &'static str,
    ) -> Self {
        Self::OutOfDomain {
            set,
            name,
            value,
            reason,
        }
    }
}

/// Reject non-finite or negative values.
pub(crate) fn non_negative(set: &'static str, name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_domain(set, name, value, "must be finite and >= 0"))
    }
}

/// Reject non-finite, zero or negative values.
pub(crate) fn positive(set: &'static str, name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_domain(set, name, value, "must be finite and > 0"))
    }
}

/// Reject values outside `[0, 1]`.
pub(crate) fn unit_fraction(set: &'static str, name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::out_of_domain(set, name, value, "must lie in [0, 1]"))
    }
}

/// Reject non-finite values.
pub(crate) fn finite(set: &'static str, name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::out_of_domain(set, name, value, "must be finite"))
    }
}
