//! Semantic unit types for daily forcing and thermal time
//!
//! Newtype wrappers for the daily weather scalars at the forcing boundary.
//!
//! # Design
//! - All quantities are f64
//! - `Deref` to the raw value for use inside formulas
//! - Total ordering via `f64::total_cmp` (NaN sorts above every value)
//! - No range validation in constructors: missing forcing is carried as NaN
//!   and must be representable
//!
//! # Usage
//! ```
//! use crop_sim_core::core_types::units::{Celsius, Millimeters};
//!
//! let t = Celsius::new(27.5);
//! let rain = Millimeters::new(12.0);
//! assert!((*t - 27.5).abs() < f64::EPSILON);
//! assert_eq!(rain.max(Millimeters::ZERO), rain);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Sub};

/// Implements the shared trait surface of a scalar unit newtype.
macro_rules! scalar_unit {
    ($name:ident, $suffix:literal) => {
        impl $name {
            /// Zero value
            pub const ZERO: $name = $name(0.0);

            /// Wrap a raw value
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }

            /// Raw value
            #[inline]
            #[must_use]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// True when the value is a forcing gap (NaN) or infinite
            #[inline]
            #[must_use]
            pub fn is_missing(self) -> bool {
                !self.0.is_finite()
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(self, rhs: $name) -> $name {
                $name(self.0 - rhs.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2}{}", self.0, $suffix)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Daily mean air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

scalar_unit!(Celsius, "°C");

/// Thermal time in degree-days above the cultivar base temperature
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DegreeDays(f64);

scalar_unit!(DegreeDays, "°Cd");

// ============================================================================
// WATER
// ============================================================================

/// Water depth in millimeters (rainfall, irrigation, ET0, reservoir stocks)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimeters(f64);

scalar_unit!(Millimeters, "mm");

// ============================================================================
// RADIATION AND DAY LENGTH
// ============================================================================

/// Daily global solar radiation in MJ/m²
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MegajoulesPerSquareMeter(f64);

scalar_unit!(MegajoulesPerSquareMeter, "MJ/m²");

/// Astronomical day length in hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hours(f64);

scalar_unit!(Hours, "h");
