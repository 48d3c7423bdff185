//! Core types shared by every engine

pub mod phase;
pub mod units;

pub use phase::Phase;
pub use units::*;
