//! Phenological phases of the cereal cycle
//!
//! The phase is the single switch that gates almost every formula of the
//! water and carbon balances. Consumers match on the variant instead of
//! comparing raw indices; the numeric index survives only for output and
//! for the `>`/`<` style range checks exposed as named predicates here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phenological phase of a cell's crop (index 0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Phase {
    /// 0 - no crop, waiting for sowing conditions
    #[default]
    BareSoil,
    /// 1 - sowing to emergence (levée)
    Germination,
    /// 2 - basic vegetative phase (BVP)
    BasicVegetative,
    /// 3 - photoperiod-sensitive phase (PSP), exit driven by day length
    PhotoperiodSensitive,
    /// 4 - pre-reproductive phase (RPR), entered at panicle initiation
    Reproductive,
    /// 5 - first maturation phase (grain filling), entered at flowering
    GrainFilling,
    /// 6 - second maturation phase (grain drying)
    GrainDrying,
    /// 7 - harvest, held for one day before the cycle resets
    Harvest,
}

impl Phase {
    /// All phases in cycle order
    pub const ALL: [Phase; 8] = [
        Phase::BareSoil,
        Phase::Germination,
        Phase::BasicVegetative,
        Phase::PhotoperiodSensitive,
        Phase::Reproductive,
        Phase::GrainFilling,
        Phase::GrainDrying,
        Phase::Harvest,
    ];

    /// Numeric phase index (0-7)
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Phase for a numeric index, `None` outside 0-7
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Following phase in the cycle; `Harvest` has no successor (it resets)
    pub const fn next(self) -> Option<Self> {
        match self {
            Phase::BareSoil => Some(Phase::Germination),
            Phase::Germination => Some(Phase::BasicVegetative),
            Phase::BasicVegetative => Some(Phase::PhotoperiodSensitive),
            Phase::PhotoperiodSensitive => Some(Phase::Reproductive),
            Phase::Reproductive => Some(Phase::GrainFilling),
            Phase::GrainFilling => Some(Phase::GrainDrying),
            Phase::GrainDrying => Some(Phase::Harvest),
            Phase::Harvest => None,
        }
    }

    /// A crop occupies the cell (sown and not yet harvested)
    #[inline]
    pub const fn has_crop(self) -> bool {
        !matches!(self, Phase::BareSoil | Phase::Harvest)
    }

    /// Emerged plant with biomass pools (phase >= 2)
    #[inline]
    pub const fn is_emerged(self) -> bool {
        self.index() >= Phase::BasicVegetative.index()
    }

    /// Phases in which leaf area is carried (2-6)
    #[inline]
    pub const fn carries_leaf_area(self) -> bool {
        self.is_emerged() && !matches!(self, Phase::Harvest)
    }

    /// Vegetative phases with allometric leaf/stem partition (2-4)
    #[inline]
    pub const fn is_allometric(self) -> bool {
        matches!(
            self,
            Phase::BasicVegetative | Phase::PhotoperiodSensitive | Phase::Reproductive
        )
    }

    /// Phases after flowering (> 4)
    #[inline]
    pub const fn is_post_flowering(self) -> bool {
        self.index() > Phase::Reproductive.index()
    }
}

impl From<Phase> for u8 {
    fn from(phase: Phase) -> u8 {
        phase.index()
    }
}

impl TryFrom<u8> for Phase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Phase::from_index(value).ok_or_else(|| format!("phase index {value} is outside 0-7"))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::BareSoil => "bare soil",
            Phase::Germination => "germination",
            Phase::BasicVegetative => "basic vegetative",
            Phase::PhotoperiodSensitive => "photoperiod sensitive",
            Phase::Reproductive => "reproductive",
            Phase::GrainFilling => "grain filling",
            Phase::GrainDrying => "grain drying",
            Phase::Harvest => "harvest",
        };
        write!(f, "{name} ({})", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_and_bounds() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_index(phase.index()), Some(phase));
        }
        assert_eq!(Phase::from_index(8), None);
        assert!(Phase::try_from(9u8).is_err());
    }

    #[test]
    fn test_successor_chain_ends_at_harvest() {
        let mut phase = Phase::BareSoil;
        let mut steps = 0;
        while let Some(next) = phase.next() {
            assert!(next > phase);
            phase = next;
            steps += 1;
        }
        assert_eq!(phase, Phase::Harvest);
        assert_eq!(steps, 7);
    }

    #[test]
    fn test_predicates() {
        assert!(!Phase::BareSoil.has_crop());
        assert!(Phase::Germination.has_crop());
        assert!(!Phase::Harvest.has_crop());
        assert!(!Phase::Germination.carries_leaf_area());
        assert!(Phase::GrainDrying.carries_leaf_area());
        assert!(!Phase::Harvest.carries_leaf_area());
        assert!(Phase::Reproductive.is_allometric());
        assert!(!Phase::GrainFilling.is_allometric());
        assert!(Phase::GrainFilling.is_post_flowering());
    }
}
