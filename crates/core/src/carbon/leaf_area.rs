//! Leaf/stem partition, specific leaf area and leaf area index

use crate::core_types::Phase;
use crate::params::{CellParams, CultivarParams};
use crate::state::CarbonState;

/// Leaf biomass of a growing vegetative canopy: `(0.1 + bM·cM^(aerial/1000))·aerial`
pub fn allometric_leaf(aerial: f64, b: f64, c: f64) -> f64 {
    (0.1 + b * c.powf(aerial / 1000.0)) * aerial
}

/// Split aerial biomass between leaves and stems.
pub(crate) fn partition_leaf_stem(carbon: &mut CarbonState, phase: Phase, params: &CellParams<'_>) {
    let share = params.cultivar.leaf_reallocation_share;
    let previous_leaf = carbon.leaf;

    if phase.is_emerged() && carbon.delta_aerial < 0.0 {
        let loss = -carbon.delta_aerial + carbon.reallocation;
        carbon.leaf = (carbon.leaf - loss * share).max(0.0);
        carbon.stem = (carbon.stem - loss * (1.0 - share)).max(0.0);
    } else if phase.is_allometric() {
        carbon.leaf = allometric_leaf(carbon.aerial, params.leaf_allometry_b, params.leaf_allometry_c);
        carbon.stem = carbon.aerial - carbon.leaf;
    } else if phase.is_post_flowering() {
        carbon.leaf = (carbon.leaf - carbon.reallocation * share).max(0.0);
        carbon.stem = (carbon.stem - carbon.reallocation * (1.0 - share)).max(0.0);
    }

    carbon.vegetative = carbon.leaf + carbon.stem;
    carbon.new_leaf = carbon.leaf - previous_leaf;
}

/// Specific leaf area after a day of ageing and new leaf growth
///
/// New leaves enter at `sla_max`; existing leaves decay toward `sla_min`.
pub fn next_sla(previous: f64, leaf: f64, new_leaf: f64, cultivar: &CultivarParams) -> f64 {
    if leaf <= 0.0 {
        return 0.0;
    }
    let current = if previous > 0.0 { previous } else { cultivar.sla_max };
    let decayed = current - cultivar.sla_decay * (current - cultivar.sla_min);
    let blended = if new_leaf > 0.0 {
        decayed * (leaf - new_leaf) / leaf + cultivar.sla_max * new_leaf / leaf
    } else {
        decayed
    };
    blended.clamp(cultivar.sla_min, cultivar.sla_max)
}

/// SLA and LAI of the day.
pub(crate) fn update_leaf_area(carbon: &mut CarbonState, phase: Phase, cultivar: &CultivarParams) {
    carbon.sla = next_sla(carbon.sla, carbon.leaf, carbon.new_leaf, cultivar);
    carbon.lai = if phase.carries_leaf_area() {
        carbon.leaf * carbon.sla
    } else {
        0.0
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ManagementParams, SoilParams};

    #[test]
    fn test_allometry_leaf_share_declines() {
        let c = CultivarParams::sorghum();
        let (b, cm) = c.leaf_allometry();
        let small = allometric_leaf(100.0, b, cm) / 100.0;
        let large = allometric_leaf(5000.0, b, cm) / 5000.0;
        assert!(small > large);
        assert!(large > 0.1);
    }

    #[test]
    fn test_first_leaves_get_max_sla() {
        let c = CultivarParams::sorghum();
        assert_eq!(next_sla(0.0, 10.0, 10.0, &c), c.sla_max);
        assert_eq!(next_sla(0.003, 0.0, 0.0, &c), 0.0);
    }

    #[test]
    fn test_sla_ages_toward_min() {
        let c = CultivarParams::sorghum(); // 0.004 / 0.002 / 0.05
        let aged = next_sla(0.004, 500.0, 0.0, &c);
        assert!((aged - 0.0039).abs() < 1e-12);
        let mut sla = 0.004;
        for _ in 0..500 {
            sla = next_sla(sla, 500.0, 0.0, &c);
        }
        assert!(sla >= c.sla_min && sla < 0.00201);
    }

    #[test]
    fn test_shrinking_canopy_loses_leaf_and_stem() {
        let (soil, cultivar, management) = (
            SoilParams::sandy_loam(),
            CultivarParams::sorghum(),
            ManagementParams::rainfed(0),
        );
        let params = CellParams::new(&soil, &cultivar, &management);
        let mut carbon = CarbonState {
            leaf: 100.0,
            stem: 200.0,
            delta_aerial: -10.0,
            ..CarbonState::default()
        };
        partition_leaf_stem(&mut carbon, Phase::BasicVegetative, &params);
        assert!((carbon.leaf - 94.0).abs() < 1e-12);
        assert!((carbon.stem - 196.0).abs() < 1e-12);
        assert!((carbon.new_leaf + 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_lai_without_leaves() {
        let c = CultivarParams::sorghum();
        let mut carbon = CarbonState {
            sla: 0.003,
            lai: 1.2,
            ..CarbonState::default()
        };
        update_leaf_area(&mut carbon, Phase::Reproductive, &c);
        assert_eq!(carbon.sla, 0.0);
        assert_eq!(carbon.lai, 0.0);
    }
}
