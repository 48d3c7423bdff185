//! Withdrawal of evaporation and transpiration from the reservoirs

use crate::state::WaterState;

use super::MIN_CAPACITY;

/// Step 9 of the water balance.
///
/// Evaporation is taken from the surface and, for its transpirable part,
/// from the root zone and profile. Transpiration is bounded by the root
/// stock and drawn from root zone, profile and, pro rata, the surface.
pub(crate) fn consume(water: &mut WaterState) {
    let evaporation = water.evaporation;
    let transpirable_surface = (water.surface_stock - water.surface_capacity / 10.0).max(0.0);

    water.surface_stock = (water.surface_stock - evaporation).max(0.0);

    let mut from_roots = evaporation.min(transpirable_surface);
    water.profile_stock = (water.profile_stock - from_roots).max(0.0);
    if water.root_capacity < water.surface_capacity {
        from_roots = evaporation * water.root_stock / water.surface_capacity.max(MIN_CAPACITY);
    }
    water.root_stock = (water.root_stock - from_roots).max(0.0);

    let transpiration = water.transpiration.min(water.root_stock);
    if water.root_stock > 0.0 {
        let surface_share = (transpirable_surface / water.root_stock).min(1.0);
        water.surface_stock = (water.surface_stock - transpiration * surface_share).max(0.0);
    }
    water.root_stock = (water.root_stock - transpiration).max(0.0);
    water.profile_stock = (water.profile_stock - transpiration).max(0.0);

    water.transpiration = transpiration;
    water.etr = transpiration + evaporation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpiration_bounded_by_root_stock() {
        let mut w = WaterState {
            surface_capacity: 24.0,
            root_capacity: 60.0,
            surface_stock: 3.0,
            root_stock: 1.0,
            profile_stock: 30.0,
            transpiration: 4.0,
            ..WaterState::default()
        };
        consume(&mut w);
        assert_eq!(w.transpiration, 1.0);
        assert_eq!(w.root_stock, 0.0);
        assert!((w.profile_stock - 29.0).abs() < 1e-12);
        assert!((w.etr - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaporation_split() {
        let mut w = WaterState {
            surface_capacity: 24.0,
            root_capacity: 60.0,
            surface_stock: 12.0,
            root_stock: 40.0,
            profile_stock: 100.0,
            evaporation: 2.0,
            ..WaterState::default()
        };
        consume(&mut w);
        assert!((w.surface_stock - 10.0).abs() < 1e-12);
        assert!((w.root_stock - 38.0).abs() < 1e-12);
        assert!((w.profile_stock - 98.0).abs() < 1e-12);
        assert!((w.etr - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stocks_never_negative() {
        let mut w = WaterState {
            surface_capacity: 24.0,
            root_capacity: 10.0,
            surface_stock: 0.5,
            root_stock: 0.2,
            profile_stock: 0.1,
            evaporation: 0.5,
            transpiration: 3.0,
            ..WaterState::default()
        };
        consume(&mut w);
        assert!(w.surface_stock >= 0.0);
        assert!(w.root_stock >= 0.0);
        assert!(w.profile_stock >= 0.0);
    }
}
