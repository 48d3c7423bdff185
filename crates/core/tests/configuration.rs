//! Parameter validation, deserialisation and derived coefficients
mod common;

use approx::assert_relative_eq;
use common::{day, run_uniform};
use crop_sim_core::params::density_factor;
use crop_sim_core::{
    CellParams, ConfigError, CultivarParams, ForcingGrid, ForcingSeries, IntensificationResponse,
    ManagementParams, Simulation, SimulationGrid, SoilParams,
};

fn grid_with(cultivar: CultivarParams, management: ManagementParams) -> SimulationGrid {
    SimulationGrid::single(SoilParams::sandy_loam(), cultivar, management)
}

#[test]
fn test_simulation_rejects_bad_parameters() {
    let forcing = || ForcingGrid::uniform(1, &[day(10.0, 27.0); 3]);

    let crossed_sla = CultivarParams {
        sla_min: 0.005,
        ..CultivarParams::sorghum()
    };
    let err = Simulation::new(grid_with(crossed_sla, ManagementParams::rainfed(0)), forcing()).unwrap_err();
    assert!(matches!(err, ConfigError::Inconsistent { set: "cultivar", .. }), "{err}");

    let degenerate_allometry = CultivarParams {
        leaf_fraction_base: 0.1,
        ..CultivarParams::sorghum()
    };
    assert!(Simulation::new(
        grid_with(degenerate_allometry, ManagementParams::rainfed(0)),
        forcing()
    )
    .is_err());

    let no_plants = ManagementParams {
        density: 0.0,
        ..ManagementParams::rainfed(0)
    };
    let err = Simulation::new(grid_with(CultivarParams::sorghum(), no_plants), forcing()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfDomain {
            set: "management",
            name: "density",
            ..
        }
    ));

    let mut dangling = grid_with(CultivarParams::sorghum(), ManagementParams::rainfed(0));
    dangling.cells[0].soil = 2;
    let err = Simulation::new(dangling, forcing()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownParameterSet { set: "soil", .. }));
}

#[test]
fn test_forcing_shape_checked() {
    let series = ForcingSeries {
        rain: vec![0.0; 10],
        temperature: vec![25.0; 10],
        radiation: vec![20.0; 9],
        et0: vec![5.0; 10],
        day_length: vec![12.0; 10],
        irrigation: None,
    };
    assert_eq!(
        ForcingGrid::new(2, 5, series).unwrap_err(),
        ConfigError::ForcingShape {
            variable: "radiation",
            actual: 9,
            expected: 10
        }
    );
}

#[test]
fn test_parameter_sets_deserialize_with_defaults() {
    let cultivar: CultivarParams = serde_json::from_str(
        r#"{ "name": "Local sorghum", "base_temperature": 12.0, "vegetative_thermal_time": 520.0 }"#,
    )
    .expect("partial cultivar");
    assert_eq!(cultivar.name, "Local sorghum");
    assert_eq!(cultivar.base_temperature, 12.0);
    assert_eq!(cultivar.vegetative_thermal_time, 520.0);
    assert_eq!(cultivar.sla_max, CultivarParams::sorghum().sla_max);
    assert!(cultivar.validate().is_ok());

    let management: ManagementParams = serde_json::from_str(
        r#"{ "sowing_day": 12, "irrigation": { "automatic": true }, "intensification_index": 2.0 }"#,
    )
    .expect("partial management");
    assert_eq!(management.sowing_day, 12);
    assert!(management.irrigation.automatic);
    assert_eq!(management.irrigation.max_daily, 80.0);
    assert_eq!(management.intensification_index, Some(2.0));

    let grid: SimulationGrid = serde_json::from_str(
        r#"{
            "width": 2, "height": 1,
            "soils": [{}], "cultivars": [{}, { "name": "Millet" }], "managements": [{}],
            "cells": [{ "soil": 0, "cultivar": 0, "management": 0 },
                      { "soil": 0, "cultivar": 1, "management": 0 }]
        }"#,
    )
    .expect("grid");
    assert!(grid.validate().is_ok());
    assert_eq!(grid.cell_params(1).cultivar.name, "Millet");
}

#[test]
fn test_optimal_density_is_neutral() {
    let at_optimum = CultivarParams {
        optimal_density: Some(60000.0),
        density_response: 0.5,
        ..CultivarParams::sorghum()
    };
    assert_eq!(density_factor(&at_optimum, &ManagementParams::rainfed(0)), 1.0);

    let days = vec![day(12.0, 27.0); 60];
    let plain = run_uniform(grid_with(CultivarParams::sorghum(), ManagementParams::rainfed(0)), &days);
    let corrected = run_uniform(grid_with(at_optimum, ManagementParams::rainfed(0)), &days);
    for (a, b) in plain.cell(0).zip(corrected.cell(0)) {
        assert_eq!(a.carbon.total, b.carbon.total);
        assert_eq!(a.carbon.lai, b.carbon.lai);
    }
}

#[test]
fn test_sparse_sowing_scales_canopy() {
    let cultivar = CultivarParams {
        optimal_density: Some(60000.0),
        density_response: 0.5,
        ..CultivarParams::sorghum()
    };
    let sparse = ManagementParams {
        density: 30000.0,
        ..ManagementParams::rainfed(0)
    };
    // 1 + 0.5 * (60000 / 30000 - 1)
    assert_relative_eq!(density_factor(&cultivar, &sparse), 1.5, max_relative = 1e-12);
}

#[test]
fn test_intensification_index_overrides_conversion() {
    let curve = IntensificationResponse {
        intercept: 2.0,
        amplitude: 1.5,
        gauss_center: 0.5,
        gauss_width: 1.0,
    };
    let cultivar = CultivarParams {
        intensification: Some(curve),
        ..CultivarParams::sorghum()
    };
    let soil = SoilParams::sandy_loam();

    let without = ManagementParams::rainfed(0);
    let params = CellParams::new(&soil, &cultivar, &without);
    assert_eq!(params.conversion, cultivar.conversion_efficiency);

    let with = ManagementParams {
        intensification_index: Some(3.0),
        ..ManagementParams::rainfed(0)
    };
    let params = CellParams::new(&soil, &cultivar, &with);
    assert_relative_eq!(params.conversion, curve.conversion(3.0), max_relative = 1e-12);
    assert!(params.conversion != cultivar.conversion_efficiency);

    let days = vec![day(12.0, 27.0); 20];
    let base = run_uniform(grid_with(cultivar.clone(), without), &days);
    let intensified = run_uniform(grid_with(cultivar, with), &days);
    let (a, b) = (
        &base.day(19).expect("day 19")[0].carbon,
        &intensified.day(19).expect("day 19")[0].carbon,
    );
    assert!(a.total != b.total, "conversion change must show in biomass");
}
