//! Phenology engine
//!
//! Advances each cell's phase through the cereal cycle:
//!
//! | From | To | Trigger |
//! |------|----|---------|
//! | 0 | 1 | sowing day reached and enough surface water |
//! | 1, 2, 4, 5, 6 | next | cumulative thermal time reaches the phase threshold |
//! | 3 | 4 | photoperiod flag cleared |
//! | ≥ 2 | 0 | juvenile mortality |
//! | 7 | 0 | next day (harvest rollover) |
//!
//! Today's thermal time is added to the cumulative sum before the
//! transition tests run, so a threshold reached today ends the phase today.
//! The sum stays at 0 in bare soil and starts with the sowing day's own
//! thermal time. At most one transition happens per day and a reset day
//! performs none.

pub mod mortality;
pub mod photoperiod;
pub mod thermal_time;

pub use photoperiod::photoperiod_score;
pub use thermal_time::daily_thermal_time;

use tracing::debug;

use crate::core_types::Phase;
use crate::forcing::DailyForcing;
use crate::params::CellParams;
use crate::state::{CellState, HarvestRecord, PhenologyState};
use crate::water::intake::prospective_surface_stock;

/// Advance the phenology of one cell by one day.
///
/// # Arguments
/// * `state` - Today's state, carried forward from yesterday
/// * `forcing` - Today's weather of the cell
/// * `params` - Static parameters of the cell
/// * `day` - Simulation day index
pub fn step(state: &mut CellState, forcing: &DailyForcing, params: &CellParams<'_>, day: usize) {
    let cultivar = params.cultivar;

    if state.phenology.phase == Phase::Harvest {
        debug!(day, cycles = state.phenology.cycles_completed, "harvest rollover");
        reset_cycle(state);
        return;
    }

    let delta_aerial = state.carbon.delta_aerial;
    if mortality::crop_dies(
        &mut state.phenology,
        delta_aerial,
        params.management.mortality_window_days,
        cultivar.mortality_stress_days,
    ) {
        debug!(
            day,
            phase = %state.phenology.phase,
            stress_days = state.phenology.stress_days,
            "juvenile mortality, cycle reset"
        );
        reset_cycle(state);
        return;
    }

    let ddj = *daily_thermal_time(forcing.temperature, cultivar);
    let ph = &mut state.phenology;
    ph.daily_thermal_time = ddj;
    ph.thermal_time_sum = if ph.phase == Phase::BareSoil {
        0.0
    } else {
        ph.thermal_time_sum + ddj
    };

    if transition_ready(state, forcing, params, day) {
        advance(state, params, day);
    }

    let ph = &mut state.phenology;
    if ph.phase == Phase::PhotoperiodSensitive {
        photoperiod::update(ph, *forcing.day_length, cultivar);
    }
}

/// Whether today's transition condition for the current phase holds
fn transition_ready(
    state: &CellState,
    forcing: &DailyForcing,
    params: &CellParams<'_>,
    day: usize,
) -> bool {
    let ph = &state.phenology;
    match ph.phase {
        Phase::BareSoil => {
            day >= ph.sowing_day
                && prospective_surface_stock(&state.water, forcing, params)
                    >= params.management.sowing_water_threshold
        }
        Phase::PhotoperiodSensitive => !ph.photoperiod_active,
        Phase::Harvest => false,
        Phase::Germination
        | Phase::BasicVegetative
        | Phase::Reproductive
        | Phase::GrainFilling
        | Phase::GrainDrying => ph.thermal_time_sum >= ph.next_threshold,
    }
}

/// Move to the next phase and set the threshold that will end it.
fn advance(state: &mut CellState, params: &CellParams<'_>, day: usize) {
    let cultivar = params.cultivar;
    let ph = &mut state.phenology;
    let Some(next) = ph.phase.next() else {
        return;
    };

    ph.previous_threshold = ph.next_threshold;
    ph.phase = next;
    ph.phase_changed = true;

    match next {
        Phase::Germination => {
            ph.thermal_time_sum = ph.daily_thermal_time;
            ph.next_threshold = cultivar.emergence_thermal_time;
            ph.sown_on = Some(day);
            debug!(day, "sowing");
        }
        Phase::BasicVegetative => {
            ph.next_threshold += cultivar.vegetative_thermal_time;
            ph.days_since_emergence = 0;
            ph.stress_days = 0;
        }
        Phase::PhotoperiodSensitive => {
            ph.photoperiod_active = true;
        }
        Phase::Reproductive => {
            ph.next_threshold = ph.thermal_time_sum + cultivar.reproductive_thermal_time;
        }
        Phase::GrainFilling => {
            ph.next_threshold += cultivar.maturation1_thermal_time;
        }
        Phase::GrainDrying => {
            ph.next_threshold += cultivar.maturation2_thermal_time;
        }
        Phase::Harvest => {
            let record = HarvestRecord {
                day,
                grain_yield: state.carbon.grain_yield,
                total_biomass: state.carbon.total,
            };
            ph.cycles_completed += 1;
            ph.last_harvest = Some(record);
            debug!(
                day,
                grain_yield = record.grain_yield,
                total_biomass = record.total_biomass,
                "harvest"
            );
        }
        Phase::BareSoil => {}
    }
}

/// Return the cell to bare soil after harvest or crop death.
///
/// Clears the phase machine, root zone and every carbon pool. Soil water,
/// humectation front, mulch, cumulative irrigation, the cycle count and the
/// last harvest survive.
pub fn reset_cycle(state: &mut CellState) {
    let ph = &state.phenology;
    state.phenology = PhenologyState {
        sowing_day: ph.sowing_day,
        cycles_completed: ph.cycles_completed,
        last_harvest: ph.last_harvest,
        ..PhenologyState::default()
    };

    let water = &mut state.water;
    water.root_capacity = 0.0;
    water.root_stock = 0.0;
    water.root_growth = 0.0;
    water.ftsw = 0.0;

    state.carbon.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Celsius, Hours, MegajoulesPerSquareMeter, Millimeters};
    use crate::params::{CultivarParams, ManagementParams, SoilParams};

    fn weather(rain: f64, temperature: f64) -> DailyForcing {
        DailyForcing {
            rain: Millimeters::new(rain),
            temperature: Celsius::new(temperature),
            radiation: MegajoulesPerSquareMeter::new(20.0),
            et0: Millimeters::new(5.0),
            day_length: Hours::new(12.5),
            irrigation: Millimeters::ZERO,
        }
    }

    struct Fixture {
        soil: SoilParams,
        cultivar: CultivarParams,
        management: ManagementParams,
    }

    impl Fixture {
        fn new(sowing_day: usize) -> Self {
            Fixture {
                soil: SoilParams::sandy_loam(),
                cultivar: CultivarParams::sorghum(),
                management: ManagementParams::rainfed(sowing_day),
            }
        }

        fn params(&self) -> CellParams<'_> {
            CellParams::new(&self.soil, &self.cultivar, &self.management)
        }
    }

    #[test]
    fn test_sowing_waits_for_day_and_water() {
        let fx = Fixture::new(3);
        let params = fx.params();
        let mut state = CellState::new(&params);

        step(&mut state, &weather(30.0, 28.0), &params, 1);
        assert_eq!(state.phenology.phase, Phase::BareSoil, "before sowing day");
        assert_eq!(state.phenology.thermal_time_sum, 0.0);

        step(&mut state, &weather(0.0, 28.0), &params, 3);
        assert_eq!(state.phenology.phase, Phase::BareSoil, "surface too dry");

        step(&mut state, &weather(15.0, 28.0), &params, 4);
        assert_eq!(state.phenology.phase, Phase::Germination);
        assert!(state.phenology.phase_changed);
        assert_eq!(state.phenology.sown_on, Some(4));
        assert_eq!(state.phenology.next_threshold, 50.0);
        // sowing day thermal time counts
        assert_eq!(state.phenology.thermal_time_sum, 17.0);
    }

    #[test]
    fn test_transition_on_day_threshold_is_reached() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::Germination;
        state.phenology.next_threshold = 50.0;
        state.phenology.thermal_time_sum = 40.0;

        // 40 + 19 crosses 50 today
        step(&mut state, &weather(0.0, 30.0), &params, 10);
        assert_eq!(state.phenology.thermal_time_sum, 59.0);
        assert_eq!(state.phenology.phase, Phase::BasicVegetative);
        assert!(state.phenology.phase_changed);
        assert_eq!(state.phenology.previous_threshold, 50.0);
        assert_eq!(state.phenology.next_threshold, 500.0);

        let mut next = state.carry_forward();
        step(&mut next, &weather(0.0, 30.0), &params, 11);
        assert_eq!(next.phenology.phase, Phase::BasicVegetative, "one transition per threshold");
        assert!(!next.phenology.phase_changed);
        assert_eq!(next.phenology.thermal_time_sum, 78.0);
    }

    #[test]
    fn test_short_of_threshold_waits() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::Germination;
        state.phenology.next_threshold = 50.0;
        state.phenology.thermal_time_sum = 20.0;

        step(&mut state, &weather(0.0, 30.0), &params, 10);
        assert_eq!(state.phenology.thermal_time_sum, 39.0);
        assert_eq!(state.phenology.phase, Phase::Germination);
        assert!(!state.phenology.phase_changed);
    }

    #[test]
    fn test_reproductive_threshold_from_current_sum() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::PhotoperiodSensitive;
        state.phenology.photoperiod_active = false;
        state.phenology.thermal_time_sum = 812.0;
        state.carbon.delta_aerial = 1.0;

        step(&mut state, &weather(0.0, 30.0), &params, 60);
        assert_eq!(state.phenology.phase, Phase::Reproductive);
        // today's 19 degree-days are already in the sum
        assert_eq!(state.phenology.next_threshold, 831.0 + 450.0);
    }

    #[test]
    fn test_harvest_record_then_rollover() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::GrainDrying;
        state.phenology.next_threshold = 1800.0;
        state.phenology.thermal_time_sum = 1810.0;
        state.phenology.days_since_emergence = 90;
        state.carbon.grain_yield = 2100.0;
        state.carbon.total = 7000.0;
        state.water.root_capacity = 80.0;

        step(&mut state, &weather(0.0, 30.0), &params, 120);
        assert_eq!(state.phenology.phase, Phase::Harvest);
        assert_eq!(state.phenology.cycles_completed, 1);
        let record = state.phenology.last_harvest.expect("harvest recorded");
        assert_eq!(record.day, 120);
        assert_eq!(record.grain_yield, 2100.0);

        let mut next = state.carry_forward();
        step(&mut next, &weather(50.0, 30.0), &params, 121);
        assert_eq!(next.phenology.phase, Phase::BareSoil, "reset day performs no sowing");
        assert_eq!(next.phenology.cycles_completed, 1);
        assert!(next.phenology.last_harvest.is_some());
        assert_eq!(next.water.root_capacity, 0.0);
        assert_eq!(next.carbon.total, 0.0);
    }

    #[test]
    fn test_reset_preserves_soil_water() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::Reproductive;
        state.water.surface_stock = 12.0;
        state.water.profile_stock = 90.0;
        state.water.humectation_front = 110.0;
        state.water.cumulative_irrigation = 45.0;
        state.water.root_capacity = 60.0;
        state.water.root_stock = 30.0;
        state.carbon.leaf = 400.0;

        reset_cycle(&mut state);
        assert_eq!(state.phenology.phase, Phase::BareSoil);
        assert_eq!(state.water.surface_stock, 12.0);
        assert_eq!(state.water.profile_stock, 90.0);
        assert_eq!(state.water.humectation_front, 110.0);
        assert_eq!(state.water.cumulative_irrigation, 45.0);
        assert_eq!(state.water.root_stock, 0.0);
        assert_eq!(state.carbon.leaf, 0.0);
        assert_eq!(state.carbon.density_factor, 1.0);
    }

    #[test]
    fn test_mortality_day_skips_transition() {
        let fx = Fixture::new(0);
        let params = fx.params();
        let mut state = CellState::new(&params);
        state.phenology.phase = Phase::BasicVegetative;
        state.phenology.next_threshold = 100.0;
        state.phenology.thermal_time_sum = 200.0;
        state.phenology.stress_days = 3;
        state.carbon.delta_aerial = -0.5;

        step(&mut state, &weather(0.0, 30.0), &params, 20);
        assert_eq!(state.phenology.phase, Phase::BareSoil);
        assert!(!state.phenology.phase_changed);
    }
}
