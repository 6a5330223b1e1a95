//! Advancing the window continues the timeline instead of recomputing it
mod common;

use common::at;
use weather_sim_core::{SeasonSelection, WeatherSimulation};

#[test]
fn advance_keeps_retained_entries_untouched() {
    for hours in [1_u32, 4, 12, 23] {
        let start = at(2024, 4, 20, 0);
        let mut sim = WeatherSimulation::seeded(u64::from(hours));
        sim.initialize("temperate-forest", SeasonSelection::Auto, start);
        let before = sim.forecast().to_vec();

        let current = sim.advance_time(hours, "temperate-forest", SeasonSelection::Auto, start);

        let shift = hours as usize;
        assert_eq!(&current, &before[shift]);
        assert_eq!(current.snapshot(), before[shift].snapshot());
        assert_eq!(&sim.forecast()[..24 - shift], &before[shift..]);
    }
}

#[test]
fn hourly_steps_respect_inertia() {
    let start = at(2024, 9, 1, 0);
    let mut sim = WeatherSimulation::seeded(2024);
    sim.initialize("temperate-grassland", SeasonSelection::Auto, start);

    let mut timeline = vec![sim.get_current_weather().unwrap().clone()];
    for _ in 0..24 {
        sim.advance_time(1, "temperate-grassland", SeasonSelection::Auto, start);
        assert_eq!(sim.forecast().len(), 24);
        timeline.push(sim.get_current_weather().unwrap().clone());
    }

    // the current hour after 24 single steps is the old tail's successor
    assert_eq!((timeline[24].timestamp - timeline[0].timestamp).num_hours(), 24);

    for pair in sim.forecast().windows(2).chain(timeline.windows(2)) {
        let dt = (*pair[1].temperature - *pair[0].temperature).abs();
        let dw = (*pair[1].wind_speed - *pair[0].wind_speed).abs();
        assert!(dt <= 30.0, "temperature jumped {dt:.1}°F at {}", pair[1].timestamp);
        assert!(dw <= 15.0, "wind jumped {dw:.1} mph at {}", pair[1].timestamp);
    }
}

#[test]
fn date_argument_does_not_rewind_timeline() {
    let start = at(2024, 2, 1, 0);
    let mut sim = WeatherSimulation::seeded(3);
    sim.initialize("mountain", SeasonSelection::Auto, start);
    let elsewhere = at(2030, 8, 8, 8);
    let current = sim.advance_time(2, "mountain", SeasonSelection::Auto, elsewhere);
    assert_eq!(current.timestamp, at(2024, 2, 1, 2));
}

#[test]
fn same_seed_reproduces_timeline() {
    let run = || {
        let mut sim = WeatherSimulation::seeded(99);
        sim.initialize("swamp", SeasonSelection::Auto, at(2024, 6, 1, 0));
        for _ in 0..5 {
            sim.advance_time(7, "swamp", SeasonSelection::Auto, at(2024, 6, 1, 0));
        }
        sim.forecast().to_vec()
    };
    assert_eq!(run(), run());
}
