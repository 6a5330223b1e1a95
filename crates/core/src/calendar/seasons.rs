//! Season resolution from calendar date and latitude

use crate::core_types::season::Season;
use chrono::{Datelike, NaiveDate};

/// Resolves the season for a date at a latitude
pub trait SeasonResolver {
    /// Season in effect on `date` at `latitude` (degrees, negative = south)
    fn resolve(&self, date: NaiveDate, latitude: f64) -> Season;
}

/// Meteorological seasons: whole months, flipped south of the equator
///
/// | Months  | North  | South  |
/// |---------|--------|--------|
/// | Dec-Feb | Winter | Summer |
/// | Mar-May | Spring | Fall   |
/// | Jun-Aug | Summer | Winter |
/// | Sep-Nov | Fall   | Spring |
#[derive(Debug, Clone, Copy, Default)]
pub struct MeteorologicalSeasons;

impl SeasonResolver for MeteorologicalSeasons {
    fn resolve(&self, date: NaiveDate, latitude: f64) -> Season {
        let northern = match date.month() {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        };
        if latitude < 0.0 {
            match northern {
                Season::Winter => Season::Summer,
                Season::Spring => Season::Fall,
                Season::Summer => Season::Winter,
                Season::Fall => Season::Spring,
            }
        } else {
            northern
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_northern_seasons() {
        let seasons = MeteorologicalSeasons;
        assert_eq!(seasons.resolve(date(2024, 1, 15), 45.0), Season::Winter);
        assert_eq!(seasons.resolve(date(2024, 4, 15), 45.0), Season::Spring);
        assert_eq!(seasons.resolve(date(2024, 7, 15), 45.0), Season::Summer);
        assert_eq!(seasons.resolve(date(2024, 10, 15), 45.0), Season::Fall);
        assert_eq!(seasons.resolve(date(2024, 12, 1), 45.0), Season::Winter);
    }

    #[test]
    fn test_southern_hemisphere_flips() {
        let seasons = MeteorologicalSeasons;
        assert_eq!(seasons.resolve(date(2024, 1, 15), -33.0), Season::Summer);
        assert_eq!(seasons.resolve(date(2024, 7, 15), -33.0), Season::Winter);
    }
}
