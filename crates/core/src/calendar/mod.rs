//! Calendar collaborators: season resolution and daylight
//!
//! Both are traits so a host application can swap in its own calendar or an
//! astronomical sunrise/sunset model; the defaults are deliberately simple.

mod seasons;
mod solar;

pub use seasons::{MeteorologicalSeasons, SeasonResolver};
pub use solar::{Daylight, SimpleSolarModel, SolarProvider};
