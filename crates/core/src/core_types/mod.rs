//! Core types and utilities

pub mod condition;
pub mod forecast;
pub mod season;
pub mod units;

pub use condition::*;
pub use forecast::*;
pub use season::*;
pub use units::*;
