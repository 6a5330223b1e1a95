//! Semantic unit types for type-safe meteorological quantities
//!
//! This module provides newtype wrappers for the scalar quantities the
//! weather engine passes between services, so that a humidity percentage
//! can never be handed to something expecting a pressure in hectopascals.
//!
//! # Design Philosophy
//! - All types wrap `f64`; hourly simulation state is small and precision is free
//! - Implements common traits (Add, Sub, Ord, Display, etc.) where they are meaningful
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Private inner fields with constructors; bounded types clamp instead of panicking
//!   so that malformed inputs degrade gracefully
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use weather_sim_core::core_types::units::{Fahrenheit, Percent};
//!
//! let temp = Fahrenheit::new(68.0);
//! assert!((*temp.to_celsius() - 20.0).abs() < 0.01);
//!
//! let humidity = Percent::clamped(140.0);
//! assert_eq!(*humidity, 100.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Sub};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Replace NaN/inf with a fallback so downstream arithmetic stays finite
#[inline]
fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(f64);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fahrenheit {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fahrenheit {
    /// Water freezing point
    pub const FREEZING: Fahrenheit = Fahrenheit(32.0);

    /// Create a new temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Fahrenheit(value)
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - 32.0) * 5.0 / 9.0)
    }

    /// Clamp into `[min, max]`
    #[inline]
    #[must_use]
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        Fahrenheit(self.0.clamp(min, max))
    }
}

impl From<f64> for Fahrenheit {
    fn from(v: f64) -> Self {
        Fahrenheit(v)
    }
}

impl From<Fahrenheit> for f64 {
    fn from(t: Fahrenheit) -> f64 {
        t.0
    }
}

impl Add<f64> for Fahrenheit {
    type Output = Fahrenheit;
    fn add(self, rhs: f64) -> Fahrenheit {
        Fahrenheit(self.0 + rhs)
    }
}

impl Sub<f64> for Fahrenheit {
    type Output = Fahrenheit;
    fn sub(self, rhs: f64) -> Fahrenheit {
        Fahrenheit(self.0 - rhs)
    }
}

/// Difference between two temperatures (°F)
impl Sub for Fahrenheit {
    type Output = f64;
    fn sub(self, rhs: Fahrenheit) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°F", self.0)
    }
}

/// Temperature in degrees Celsius (display/interop only)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Convert to Fahrenheit
    #[inline]
    #[must_use]
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * 9.0 / 5.0 + 32.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// RATIOS
// ============================================================================

/// A percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Zero percent
    pub const ZERO: Percent = Percent(0.0);

    /// Create a new percentage without clamping
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Create a percentage clamped into `[0, 100]`; NaN becomes 50
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        Percent(finite_or(value, 50.0).clamp(0.0, 100.0))
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to fraction (0-1)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> Fraction {
        Fraction::new(self.0 / 100.0)
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl From<Percent> for f64 {
    fn from(p: Percent) -> f64 {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

/// A fraction in the range [0, 1]
///
/// Used for bounded profile modifiers (maritime influence, terrain roughness,
/// special factors). Construction clamps so that hand-written profiles can
/// never carry an out-of-range modifier into the model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f64);

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Fraction {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Fraction {
    /// Zero fraction
    pub const ZERO: Fraction = Fraction(0.0);

    /// Full/complete (1.0)
    pub const ONE: Fraction = Fraction(1.0);

    /// Create a new fraction clamped into `[0, 1]`; NaN becomes 0
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Fraction(finite_or(value, 0.0).clamp(0.0, 1.0))
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to percentage (0-100)
    #[inline]
    #[must_use]
    pub fn to_percent(self) -> Percent {
        Percent(self.0 * 100.0)
    }
}

impl From<f64> for Fraction {
    fn from(v: f64) -> Self {
        Fraction::new(v)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> f64 {
        f.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Sea-level adjusted pressure in hectopascals (millibars)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hectopascals(f64);

impl Eq for Hectopascals {}

impl PartialOrd for Hectopascals {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hectopascals {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Hectopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Hectopascals {
    /// Standard sea-level pressure
    pub const STANDARD: Hectopascals = Hectopascals(1013.25);

    /// Lowest pressure the model produces
    pub const MIN: f64 = 970.0;

    /// Highest pressure the model produces
    pub const MAX: f64 = 1050.0;

    /// Create a new pressure value without clamping
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Hectopascals(value)
    }

    /// Create a pressure clamped into the modelled range; NaN becomes standard pressure
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        Hectopascals(finite_or(value, Self::STANDARD.0).clamp(Self::MIN, Self::MAX))
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Hectopascals {
    fn from(v: f64) -> Self {
        Hectopascals(v)
    }
}

impl From<Hectopascals> for f64 {
    fn from(p: Hectopascals) -> f64 {
        p.0
    }
}

impl fmt::Display for Hectopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} hPa", self.0)
    }
}

// ============================================================================
// SPEED & DISTANCE
// ============================================================================

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MilesPerHour(f64);

impl Eq for MilesPerHour {}

impl PartialOrd for MilesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MilesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MilesPerHour {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MilesPerHour {
    /// Create a new speed (negative values clamp to zero)
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        MilesPerHour(finite_or(value, 0.0).max(0.0))
    }

    /// Get the raw value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> f64 {
        self.0 * 1.609_344
    }
}

impl From<f64> for MilesPerHour {
    fn from(v: f64) -> Self {
        MilesPerHour::new(v)
    }
}

impl From<MilesPerHour> for f64 {
    fn from(s: MilesPerHour) -> f64 {
        s.0
    }
}

impl AddAssign<f64> for MilesPerHour {
    fn add_assign(&mut self, rhs: f64) {
        self.0 = (self.0 + rhs).max(0.0);
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} mph", self.0)
    }
}

/// Elevation in feet above sea level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Feet(f64);

impl Deref for Feet {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Feet {
    /// Sea level
    pub const SEA_LEVEL: Feet = Feet(0.0);

    /// Create a new elevation
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Feet(value)
    }

    /// Elevation in thousands of feet (the unit lapse rates are quoted in)
    #[inline]
    #[must_use]
    pub fn thousands(self) -> f64 {
        self.0 / 1000.0
    }
}

impl From<f64> for Feet {
    fn from(v: f64) -> Self {
        Feet(v)
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} ft", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_celsius_conversion() {
        let boiling = Fahrenheit::new(212.0);
        assert!((*boiling.to_celsius() - 100.0).abs() < 1e-9);
        let back = Celsius::new(-40.0).to_fahrenheit();
        assert!((*back + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounded_types_clamp() {
        assert_eq!(*Percent::clamped(-5.0), 0.0);
        assert_eq!(*Percent::clamped(f64::NAN), 50.0);
        assert_eq!(*Fraction::new(1.7), 1.0);
        assert_eq!(*Fraction::new(f64::NAN), 0.0);
        assert_eq!(*Hectopascals::clamped(900.0), Hectopascals::MIN);
        assert_eq!(*Hectopascals::clamped(1100.0), Hectopascals::MAX);
        assert_eq!(*MilesPerHour::new(-3.0), 0.0);
    }

    #[test]
    fn test_total_ordering() {
        let cold = Fahrenheit::new(10.0);
        let warm = Fahrenheit::new(80.0);
        assert_eq!(cold.max(warm), warm);
        assert!(Percent::new(20.0) < Percent::new(30.0));
    }
}
