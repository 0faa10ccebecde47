//! # Constants and type definitions for the solar catalog
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **type aliases** shared by the extractors, the unit normalizer and the frame
//! resolvers.
//!
//! ## Overview
//!
//! - Astronomical constants (astronomical unit, J2000 obliquity)
//! - Time conversions (day, Julian year, Julian century in seconds)
//! - Unit aliases documenting the unit carried by a bare `f64`
//!
//! Everything in the assembled catalog is expressed in SI units (metres, seconds,
//! kilograms) and radians.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Number of seconds in a Julian year
pub const SECONDS_PER_JULIAN_YEAR: f64 = DAYS_PER_JULIAN_YEAR * SECONDS_PER_DAY;

/// Number of seconds in a Julian century (36525 days)
pub const SECONDS_PER_JULIAN_CENTURY: f64 = 36_525.0 * SECONDS_PER_DAY;

/// Astronomical Unit in metres (IAU 2012)
pub const AU_M: f64 = 149_597_870_700.0;

/// Metres per kilometre
pub const M_PER_KM: f64 = 1e3;

/// Julian date of J2000.0 (2000-01-01 12:00:00)
pub const JD_J2000: f64 = 2_451_545.0;

/// Mean obliquity of the ecliptic at J2000 (23°26'21.406", radians)
pub const OBLIQUITY_J2000: f64 = 0.40910517666747087;

/// Threshold below which the sine of a spherical-triangle side is considered zero
pub const GEOMETRY_EPS: f64 = 1e-12;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration in seconds (signed)
pub type Second = f64;
/// Gravitational parameter in m³/s²
pub type GravParam = f64;

/// Canonical body name used as the catalog key
pub type BodyName = String;

/// Name of the Sun in the catalog
pub const SUN: &str = "Sun";
