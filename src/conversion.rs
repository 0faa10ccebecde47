//! # Unit normalization
//!
//! Stateless per-field conversions from the source-native units of the archival tables
//! to SI units (metres, seconds, kilograms) and radians.
//!
//! A raw field is an `Option<f64>`: `None` stands for the *unknown* placeholder of a
//! table and is carried through every conversion untouched, it never becomes a
//! sentinel number.
//!
//! ## See also
//! ------------
//! * [`parse_field`] – Raw cell text → `Option<f64>` with placeholder handling.
//! * [`Unit::to_si`] / [`Unit::from_si`] – Scalar conversions.
use crate::{
    catalog_errors::{CatalogError, SourceId},
    constants::{
        AU_M, M_PER_KM, RADEG, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_JULIAN_CENTURY,
        SECONDS_PER_JULIAN_YEAR,
    },
};

/// Source-native units found in the tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Already SI or dimensionless
    Identity,
    Kilometer,
    AstronomicalUnit,
    /// Mass in units of 10²⁴ kg
    Kilogram1e24,
    /// Gravitational parameter in km³/s²
    KmCubedPerSecondSquared,
    /// Density in g/cm³
    GramPerCubicCentimeter,
    KilometerPerSecond,
    Hour,
    Day,
    JulianYear,
    Degree,
    DegreePerDay,
    /// Dimensionless rate per Julian century (eccentricity rate)
    PerCentury,
    AstronomicalUnitPerCentury,
    DegreePerCentury,
}

impl Unit {
    /// Multiplicative factor from this unit to its SI counterpart.
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Identity => 1.0,
            Unit::Kilometer => M_PER_KM,
            Unit::AstronomicalUnit => AU_M,
            Unit::Kilogram1e24 => 1e24,
            Unit::KmCubedPerSecondSquared => 1e9,
            Unit::GramPerCubicCentimeter => 1e3,
            Unit::KilometerPerSecond => M_PER_KM,
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Day => SECONDS_PER_DAY,
            Unit::JulianYear => SECONDS_PER_JULIAN_YEAR,
            Unit::Degree => RADEG,
            Unit::DegreePerDay => RADEG / SECONDS_PER_DAY,
            Unit::PerCentury => 1.0 / SECONDS_PER_JULIAN_CENTURY,
            Unit::AstronomicalUnitPerCentury => AU_M / SECONDS_PER_JULIAN_CENTURY,
            Unit::DegreePerCentury => RADEG / SECONDS_PER_JULIAN_CENTURY,
        }
    }

    pub fn to_si(&self, value: f64) -> f64 {
        match self {
            // exact conversion for angles, same as f64::to_radians
            Unit::Degree => value.to_radians(),
            // rates: convert the numerator first, then divide by the century
            Unit::AstronomicalUnitPerCentury => value * AU_M / SECONDS_PER_JULIAN_CENTURY,
            Unit::DegreePerCentury => value.to_radians() / SECONDS_PER_JULIAN_CENTURY,
            Unit::PerCentury => value / SECONDS_PER_JULIAN_CENTURY,
            _ => value * self.factor(),
        }
    }

    pub fn from_si(&self, value: f64) -> f64 {
        match self {
            Unit::Degree => value.to_degrees(),
            Unit::AstronomicalUnitPerCentury => value * SECONDS_PER_JULIAN_CENTURY / AU_M,
            Unit::DegreePerCentury => (value * SECONDS_PER_JULIAN_CENTURY).to_degrees(),
            Unit::PerCentury => value * SECONDS_PER_JULIAN_CENTURY,
            _ => value / self.factor(),
        }
    }

    /// Convert an optional raw field; unknown stays unknown.
    pub fn convert(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| self.to_si(v))
    }
}

/// Strip the precision suffix of a cell (`12.3±0.4`, `12.3 &#177; 0.4`, `12.3 +/- 0.4`).
fn strip_precision(text: &str) -> &str {
    ["&#177;", "±", "+/-", "&plusmn;"]
        .iter()
        .filter_map(|marker| text.find(marker))
        .min()
        .map_or(text, |cut| &text[..cut])
}

/// Parse a raw numeric cell.
///
/// Arguments
/// ---------
/// * `document`: the source document, reported on failure.
/// * `field`: name of the field, reported on failure.
/// * `text`: the raw cell text.
/// * `placeholders`: tokens meaning "unknown value".
///
/// Return
/// ------
/// * `Ok(None)` for a placeholder, `Ok(Some(v))` for a number, or
///   [`CatalogError::UnitConversion`] when the cell is neither.
pub fn parse_field(
    document: &SourceId,
    field: &str,
    text: &str,
    placeholders: &[String],
) -> Result<Option<f64>, CatalogError> {
    let value = strip_precision(text).trim();
    if placeholders.iter().any(|p| p.trim() == value) {
        return Ok(None);
    }

    // thousands separators appear in some tables
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| CatalogError::UnitConversion {
            document: document.clone(),
            field: field.to_string(),
            value: text.trim().to_string(),
        })
}

/// Same as [`parse_field`] but the value may not be unknown.
pub fn parse_required(
    document: &SourceId,
    field: &str,
    text: &str,
    placeholders: &[String],
) -> Result<f64, CatalogError> {
    parse_field(document, field, text, placeholders)?.ok_or_else(|| {
        CatalogError::UnitConversion {
            document: document.clone(),
            field: field.to_string(),
            value: text.trim().to_string(),
        }
    })
}
