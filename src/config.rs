//! # Catalog configuration
//!
//! [`CatalogConfig`] gathers every constant the pipeline needs beyond the source
//! documents themselves: the obliquity used by the pole resolver, the Sun's physical
//! data (no source document covers it), name aliases, the dwarf planets looked up in the
//! small-body database, authoritative radius overrides, sign conventions and the
//! satellite-system headings of the satellite tables.
//!
//! The defaults reproduce the published catalog. A configuration can be loaded from JSON;
//! missing keys fall back to their defaults.
//!
//! ```rust, no_run
//! use solar_catalog::config::CatalogConfig;
//!
//! let config = CatalogConfig::from_json_str(r#"{ "dwarf_planets": ["Ceres"] }"#).unwrap();
//! assert_eq!(config.dwarf_planets, vec!["Ceres".to_string()]);
//! ```
use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    body::PhysicalAttributes,
    catalog_errors::CatalogError,
    constants::{Radian, OBLIQUITY_J2000},
    frame_resolver::LaplaceConvention,
};

/// Physical data of the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPhysics {
    pub gravitational_parameter: f64,
    pub radius: f64,
    pub rotational_period: f64,
}

impl Default for SunPhysics {
    fn default() -> Self {
        SunPhysics {
            gravitational_parameter: 1.3271244018e20,
            radius: 6.96e8,
            rotational_period: 2192832.0,
        }
    }
}

impl From<SunPhysics> for PhysicalAttributes {
    fn from(sun: SunPhysics) -> Self {
        PhysicalAttributes {
            gravitational_parameter: Some(sun.gravitational_parameter),
            radius: Some(sun.radius),
            rotational_period: Some(sun.rotational_period),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Obliquity of the ecliptic (radians)
    pub obliquity: Radian,
    pub sun: SunPhysics,
    /// Source label → canonical body name
    pub aliases: BTreeMap<String, String>,
    /// Dwarf planets read from the small-body database, in processing order
    pub dwarf_planets: Vec<String>,
    /// Authoritative radii (metres)
    pub radius_overrides: BTreeMap<String, f64>,
    /// Bodies whose negative rotation period is forced positive
    pub prograde_rotation_bodies: Vec<String>,
    /// Retrograde rotators whose listed pole is kept as the positive pole
    pub positive_pole_exemptions: Vec<String>,
    /// Heading of a satellite physical table → primary
    pub satellite_systems: BTreeMap<String, String>,
    /// Primary → epoch used when a satellite element block has none
    pub default_epochs: BTreeMap<String, String>,
    /// Cell contents meaning "unknown value"
    pub unknown_placeholders: Vec<String>,
    pub laplace_convention: LaplaceConvention,
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            obliquity: OBLIQUITY_J2000,
            sun: SunPhysics::default(),
            aliases: string_map(&[("EM Bary", "Earth")]),
            dwarf_planets: ["Ceres", "Pluto", "Sedna", "Haumea", "Makemake", "Eris"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            radius_overrides: [
                ("Ceres", 473e3),
                ("Pluto", 1188.3e3),
                ("Sedna", 500e3),
                ("Haumea", 798e3),
                ("Makemake", 715e3),
                ("Eris", 1163e3),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
            prograde_rotation_bodies: vec!["Pluto".into()],
            positive_pole_exemptions: vec!["Uranus".into()],
            satellite_systems: string_map(&[
                ("Earth's Moon", "Earth"),
                ("Martian System", "Mars"),
                ("Jovian System", "Jupiter"),
                ("Saturnian System", "Saturn"),
                ("Uranian Satellites", "Uranus"),
                ("Neptunian Satellites", "Neptune"),
                ("Pluto's Satellites", "Pluto"),
            ]),
            default_epochs: string_map(&[("Pluto", "2013 Jan. 1.00 TT")]),
            unknown_placeholders: vec!["?".into(), "-".into(), "—".into(), "".into()],
            laplace_convention: LaplaceConvention::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Canonical name of a source label.
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, |alias| alias.as_str())
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if !(self.obliquity.is_finite() && self.obliquity.abs() < std::f64::consts::FRAC_PI_2) {
            return Err(CatalogError::InvalidConfig(format!(
                "obliquity out of range: {}",
                self.obliquity
            )));
        }
        if let Some((name, radius)) = self
            .radius_overrides
            .iter()
            .find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(CatalogError::InvalidConfig(format!(
                "radius override for {name} must be positive, got {radius}"
            )));
        }
        if let Some((alias, _)) = self.aliases.iter().find(|(k, v)| k == v) {
            return Err(CatalogError::InvalidConfig(format!(
                "alias '{alias}' maps to itself"
            )));
        }
        Ok(())
    }
}
