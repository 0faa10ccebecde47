//! # Normalized records
//!
//! Every raw record is normalized exactly once into a [`NormalizedRecord`]: SI units,
//! radians, epochs in seconds from J2000, sign conventions applied. The assembler never
//! looks at the source of a record; it only asks for its capabilities:
//!
//! * [`HasPhysics`] – physical attributes (gravitational parameter, radius, rotation),
//! * [`HasPole`] – north pole of rotation in the equatorial frame,
//! * [`HasOrbit`] – published orbital elements, in whatever reference plane.
//!
//! Each record keeps the derived quantities its source provides (rates, precession
//! periods, magnitudes) even when the catalog does not emit them.
use crate::{
    body::{EquatorialPole, OrbitRecord, PhysicalAttributes},
    constants::{Meter, Radian, Second},
    sources::planet_elements::ElementsTable,
};

pub trait HasPhysics {
    fn physics(&self) -> Option<PhysicalAttributes> {
        None
    }
}

pub trait HasPole {
    /// North pole of rotation (IAU definition), equatorial J2000.
    fn north_pole(&self) -> Option<EquatorialPole> {
        None
    }
}

pub trait HasOrbit {
    fn orbit(&self) -> Option<&OrbitRecord> {
        None
    }
}

/// Planet from the planetary physical parameter table.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPhysics {
    pub name: String,
    pub physics: PhysicalAttributes,
    pub equatorial_radius: Option<Meter>,
    /// kg/m³
    pub bulk_density: Option<f64>,
    pub sidereal_orbit_period: Option<Second>,
    pub magnitude: Option<f64>,
    pub geometric_albedo: Option<f64>,
    /// m/s²
    pub equatorial_gravity: Option<f64>,
    /// m/s
    pub escape_velocity: Option<f64>,
}

/// Pole of rotation from a fact sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct FactsheetPole {
    pub name: String,
    pub north_pole: Option<EquatorialPole>,
}

/// Rates of change of the planetary mean elements, per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRates {
    /// m/s
    pub semi_major_axis: f64,
    /// 1/s
    pub eccentricity: f64,
    /// rad/s
    pub inclination: f64,
    pub mean_longitude: f64,
    pub longitude_of_periapsis: f64,
    pub longitude_of_ascending_node: f64,
}

/// Planet orbit from a planetary mean element table, at J2000.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetOrbit {
    pub table: ElementsTable,
    pub orbit: OrbitRecord,
    pub rates: ElementRates,
}

/// Satellite from the satellite physical parameter table.
#[derive(Debug, Clone, PartialEq)]
pub struct SatellitePhysics {
    pub name: String,
    pub primary: String,
    pub physics: PhysicalAttributes,
    /// kg/m³
    pub mean_density: Option<f64>,
    pub magnitude: Option<f64>,
    pub geometric_albedo: Option<f64>,
}

/// Satellite orbit from the satellite orbital element table.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteOrbit {
    pub orbit: OrbitRecord,
    /// rad/s
    pub longitude_rate: Option<f64>,
    pub period: Option<Second>,
    pub argument_of_periapsis_precession_period: Option<Second>,
    pub longitude_of_ascending_node_precession_period: Option<Second>,
    pub laplace_pole: Option<EquatorialPole>,
    pub laplace_tilt: Option<Radian>,
}

/// Small body from the small-body database.
#[derive(Debug, Clone, PartialEq)]
pub struct SmallBody {
    pub name: String,
    pub physics: PhysicalAttributes,
    pub north_pole: Option<EquatorialPole>,
    pub orbit: OrbitRecord,
    pub periapsis: Option<Meter>,
    pub apoapsis: Option<Meter>,
    pub orbital_period: Option<Second>,
    /// rad/s
    pub mean_motion: Option<f64>,
    pub absolute_magnitude: Option<f64>,
    pub magnitude_slope: Option<f64>,
    /// kg/m³
    pub bulk_density: Option<f64>,
    pub geometric_albedo: Option<f64>,
}

impl HasPhysics for PlanetPhysics {
    fn physics(&self) -> Option<PhysicalAttributes> {
        Some(self.physics)
    }
}
impl HasPole for PlanetPhysics {}
impl HasOrbit for PlanetPhysics {}

impl HasPhysics for FactsheetPole {}
impl HasPole for FactsheetPole {
    fn north_pole(&self) -> Option<EquatorialPole> {
        self.north_pole
    }
}
impl HasOrbit for FactsheetPole {}

impl HasPhysics for PlanetOrbit {}
impl HasPole for PlanetOrbit {}
impl HasOrbit for PlanetOrbit {
    fn orbit(&self) -> Option<&OrbitRecord> {
        Some(&self.orbit)
    }
}

impl HasPhysics for SatellitePhysics {
    fn physics(&self) -> Option<PhysicalAttributes> {
        Some(self.physics)
    }
}
impl HasPole for SatellitePhysics {}
impl HasOrbit for SatellitePhysics {}

impl HasPhysics for SatelliteOrbit {}
impl HasPole for SatelliteOrbit {}
impl HasOrbit for SatelliteOrbit {
    fn orbit(&self) -> Option<&OrbitRecord> {
        Some(&self.orbit)
    }
}

impl HasPhysics for SmallBody {
    fn physics(&self) -> Option<PhysicalAttributes> {
        Some(self.physics)
    }
}
impl HasPole for SmallBody {
    fn north_pole(&self) -> Option<EquatorialPole> {
        self.north_pole
    }
}
impl HasOrbit for SmallBody {
    fn orbit(&self) -> Option<&OrbitRecord> {
        Some(&self.orbit)
    }
}

/// Normalized record of any source.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    PlanetPhysics(PlanetPhysics),
    Factsheet(FactsheetPole),
    PlanetOrbit(PlanetOrbit),
    SatellitePhysics(SatellitePhysics),
    SatelliteOrbit(SatelliteOrbit),
    SmallBody(SmallBody),
}

macro_rules! dispatch {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            NormalizedRecord::PlanetPhysics($inner) => $body,
            NormalizedRecord::Factsheet($inner) => $body,
            NormalizedRecord::PlanetOrbit($inner) => $body,
            NormalizedRecord::SatellitePhysics($inner) => $body,
            NormalizedRecord::SatelliteOrbit($inner) => $body,
            NormalizedRecord::SmallBody($inner) => $body,
        }
    };
}

impl NormalizedRecord {
    /// Name of the body the record describes, as published.
    pub fn name(&self) -> &str {
        match self {
            NormalizedRecord::PlanetPhysics(r) => &r.name,
            NormalizedRecord::Factsheet(r) => &r.name,
            NormalizedRecord::PlanetOrbit(r) => &r.orbit.body,
            NormalizedRecord::SatellitePhysics(r) => &r.name,
            NormalizedRecord::SatelliteOrbit(r) => &r.orbit.body,
            NormalizedRecord::SmallBody(r) => &r.name,
        }
    }
}

impl HasPhysics for NormalizedRecord {
    fn physics(&self) -> Option<PhysicalAttributes> {
        dispatch!(self, r => r.physics())
    }
}

impl HasPole for NormalizedRecord {
    fn north_pole(&self) -> Option<EquatorialPole> {
        dispatch!(self, r => r.north_pole())
    }
}

impl HasOrbit for NormalizedRecord {
    fn orbit(&self) -> Option<&OrbitRecord> {
        dispatch!(self, r => r.orbit())
    }
}

#[cfg(test)]
mod records_test {
    use super::*;
    use crate::body::ReferencePlane;

    fn orbit(body: &str) -> OrbitRecord {
        OrbitRecord {
            body: body.into(),
            primary: "Mars".into(),
            reference_plane: ReferencePlane::Laplace,
            semi_major_axis: 9.376e6,
            eccentricity: 0.0151,
            inclination: 0.02,
            longitude_of_ascending_node: 1.0,
            argument_of_periapsis: 2.0,
            mean_anomaly_at_epoch: 3.0,
            epoch: 0.0,
        }
    }

    #[test]
    fn test_capabilities() {
        let pole = NormalizedRecord::Factsheet(FactsheetPole {
            name: "Mars".into(),
            north_pole: Some(EquatorialPole::new(5.5, 0.9)),
        });
        assert_eq!(pole.name(), "Mars");
        assert!(pole.physics().is_none());
        assert!(pole.orbit().is_none());
        assert_eq!(pole.north_pole(), Some(EquatorialPole::new(5.5, 0.9)));

        let phobos = NormalizedRecord::SatelliteOrbit(SatelliteOrbit {
            orbit: orbit("Phobos"),
            longitude_rate: None,
            period: None,
            argument_of_periapsis_precession_period: None,
            longitude_of_ascending_node_precession_period: None,
            laplace_pole: None,
            laplace_tilt: None,
        });
        assert_eq!(phobos.name(), "Phobos");
        assert_eq!(phobos.orbit().map(|o| o.primary.as_str()), Some("Mars"));
        assert!(phobos.north_pole().is_none());
    }
}
