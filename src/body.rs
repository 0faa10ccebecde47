//! # Catalog data model
//!
//! Strongly-typed records of the assembled catalog:
//!
//! * [`CelestialBody`] – physical attributes and pole orientation of one body.
//! * [`OrbitalElements`] – osculating ecliptic J2000 elements of one body about its primary.
//! * [`EquatorialPole`] / [`EclipticPole`] – pole orientations in the two frames. They are
//!   separate types so that a pole expressed in one frame can never be read as the other;
//!   [`crate::ref_system`] is the only place converting between them.
//!
//! All quantities are SI (metres, seconds, m³/s²) and radians.
use serde::{Deserialize, Serialize};

use crate::constants::{GravParam, Meter, Radian, Second};

/// Plane in which the inclination and the node of an orbit are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferencePlane {
    Ecliptic,
    /// Equatorial plane of the primary
    Equatorial,
    /// Laplace plane of the satellite
    Laplace,
}

/// Pole orientation in the equatorial J2000 frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPole {
    pub right_ascension: Radian,
    pub declination: Radian,
}

impl EquatorialPole {
    pub fn new(right_ascension: Radian, declination: Radian) -> Self {
        EquatorialPole {
            right_ascension,
            declination,
        }
    }

    /// The antipodal pole (RA + π, −Dec).
    pub fn opposite(&self) -> Self {
        EquatorialPole {
            right_ascension: self.right_ascension + std::f64::consts::PI,
            declination: -self.declination,
        }
    }
}

/// Pole orientation in the ecliptic J2000 frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPole {
    pub longitude: Radian,
    pub latitude: Radian,
}

/// Physical attributes and pole orientation of a body.
///
/// Fields are filled incrementally by the catalog builder; a field already set is never
/// reset to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CelestialBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravitational_parameter: Option<GravParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<Meter>,
    /// Signed, negative for retrograde rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotational_period: Option<Second>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north_pole: Option<EquatorialPole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_pole: Option<EquatorialPole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbit: Option<OrbitalElements>,
}

impl CelestialBody {
    /// Pole used to orient satellite orbits: the positive pole, else the north pole.
    pub fn rotation_pole(&self) -> Option<&EquatorialPole> {
        self.positive_pole.as_ref().or(self.north_pole.as_ref())
    }
}

/// Osculating orbital elements in the ecliptic J2000 frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalElements {
    pub primary: String,
    pub semi_major_axis: Meter,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub longitude_of_ascending_node: Radian,
    pub argument_of_periapsis: Radian,
    pub mean_anomaly_at_epoch: Radian,
    /// Seconds relative to J2000
    pub epoch: Second,
}

/// Orbital elements as published, before reference-frame resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRecord {
    pub body: String,
    pub primary: String,
    pub reference_plane: ReferencePlane,
    pub semi_major_axis: Meter,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub longitude_of_ascending_node: Radian,
    pub argument_of_periapsis: Radian,
    pub mean_anomaly_at_epoch: Radian,
    pub epoch: Second,
}

impl OrbitRecord {
    /// Finalize with ecliptic inclination and node, consuming the record.
    pub fn into_ecliptic(self, inclination: Radian, longitude_of_ascending_node: Radian) -> OrbitalElements {
        OrbitalElements {
            primary: self.primary,
            semi_major_axis: self.semi_major_axis,
            eccentricity: self.eccentricity,
            inclination,
            longitude_of_ascending_node,
            argument_of_periapsis: self.argument_of_periapsis,
            mean_anomaly_at_epoch: self.mean_anomaly_at_epoch,
            epoch: self.epoch,
        }
    }
}

/// Physical attributes contributed by one record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicalAttributes {
    pub gravitational_parameter: Option<GravParam>,
    pub radius: Option<Meter>,
    pub rotational_period: Option<Second>,
}

#[cfg(test)]
mod body_test {
    use super::*;

    #[test]
    fn test_opposite_pole() {
        let pole = EquatorialPole::new(1.0, 0.5).opposite();
        assert_eq!(pole.right_ascension, 1.0 + std::f64::consts::PI);
        assert_eq!(pole.declination, -0.5);
    }

    #[test]
    fn test_rotation_pole_prefers_positive() {
        let mut body = CelestialBody {
            north_pole: Some(EquatorialPole::new(0.1, 0.2)),
            ..Default::default()
        };
        assert_eq!(body.rotation_pole(), Some(&EquatorialPole::new(0.1, 0.2)));
        body.positive_pole = Some(EquatorialPole::new(0.3, 0.4));
        assert_eq!(body.rotation_pole(), Some(&EquatorialPole::new(0.3, 0.4)));
    }

    #[test]
    fn test_unknown_fields_are_not_serialized() {
        let body = CelestialBody {
            radius: Some(1.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"radius":1.0}"#);
    }
}
