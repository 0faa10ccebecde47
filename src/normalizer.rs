//! # Record normalization
//!
//! Turns the raw records of the extractors into [`NormalizedRecord`]s, applying the unit
//! conversions of [`crate::conversion::Unit`] and the source-specific fix-ups:
//!
//! * gravitational parameters of the planets are `G × mass`, with the `G` stated by the
//!   same document;
//! * the rotation period of the bodies listed in
//!   [`CatalogConfig::prograde_rotation_bodies`] is made positive (IAU positive pole
//!   convention for dwarf planets);
//! * planetary mean elements give the mean longitude and the longitude of periapsis,
//!   from which `M = L − ϖ` and `ω = ϖ − Ω`;
//! * satellite epochs and small-body Julian dates become seconds from J2000.
use crate::{
    body::{EquatorialPole, OrbitRecord, PhysicalAttributes, ReferencePlane},
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId},
    config::CatalogConfig,
    constants::SUN,
    conversion::Unit,
    records::{
        ElementRates, FactsheetPole, NormalizedRecord, PlanetOrbit, PlanetPhysics, SatelliteOrbit,
        SatellitePhysics, SmallBody,
    },
    sources::{
        factsheet::FactsheetRow, planet_elements::PlanetElementsRow,
        planet_phys_par::PlanetPhysParRow, sat_elements::SatElementsRow,
        sat_phys_par::SatPhysParRow, sbdb::SbdbRow, RawRecord,
    },
    time::{jd_tdb_to_seconds, satellite_epoch_to_seconds},
};

/// Normalization context shared by the records of one build.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    config: &'a CatalogConfig,
    /// Gravitational constant of the planetary physical parameter table (m³ kg⁻¹ s⁻²)
    gravitational_constant: f64,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a CatalogConfig, gravitational_constant: f64) -> Self {
        Normalizer {
            config,
            gravitational_constant,
        }
    }

    fn rotation_period(&self, name: &str, period: Option<f64>) -> Option<f64> {
        if self.config.prograde_rotation_bodies.iter().any(|b| b == name) {
            period.map(f64::abs)
        } else {
            period
        }
    }

    pub fn planet_physics(&self, row: PlanetPhysParRow) -> PlanetPhysics {
        let physics = PhysicalAttributes {
            gravitational_parameter: Unit::Kilogram1e24
                .convert(row.mass)
                .map(|mass| self.gravitational_constant * mass),
            radius: Unit::Kilometer.convert(row.mean_radius),
            rotational_period: self.rotation_period(&row.name, Unit::Day.convert(row.sidereal_rotation_period)),
        };
        PlanetPhysics {
            physics,
            equatorial_radius: Unit::Kilometer.convert(row.equatorial_radius),
            bulk_density: Unit::GramPerCubicCentimeter.convert(row.bulk_density),
            sidereal_orbit_period: Unit::JulianYear.convert(row.sidereal_orbit_period),
            magnitude: row.magnitude,
            geometric_albedo: row.geometric_albedo,
            equatorial_gravity: row.equatorial_gravity,
            escape_velocity: Unit::KilometerPerSecond.convert(row.escape_velocity),
            name: row.name,
        }
    }

    pub fn factsheet(&self, row: FactsheetRow) -> FactsheetPole {
        let north_pole = match (row.north_pole_right_ascension, row.north_pole_declination) {
            (Some(ra), Some(dec)) => Some(EquatorialPole::new(Unit::Degree.to_si(ra), Unit::Degree.to_si(dec))),
            _ => None,
        };
        FactsheetPole {
            name: row.name,
            north_pole,
        }
    }

    pub fn planet_elements(&self, row: PlanetElementsRow) -> PlanetOrbit {
        let deg = |v: f64| Unit::Degree.to_si(v);
        let deg_rate = |v: f64| Unit::DegreePerCentury.to_si(v);

        let mean_longitude = deg(row.mean_longitude.value);
        let longitude_of_periapsis = deg(row.longitude_of_periapsis.value);
        let longitude_of_ascending_node = deg(row.longitude_of_ascending_node.value);

        PlanetOrbit {
            table: row.table,
            rates: ElementRates {
                semi_major_axis: Unit::AstronomicalUnitPerCentury.to_si(row.semi_major_axis.rate),
                eccentricity: Unit::PerCentury.to_si(row.eccentricity.rate),
                inclination: deg_rate(row.inclination.rate),
                mean_longitude: deg_rate(row.mean_longitude.rate),
                longitude_of_periapsis: deg_rate(row.longitude_of_periapsis.rate),
                longitude_of_ascending_node: deg_rate(row.longitude_of_ascending_node.rate),
            },
            orbit: OrbitRecord {
                body: row.name,
                primary: SUN.to_string(),
                reference_plane: ReferencePlane::Ecliptic,
                semi_major_axis: Unit::AstronomicalUnit.to_si(row.semi_major_axis.value),
                eccentricity: row.eccentricity.value,
                inclination: deg(row.inclination.value),
                longitude_of_ascending_node,
                argument_of_periapsis: longitude_of_periapsis - longitude_of_ascending_node,
                mean_anomaly_at_epoch: mean_longitude - longitude_of_periapsis,
                epoch: 0.0,
            },
        }
    }

    pub fn satellite_physics(&self, row: SatPhysParRow) -> SatellitePhysics {
        SatellitePhysics {
            physics: PhysicalAttributes {
                gravitational_parameter: Unit::KmCubedPerSecondSquared.convert(row.gravitational_parameter),
                radius: Unit::Kilometer.convert(row.mean_radius),
                rotational_period: None,
            },
            mean_density: Unit::GramPerCubicCentimeter.convert(row.mean_density),
            magnitude: row.magnitude,
            geometric_albedo: row.geometric_albedo,
            name: row.name,
            primary: row.primary,
        }
    }

    pub fn satellite_elements(&self, document: &SourceId, row: SatElementsRow) -> Result<SatelliteOrbit, CatalogError> {
        let epoch = satellite_epoch_to_seconds(&row.epoch)
            .ok_or_else(|| ParseError::new(document, ParseErrorKind::InvalidEpoch, &row.epoch))?;
        let deg = |v: f64| Unit::Degree.to_si(v);

        Ok(SatelliteOrbit {
            longitude_rate: Unit::DegreePerDay.convert(row.longitude_rate),
            period: Unit::Day.convert(row.period),
            argument_of_periapsis_precession_period: Unit::JulianYear
                .convert(row.argument_of_periapsis_precession_period),
            longitude_of_ascending_node_precession_period: Unit::JulianYear
                .convert(row.longitude_of_ascending_node_precession_period),
            laplace_pole: row
                .laplace_pole
                .map(|p| EquatorialPole::new(deg(p.right_ascension), deg(p.declination))),
            laplace_tilt: row.laplace_pole.map(|p| deg(p.tilt)),
            orbit: OrbitRecord {
                body: row.name,
                primary: row.primary,
                reference_plane: row.reference_plane,
                semi_major_axis: Unit::Kilometer.to_si(row.semi_major_axis),
                eccentricity: row.eccentricity,
                inclination: deg(row.inclination),
                longitude_of_ascending_node: deg(row.longitude_of_ascending_node),
                argument_of_periapsis: deg(row.argument_of_periapsis),
                mean_anomaly_at_epoch: deg(row.mean_anomaly_at_epoch),
                epoch,
            },
        })
    }

    pub fn small_body(&self, row: SbdbRow) -> SmallBody {
        let deg = |v: f64| Unit::Degree.to_si(v);
        let au = |v: f64| Unit::AstronomicalUnit.to_si(v);

        SmallBody {
            physics: PhysicalAttributes {
                gravitational_parameter: Unit::KmCubedPerSecondSquared.convert(row.gravitational_parameter),
                radius: Unit::Kilometer.convert(row.diameter).map(|d| d / 2.0),
                rotational_period: self.rotation_period(&row.name, Unit::Hour.convert(row.rotation_period)),
            },
            north_pole: row.pole.map(|(ra, dec)| EquatorialPole::new(deg(ra), deg(dec))),
            orbit: OrbitRecord {
                body: row.name.clone(),
                primary: SUN.to_string(),
                reference_plane: ReferencePlane::Ecliptic,
                semi_major_axis: au(row.semi_major_axis),
                eccentricity: row.eccentricity,
                inclination: deg(row.inclination),
                longitude_of_ascending_node: deg(row.longitude_of_ascending_node),
                argument_of_periapsis: deg(row.argument_of_periapsis),
                mean_anomaly_at_epoch: deg(row.mean_anomaly_at_epoch),
                epoch: jd_tdb_to_seconds(row.epoch_jd),
            },
            periapsis: row.periapsis.map(au),
            apoapsis: row.apoapsis.map(au),
            orbital_period: Unit::Day.convert(row.orbital_period),
            mean_motion: Unit::DegreePerDay.convert(row.mean_motion),
            absolute_magnitude: row.absolute_magnitude,
            magnitude_slope: row.magnitude_slope,
            bulk_density: Unit::GramPerCubicCentimeter.convert(row.bulk_density),
            geometric_albedo: row.geometric_albedo,
            name: row.name,
        }
    }

    /// Normalize a raw record of any source.
    ///
    /// Only satellite epochs can fail, with [`ParseErrorKind::InvalidEpoch`].
    pub fn normalize(&self, document: &SourceId, raw: RawRecord) -> Result<NormalizedRecord, CatalogError> {
        Ok(match raw {
            RawRecord::PlanetPhysPar(row) => NormalizedRecord::PlanetPhysics(self.planet_physics(row)),
            RawRecord::Factsheet(row) => NormalizedRecord::Factsheet(self.factsheet(row)),
            RawRecord::PlanetElements(row) => NormalizedRecord::PlanetOrbit(self.planet_elements(row)),
            RawRecord::SatPhysPar(row) => NormalizedRecord::SatellitePhysics(self.satellite_physics(row)),
            RawRecord::SatElements(row) => {
                NormalizedRecord::SatelliteOrbit(self.satellite_elements(document, row)?)
            }
            RawRecord::Sbdb(row) => NormalizedRecord::SmallBody(self.small_body(row)),
        })
    }
}

#[cfg(test)]
mod normalizer_test {
    use super::*;
    use crate::{
        catalog_errors::SourceKind,
        constants::{AU_M, SECONDS_PER_DAY},
        sources::{
            planet_elements::{ElementsTable, RatedElement},
            sat_elements::LaplacePole,
        },
    };
    use approx::assert_relative_eq;

    const G: f64 = 6.6743e-11;

    fn planet(name: &str, mass: Option<f64>, rotation: Option<f64>) -> PlanetPhysParRow {
        PlanetPhysParRow {
            name: name.into(),
            equatorial_radius: Some(71492.0),
            mean_radius: Some(69911.0),
            mass,
            bulk_density: Some(1.326),
            sidereal_rotation_period: rotation,
            sidereal_orbit_period: Some(11.862),
            magnitude: Some(-9.4),
            geometric_albedo: None,
            equatorial_gravity: Some(24.79),
            escape_velocity: Some(59.5),
        }
    }

    #[test]
    fn test_jupiter_physics() {
        let config = CatalogConfig::default();
        let jupiter = Normalizer::new(&config, G).planet_physics(planet("Jupiter", Some(1898.19), Some(0.41354)));

        assert_eq!(jupiter.physics.radius, Some(69_911_000.0));
        assert_relative_eq!(
            jupiter.physics.gravitational_parameter.unwrap(),
            G * 1898.19e24,
            max_relative = 1e-15
        );
        assert_relative_eq!(jupiter.physics.rotational_period.unwrap(), 0.41354 * SECONDS_PER_DAY);
        assert_eq!(jupiter.geometric_albedo, None);
        assert_eq!(jupiter.bulk_density, Some(1326.0));
    }

    #[test]
    fn test_unknown_mass_stays_unknown() {
        let config = CatalogConfig::default();
        let body = Normalizer::new(&config, G).planet_physics(planet("Jupiter", None, None));
        assert_eq!(body.physics.gravitational_parameter, None);
        assert_eq!(body.physics.rotational_period, None);
    }

    #[test]
    fn test_prograde_rotation_fix_up() {
        let config = CatalogConfig::default();
        let normalizer = Normalizer::new(&config, G);

        let pluto = normalizer.planet_physics(planet("Pluto", Some(0.01303), Some(-6.3872)));
        assert!(pluto.physics.rotational_period.unwrap() > 0.0);

        let venus = normalizer.planet_physics(planet("Venus", Some(4.8673), Some(-243.018)));
        assert!(venus.physics.rotational_period.unwrap() < 0.0);
    }

    #[test]
    fn test_planet_elements() {
        let config = CatalogConfig::default();
        let rated = |value, rate| RatedElement { value, rate };
        let row = PlanetElementsRow {
            name: "EM Bary".into(),
            table: ElementsTable::Table1,
            semi_major_axis: rated(1.00000261, 0.00000562),
            eccentricity: rated(0.01671123, -0.00004392),
            inclination: rated(-0.00001531, -0.01294668),
            mean_longitude: rated(100.46457166, 35999.37244981),
            longitude_of_periapsis: rated(102.93768193, 0.32327364),
            longitude_of_ascending_node: rated(0.0, 0.0),
        };
        let orbit = Normalizer::new(&config, G).planet_elements(row);

        assert_eq!(orbit.orbit.body, "EM Bary");
        assert_eq!(orbit.orbit.primary, "Sun");
        assert_eq!(orbit.orbit.epoch, 0.0);
        assert_relative_eq!(orbit.orbit.semi_major_axis, 1.00000261 * AU_M);
        assert_relative_eq!(
            orbit.orbit.mean_anomaly_at_epoch,
            (100.46457166_f64 - 102.93768193).to_radians(),
            epsilon = 1e-14
        );
        assert_relative_eq!(orbit.orbit.argument_of_periapsis, 102.93768193_f64.to_radians());
        // the mean longitude keeps its own rate
        assert!(orbit.rates.mean_longitude > orbit.rates.longitude_of_periapsis);
    }

    #[test]
    fn test_satellite_elements() {
        let config = CatalogConfig::default();
        let doc = SourceId::new(SourceKind::SatElements, "sat_elem.html");
        let row = SatElementsRow {
            name: "Deimos".into(),
            primary: "Mars".into(),
            reference_plane: ReferencePlane::Laplace,
            epoch: "2000 Jan. 1.50 TT".into(),
            semi_major_axis: 23458.0,
            eccentricity: 0.0002,
            argument_of_periapsis: 260.729,
            mean_anomaly_at_epoch: 325.329,
            inclination: 1.788,
            longitude_of_ascending_node: 24.525,
            longitude_rate: Some(285.1618790),
            period: Some(1.2624),
            argument_of_periapsis_precession_period: Some(27.4),
            longitude_of_ascending_node_precession_period: Some(54.5),
            laplace_pole: Some(LaplacePole {
                right_ascension: 316.7,
                declination: 53.564,
                tilt: 0.9,
            }),
        };
        let normalizer = Normalizer::new(&config, G);
        let deimos = normalizer.satellite_elements(&doc, row.clone()).unwrap();
        assert_eq!(deimos.orbit.epoch, 0.0);
        assert_eq!(deimos.orbit.semi_major_axis, 23_458_000.0);
        assert_relative_eq!(deimos.period.unwrap(), 1.2624 * SECONDS_PER_DAY);
        assert_relative_eq!(deimos.laplace_tilt.unwrap(), 0.9_f64.to_radians());

        let bad = SatElementsRow {
            epoch: "sometime".into(),
            ..row
        };
        assert!(matches!(
            normalizer.satellite_elements(&doc, bad),
            Err(CatalogError::Parse(ParseError {
                kind: ParseErrorKind::InvalidEpoch,
                ..
            }))
        ));
    }

    #[test]
    fn test_small_body() {
        let config = CatalogConfig::default();
        let row = SbdbRow {
            name: "Ceres".into(),
            epoch_jd: 2451545.0 + 1.0,
            eccentricity: 0.0758,
            semi_major_axis: 2.769,
            inclination: 10.594,
            diameter: Some(939.4),
            rotation_period: Some(9.07417),
            pole: Some((291.42, 66.76)),
            ..Default::default()
        };
        let ceres = Normalizer::new(&config, G).small_body(row);
        assert_relative_eq!(ceres.orbit.epoch, SECONDS_PER_DAY, epsilon = 1e-3);
        assert_relative_eq!(ceres.physics.radius.unwrap(), 469_700.0);
        assert_relative_eq!(ceres.physics.rotational_period.unwrap(), 9.07417 * 3600.0);
        assert_relative_eq!(ceres.north_pole.unwrap().right_ascension, 291.42_f64.to_radians());
        assert_eq!(ceres.periapsis, None);
    }
}
