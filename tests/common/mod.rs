use std::path::PathBuf;

use approx::assert_relative_eq;
use nalgebra::{Rotation3, Vector3};
use solar_catalog::body::EquatorialPole;
use solar_catalog::config::CatalogConfig;
use solar_catalog::constants::OBLIQUITY_J2000;
use solar_catalog::solar_catalog::{build_catalog, CatalogBuild, SourceDocuments};

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

/// Default configuration restricted to the small bodies present in `tests/data`.
pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        dwarf_planets: vec!["Ceres".into(), "Pluto".into()],
        ..Default::default()
    }
}

pub fn documents(config: &CatalogConfig) -> SourceDocuments {
    SourceDocuments::from_dir(data_dir(), config).unwrap()
}

pub fn build() -> CatalogBuild {
    let config = test_config();
    build_catalog(&documents(&config), &config).unwrap()
}

pub fn assert_pole_close(actual: &EquatorialPole, ra_deg: f64, dec_deg: f64) {
    assert_relative_eq!(actual.right_ascension, ra_deg.to_radians(), epsilon = 1e-12);
    assert_relative_eq!(actual.declination, dec_deg.to_radians(), epsilon = 1e-12);
}

/// Ecliptic inclination and ascending node (radians) of an orbit given on the equator of
/// a primary with equatorial pole (`ra_deg`, `dec_deg`), the node being counted from the
/// ascending node of that equator on the ecliptic.
pub fn ecliptic_angles_on_equator(ra_deg: f64, dec_deg: f64, i_deg: f64, node_deg: f64) -> (f64, f64) {
    let (ra, dec) = (ra_deg.to_radians(), dec_deg.to_radians());
    let (i, node) = (i_deg.to_radians(), node_deg.to_radians());

    let equatorial = Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin());
    let pole = Rotation3::from_axis_angle(&Vector3::x_axis(), -OBLIQUITY_J2000) * equatorial;

    let ascending = Vector3::z().cross(&pole).normalize();
    let ninety = pole.cross(&ascending);
    let normal = i.sin() * node.sin() * ascending - i.sin() * node.cos() * ninety + i.cos() * pole;

    let inclination = normal.z.clamp(-1.0, 1.0).acos();
    let ascending_node = normal.x.atan2(-normal.y).rem_euclid(2.0 * std::f64::consts::PI);
    (inclination, ascending_node)
}
