//! # Pole resolver
//!
//! Conversion of pole orientations between the equatorial J2000 frame and the ecliptic
//! J2000 frame, through a rotation of fixed obliquity ε about the x axis (the vernal
//! equinox direction, shared by both frames).
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{
    body::{EclipticPole, EquatorialPole},
    catalog_errors::CatalogError,
    constants::{Radian, DPI},
};

/// Convert an equatorial pole (α, δ) into ecliptic longitude and latitude (λ, β).
///
/// ```text
/// λ = atan2( sin(α)·cos(ε) + tan(δ)·sin(ε),  cos(α) )
/// β = asin( sin(δ)·cos(ε) − cos(δ)·sin(ε)·sin(α) )
/// ```
///
/// Arguments
/// ---------
/// * `pole`: pole orientation in the equatorial frame.
/// * `obliquity`: obliquity of the ecliptic ε in radians.
///
/// Returns
/// --------
/// * The ecliptic pole, with λ in [0, 2π) and β in [−π/2, π/2].
///
/// Remarks
/// -------
/// * The two-argument arctangent keeps the quadrant when cos(α) is negative.
/// * Fails with [`CatalogError::GeometryDegeneracy`] only if both arctangent arguments
///   are exactly zero.
pub fn to_ecliptic(pole: &EquatorialPole, obliquity: Radian) -> Result<EclipticPole, CatalogError> {
    let (sin_a, cos_a) = pole.right_ascension.sin_cos();
    let (sin_d, cos_d) = pole.declination.sin_cos();
    let (sin_e, cos_e) = obliquity.sin_cos();

    let y = sin_a * cos_e + pole.declination.tan() * sin_e;
    let x = cos_a;
    if x == 0.0 && y == 0.0 {
        return Err(CatalogError::GeometryDegeneracy(format!(
            "ecliptic longitude undefined for pole (ra={}, dec={})",
            pole.right_ascension, pole.declination
        )));
    }

    let longitude = y.atan2(x).rem_euclid(DPI);
    let latitude = (sin_d * cos_e - cos_d * sin_e * sin_a).clamp(-1.0, 1.0).asin();

    Ok(EclipticPole {
        longitude,
        latitude,
    })
}

/// Convert an ecliptic pole (λ, β) back into the equatorial frame.
///
/// The pole is turned into a unit vector, rotated by +ε about the x axis with
/// [`rotmt`], then converted back to angles with [`cartesian_to_angles`].
pub fn to_equatorial(pole: &EclipticPole, obliquity: Radian) -> EquatorialPole {
    let ecliptic = angles_to_cartesian(pole.longitude, pole.latitude);
    let equatorial = rotmt(obliquity, Axis::X) * ecliptic;
    let (right_ascension, declination) = cartesian_to_angles(&equatorial);
    EquatorialPole {
        right_ascension,
        declination,
    }
}

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `axis` - Axis of rotation.
///
/// # Returns
///
/// A 3×3 rotation matrix `R` applied to the vector in a fixed frame, `x' = R · x`.
pub fn rotmt(alpha: f64, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit vector pointing at longitude `lon` and latitude `lat`.
pub(crate) fn angles_to_cartesian(lon: Radian, lat: Radian) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Longitude in [0, 2π) and latitude of a (not necessarily unit) vector.
///
/// A zero vector yields `(0, 0)`; a vector along the z axis yields longitude 0.
pub(crate) fn cartesian_to_angles(v: &Vector3<f64>) -> (Radian, Radian) {
    let norm = v.norm();
    if norm == 0. {
        return (0.0, 0.0);
    }
    let lat = (v.z / norm).clamp(-1.0, 1.0).asin();
    let lon = v.y.atan2(v.x).rem_euclid(DPI);
    (lon, lat)
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::constants::OBLIQUITY_J2000;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_celestial_north_pole() {
        // the celestial pole sits at λ = 90°, β = 90° − ε
        let pole = to_ecliptic(&EquatorialPole::new(0.0, FRAC_PI_2 - 1e-12), OBLIQUITY_J2000)
            .unwrap();
        assert_relative_eq!(pole.longitude, FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(pole.latitude, FRAC_PI_2 - OBLIQUITY_J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_ecliptic_pole() {
        // the ecliptic north pole: α = 270°, δ = 90° − ε
        let pole = to_ecliptic(
            &EquatorialPole::new(1.5 * PI, FRAC_PI_2 - OBLIQUITY_J2000),
            OBLIQUITY_J2000,
        )
        .unwrap();
        assert_relative_eq!(pole.latitude, FRAC_PI_2, epsilon = 1e-7);
    }

    #[test]
    fn test_quadrant_is_preserved() {
        // a bare atan would fold this into the first quadrant
        let pole = to_ecliptic(&EquatorialPole::new(200f64.to_radians(), 0.0), 0.0).unwrap();
        assert_relative_eq!(pole.longitude, 200f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(pole.latitude, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_rotation_matrix() {
        let poles = [
            EquatorialPole::new(268.057f64.to_radians(), 64.495f64.to_radians()),
            EquatorialPole::new(40.589f64.to_radians(), 83.537f64.to_radians()),
            EquatorialPole::new(132.993f64.to_radians(), -6.163f64.to_radians()),
            EquatorialPole::new(257.311f64.to_radians(), -15.175f64.to_radians()),
        ];
        for pole in poles {
            let ecl = to_ecliptic(&pole, OBLIQUITY_J2000).unwrap();
            let v = rotmt(-OBLIQUITY_J2000, Axis::X)
                * angles_to_cartesian(pole.right_ascension, pole.declination);
            let (lon, lat) = cartesian_to_angles(&v);
            assert_relative_eq!(ecl.longitude, lon, epsilon = 1e-10);
            assert_relative_eq!(ecl.latitude, lat, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_round_trip() {
        let pole = EquatorialPole::new(4.6783, 1.1257);
        let back = to_equatorial(&to_ecliptic(&pole, OBLIQUITY_J2000).unwrap(), OBLIQUITY_J2000);
        assert_relative_eq!(back.right_ascension, pole.right_ascension, epsilon = 1e-10);
        assert_relative_eq!(back.declination, pole.declination, epsilon = 1e-10);
    }

    #[test]
    fn test_rotmt_orthonormal() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let r = rotmt(0.3, axis);
            assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-15);
        }
        // direct sense: x is turned towards y about z
        let y = rotmt(FRAC_PI_2, Axis::Z) * Vector3::x();
        assert_relative_eq!(y, Vector3::y(), epsilon = 1e-15);
    }
}
