//! # Reference frame resolver
//!
//! Re-expresses the inclination and the longitude of the ascending node of an orbit given
//! relative to a primary's equatorial plane (or to the satellite's Laplace plane) in the
//! ecliptic J2000 frame.
//!
//! ## Spherical triangle
//!
//! Three points of the celestial sphere form the triangle:
//!
//! * **A** – the ecliptic north pole,
//! * **B** – the primary's pole,
//! * **C** – the normal of the satellite's orbital plane.
//!
//! The sides opposite to them are
//!
//! ```text
//! a = i            inclination of the orbit on the primary's equator (B–C)
//! b = i_ecl        inclination of the orbit on the ecliptic (A–C), unknown
//! c = π/2 − β_p    polar distance of the primary's pole (A–B)
//! ```
//!
//! and the angle at B is `π − Ω`, the node being counted along the primary's equator from
//! its ascending node on the ecliptic. The law of cosines gives `b`, the angle `A` gives
//! the ecliptic longitude `λ_p + A` of the orbital normal, and the ascending node lies a
//! quarter turn ahead of it:
//!
//! ```text
//! cos b = cos a·cos c + sin a·sin c·cos B
//! Ω_ecl = λ_p + A + π/2
//! ```
//!
//! The law of sines only yields `A` up to its quadrant. The triangle is therefore solved
//! by rotating the orbital normal out of the primary's frame, which gives `b` and `λ_p + A`
//! together with the correct quadrant for every node, including the limit `β_p = π/2`
//! where `Ω_ecl = Ω + λ_p + π/2`.
//!
//! ## Laplace plane
//!
//! Elements referred to a Laplace plane are handled as if referred to the primary's
//! equator, with the angle at B set by a [`LaplaceConvention`]. This is an
//! **approximation**: the Laplace plane of a satellite generally differs from its
//! primary's equator, and the two historical conventions disagree on the angle at B.
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::{
    body::{EclipticPole, OrbitRecord, ReferencePlane},
    catalog_errors::CatalogError,
    constants::{Radian, DPI, GEOMETRY_EPS},
    ref_system::{angles_to_cartesian, cartesian_to_angles, rotmt, Axis},
};

/// Angle conventions for orbits referred to a Laplace plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaplaceConvention {
    /// B = Ω + π/2, Ω_ecl = λ_p + A + π/2
    #[default]
    QuarterTurn,
    /// B = π − Ω, Ω_ecl = λ_p + A + π/2: the Laplace plane taken as the primary's equator
    NodeComplement,
}

impl LaplaceConvention {
    /// Node on the primary's equator giving the same angle at B (π − Ω_eq = B).
    fn equatorial_node(self, node: Radian) -> Radian {
        match self {
            LaplaceConvention::QuarterTurn => FRAC_PI_2 - node,
            LaplaceConvention::NodeComplement => node,
        }
    }
}

/// Inclination and node of an orbit in the ecliptic frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticAngles {
    pub inclination: Radian,
    pub longitude_of_ascending_node: Radian,
}

/// Resolve the ecliptic inclination and node of an orbit.
///
/// Arguments
/// ---------
/// * `orbit`: published elements; its reference plane selects the computation.
/// * `primary_pole`: ecliptic pole of the primary, required unless the plane is ecliptic.
/// * `convention`: angle conventions used for Laplace-plane inputs.
///
/// Return
/// ------
/// * The ecliptic angles. For [`ReferencePlane::Ecliptic`] the input is returned as is,
///   without any trigonometry.
///
/// Errors
/// ------
/// * [`CatalogError::MissingPrimaryData`] when a pole is required but absent.
/// * [`CatalogError::GeometryDegeneracy`] when `sin(b)` vanishes (the orbital normal
///   coincides with the ecliptic pole or its antipode), which leaves the node undefined.
pub fn resolve(
    orbit: &OrbitRecord,
    primary_pole: Option<&EclipticPole>,
    convention: LaplaceConvention,
) -> Result<EclipticAngles, CatalogError> {
    let inclination = orbit.inclination;
    let node = orbit.longitude_of_ascending_node;

    if orbit.reference_plane == ReferencePlane::Ecliptic {
        return Ok(EclipticAngles {
            inclination,
            longitude_of_ascending_node: node,
        });
    }

    let pole = primary_pole.ok_or_else(|| {
        CatalogError::missing_primary(
            &orbit.body,
            &orbit.primary,
            "pole of the primary not resolved",
        )
    })?;

    let equatorial_node = match orbit.reference_plane {
        ReferencePlane::Laplace => convention.equatorial_node(node),
        _ => node,
    };

    // orbital normal in the primary's frame: x towards the ascending node of the
    // primary's equator on the ecliptic, z along the primary's pole
    let normal = angles_to_cartesian(equatorial_node - FRAC_PI_2, FRAC_PI_2 - inclination);
    let to_ecliptic = rotmt(pole.longitude + FRAC_PI_2, Axis::Z) * rotmt(FRAC_PI_2 - pole.latitude, Axis::X);
    let normal = to_ecliptic * normal;

    // sin(b), the distance of the normal from the ecliptic axis
    if normal.xy().norm() < GEOMETRY_EPS {
        return Err(CatalogError::GeometryDegeneracy(format!(
            "orbit of {} about {}: orbital normal aligned with the ecliptic pole (i={inclination}, node={node})",
            orbit.body, orbit.primary
        )));
    }

    // λ_p + A and π/2 − b
    let (normal_longitude, normal_latitude) = cartesian_to_angles(&normal);

    Ok(EclipticAngles {
        inclination: FRAC_PI_2 - normal_latitude,
        longitude_of_ascending_node: (normal_longitude + FRAC_PI_2).rem_euclid(DPI),
    })
}
