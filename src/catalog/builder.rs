//! # Catalog builder
//!
//! [`CatalogBuilder`] owns the registry while it is being assembled. It only exposes
//! additive merges: a field already set is kept unless the merge is
//! [`MergePolicy::Authoritative`], and nothing is ever reset to unknown. Names are mapped
//! through the alias table on every merge.
//!
//! The builder also caches the ecliptic orientation of every pole it receives, so that a
//! satellite orbit referred to its primary's equator (or Laplace plane) is resolved
//! against a pole converted exactly once. Merging such an orbit before the primary's pole
//! fails with [`CatalogError::MissingPrimaryData`].
use std::collections::BTreeMap;

use crate::{
    body::{CelestialBody, EclipticPole, EquatorialPole, OrbitRecord, PhysicalAttributes},
    catalog_errors::{CatalogError, SourceId, SourceKind},
    config::CatalogConfig,
    diagnostics::Diagnostics,
    frame_resolver,
    ref_system::to_ecliptic,
};

use super::Catalog;

/// How a merge treats fields that are already set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Fill unknown fields only
    Additive,
    /// Replace the known fields of the target with the known fields of the record
    Authoritative,
}

fn merge_field<T>(target: &mut Option<T>, value: Option<T>, policy: MergePolicy) {
    match (value, policy) {
        (Some(v), MergePolicy::Authoritative) => *target = Some(v),
        (Some(v), MergePolicy::Additive) if target.is_none() => *target = Some(v),
        _ => {}
    }
}

#[derive(Debug)]
pub struct CatalogBuilder<'a> {
    config: &'a CatalogConfig,
    bodies: BTreeMap<String, CelestialBody>,
    ecliptic_poles: BTreeMap<String, EclipticPole>,
    diagnostics: Diagnostics,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        CatalogBuilder {
            config,
            bodies: BTreeMap::new(),
            ecliptic_poles: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(self.config.canonical_name(name))
    }

    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.get(self.config.canonical_name(name))
    }

    /// Ecliptic orientation of the pole used to resolve the orbits about `name`.
    pub fn ecliptic_pole(&self, name: &str) -> Option<&EclipticPole> {
        self.ecliptic_poles.get(self.config.canonical_name(name))
    }

    pub fn warn(&mut self, name: &str, message: impl Into<String>) {
        let document = SourceId::new(SourceKind::Assembly, self.config.canonical_name(name));
        self.diagnostics.warn(&document, message);
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    fn entry(&mut self, name: &str) -> (String, &mut CelestialBody) {
        let name = self.config.canonical_name(name).to_string();
        let body = self.bodies.entry(name.clone()).or_default();
        (name, body)
    }

    /// Merge physical attributes into a body, creating it if needed.
    pub fn merge_physics(&mut self, name: &str, physics: PhysicalAttributes, policy: MergePolicy) {
        let (name, body) = self.entry(name);
        merge_field(&mut body.gravitational_parameter, physics.gravitational_parameter, policy);
        merge_field(&mut body.radius, physics.radius, policy);
        merge_field(&mut body.rotational_period, physics.rotational_period, policy);
        log::debug!("physics of {name} merged ({policy:?})");
    }

    fn refresh_ecliptic_pole(&mut self, name: &str) -> Result<(), CatalogError> {
        let Some(pole) = self.bodies.get(name).and_then(|b| b.rotation_pole()).copied() else {
            return Ok(());
        };
        let ecliptic = to_ecliptic(&pole, self.config.obliquity)?;
        self.ecliptic_poles.insert(name.to_string(), ecliptic);
        Ok(())
    }

    /// Merge the IAU north pole of a body as its positive pole.
    ///
    /// The positive pole follows the right-hand rule: for a body with negative (retrograde)
    /// rotation period it is the opposite of the north pole, unless the body is listed in
    /// [`CatalogConfig::positive_pole_exemptions`]. The rotation period must therefore be
    /// merged before the pole.
    pub fn merge_rotation_pole(&mut self, name: &str, north_pole: EquatorialPole) -> Result<(), CatalogError> {
        let exempt = self
            .config
            .positive_pole_exemptions
            .iter()
            .any(|b| b == self.config.canonical_name(name));
        let (name, body) = self.entry(name);

        let retrograde = body.rotational_period.is_some_and(|p| p < 0.0);
        let positive_pole = if retrograde && !exempt {
            north_pole.opposite()
        } else {
            north_pole
        };
        let unknown_rotation = body.rotational_period.is_none();
        merge_field(&mut body.positive_pole, Some(positive_pole), MergePolicy::Additive);

        if unknown_rotation {
            self.warn(&name, "pole merged without rotation period, taken as prograde");
        }
        if retrograde && !exempt {
            log::info!("{name}: retrograde rotation, positive pole opposite to the north pole");
        }
        self.refresh_ecliptic_pole(&name)
    }

    /// Merge a north pole kept as published.
    pub fn merge_north_pole(&mut self, name: &str, north_pole: EquatorialPole) -> Result<(), CatalogError> {
        let (name, body) = self.entry(name);
        merge_field(&mut body.north_pole, Some(north_pole), MergePolicy::Additive);
        self.refresh_ecliptic_pole(&name)
    }

    /// Resolve an orbit in the ecliptic frame and merge it into its body.
    ///
    /// Errors
    /// ------
    /// * [`CatalogError::MissingPrimaryData`] if the primary is not in the registry or has
    ///   neither gravitational parameter nor radius, or if the orbit is not ecliptic and the
    ///   primary has no pole.
    /// * [`CatalogError::GeometryDegeneracy`] from the frame resolution.
    pub fn merge_orbit(&mut self, mut orbit: OrbitRecord, policy: MergePolicy) -> Result<(), CatalogError> {
        orbit.body = self.config.canonical_name(&orbit.body).to_string();
        orbit.primary = self.config.canonical_name(&orbit.primary).to_string();

        let Some(primary) = self.bodies.get(&orbit.primary) else {
            return Err(CatalogError::missing_primary(
                &orbit.body,
                &orbit.primary,
                "primary not in the catalog",
            ));
        };
        // a body known only through its own orbit cannot be a primary
        if primary.gravitational_parameter.is_none() && primary.radius.is_none() {
            return Err(CatalogError::missing_primary(
                &orbit.body,
                &orbit.primary,
                "primary has no physical data",
            ));
        }
        if policy == MergePolicy::Additive && self.bodies.get(&orbit.body).is_some_and(|b| b.orbit.is_some()) {
            log::debug!("orbit of {} already known, skipped", orbit.body);
            return Ok(());
        }

        let angles = frame_resolver::resolve(
            &orbit,
            self.ecliptic_poles.get(&orbit.primary),
            self.config.laplace_convention,
        )?;
        log::debug!(
            "orbit of {} about {} resolved from {:?}",
            orbit.body,
            orbit.primary,
            orbit.reference_plane
        );

        let (_, body) = self.entry(&orbit.body);
        body.orbit = Some(orbit.into_ecliptic(angles.inclination, angles.longitude_of_ascending_node));
        Ok(())
    }

    /// Freeze the registry.
    pub fn finish(self) -> (Catalog, Diagnostics) {
        (Catalog::new(self.bodies), self.diagnostics)
    }
}
