//! # Catalog assembly
//!
//! Merges the normalized records of every source into a [`Catalog`]. The merge runs in
//! stages, each one relying on the data of the previous ones:
//!
//! 1. the Sun, from the configuration;
//! 2. physical attributes of planets, then satellites, then small bodies;
//! 3. poles: fact sheet poles become positive poles (they need the rotation period of
//!    stage 2), small-body poles are kept as north poles;
//! 4. orbits, in dependency order (see below);
//! 5. authoritative radius overrides.
//!
//! ## Orbit ordering
//!
//! Orbits form a dependency graph (`primary → body`). It is sorted topologically with
//! [`petgraph`], so every primary is placed before the bodies orbiting it. Orbits of the
//! same body keep their stage order: planetary Table 1, planetary Table 2 (additive, it
//! only fills bodies Table 1 lacks), satellites, then the small-body database which is
//! authoritative for the orbit of the bodies it describes. A dependency cycle fails with
//! [`CatalogError::MissingPrimaryData`].
use std::collections::BTreeMap;

use petgraph::{algo::toposort, graph::DiGraph, graph::NodeIndex};

use crate::{
    body::OrbitRecord,
    catalog_errors::{CatalogError, SourceId, SourceKind},
    config::CatalogConfig,
    constants::SUN,
    diagnostics::Diagnostics,
    records::{HasOrbit, HasPhysics, HasPole, NormalizedRecord},
    sources::planet_elements::ElementsTable,
};

use super::{
    builder::{CatalogBuilder, MergePolicy},
    Catalog,
};

/// Rank of a record kind within a merge stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Planet(ElementsTable),
    Factsheet,
    Satellite,
    SmallBody,
}

impl Stage {
    fn of(record: &NormalizedRecord) -> Stage {
        match record {
            NormalizedRecord::PlanetPhysics(_) => Stage::Planet(ElementsTable::Table1),
            NormalizedRecord::PlanetOrbit(r) => Stage::Planet(r.table),
            NormalizedRecord::Factsheet(_) => Stage::Factsheet,
            NormalizedRecord::SatellitePhysics(_) | NormalizedRecord::SatelliteOrbit(_) => Stage::Satellite,
            NormalizedRecord::SmallBody(_) => Stage::SmallBody,
        }
    }

    fn orbit_policy(self) -> MergePolicy {
        match self {
            Stage::SmallBody => MergePolicy::Authoritative,
            _ => MergePolicy::Additive,
        }
    }
}

/// Records sorted by stage, stable within a stage.
fn by_stage(records: &[NormalizedRecord]) -> Vec<(Stage, &NormalizedRecord)> {
    let mut staged: Vec<_> = records.iter().map(|r| (Stage::of(r), r)).collect();
    staged.sort_by_key(|(stage, _)| *stage);
    staged
}

/// Order orbits so that every primary precedes the bodies orbiting it.
///
/// Return
/// ------
/// * The orbits with their merge stage, primaries first, stage order kept for the orbits
///   of a same body.
///
/// Errors
/// ------
/// * [`CatalogError::MissingPrimaryData`] when the primaries form a cycle.
fn dependency_order<'r>(
    config: &CatalogConfig,
    orbits: Vec<(Stage, &'r OrbitRecord)>,
) -> Result<Vec<(Stage, &'r OrbitRecord)>, CatalogError> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut nodes: BTreeMap<String, NodeIndex> = BTreeMap::new();

    let mut node = |graph: &mut DiGraph<String, ()>, name: &str| -> NodeIndex {
        let name = config.canonical_name(name).to_string();
        *nodes
            .entry(name.clone())
            .or_insert_with(|| graph.add_node(name))
    };

    for (_, orbit) in &orbits {
        let primary = node(&mut graph, &orbit.primary);
        let body = node(&mut graph, &orbit.body);
        graph.update_edge(primary, body, ());
    }

    let sorted = toposort(&graph, None).map_err(|cycle| {
        let name = graph[cycle.node_id()].clone();
        CatalogError::missing_primary(&name, &name, "cyclic primary dependency")
    })?;
    let rank: BTreeMap<&str, usize> = sorted
        .iter()
        .enumerate()
        .map(|(i, index)| (graph[*index].as_str(), i))
        .collect();

    let mut ordered = orbits;
    // stable: the stage order is kept within a body
    ordered.sort_by_key(|(stage, orbit)| {
        let body = config.canonical_name(&orbit.body);
        (rank.get(body).copied().unwrap_or(usize::MAX), *stage)
    });
    Ok(ordered)
}

/// Assemble the catalog from normalized records.
///
/// Arguments
/// ---------
/// * `records`: normalized records of every source, in any order.
/// * `config`: aliases, Sun data, radius overrides, conventions.
///
/// Return
/// ------
/// * The immutable [`Catalog`] and the warnings raised while merging.
///
/// Errors
/// ------
/// * [`CatalogError::MissingPrimaryData`] when an orbit references a primary absent from
///   the catalog, or a primary without pole for a non-ecliptic orbit, or when primaries
///   form a cycle.
/// * [`CatalogError::GeometryDegeneracy`] from pole or frame resolution.
pub fn assemble(
    records: &[NormalizedRecord],
    config: &CatalogConfig,
) -> Result<(Catalog, Diagnostics), CatalogError> {
    let mut builder = CatalogBuilder::new(config);
    let staged = by_stage(records);

    builder.merge_physics(SUN, config.sun.into(), MergePolicy::Additive);

    for (_, record) in &staged {
        if let Some(physics) = record.physics() {
            builder.merge_physics(record.name(), physics, MergePolicy::Additive);
        }
    }
    log::info!("physical attributes merged");

    for (_, record) in &staged {
        let Some(pole) = record.north_pole() else {
            continue;
        };
        match record {
            NormalizedRecord::Factsheet(_) => builder.merge_rotation_pole(record.name(), pole)?,
            _ => builder.merge_north_pole(record.name(), pole)?,
        }
    }
    log::info!("poles merged");

    let orbits: Vec<(Stage, &OrbitRecord)> = staged
        .iter()
        .filter_map(|(stage, record)| record.orbit().map(|orbit| (*stage, orbit)))
        .collect();
    for (stage, orbit) in dependency_order(config, orbits)? {
        builder.merge_orbit(orbit.clone(), stage.orbit_policy())?;
    }
    log::info!("orbits merged");

    for (name, radius) in &config.radius_overrides {
        if !builder.contains(name) {
            let document = SourceId::new(SourceKind::Config, "radius_overrides");
            builder
                .diagnostics_mut()
                .warn(&document, format!("radius override for '{name}' which is not in the catalog"));
            continue;
        }
        builder.merge_physics(
            name,
            crate::body::PhysicalAttributes {
                radius: Some(*radius),
                ..Default::default()
            },
            MergePolicy::Authoritative,
        );
    }

    let (catalog, diagnostics) = builder.finish();
    log::info!("catalog assembled: {} bodies, {} warnings", catalog.len(), diagnostics.len());
    Ok((catalog, diagnostics))
}

#[cfg(test)]
mod assembler_test {
    use super::*;
    use crate::{
        body::{EquatorialPole, PhysicalAttributes, ReferencePlane},
        records::{FactsheetPole, PlanetOrbit, PlanetPhysics, SatelliteOrbit, SmallBody},
    };

    fn orbit(body: &str, primary: &str, plane: ReferencePlane) -> OrbitRecord {
        OrbitRecord {
            body: body.into(),
            primary: primary.into(),
            reference_plane: plane,
            semi_major_axis: 1e9,
            eccentricity: 0.1,
            inclination: 0.1,
            longitude_of_ascending_node: 0.2,
            argument_of_periapsis: 0.3,
            mean_anomaly_at_epoch: 0.4,
            epoch: 0.0,
        }
    }

    fn planet(name: &str, period: f64) -> NormalizedRecord {
        NormalizedRecord::PlanetPhysics(PlanetPhysics {
            name: name.into(),
            physics: PhysicalAttributes {
                gravitational_parameter: Some(1e14),
                radius: Some(1e6),
                rotational_period: Some(period),
            },
            equatorial_radius: None,
            bulk_density: None,
            sidereal_orbit_period: None,
            magnitude: None,
            geometric_albedo: None,
            equatorial_gravity: None,
            escape_velocity: None,
        })
    }

    fn planet_orbit(name: &str, table: ElementsTable, eccentricity: f64) -> NormalizedRecord {
        let mut orbit = orbit(name, SUN, ReferencePlane::Ecliptic);
        orbit.eccentricity = eccentricity;
        NormalizedRecord::PlanetOrbit(PlanetOrbit {
            table,
            orbit,
            rates: Default::default(),
        })
    }

    fn satellite_orbit(name: &str, primary: &str, plane: ReferencePlane) -> NormalizedRecord {
        NormalizedRecord::SatelliteOrbit(SatelliteOrbit {
            orbit: orbit(name, primary, plane),
            longitude_rate: None,
            period: None,
            argument_of_periapsis_precession_period: None,
            longitude_of_ascending_node_precession_period: None,
            laplace_pole: None,
            laplace_tilt: None,
        })
    }

    fn factsheet(name: &str) -> NormalizedRecord {
        NormalizedRecord::Factsheet(FactsheetPole {
            name: name.into(),
            north_pole: Some(EquatorialPole::new(5.54, 0.92)),
        })
    }

    #[test]
    fn test_order_does_not_depend_on_input_order() {
        let config = CatalogConfig::default();
        let mut records = vec![
            satellite_orbit("Phobos", "Mars", ReferencePlane::Equatorial),
            factsheet("Mars"),
            planet_orbit("Mars", ElementsTable::Table1, 0.09),
            planet("Mars", 88642.0),
        ];
        let (forward, _) = assemble(&records, &config).unwrap();
        records.reverse();
        let (backward, _) = assemble(&records, &config).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.get("Phobos").unwrap().orbit.as_ref().unwrap().primary, "Mars");
        assert!(forward.get("Sun").is_some());
    }

    #[test]
    fn test_table_2_only_fills_gaps() {
        let config = CatalogConfig::default();
        let records = vec![
            planet_orbit("Mars", ElementsTable::Table2, 0.5),
            planet_orbit("Mars", ElementsTable::Table1, 0.09),
            planet_orbit("EM Bary", ElementsTable::Table2, 0.0167),
        ];
        let (catalog, _) = assemble(&records, &config).unwrap();
        assert_eq!(catalog.get("Mars").unwrap().orbit.as_ref().unwrap().eccentricity, 0.09);
        assert_eq!(catalog.get("Earth").unwrap().orbit.as_ref().unwrap().eccentricity, 0.0167);
        assert!(catalog.get("EM Bary").is_none());
    }

    #[test]
    fn test_small_body_orbit_is_authoritative() {
        let config = CatalogConfig::default();
        let mut sbdb = orbit("Pluto", SUN, ReferencePlane::Ecliptic);
        sbdb.eccentricity = 0.2488;
        let records = vec![
            NormalizedRecord::SmallBody(SmallBody {
                name: "Pluto".into(),
                physics: PhysicalAttributes {
                    radius: Some(1.0),
                    ..Default::default()
                },
                north_pole: None,
                orbit: sbdb,
                periapsis: None,
                apoapsis: None,
                orbital_period: None,
                mean_motion: None,
                absolute_magnitude: None,
                magnitude_slope: None,
                bulk_density: None,
                geometric_albedo: None,
            }),
            planet_orbit("Pluto", ElementsTable::Table1, 0.25),
        ];
        let (catalog, _) = assemble(&records, &config).unwrap();
        let pluto = catalog.get("Pluto").unwrap();
        assert_eq!(pluto.orbit.as_ref().unwrap().eccentricity, 0.2488);
        // radius override wins over the small-body database
        assert_eq!(pluto.radius, Some(1188.3e3));
    }

    #[test]
    fn test_missing_primary() {
        let config = CatalogConfig::default();
        let records = vec![satellite_orbit("Charon", "Pluto", ReferencePlane::Ecliptic)];
        let err = assemble(&records, &config).unwrap_err();
        assert!(matches!(err, CatalogError::MissingPrimaryData { ref body, .. } if body == "Charon"));
    }

    #[test]
    fn test_orbit_only_body_is_not_a_primary() {
        let config = CatalogConfig::default();
        let records = vec![
            planet_orbit("Neptune", ElementsTable::Table1, 0.009),
            satellite_orbit("Triton", "Neptune", ReferencePlane::Ecliptic),
        ];
        let err = assemble(&records, &config).unwrap_err();
        assert_eq!(
            err,
            CatalogError::missing_primary("Triton", "Neptune", "primary has no physical data")
        );
    }

    #[test]
    fn test_primary_without_pole() {
        let config = CatalogConfig::default();
        let records = vec![
            planet("Mars", 88642.0),
            satellite_orbit("Phobos", "Mars", ReferencePlane::Equatorial),
        ];
        let err = assemble(&records, &config).unwrap_err();
        assert_eq!(
            err,
            CatalogError::missing_primary("Phobos", "Mars", "pole of the primary not resolved")
        );
    }

    #[test]
    fn test_cycle() {
        let config = CatalogConfig::default();
        let records = vec![
            planet("A", 1.0),
            planet("B", 1.0),
            satellite_orbit("A", "B", ReferencePlane::Ecliptic),
            satellite_orbit("B", "A", ReferencePlane::Ecliptic),
        ];
        let err = assemble(&records, &config).unwrap_err();
        assert!(matches!(err, CatalogError::MissingPrimaryData { ref reason, .. } if reason.contains("cyclic")));
    }

    #[test]
    fn test_override_of_unknown_body_is_a_warning() {
        let config = CatalogConfig::default();
        let (catalog, diagnostics) = assemble(&[], &config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(diagnostics.len(), config.radius_overrides.len());
    }
}
