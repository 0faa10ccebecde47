//! # Catalog
//!
//! The assembled registry of bodies and its JSON emission.
//!
//! * [`builder::CatalogBuilder`] – additive merges, alias resolution, frame resolution.
//! * [`assembler::assemble`] – ordered merge of all normalized records.
//! * [`Catalog`] – the immutable result, keyed by canonical body name.
//!
//! ## Output
//!
//! [`Catalog::to_json`] emits one JSON object keyed by body name, keys sorted at every
//! level, indented by four spaces and terminated by a newline. Unknown attributes are
//! omitted rather than written as `null`:
//!
//! ```text
//! {
//!     "Io": {
//!         "gravitational_parameter": 5959916000000.0,
//!         "orbit": {
//!             "argument_of_periapsis": 0.8,
//!             ...
//!             "primary": "Jupiter",
//!             "semi_major_axis": 421800000.0
//!         },
//!         "radius": 1821600.0
//!     },
//!     ...
//! }
//! ```
pub mod assembler;
pub mod builder;

use std::{collections::BTreeMap, path::Path};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{body::CelestialBody, catalog_errors::CatalogError};

/// Immutable registry of the bodies of the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    bodies: BTreeMap<String, CelestialBody>,
}

impl Catalog {
    pub(crate) fn new(bodies: BTreeMap<String, CelestialBody>) -> Self {
        Catalog { bodies }
    }

    pub fn get(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.get(name)
    }

    /// Bodies in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CelestialBody)> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Serialize the catalog (sorted keys, four-space indent, trailing newline).
    pub fn to_json(&self) -> Result<String, CatalogError> {
        // going through `Value` sorts the keys of the nested objects too
        let value = serde_json::to_value(&self.bodies)?;

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        buffer.push(b'\n');

        // serde_json only writes UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write [`Catalog::to_json`] to a file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("catalog of {} bodies written to {}", self.len(), path.as_ref().display());
        Ok(())
    }
}
