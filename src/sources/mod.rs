//! # Source extractors
//!
//! One extractor per archival document schema. Each extractor is a pure function from
//! the document text to an [`Extracted`] batch of raw records in **source-native units**;
//! unknown-value placeholders are already turned into `None`.
//!
//! | Module | Document | Record |
//! |--------|----------|--------|
//! | [`planet_phys_par`] | planetary physical parameters | [`planet_phys_par::PlanetPhysParRow`] |
//! | [`factsheet`] | per-body fact sheets | [`factsheet::FactsheetRow`] |
//! | [`planet_elements`] | planetary mean elements, tables 1 and 2 | [`planet_elements::PlanetElementsRow`] |
//! | [`sat_phys_par`] | satellite physical parameters | [`sat_phys_par::SatPhysParRow`] |
//! | [`sat_elements`] | satellite orbital elements | [`sat_elements::SatElementsRow`] |
//! | [`sbdb`] | small-body database records | [`sbdb::SbdbRow`] |
//!
//! Extractors share no state and may run in any order.
pub mod factsheet;
pub(crate) mod html;
pub mod planet_elements;
pub mod planet_phys_par;
pub mod sat_elements;
pub mod sat_phys_par;
pub mod sbdb;

use crate::{catalog_errors::SourceId, diagnostics::Diagnostics};

/// Raw records extracted from one document, with the warnings raised while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<T> {
    pub document: SourceId,
    pub records: Vec<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Extracted<T> {
    pub(crate) fn new(document: SourceId) -> Self {
        Extracted {
            document,
            records: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

/// Raw record of any source, tagged by its schema.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    PlanetPhysPar(planet_phys_par::PlanetPhysParRow),
    Factsheet(factsheet::FactsheetRow),
    PlanetElements(planet_elements::PlanetElementsRow),
    SatPhysPar(sat_phys_par::SatPhysParRow),
    SatElements(sat_elements::SatElementsRow),
    Sbdb(sbdb::SbdbRow),
}
