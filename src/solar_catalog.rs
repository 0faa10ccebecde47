//! # Solar catalog: documents in, catalog out
//!
//! [`build_catalog`] runs the whole pipeline over in-memory documents:
//!
//! 1. **Extraction** – one extractor per document ([`crate::sources`]).
//! 2. **Normalization** – SI units and sign conventions ([`crate::normalizer`]).
//! 3. **Assembly** – pole and frame resolution, ordered merge
//!    ([`crate::catalog::assembler`]).
//!
//! The first error aborts the build; no partial catalog is returned. Warnings of every
//! stage are collected in the returned [`Diagnostics`].
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use solar_catalog::config::CatalogConfig;
//! use solar_catalog::solar_catalog::{build_catalog, SourceDocuments};
//!
//! let config = CatalogConfig::default();
//! let documents = SourceDocuments::from_dir("data", &config).unwrap();
//! let build = build_catalog(&documents, &config).unwrap();
//!
//! for warning in build.diagnostics.warnings() {
//!     eprintln!("{warning}");
//! }
//! build.catalog.write_json("solar_system.json").unwrap();
//! ```
//!
//! ## Directory layout
//!
//! [`SourceDocuments::from_dir`] expects:
//!
//! ```text
//! planet_phys_par.html
//! factsheet/index.html        links to the fact sheets, e.g. factsheet/marsfact.html
//! p_elem_t1.txt
//! p_elem_t2.txt               optional
//! sat_phys_par.html
//! sat_elem.html
//! sbdb/<Name>.html            one per dwarf planet of the configuration
//! ```
use std::path::Path;

use crate::{
    catalog::{assembler::assemble, Catalog},
    catalog_errors::CatalogError,
    config::CatalogConfig,
    diagnostics::Diagnostics,
    normalizer::Normalizer,
    records::NormalizedRecord,
    sources::{
        factsheet, planet_elements, planet_elements::ElementsTable, planet_phys_par,
        sat_elements, sat_phys_par, sbdb, Extracted, RawRecord,
    },
};

/// One source document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier used in errors and warnings (file name, or body name for the
    /// small-body database)
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            text: text.into(),
        }
    }

    fn read(path: &Path, name: impl Into<String>) -> Result<Self, CatalogError> {
        Ok(Document::new(name, std::fs::read_to_string(path)?))
    }
}

/// Every document the catalog is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocuments {
    pub planet_phys_par: Document,
    pub factsheets: Vec<Document>,
    pub planet_elements_t1: Document,
    pub planet_elements_t2: Option<Document>,
    pub sat_phys_par: Document,
    pub sat_elements: Document,
    /// One record per small body, named after the body
    pub sbdb: Vec<Document>,
}

impl SourceDocuments {
    /// Read the documents from a data directory.
    ///
    /// The fact sheets read are those linked from `factsheet/index.html`; the small-body
    /// records read are those of [`CatalogConfig::dwarf_planets`].
    pub fn from_dir(dir: impl AsRef<Path>, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let file = |name: &str| Document::read(&dir.join(name), name);

        let index = std::fs::read_to_string(dir.join("factsheet").join("index.html"))?;
        let factsheets = factsheet::factsheet_index(&index)
            .into_iter()
            .map(|sheet| Document::read(&dir.join("factsheet").join(&sheet), sheet))
            .collect::<Result<Vec<_>, _>>()?;

        let t2_path = dir.join("p_elem_t2.txt");
        let planet_elements_t2 = if t2_path.exists() {
            Some(Document::read(&t2_path, "p_elem_t2.txt")?)
        } else {
            None
        };

        let sbdb = config
            .dwarf_planets
            .iter()
            .map(|body| Document::read(&dir.join("sbdb").join(format!("{body}.html")), body.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "read {} fact sheets and {} small-body records from {}",
            factsheets.len(),
            sbdb.len(),
            dir.display()
        );

        Ok(SourceDocuments {
            planet_phys_par: file("planet_phys_par.html")?,
            factsheets,
            planet_elements_t1: file("p_elem_t1.txt")?,
            planet_elements_t2,
            sat_phys_par: file("sat_phys_par.html")?,
            sat_elements: file("sat_elem.html")?,
            sbdb,
        })
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub diagnostics: Diagnostics,
}

/// Normalize every record of an extracted batch, keeping its warnings.
fn normalize_batch<T>(
    normalizer: &Normalizer<'_>,
    extracted: Extracted<T>,
    raw: fn(T) -> RawRecord,
    records: &mut Vec<NormalizedRecord>,
    diagnostics: &mut Diagnostics,
) -> Result<(), CatalogError> {
    let Extracted {
        document,
        records: rows,
        diagnostics: warnings,
    } = extracted;
    diagnostics.extend(warnings);
    for row in rows {
        records.push(normalizer.normalize(&document, raw(row))?);
    }
    Ok(())
}

/// Build the catalog from its source documents.
///
/// Arguments
/// ---------
/// * `documents`: the source documents.
/// * `config`: catalog configuration, validated first.
///
/// Return
/// ------
/// * The immutable catalog with the warnings of every stage.
///
/// Errors
/// ------
/// * [`CatalogError::InvalidConfig`] for an invalid configuration.
/// * Any extraction, conversion or assembly error, the first one aborting the build.
pub fn build_catalog(documents: &SourceDocuments, config: &CatalogConfig) -> Result<CatalogBuild, CatalogError> {
    config.validate()?;
    let placeholders = &config.unknown_placeholders;
    let mut diagnostics = Diagnostics::new();
    let mut records = Vec::new();

    let planets = planet_phys_par::extract(
        &documents.planet_phys_par.name,
        &documents.planet_phys_par.text,
        placeholders,
    )?;
    let normalizer = Normalizer::new(config, planets.gravitational_constant);
    normalize_batch(&normalizer, planets.rows, RawRecord::PlanetPhysPar, &mut records, &mut diagnostics)?;

    for sheet in &documents.factsheets {
        let extracted = factsheet::extract(&sheet.name, &sheet.text)?;
        normalize_batch(&normalizer, extracted, RawRecord::Factsheet, &mut records, &mut diagnostics)?;
    }

    let tables = std::iter::once((&documents.planet_elements_t1, ElementsTable::Table1)).chain(
        documents
            .planet_elements_t2
            .as_ref()
            .map(|t2| (t2, ElementsTable::Table2)),
    );
    for (document, table) in tables {
        let extracted = planet_elements::extract(&document.name, &document.text, table)?;
        normalize_batch(&normalizer, extracted, RawRecord::PlanetElements, &mut records, &mut diagnostics)?;
    }

    let satellites = sat_phys_par::extract(
        &documents.sat_phys_par.name,
        &documents.sat_phys_par.text,
        &config.satellite_systems,
        placeholders,
    )?;
    normalize_batch(&normalizer, satellites, RawRecord::SatPhysPar, &mut records, &mut diagnostics)?;

    let orbits = sat_elements::extract(
        &documents.sat_elements.name,
        &documents.sat_elements.text,
        &config.default_epochs,
        placeholders,
    )?;
    normalize_batch(&normalizer, orbits, RawRecord::SatElements, &mut records, &mut diagnostics)?;

    for record in &documents.sbdb {
        let extracted = sbdb::extract(&record.name, &record.text, placeholders)?;
        normalize_batch(&normalizer, extracted, RawRecord::Sbdb, &mut records, &mut diagnostics)?;
    }
    log::info!("{} records extracted and normalized", records.len());

    let (catalog, warnings) = assemble(&records, config)?;
    diagnostics.extend(warnings);

    Ok(CatalogBuild { catalog, diagnostics })
}
