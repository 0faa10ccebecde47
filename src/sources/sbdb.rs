//! # Small-body database records
//!
//! One document per small body. Two tables are read:
//!
//! * the **orbital elements** table introduced by `Orbital Elements at Epoch <JD>`, whose
//!   rows are `element | value | uncertainty | units`;
//! * the **physical parameter** table introduced by `Physical Parameter Table`, whose rows
//!   are `parameter | symbol | value | …`.
//!
//! Parameters outside the known schema are reported as warnings and dropped. Missing
//! orbital elements required to place the body on its orbit are fatal.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::{parse_field, parse_required},
};

use super::{html, Extracted};

static ORBITAL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Orbital Elements at Epoch\s+(\d+(?:\.\d+)?)(.*?)</table>").expect("static regex")
});

static PHYSICAL_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Physical Parameter Table(.*?)</table>").expect("static regex"));

/// Orbital elements and physical parameters of one small body.
///
/// Units are the database ones: au, degrees, days, hours, km, km³/s², g/cm³.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SbdbRow {
    pub name: String,
    /// Julian date of the osculating elements (TDB)
    pub epoch_jd: f64,
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub argument_of_periapsis: f64,
    pub mean_anomaly_at_epoch: f64,
    pub periapsis: Option<f64>,
    pub apoapsis: Option<f64>,
    pub orbital_period: Option<f64>,
    pub mean_motion: Option<f64>,

    pub absolute_magnitude: Option<f64>,
    pub magnitude_slope: Option<f64>,
    pub diameter: Option<f64>,
    pub gravitational_parameter: Option<f64>,
    pub bulk_density: Option<f64>,
    pub rotation_period: Option<f64>,
    /// Right ascension and declination of the pole
    pub pole: Option<(f64, f64)>,
    pub geometric_albedo: Option<f64>,
}

/// Row cells of a table fragment, header rows excluded.
fn table_rows(fragment: &str) -> Vec<Vec<String>> {
    html::rows(fragment)
        .into_iter()
        .map(html::cells)
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn read_orbital_elements(
    document: &SourceId,
    rows: &[Vec<String>],
    placeholders: &[String],
    record: &mut SbdbRow,
    extracted: &mut Extracted<SbdbRow>,
) -> Result<(), CatalogError> {
    let mut seen: Vec<&str> = Vec::new();
    for cells in rows {
        let (Some(parameter), Some(value)) = (cells.first(), cells.get(1)) else {
            extracted
                .diagnostics
                .warn(document, format!("orbital element row without value: {cells:?}"));
            continue;
        };
        let required = || parse_required(document, parameter, value, placeholders);
        let optional = || parse_field(document, parameter, value, placeholders);

        match parameter.as_str() {
            "e" => record.eccentricity = required()?,
            "a" => record.semi_major_axis = required()?,
            "i" => record.inclination = required()?,
            "node" => record.longitude_of_ascending_node = required()?,
            "peri" => record.argument_of_periapsis = required()?,
            "M" => record.mean_anomaly_at_epoch = required()?,
            "q" => record.periapsis = optional()?,
            "Q" => record.apoapsis = optional()?,
            "period" => record.orbital_period = optional()?,
            "n" => record.mean_motion = optional()?,
            // time of periapsis passage
            "tp" | "t" => {}
            other => {
                extracted
                    .diagnostics
                    .warn(document, format!("unexpected orbital element '{other}' ({value})"));
                continue;
            }
        }
        seen.push(parameter);
    }

    for element in ["e", "a", "i", "node", "peri", "M"] {
        if !seen.contains(&element) {
            return Err(ParseError::new(
                document,
                ParseErrorKind::MissingField(element.into()),
                "orbital elements table",
            )
            .into());
        }
    }
    Ok(())
}

fn read_physical_parameters(
    document: &SourceId,
    rows: &[Vec<String>],
    placeholders: &[String],
    record: &mut SbdbRow,
    extracted: &mut Extracted<SbdbRow>,
) -> Result<(), CatalogError> {
    for cells in rows {
        let (Some(parameter), Some(value)) = (cells.first(), cells.get(2)) else {
            extracted
                .diagnostics
                .warn(document, format!("physical parameter row without value: {cells:?}"));
            continue;
        };
        let field = || parse_field(document, parameter, value, placeholders);

        match parameter.as_str() {
            "absolute magnitude" => record.absolute_magnitude = field()?,
            "magnitude slope" => record.magnitude_slope = field()?,
            "diameter" => record.diameter = field()?,
            "GM" => record.gravitational_parameter = field()?,
            "bulk density" => record.bulk_density = field()?,
            "rotation period" => record.rotation_period = field()?,
            "geometric albedo" => record.geometric_albedo = field()?,
            "pole direction" => {
                record.pole = match value.split_once('/') {
                    Some((ra, dec)) => Some((
                        parse_required(document, "pole right ascension", ra, placeholders)?,
                        parse_required(document, "pole declination", dec, placeholders)?,
                    )),
                    None => {
                        field()?;
                        None
                    }
                }
            }
            "extent" | "B-V" | "U-B" | "I-R" | "Tholen spectral type" | "SMASSII spectral type" => {}
            other => extracted
                .diagnostics
                .warn(document, format!("unexpected physical parameter '{other}' ({value})")),
        }
    }
    Ok(())
}

/// Read one small-body database record.
///
/// Arguments
/// ---------
/// * `name`: name of the body, used as document identifier.
/// * `html`: document text.
/// * `placeholders`: cell contents meaning "unknown value".
///
/// Return
/// ------
/// * One [`SbdbRow`], with a warning for each parameter outside the known schema.
///
/// Errors
/// ------
/// * [`ParseErrorKind::Structure`] when the orbital elements table is missing.
/// * [`ParseErrorKind::MissingField`] when one of `e`, `a`, `i`, `node`, `peri`, `M` is
///   absent.
pub fn extract(name: &str, html: &str, placeholders: &[String]) -> Result<Extracted<SbdbRow>, CatalogError> {
    let document = SourceId::new(SourceKind::Sbdb, name);
    let mut extracted = Extracted::new(document.clone());

    let orbital = ORBITAL_BLOCK.captures(html).ok_or_else(|| {
        ParseError::new(&document, ParseErrorKind::Structure, "no `Orbital Elements at Epoch` table")
    })?;

    let mut record = SbdbRow {
        name: name.to_string(),
        epoch_jd: parse_required(&document, "epoch", &orbital[1], &[])?,
        ..Default::default()
    };
    read_orbital_elements(
        &document,
        &table_rows(&orbital[2]),
        placeholders,
        &mut record,
        &mut extracted,
    )?;

    match PHYSICAL_BLOCK.captures(html) {
        Some(physical) => read_physical_parameters(
            &document,
            &table_rows(&physical[1]),
            placeholders,
            &mut record,
            &mut extracted,
        )?,
        None => extracted
            .diagnostics
            .warn(&document, "no physical parameter table"),
    }

    extracted.records.push(record);
    Ok(extracted)
}
