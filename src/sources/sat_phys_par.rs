//! # Satellite physical parameters
//!
//! One table per planetary system, each introduced by a heading such as
//! `<P><font size=+1><b>Jovian System</b></font>`. The heading is mapped to the primary
//! through the configured satellite systems. Every satellite row holds ten cells:
//!
//! ```text
//! name | GM (km³/s²) | ± | mean radius (km) | ± | mean density (g/cm³) | V0 or R | ± | albedo | ±
//! ```
//!
//! Precision cells are skipped, and a precision suffix inside a value cell is dropped.
use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::{
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::parse_field,
};

use super::{html, Extracted};

const CELLS: usize = 10;

static SYSTEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<P>\s*<font size=\+1>\s*<b>([^<]*)</b>\s*</font>(.*?)</TABLE>")
        .expect("static regex")
});

/// Physical data of one satellite (source units, `None` = unknown).
#[derive(Debug, Clone, PartialEq)]
pub struct SatPhysParRow {
    pub name: String,
    pub primary: String,
    /// km³/s²
    pub gravitational_parameter: Option<f64>,
    /// km
    pub mean_radius: Option<f64>,
    /// g/cm³
    pub mean_density: Option<f64>,
    pub magnitude: Option<f64>,
    pub geometric_albedo: Option<f64>,
}

/// Read the satellite physical parameter tables.
///
/// Arguments
/// ---------
/// * `name`: identifier of the document.
/// * `html`: document text.
/// * `systems`: system heading → primary body.
/// * `placeholders`: cell contents meaning "unknown value".
///
/// Return
/// ------
/// * One [`SatPhysParRow`] per satellite, grouped by system in document order.
///
/// Errors
/// ------
/// * [`ParseErrorKind::UnknownSystem`] for a heading absent from `systems`.
/// * [`ParseErrorKind::FieldCount`] for a satellite row without ten cells.
/// * [`ParseErrorKind::Structure`] when the document holds no system table.
pub fn extract(
    name: &str,
    html: &str,
    systems: &BTreeMap<String, String>,
    placeholders: &[String],
) -> Result<Extracted<SatPhysParRow>, CatalogError> {
    let document = SourceId::new(SourceKind::SatPhysPar, name);
    let mut extracted = Extracted::new(document.clone());
    let mut tables = 0;

    for system in SYSTEM.captures_iter(html) {
        tables += 1;
        let heading = html::text(&system[1]);
        let primary = systems.get(&heading).ok_or_else(|| {
            ParseError::new(&document, ParseErrorKind::UnknownSystem(heading.clone()), &system[0])
        })?;

        for row in html::rows(&system[2]) {
            let cells = html::cells(row);
            if cells.is_empty() {
                // header row
                continue;
            }
            if cells.len() != CELLS {
                return Err(ParseError::new(
                    &document,
                    ParseErrorKind::FieldCount {
                        expected: CELLS.to_string(),
                        found: cells.len(),
                    },
                    row,
                )
                .into());
            }

            let satellite = html::satellite_name(&cells[0]);
            let field = |index: usize, field: &str| {
                parse_field(&document, &format!("{satellite}.{field}"), &cells[index], placeholders)
            };
            // magnitudes carry their photometric band as a suffix (`17.5R`)
            let magnitude = cells[6].trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());

            extracted.records.push(SatPhysParRow {
                primary: primary.clone(),
                gravitational_parameter: field(1, "gravitational_parameter")?,
                mean_radius: field(3, "mean_radius")?,
                mean_density: field(5, "mean_density")?,
                magnitude: parse_field(
                    &document,
                    &format!("{satellite}.magnitude"),
                    magnitude,
                    placeholders,
                )?,
                geometric_albedo: field(8, "geometric_albedo")?,
                name: satellite,
            });
        }
    }

    if tables == 0 {
        return Err(ParseError::new(&document, ParseErrorKind::Structure, "no satellite system table").into());
    }

    log::debug!("{}: {} satellites in {} systems", document, extracted.records.len(), tables);
    Ok(extracted)
}
