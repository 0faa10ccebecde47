//! # Satellite orbital elements
//!
//! The document is split in systems (`<b>Satellites of Jupiter</b>`), each holding one or
//! more orbit sets. An orbit set starts with an `<H3>` heading naming its reference plane
//! (ecliptic, equatorial or Laplace), optionally followed by an `Epoch 2000 Jan. 1.50 TT`
//! line, and ends with its table. Each satellite row holds twelve cells:
//!
//! ```text
//! name | a (km) | e | ω | M | i | Ω (deg) | ϖ̇ (deg/day) | P (days) | Pω | PΩ (years) | ref
//! ```
//!
//! Laplace-plane sets insert three more cells before the reference: right ascension and
//! declination of the Laplace pole, and its tilt (degrees).
use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::{
    body::ReferencePlane,
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::{parse_field, parse_required},
    time::satellite_epoch_to_seconds,
};

use super::{html, Extracted};

const CELLS: usize = 12;
const LAPLACE_CELLS: usize = 15;

static SYSTEM_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<b>\s*Satellites of\s+([^<]*)</b>").expect("static regex"));

static ORBIT_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<H3>(.*?)</H3>(.*?)</TABLE>").expect("static regex"));

static EPOCH_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*Epoch\s+([^<]*?)\s*<BR>").expect("static regex"));

/// Pole of a satellite's Laplace plane (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplacePole {
    pub right_ascension: f64,
    pub declination: f64,
    pub tilt: f64,
}

/// Mean elements of one satellite (km, degrees, days, years).
#[derive(Debug, Clone, PartialEq)]
pub struct SatElementsRow {
    pub name: String,
    pub primary: String,
    pub reference_plane: ReferencePlane,
    /// Epoch as published, `YYYY Mon. DD.dd TT`
    pub epoch: String,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub argument_of_periapsis: f64,
    pub mean_anomaly_at_epoch: f64,
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    pub longitude_rate: Option<f64>,
    pub period: Option<f64>,
    pub argument_of_periapsis_precession_period: Option<f64>,
    pub longitude_of_ascending_node_precession_period: Option<f64>,
    pub laplace_pole: Option<LaplacePole>,
}

/// Reference plane named by an orbit set heading.
fn reference_plane(heading: &str) -> Option<ReferencePlane> {
    let heading = heading.to_lowercase();
    if heading.contains("ecliptic") {
        Some(ReferencePlane::Ecliptic)
    } else if heading.contains("laplace") {
        Some(ReferencePlane::Laplace)
    } else if heading.contains("equator") {
        Some(ReferencePlane::Equatorial)
    } else {
        None
    }
}

/// Split the document into `(primary, system html)` blocks.
fn systems(html: &str) -> Vec<(String, &str)> {
    let headings: Vec<_> = SYSTEM_HEADING.captures_iter(html).collect();
    headings
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let start = c.get(0).map_or(0, |m| m.end());
            let end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(html.len(), |m| m.start());
            (html::text(&c[1]), &html[start..end])
        })
        .collect()
}

/// Read the satellite orbital element tables.
///
/// Arguments
/// ---------
/// * `name`: identifier of the document.
/// * `html`: document text.
/// * `default_epochs`: primary → epoch used by orbit sets that state none.
/// * `placeholders`: cell contents meaning "unknown value", accepted for the rates and
///   precession periods only.
///
/// Errors
/// ------
/// * [`ParseErrorKind::UnknownReferencePlane`] for an orbit set heading naming no plane.
/// * [`ParseErrorKind::InvalidEpoch`] for an epoch that is missing (without default) or
///   malformed.
/// * [`ParseErrorKind::FieldCount`] for a row of neither twelve nor fifteen cells.
/// * [`ParseErrorKind::Structure`] when the document holds no system.
pub fn extract(
    name: &str,
    html: &str,
    default_epochs: &BTreeMap<String, String>,
    placeholders: &[String],
) -> Result<Extracted<SatElementsRow>, CatalogError> {
    let document = SourceId::new(SourceKind::SatElements, name);
    let mut extracted = Extracted::new(document.clone());

    let blocks = systems(html);
    if blocks.is_empty() {
        return Err(ParseError::new(&document, ParseErrorKind::Structure, "no `Satellites of` block").into());
    }

    for (primary, block) in blocks {
        for set in ORBIT_SET.captures_iter(block) {
            let heading = html::text(&set[1]);
            let plane = reference_plane(&heading).ok_or_else(|| {
                ParseError::new(
                    &document,
                    ParseErrorKind::UnknownReferencePlane(heading.clone()),
                    &set[0],
                )
            })?;

            let epoch = match EPOCH_LINE.captures(&set[2]) {
                Some(c) => html::text(&c[1]),
                None => default_epochs.get(&primary).cloned().ok_or_else(|| {
                    ParseError::new(&document, ParseErrorKind::InvalidEpoch, &set[0])
                })?,
            };
            if satellite_epoch_to_seconds(&epoch).is_none() {
                return Err(ParseError::new(&document, ParseErrorKind::InvalidEpoch, &epoch).into());
            }

            for row in html::rows(&set[2]) {
                let cells = html::cells(row);
                if cells.is_empty() {
                    continue;
                }
                if cells.len() != CELLS && cells.len() != LAPLACE_CELLS {
                    return Err(ParseError::new(
                        &document,
                        ParseErrorKind::FieldCount {
                            expected: format!("{CELLS} or {LAPLACE_CELLS}"),
                            found: cells.len(),
                        },
                        row,
                    )
                    .into());
                }

                let satellite = html::satellite_name(&cells[0]);
                let field_name = |field: &str| format!("{satellite}.{field}");
                let required =
                    |i: usize, field: &str| parse_required(&document, &field_name(field), &cells[i], &[]);
                let optional =
                    |i: usize, field: &str| parse_field(&document, &field_name(field), &cells[i], placeholders);

                let laplace_pole = if cells.len() == LAPLACE_CELLS {
                    Some(LaplacePole {
                        right_ascension: required(11, "laplace_right_ascension")?,
                        declination: required(12, "laplace_declination")?,
                        tilt: required(13, "laplace_tilt")?,
                    })
                } else {
                    None
                };

                extracted.records.push(SatElementsRow {
                    primary: primary.clone(),
                    reference_plane: plane,
                    epoch: epoch.clone(),
                    semi_major_axis: required(1, "semi_major_axis")?,
                    eccentricity: required(2, "eccentricity")?,
                    argument_of_periapsis: required(3, "argument_of_periapsis")?,
                    mean_anomaly_at_epoch: required(4, "mean_anomaly_at_epoch")?,
                    inclination: required(5, "inclination")?,
                    longitude_of_ascending_node: required(6, "longitude_of_ascending_node")?,
                    longitude_rate: optional(7, "longitude_rate")?,
                    period: optional(8, "period")?,
                    argument_of_periapsis_precession_period: optional(9, "argument_of_periapsis_precession_period")?,
                    longitude_of_ascending_node_precession_period: optional(
                        10,
                        "longitude_of_ascending_node_precession_period",
                    )?,
                    laplace_pole,
                    name: satellite.clone(),
                });
            }
        }
    }

    log::debug!("{}: {} satellite orbits", document, extracted.records.len());
    Ok(extracted)
}
