//! # Fact sheets
//!
//! One fact sheet per body, titled `<Name> Fact Sheet`. The only values read are the
//! right ascension and declination of the north pole of rotation (degrees, equatorial
//! J2000), which are optional: sheets of bodies without a defined pole omit them.
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::{
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::parse_required,
};

use super::{html, Extracted};

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title>\s*([^<]*?)\s+Fact Sheet\s*</title>").expect("static regex")
});

static RIGHT_ASCENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Right Ascension\s*:\s*([-+0-9.]+)").expect("static regex"));

static DECLINATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Declination\s*:\s*([-+0-9.]+)").expect("static regex"));

static SHEET_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"/]*fact\.html)""#).expect("static regex"));

/// Pole data of one fact sheet (degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct FactsheetRow {
    pub name: String,
    pub north_pole_right_ascension: Option<f64>,
    pub north_pole_declination: Option<f64>,
}

/// File names of the fact sheets linked from an index page, de-duplicated and sorted.
pub fn factsheet_index(html: &str) -> Vec<String> {
    SHEET_LINK
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .sorted()
        .dedup()
        .collect()
}

fn optional_angle(
    document: &SourceId,
    regex: &Regex,
    field: &str,
    html: &str,
) -> Result<Option<f64>, CatalogError> {
    regex
        .captures(html)
        .map(|c| parse_required(document, field, &c[1], &[]))
        .transpose()
}

/// Read one fact sheet.
///
/// The right ascension and the declination come as a pair: a sheet stating only one of
/// them fails with [`ParseErrorKind::MissingField`]. A sheet without title fails with
/// [`ParseErrorKind::Structure`].
pub fn extract(name: &str, html: &str) -> Result<Extracted<FactsheetRow>, CatalogError> {
    let document = SourceId::new(SourceKind::Factsheet, name);

    let title = TITLE.captures(html).ok_or_else(|| {
        ParseError::new(&document, ParseErrorKind::Structure, "no `<Name> Fact Sheet` title")
    })?;
    let body = html::text(&title[1]);

    let right_ascension = optional_angle(&document, &RIGHT_ASCENSION, "right_ascension", html)?;
    let declination = optional_angle(&document, &DECLINATION, "declination", html)?;

    match (right_ascension, declination) {
        (Some(_), None) => {
            return Err(ParseError::new(
                &document,
                ParseErrorKind::MissingField("declination".into()),
                &body,
            )
            .into())
        }
        (None, Some(_)) => {
            return Err(ParseError::new(
                &document,
                ParseErrorKind::MissingField("right_ascension".into()),
                &body,
            )
            .into())
        }
        _ => {}
    }

    let mut extracted = Extracted::new(document);
    extracted.records.push(FactsheetRow {
        name: body,
        north_pole_right_ascension: right_ascension,
        north_pole_declination: declination,
    });
    Ok(extracted)
}
