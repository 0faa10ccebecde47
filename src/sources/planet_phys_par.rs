//! # Planetary physical parameters
//!
//! Reads the planetary physical parameter table. Each planet is one `<tr>` whose first
//! cell (`<td align="left">`) holds the name and whose ten right-aligned cells hold, in
//! order:
//!
//! | # | Field | Unit |
//! |---|-------|------|
//! | 1 | equatorial radius | km |
//! | 2 | mean radius | km |
//! | 3 | mass | 10²⁴ kg |
//! | 4 | bulk density | g/cm³ |
//! | 5 | sidereal rotation period (signed) | days |
//! | 6 | sidereal orbit period | Julian years |
//! | 7 | V(1,0) magnitude | – |
//! | 8 | geometric albedo | – |
//! | 9 | equatorial gravity | m/s² |
//! | 10 | escape velocity | km/s |
//!
//! The footnotes state the gravitational constant used to derive the masses
//! (`G=6.674…`, in units of 10⁻¹¹ m³ kg⁻¹ s⁻²); it is returned with the rows so that
//! gravitational parameters are computed with the same constant.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::parse_field,
};

use super::{html, Extracted};

const VALUE_CELLS: usize = 10;

static GRAVITATIONAL_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"G\s*=\s*(6\.67[0-9]*)").expect("static regex"));

static PLANET_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<td align="left">([^<]*)<br>\s*&nbsp;</td>(.*?)</tr>"#).expect("static regex")
});

static VALUE_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<td align="right"[^>]*>([^<]*)<br>"#).expect("static regex")
});

/// One planet of the table, source-native units (`None` = unknown).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPhysParRow {
    pub name: String,
    pub equatorial_radius: Option<f64>,
    pub mean_radius: Option<f64>,
    pub mass: Option<f64>,
    pub bulk_density: Option<f64>,
    pub sidereal_rotation_period: Option<f64>,
    pub sidereal_orbit_period: Option<f64>,
    pub magnitude: Option<f64>,
    pub geometric_albedo: Option<f64>,
    pub equatorial_gravity: Option<f64>,
    pub escape_velocity: Option<f64>,
}

/// Extracted planet table together with its gravitational constant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPhysPar {
    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub gravitational_constant: f64,
    pub rows: Extracted<PlanetPhysParRow>,
}

/// Extract the gravitational constant stated by the document.
pub fn gravitational_constant(document: &SourceId, html: &str) -> Result<f64, CatalogError> {
    let captures = GRAVITATIONAL_CONSTANT.captures(html).ok_or_else(|| {
        ParseError::new(
            document,
            ParseErrorKind::MissingField("G".into()),
            "gravitational constant",
        )
    })?;
    let g: f64 = captures[1].parse().map_err(|_| CatalogError::UnitConversion {
        document: document.clone(),
        field: "G".into(),
        value: captures[1].to_string(),
    })?;
    Ok(g * 1e-11)
}

/// Read the planetary physical parameter table.
///
/// Arguments
/// ---------
/// * `name`: identifier of the document, used in errors and warnings.
/// * `html`: document text.
/// * `placeholders`: cell contents meaning "unknown value".
///
/// Return
/// ------
/// * The gravitational constant and one [`PlanetPhysParRow`] per planet, in document order.
///
/// Errors
/// ------
/// * [`ParseErrorKind::MissingField`] if `G` is not stated, [`ParseErrorKind::Structure`]
///   if no planet row is found, [`ParseErrorKind::FieldCount`] for a row with a number of
///   value cells other than ten, [`CatalogError::UnitConversion`] for a non-numeric cell.
pub fn extract(name: &str, html: &str, placeholders: &[String]) -> Result<PlanetPhysPar, CatalogError> {
    let document = SourceId::new(SourceKind::PlanetPhysPar, name);
    let gravitational_constant = gravitational_constant(&document, html)?;
    let mut extracted = Extracted::new(document.clone());

    for row in PLANET_ROW.captures_iter(html) {
        let planet = html::text(&row[1]);
        let values: Vec<&str> = VALUE_CELL
            .captures_iter(&row[2])
            .map(|c| c.get(1).map_or("", |m| m.as_str()))
            .collect();

        if values.len() != VALUE_CELLS {
            return Err(ParseError::new(
                &document,
                ParseErrorKind::FieldCount {
                    expected: VALUE_CELLS.to_string(),
                    found: values.len(),
                },
                &row[0],
            )
            .into());
        }

        let field = |index: usize, field: &str| {
            parse_field(&document, &format!("{planet}.{field}"), values[index], placeholders)
        };

        extracted.records.push(PlanetPhysParRow {
            equatorial_radius: field(0, "equatorial_radius")?,
            mean_radius: field(1, "mean_radius")?,
            mass: field(2, "mass")?,
            bulk_density: field(3, "bulk_density")?,
            sidereal_rotation_period: field(4, "sidereal_rotation_period")?,
            sidereal_orbit_period: field(5, "sidereal_orbit_period")?,
            magnitude: field(6, "magnitude")?,
            geometric_albedo: field(7, "geometric_albedo")?,
            equatorial_gravity: field(8, "equatorial_gravity")?,
            escape_velocity: field(9, "escape_velocity")?,
            name: planet,
        });
    }

    if extracted.records.is_empty() {
        return Err(ParseError::new(&document, ParseErrorKind::Structure, "no planet row").into());
    }

    log::debug!("{}: {} planets", document, extracted.records.len());
    Ok(PlanetPhysPar {
        gravitational_constant,
        rows: extracted,
    })
}

#[cfg(test)]
mod planet_phys_par_test {
    use super::*;
    use approx::assert_relative_eq;

    fn row(name: &str, values: &[&str]) -> String {
        let cells: String = values
            .iter()
            .map(|v| format!("<td align=\"right\" nowrap>{v}<br><font size=-2>&nbsp;</font></td>\n"))
            .collect();
        format!("<tr>\n<td align=\"left\">{name}<br>&nbsp;</td>\n{cells}</tr>\n")
    }

    fn placeholders() -> Vec<String> {
        vec!["?".into()]
    }

    #[test]
    fn test_extract_jupiter() {
        let html = format!(
            "<table>{}</table><p>G=6.67430 x 10<sup>-11</sup></p>",
            row(
                "Jupiter",
                &["71492", "69911", "1898.19", "1.326", "0.41354", "11.862", "-9.40", "0.538", "24.79", "59.5"]
            )
        );
        let table = extract("planet_phys_par.html", &html, &placeholders()).unwrap();
        assert_relative_eq!(table.gravitational_constant, 6.6743e-11, max_relative = 1e-15);
        assert_eq!(table.rows.records.len(), 1);
        let jupiter = &table.rows.records[0];
        assert_eq!(jupiter.name, "Jupiter");
        assert_eq!(jupiter.mean_radius, Some(69911.0));
        assert_eq!(jupiter.mass, Some(1898.19));
        assert_eq!(jupiter.magnitude, Some(-9.40));
    }

    #[test]
    fn test_placeholder_is_unknown() {
        let html = format!(
            "{}G=6.674",
            row("Pluto", &["1188", "1188", "0.01303", "1.854", "-6.3872", "247.92", "-1.0", "?", "0.62", "1.21"])
        );
        let table = extract("planet_phys_par.html", &html, &placeholders()).unwrap();
        assert_eq!(table.rows.records[0].geometric_albedo, None);
        assert_eq!(table.rows.records[0].sidereal_rotation_period, Some(-6.3872));
    }

    #[test]
    fn test_wrong_field_count() {
        let html = format!("{}G=6.674", row("Mars", &["3396", "3390"]));
        let err = extract("planet_phys_par.html", &html, &placeholders()).unwrap_err();
        match err {
            CatalogError::Parse(e) => {
                assert_eq!(
                    e.kind,
                    ParseErrorKind::FieldCount {
                        expected: "10".into(),
                        found: 2
                    }
                );
                assert_eq!(e.document.kind, SourceKind::PlanetPhysPar);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_gravitational_constant() {
        let html = row("Mars", &["3396"; 10]);
        assert!(matches!(
            extract("planet_phys_par.html", &html, &placeholders()),
            Err(CatalogError::Parse(ParseError {
                kind: ParseErrorKind::MissingField(_),
                ..
            }))
        ));
    }

    #[test]
    fn test_non_numeric_cell() {
        let html = format!("{}G=6.674", row("Mars", &["3396", "abc", "0.642", "3.93", "1.03", "1.88", "-1.5", "0.17", "3.71", "5.03"]));
        assert!(matches!(
            extract("planet_phys_par.html", &html, &placeholders()),
            Err(CatalogError::UnitConversion { .. })
        ));
    }
}
