//! # Planetary mean elements
//!
//! Plain-text tables of Keplerian elements and their rates for the approximate positions
//! of the major planets. Two tables exist: Table 1 is valid from 1800 to 2050, Table 2
//! from 3000 BC to 3000 AD.
//!
//! After a header and a dashed rule, each planet spans two lines:
//!
//! ```text
//! EM Bary   1.00000261      0.01671123     -0.00001531      100.46457166    102.93768193      0.0
//!           0.00000562     -0.00004392     -0.01294668    35999.37244981      0.32327364      0.0
//! ```
//!
//! The first line holds the name (which may contain single spaces) and the six elements
//! `a` (au), `e`, `I`, `L`, `ϖ`, `Ω` (degrees); the second line holds their rates per
//! Julian century. The block ends at the first blank line, the next dashed rule (Table 2
//! continues with extra terms for the outer planets), or the end of the document.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    catalog_errors::{CatalogError, ParseError, ParseErrorKind, SourceId, SourceKind},
    conversion::parse_required,
};

use super::Extracted;

const ELEMENTS: usize = 6;

static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-{10,}\s*$").expect("static regex"));

static NAME_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").expect("static regex"));

/// Which of the two published tables a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementsTable {
    /// 1800 AD – 2050 AD
    Table1,
    /// 3000 BC – 3000 AD
    Table2,
}

/// A mean element and its rate of change per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedElement {
    pub value: f64,
    pub rate: f64,
}

/// Mean elements of one planet (au, degrees; rates per century).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetElementsRow {
    pub name: String,
    pub table: ElementsTable,
    pub semi_major_axis: RatedElement,
    pub eccentricity: RatedElement,
    pub inclination: RatedElement,
    pub mean_longitude: RatedElement,
    pub longitude_of_periapsis: RatedElement,
    pub longitude_of_ascending_node: RatedElement,
}

fn numbers<'a>(
    document: &SourceId,
    planet: &str,
    line: &str,
    values: impl Iterator<Item = &'a str>,
) -> Result<Vec<f64>, CatalogError> {
    let values: Vec<&str> = values.collect();
    if values.len() != ELEMENTS {
        return Err(ParseError::new(
            document,
            ParseErrorKind::FieldCount {
                expected: ELEMENTS.to_string(),
                found: values.len(),
            },
            line,
        )
        .into());
    }
    values
        .iter()
        .map(|v| parse_required(document, planet, v, &[]))
        .collect()
}

/// Read one of the planetary mean element tables.
///
/// Errors
/// ------
/// * [`ParseErrorKind::Structure`] when the dashed rule is missing, when the block is
///   empty, or when a planet has a value line without its rate line.
/// * [`ParseErrorKind::FieldCount`] when a line does not hold six numbers.
pub fn extract(
    name: &str,
    text: &str,
    table: ElementsTable,
) -> Result<Extracted<PlanetElementsRow>, CatalogError> {
    let document = SourceId::new(SourceKind::PlanetElements, name);

    let mut lines = text.lines().skip_while(|line| !RULE.is_match(line));
    if lines.next().is_none() {
        return Err(ParseError::new(&document, ParseErrorKind::Structure, "no dashed rule").into());
    }
    let block: Vec<&str> = lines
        .take_while(|line| !line.trim().is_empty() && !RULE.is_match(line))
        .collect();

    if block.is_empty() {
        return Err(ParseError::new(&document, ParseErrorKind::Structure, "empty element block").into());
    }
    if block.len() % 2 != 0 {
        return Err(ParseError::new(
            &document,
            ParseErrorKind::Structure,
            block.last().copied().unwrap_or_default(),
        )
        .into());
    }

    let mut extracted = Extracted::new(document.clone());
    for pair in block.chunks_exact(2) {
        let (values_line, rates_line) = (pair[0], pair[1]);

        let mut columns = NAME_SEPARATOR.split(values_line.trim());
        let planet = columns.next().unwrap_or_default().to_string();
        let values = numbers(&document, &planet, values_line, columns)?;
        let rates = numbers(&document, &planet, rates_line, rates_line.split_whitespace())?;

        let rated = |i: usize| RatedElement {
            value: values[i],
            rate: rates[i],
        };
        extracted.records.push(PlanetElementsRow {
            table,
            semi_major_axis: rated(0),
            eccentricity: rated(1),
            inclination: rated(2),
            mean_longitude: rated(3),
            longitude_of_periapsis: rated(4),
            longitude_of_ascending_node: rated(5),
            name: planet,
        });
    }

    log::debug!("{}: {} planets", document, extracted.records.len());
    Ok(extracted)
}
