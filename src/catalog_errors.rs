use std::fmt;

use thiserror::Error;

/// Kind of source document an extractor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    PlanetPhysPar,
    Factsheet,
    PlanetElements,
    SatPhysPar,
    SatElements,
    Sbdb,
    Config,
    /// Merging of records into the catalog
    Assembly,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::PlanetPhysPar => "planet_phys_par",
            SourceKind::Factsheet => "factsheet",
            SourceKind::PlanetElements => "p_elem",
            SourceKind::SatPhysPar => "sat_phys_par",
            SourceKind::SatElements => "sat_elem",
            SourceKind::Sbdb => "sbdb",
            SourceKind::Config => "config",
            SourceKind::Assembly => "assembly",
        };
        write!(f, "{name}")
    }
}

/// Identifier of a single source document (kind plus document name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId {
    pub kind: SourceKind,
    pub name: String,
}

impl SourceId {
    pub fn new(kind: SourceKind, name: impl Into<String>) -> Self {
        SourceId {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Structural failure categories of the extractors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("structure does not match the expected layout")]
    Structure,
    #[error("wrong field count (expected {expected}, found {found})")]
    FieldCount { expected: String, found: usize },
    #[error("missing required field '{0}'")]
    MissingField(String),
    #[error("unknown satellite system '{0}'")]
    UnknownSystem(String),
    #[error("unknown reference plane '{0}'")]
    UnknownReferencePlane(String),
    #[error("invalid epoch")]
    InvalidEpoch,
}

/// Document-level parsing error, carrying the source and the offending fragment.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{document}: {kind} near `{fragment}`")]
pub struct ParseError {
    pub document: SourceId,
    pub kind: ParseErrorKind,
    pub fragment: String,
}

impl ParseError {
    const MAX_FRAGMENT: usize = 120;

    /// Build a parse error, truncating the fragment to a readable length.
    pub fn new(document: &SourceId, kind: ParseErrorKind, fragment: &str) -> Self {
        let fragment = fragment.trim();
        let fragment = match fragment.char_indices().nth(Self::MAX_FRAGMENT) {
            Some((cut, _)) => format!("{}…", &fragment[..cut]),
            None => fragment.to_string(),
        };
        ParseError {
            document: document.clone(),
            kind,
            fragment,
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Unit conversion error in {document}: field '{field}' is not numeric ({value:?})")]
    UnitConversion {
        document: SourceId,
        field: String,
        value: String,
    },

    #[error("Missing primary data: '{body}' requires '{primary}' ({reason})")]
    MissingPrimaryData {
        body: String,
        primary: String,
        reason: String,
    },

    #[error("Geometry degeneracy: {0}")]
    GeometryDegeneracy(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    pub(crate) fn missing_primary(
        body: impl Into<String>,
        primary: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CatalogError::MissingPrimaryData {
            body: body.into(),
            primary: primary.into(),
            reason: reason.into(),
        }
    }
}

impl PartialEq for CatalogError {
    fn eq(&self, other: &Self) -> bool {
        use CatalogError::*;
        match (self, other) {
            (Parse(a), Parse(b)) => a == b,
            (
                UnitConversion {
                    document: d1,
                    field: f1,
                    value: v1,
                },
                UnitConversion {
                    document: d2,
                    field: f2,
                    value: v2,
                },
            ) => d1 == d2 && f1 == f2 && v1 == v2,
            (
                MissingPrimaryData {
                    body: b1,
                    primary: p1,
                    reason: r1,
                },
                MissingPrimaryData {
                    body: b2,
                    primary: p2,
                    reason: r2,
                },
            ) => b1 == b2 && p1 == p2 && r1 == r2,
            (GeometryDegeneracy(a), GeometryDegeneracy(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            // foreign payloads are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (Json(_), Json(_)) => true,

            _ => false,
        }
    }
}
