//! Non-fatal findings of a catalog build.
//!
//! Unrecognized fields of a source are dropped and reported here rather than failing the
//! build. Each warning is also forwarded to the [`log`] facade.
use std::fmt;

use crate::catalog_errors::SourceId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub document: SourceId,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.document, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, document: &SourceId, message: impl Into<String>) {
        let warning = Warning {
            document: document.clone(),
            message: message.into(),
        };
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Append the warnings of another build stage, keeping their order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
