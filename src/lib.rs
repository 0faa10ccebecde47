pub mod body;
pub mod catalog;
pub mod catalog_errors;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod diagnostics;
pub mod frame_resolver;
pub mod normalizer;
pub mod records;
pub mod ref_system;
pub mod solar_catalog;
pub mod sources;
pub mod time;

pub use catalog::Catalog;
pub use catalog_errors::CatalogError;
pub use config::CatalogConfig;
pub use solar_catalog::{build_catalog, CatalogBuild, Document, SourceDocuments};
