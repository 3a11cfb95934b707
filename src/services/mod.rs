//! Provider-agnostic interfaces for the catalog and journey-time sources.

pub mod catalog_api;

pub use catalog_api::{CatalogApi, JourneyTimeApi};
