//! Concrete clients for the upstream data providers.

pub mod hkbus;
