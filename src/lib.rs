//! Merges a transit route/stop catalog with inter-stop journey-time tables
//! into one denormalized snapshot, and derives nearby stops.

pub mod catalog;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod journey_time;
pub mod nearby;
pub mod output;
pub mod pipeline;
pub mod services;
pub mod stats;
