//! Premium account application decisions backed by an external account validator.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
