//! Weighted impact scoring and proportional allocation for funding-round projects.
//!
//! The [`impact`] module holds the scoring core, [`dataset`] loads the tabular
//! project exports it consumes, and the remaining modules carry the service
//! plumbing shared by the HTTP and command-line front ends.

pub mod config;
pub mod dataset;
pub mod error;
pub mod impact;
pub mod telemetry;
