//! Roof-cleaning estimates, roof diagrams, and lead intake for MossCross.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
