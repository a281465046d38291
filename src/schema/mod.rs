//! Schema module - Configuration and seed-shape types for Gray-Scott runs.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
