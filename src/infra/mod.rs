//! Infrastructure adapters and runtime bootstrap.

pub mod assets;
pub mod error;
pub mod telemetry;
