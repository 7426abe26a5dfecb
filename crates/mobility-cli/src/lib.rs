//! CLI library components for the mobility pipeline.

pub mod logging;
pub mod staging;
pub mod types;
pub mod workflow;
