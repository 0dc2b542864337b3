//! # Actor Runtime Demo Library
//!
//! Sample pipelines built on `actor-runtime`, exposed as a library so the
//! integration tests can run them with small sizes.

pub mod config;
pub mod pipelines;

pub use config::{DemoConfig, DemoError};
pub use pipelines::{run_all, PipelineReport};
