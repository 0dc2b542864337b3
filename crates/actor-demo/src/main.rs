//! # Actor Runtime Demo
//!
//! Runs every sample pipeline and logs what each consumer received.
//!
//! ```bash
//! RUST_LOG=info cargo run -p actor-demo
//! RUST_LOG=info cargo run -p actor-demo -- demo.json
//! ```
//!
//! The optional argument is a JSON [`DemoConfig`] file.

use actor_demo::{run_all, DemoConfig, DemoError};
use actor_runtime::setup_tracing;
use std::time::Instant;
use tracing::info;

fn main() -> Result<(), DemoError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    info!(?config, "Starting actor demo");

    let started = Instant::now();
    for report in run_all(&config)? {
        info!(
            pipeline = report.name,
            received = report.received,
            checksum = report.checksum,
            "Pipeline finished"
        );
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "All pipelines finished"
    );
    Ok(())
}
