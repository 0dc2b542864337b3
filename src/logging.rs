//! # Observability & Tracing
//!
//! The runtime logs through the `tracing` crate and never installs a
//! subscriber on its own. Applications call [`setup_tracing`] once at startup.
//!
//! ## What Gets Traced
//!
//! - **System lifecycle**: registration count, start, await order (`info`)
//! - **Actor lifecycle**: thread started, setup done, terminated (`info`/`debug`)
//! - **Construction**: reactor mailbox capacity, group creation (`debug`)
//! - **Failures**: rejected configuration (`warn`), panicked actors (`error`)
//!
//! Every actor event carries `actor_id`, `actor` and `kind` fields.
//!
//! ```bash
//! RUST_LOG=info cargo run -p actor-demo
//! RUST_LOG=actor_runtime=debug cargo run -p actor-demo
//! ```

use tracing_subscriber::EnvFilter;

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set; use [`try_setup_tracing`]
/// where that can happen (tests, embedding).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Like [`setup_tracing`] but returns `false` instead of panicking when a
/// subscriber is already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .try_init()
        .is_ok()
}
