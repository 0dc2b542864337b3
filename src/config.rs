//! # System Configuration
//!
//! Settings shared by every actor an [`ActorSystem`](crate::ActorSystem)
//! launches. Only thread-level concerns live here; mailbox capacity is always
//! chosen per reactor on its builder.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable overriding [`SystemConfig::thread_name_prefix`].
pub const THREAD_PREFIX_ENV: &str = "ACTOR_THREAD_PREFIX";

/// Environment variable overriding [`SystemConfig::stack_size`].
pub const STACK_SIZE_ENV: &str = "ACTOR_STACK_SIZE";

/// Thread settings applied when actors are started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Actor threads are named `<prefix>-<actor name>-<actor id>`.
    pub thread_name_prefix: String,

    /// Stack size in bytes for actor threads. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "actor".to_string(),
            stack_size: None,
        }
    }
}

impl SystemConfig {
    /// Builds a config from the defaults overlaid with `ACTOR_*` environment variables.
    ///
    /// An unparsable `ACTOR_STACK_SIZE` is ignored with a warning.
    pub fn from_env() -> Self {
        Self::default().overlay(
            std::env::var(THREAD_PREFIX_ENV).ok(),
            std::env::var(STACK_SIZE_ENV).ok(),
        )
    }

    fn overlay(mut self, prefix: Option<String>, stack_size: Option<String>) -> Self {
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            self.thread_name_prefix = prefix;
        }
        if let Some(raw) = stack_size {
            match raw.trim().parse::<usize>() {
                Ok(bytes) if bytes > 0 => self.stack_size = Some(bytes),
                _ => warn!(value = %raw, "Ignoring invalid {}", STACK_SIZE_ENV),
            }
        }
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub(crate) fn thread_name(&self, name: &str, id: i32) -> String {
        format!("{}-{}-{}", self.thread_name_prefix, name, id)
    }
}
