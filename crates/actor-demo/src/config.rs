//! # Demo Configuration
//!
//! Pipeline sizes. Every field has a default, so a JSON file only needs the
//! values it wants to change:
//!
//! ```json
//! { "queue_size": 64, "total_elements": 10000 }
//! ```

use actor_runtime::ActorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("pipeline failed: {0}")]
    Actor(#[from] ActorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Mailbox capacity of the single-consumer pipelines.
    pub queue_size: usize,

    /// Messages sent by the single-producer pipelines.
    pub total_elements: i64,

    /// Running total interval at which the stateful consumer logs progress.
    pub report_every: i64,

    pub group_consumers: usize,
    pub group_producers: usize,

    /// Messages sent by each producer of the group pipeline.
    pub group_messages: i64,

    /// Mailbox capacity of each group consumer.
    pub group_queue_size: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            queue_size: 1_000,
            total_elements: 1_000_000,
            report_every: 100_000,
            group_consumers: 2,
            group_producers: 4,
            group_messages: 6,
            group_queue_size: 2,
        }
    }
}

impl DemoConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DemoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}
