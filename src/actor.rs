//! # Actor Contract
//!
//! This module defines what every actor has in common, independent of its
//! kind (producer or reactor) and of whether it owns state:
//!
//! - [`ActorIdentity`]: the immutable `{id, name}` pair assigned at construction.
//! - [`Actor`]: the capability the [`ActorSystem`](crate::ActorSystem) stores
//!   and drives (`start`, `await_termination`, identity accessors).
//! - `ActorThread`: the one-shot launch/join machinery shared by all kinds.
//!
//! ## Lifecycle
//!
//! ```text
//! Created --start()--> Running --(body returns or panics)--> Finished
//!                         \--await_termination() joins here
//! ```
//!
//! `start` may be called once. A second call, or awaiting an actor that was
//! never started, is reported as an error instead of being undefined.

use crate::config::SystemConfig;
use crate::error::{ActorError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

/// Immutable identifier of an actor: a numeric id and a display name.
///
/// The default identity is `{0, "anon"}`. Group members are named
/// `<base>-<index>` and numbered from zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorIdentity {
    id: i32,
    name: String,
}

impl ActorIdentity {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the `index`-th member of a group built from this identity.
    pub(crate) fn member(&self, index: usize) -> Self {
        Self::new(index as i32, format!("{}-{}", self.name, index))
    }
}

impl Default for ActorIdentity {
    fn default() -> Self {
        Self::new(0, "anon")
    }
}

impl fmt::Display for ActorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// The capability every actor exposes, irrespective of its concrete kind.
///
/// The [`ActorSystem`](crate::ActorSystem) keeps actors as `Arc<dyn Actor>`
/// so producers and reactors of any message or state type can share one
/// registry.
pub trait Actor: Send + Sync + 'static {
    fn identity(&self) -> &ActorIdentity;

    fn id(&self) -> i32 {
        self.identity().id()
    }

    fn name(&self) -> &str {
        self.identity().name()
    }

    /// Spawns the actor's thread and returns immediately.
    ///
    /// The thread runs the setup hook, then the kind-specific body. Fails with
    /// [`ActorError::AlreadyStarted`] when called a second time.
    fn start(&self) -> Result<()>;

    /// Blocks until the actor's thread has finished.
    ///
    /// A hook that panicked is reported as [`ActorError::Panicked`]. For a
    /// reactor that is never stopped this call never returns.
    fn await_termination(&self) -> Result<()>;
}

/// Lifecycle callback shared by all actors built from one builder.
///
/// State is passed explicitly; the hook never captures the actor.
pub(crate) type Hook<S> = Arc<dyn Fn(&mut S, &ActorIdentity) + Send + Sync>;

pub(crate) fn noop_hook<S: 'static>() -> Hook<S> {
    Arc::new(|_: &mut S, _: &ActorIdentity| {})
}

/// Work executed on the actor thread. Owns everything the thread needs.
pub(crate) type Launch = Box<dyn FnOnce() + Send + 'static>;

enum Lifecycle {
    Created(Launch),
    Running(JoinHandle<()>),
    Finished,
}

/// Launches a body on a dedicated OS thread exactly once and joins it.
pub(crate) struct ActorThread {
    kind: &'static str,
    config: SystemConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl ActorThread {
    pub(crate) fn new(kind: &'static str, config: SystemConfig, launch: Launch) -> Self {
        Self {
            kind,
            config,
            lifecycle: Mutex::new(Lifecycle::Created(launch)),
        }
    }

    pub(crate) fn start(&self, identity: &ActorIdentity) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock();
        let launch = match std::mem::replace(&mut *lifecycle, Lifecycle::Finished) {
            Lifecycle::Created(launch) => launch,
            other => {
                *lifecycle = other;
                return Err(ActorError::AlreadyStarted {
                    actor: identity.clone(),
                });
            }
        };

        let thread_name = self.config.thread_name(identity.name(), identity.id());
        let mut builder = thread::Builder::new().name(thread_name.clone());
        if let Some(stack_size) = self.config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        // The body is parked in a slot so a failed spawn can hand it back.
        let slot = Arc::new(Mutex::new(Some(launch)));
        let body = Arc::clone(&slot);
        let kind = self.kind;
        let body_identity = identity.clone();
        let spawned = builder.spawn(move || {
            let launch = body.lock().take();
            if let Some(launch) = launch {
                launch();
            }
            debug!(
                actor_id = body_identity.id(),
                actor = body_identity.name(),
                kind,
                "Actor body finished"
            );
        });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(source) => {
                if let Some(launch) = slot.lock().take() {
                    *lifecycle = Lifecycle::Created(launch);
                }
                error!(actor = %identity, kind, error = %source, "Failed to spawn actor thread");
                return Err(ActorError::Spawn {
                    actor: identity.clone(),
                    source,
                });
            }
        };

        *lifecycle = Lifecycle::Running(handle);
        info!(
            actor_id = identity.id(),
            actor = identity.name(),
            kind,
            thread = %thread_name,
            "Actor started"
        );
        Ok(())
    }

    pub(crate) fn join(&self, identity: &ActorIdentity) -> Result<()> {
        // The lock is released before the blocking join.
        let handle = {
            let mut lifecycle = self.lifecycle.lock();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Finished) {
                Lifecycle::Running(handle) => handle,
                Lifecycle::Finished => return Ok(()),
                created @ Lifecycle::Created(_) => {
                    *lifecycle = created;
                    return Err(ActorError::NotStarted {
                        actor: identity.clone(),
                    });
                }
            }
        };

        match handle.join() {
            Ok(()) => {
                info!(
                    actor_id = identity.id(),
                    actor = identity.name(),
                    kind = self.kind,
                    "Actor terminated"
                );
                Ok(())
            }
            Err(payload) => {
                let message = panic_message(payload);
                error!(
                    actor_id = identity.id(),
                    actor = identity.name(),
                    kind = self.kind,
                    panic = %message,
                    "Actor panicked"
                );
                Err(ActorError::Panicked {
                    actor: identity.clone(),
                    message,
                })
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Type name with module paths stripped, e.g. `Vec<Counter>` for
/// `alloc::vec::Vec<my_app::state::Counter>`.
pub(crate) fn short_type_name<S>() -> String {
    let full = std::any::type_name::<S>();
    let mut short = String::with_capacity(full.len());
    let mut start = 0;
    for (index, delimiter) in full.char_indices() {
        if matches!(delimiter, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&') {
            short.push_str(last_segment(&full[start..index]));
            short.push(delimiter);
            start = index + delimiter.len_utf8();
        }
    }
    short.push_str(last_segment(&full[start..]));
    short
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
