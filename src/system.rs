//! # Actor System
//!
//! The [`ActorSystem`] is the registry every builder writes to and the
//! single place that launches and awaits actors.
//!
//! ```text
//! register ... register --start()--> start all (in order) --> await all (in order)
//! ```
//!
//! Registration is closed once [`start`](ActorSystem::start) begins. Because
//! `start` awaits every actor, it only returns once all of them have ended;
//! a system holding a reactor that is never stopped blocks forever.

use crate::actor::{Actor, ActorIdentity};
use crate::config::SystemConfig;
use crate::error::{ActorError, Result};
use crate::producer::ProducerBuilder;
use crate::reactor::ReactorBuilder;
use crate::state::{Stateful, Stateless};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Registry and orchestrator for a set of actors.
pub struct ActorSystem {
    config: SystemConfig,
    actors: Mutex<Vec<Arc<dyn Actor>>>,
    started: AtomicBool,
}

impl ActorSystem {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        Self {
            config,
            actors: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Builder for stateless producers.
    pub fn producer(&self) -> ProducerBuilder<'_, Stateless> {
        ProducerBuilder::new(self)
    }

    /// Builder for producers owning a default-initialized `S`.
    pub fn stateful_producer<S: Default + Send + 'static>(&self) -> ProducerBuilder<'_, Stateful<S>> {
        ProducerBuilder::new(self)
    }

    /// Builder for stateless reactors consuming `T`.
    pub fn reactor<T: Send + 'static>(&self) -> ReactorBuilder<'_, T, Stateless> {
        ReactorBuilder::new(self)
    }

    /// Builder for reactors consuming `T` and owning a default-initialized `S`.
    pub fn stateful_reactor<T: Send + 'static, S: Default + Send + 'static>(
        &self,
    ) -> ReactorBuilder<'_, T, Stateful<S>> {
        ReactorBuilder::new(self)
    }

    /// Appends `actor` to the registry.
    ///
    /// Builders call this for every actor they create. Fails with
    /// [`ActorError::SystemStarted`] once [`start`](Self::start) has begun.
    pub fn register(&self, actor: Arc<dyn Actor>) -> Result<()> {
        self.register_all(std::iter::once(actor))
    }

    /// Appends several actors at once, preserving their order.
    pub fn register_all(&self, actors: impl IntoIterator<Item = Arc<dyn Actor>>) -> Result<()> {
        let mut registry = self.actors.lock();
        if self.started.load(Ordering::SeqCst) {
            warn!("Rejecting registration on a started actor system");
            return Err(ActorError::SystemStarted);
        }
        for actor in actors {
            debug!(actor_id = actor.id(), actor = actor.name(), "Actor registered");
            registry.push(actor);
        }
        Ok(())
    }

    /// Starts every registered actor in registration order, then awaits each
    /// one in the same order.
    ///
    /// Every actor is awaited even if an earlier one failed; the first error
    /// is returned. Calling `start` a second time fails with
    /// [`ActorError::SystemStarted`].
    pub fn start(&self) -> Result<()> {
        let actors = {
            let registry = self.actors.lock();
            if self.started.swap(true, Ordering::SeqCst) {
                return Err(ActorError::SystemStarted);
            }
            registry.clone()
        };

        info!(actors = actors.len(), "Starting actor system");
        let mut first_error = None;
        let mut running = Vec::with_capacity(actors.len());
        for actor in &actors {
            match actor.start() {
                Ok(()) => running.push(actor),
                Err(err) => {
                    error!(actor = %actor.identity(), error = %err, "Actor failed to start");
                    first_error = first_error.or(Some(err));
                }
            }
        }

        info!(actors = running.len(), "Awaiting actor termination");
        for actor in running {
            if let Err(err) = actor.await_termination() {
                error!(actor = %actor.identity(), error = %err, "Actor ended with an error");
                first_error = first_error.or(Some(err));
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!("All actors terminated");
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.actors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.lock().is_empty()
    }

    /// Identities of the registered actors, in registration order.
    pub fn identities(&self) -> Vec<ActorIdentity> {
        self.actors
            .lock()
            .iter()
            .map(|actor| actor.identity().clone())
            .collect()
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActorSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorSystem")
            .field("config", &self.config)
            .field("actors", &self.identities())
            .field("started", &self.is_started())
            .finish()
    }
}
