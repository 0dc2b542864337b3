//! # Producers
//!
//! A producer runs one task once on its own thread:
//! `setup -> run -> shutdown`, then the thread ends. It has no mailbox; to
//! feed a reactor, the run hook closes over an `Arc<Reactor<_>>` and calls
//! [`Reactor::send`](crate::Reactor::send).
//!
//! ```
//! use actor_runtime::prelude::*;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> actor_runtime::Result<()> {
//! let system = ActorSystem::new();
//! let ticks = Arc::new(AtomicU32::new(0));
//!
//! let counter = Arc::clone(&ticks);
//! system
//!     .stateful_producer::<u32>()
//!     .name("ticker")
//!     .on_run(|count| *count += 3)
//!     .on_shutdown(move |count| counter.store(*count, Ordering::SeqCst))
//!     .create()?;
//!
//! system.start()?;
//! assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! # Ok(())
//! # }
//! ```

use crate::actor::{noop_hook, short_type_name, Actor, ActorIdentity, ActorThread, Hook};
use crate::error::Result;
use crate::group::ActorBuilder;
use crate::state::{hook_setters, StateKind, Stateful, Stateless};
use crate::system::ActorSystem;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Actor that runs a single task once, optionally owning state `S`.
pub struct Producer<S = ()> {
    identity: ActorIdentity,
    thread: ActorThread,
    _state: PhantomData<fn() -> S>,
}

/// A producer whose hooks share a private `S`.
pub type StatefulProducer<S> = Producer<S>;

pub(crate) struct ProducerHooks<S> {
    pub(crate) setup: Hook<S>,
    pub(crate) shutdown: Hook<S>,
    pub(crate) run: Hook<S>,
}

impl<S> Clone for ProducerHooks<S> {
    fn clone(&self) -> Self {
        Self {
            setup: self.setup.clone(),
            shutdown: self.shutdown.clone(),
            run: self.run.clone(),
        }
    }
}

impl<S: 'static> Default for ProducerHooks<S> {
    fn default() -> Self {
        Self {
            setup: noop_hook(),
            shutdown: noop_hook(),
            run: noop_hook(),
        }
    }
}

impl<S: Default + Send + 'static> Producer<S> {
    pub(crate) fn new(identity: ActorIdentity, hooks: ProducerHooks<S>, system: &ActorSystem) -> Self {
        let mut state = S::default();
        let body_identity = identity.clone();
        let launch = Box::new(move || {
            let ProducerHooks {
                setup,
                shutdown,
                run,
            } = hooks;
            setup(&mut state, &body_identity);
            run(&mut state, &body_identity);
            shutdown(&mut state, &body_identity);
        });

        debug!(
            actor_id = identity.id(),
            actor = identity.name(),
            state = %short_type_name::<S>(),
            "Producer built"
        );

        Self {
            identity,
            thread: ActorThread::new("producer", system.config().clone(), launch),
            _state: PhantomData,
        }
    }
}

impl<S: Default + Send + 'static> Actor for Producer<S> {
    fn identity(&self) -> &ActorIdentity {
        &self.identity
    }

    fn start(&self) -> Result<()> {
        self.thread.start(&self.identity)
    }

    fn await_termination(&self) -> Result<()> {
        self.thread.join(&self.identity)
    }
}

impl<S> fmt::Debug for Producer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("identity", &self.identity)
            .field("state", &short_type_name::<S>())
            .finish()
    }
}

/// Fluent builder for [`Producer`] and [`StatefulProducer`].
///
/// Obtained from [`ActorSystem::producer`] or
/// [`ActorSystem::stateful_producer`]. Creating actors (see
/// [`ActorBuilder`]) registers them with that system.
pub struct ProducerBuilder<'a, K: StateKind> {
    system: &'a ActorSystem,
    identity: ActorIdentity,
    hooks: ProducerHooks<K::State>,
    _kind: PhantomData<K>,
}

impl<'a, K: StateKind> ProducerBuilder<'a, K> {
    pub(crate) fn new(system: &'a ActorSystem) -> Self {
        Self {
            system,
            identity: ActorIdentity::default(),
            hooks: ProducerHooks::default(),
            _kind: PhantomData,
        }
    }
}

impl<K: StateKind> Clone for ProducerBuilder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            system: self.system,
            identity: self.identity.clone(),
            hooks: self.hooks.clone(),
            _kind: PhantomData,
        }
    }
}

impl ProducerBuilder<'_, Stateless> {
    hook_setters!(stateless: setup, shutdown, run);
}

impl<S: Default + Send + 'static> ProducerBuilder<'_, Stateful<S>> {
    hook_setters!(stateful S: setup, shutdown, run);
}

impl<K: StateKind> ActorBuilder for ProducerBuilder<'_, K> {
    type Actor = Producer<K::State>;

    fn system(&self) -> &ActorSystem {
        self.system
    }

    fn identity(&self) -> &ActorIdentity {
        &self.identity
    }

    fn with_identity(mut self, identity: ActorIdentity) -> Self {
        self.identity = identity;
        self
    }

    fn build(&self, identity: ActorIdentity) -> Result<Self::Actor> {
        Ok(Producer::new(identity, self.hooks.clone(), self.system))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActorError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn hooks_run_in_order_with_identity() {
        let system = ActorSystem::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let (setup_log, run_log, shutdown_log) = (events.clone(), events.clone(), events.clone());

        let producer = system
            .producer()
            .id(9)
            .name("loader")
            .on_setup_with_context(move |identity| setup_log.lock().push(format!("setup {}", identity)))
            .on_run_with_context(move |identity| run_log.lock().push(format!("run {}", identity)))
            .on_shutdown(move || shutdown_log.lock().push("shutdown".to_string()))
            .create()
            .unwrap();

        assert_eq!(producer.id(), 9);
        assert_eq!(producer.name(), "loader");

        producer.start().unwrap();
        producer.await_termination().unwrap();

        assert_eq!(
            *events.lock(),
            vec!["setup loader#9", "run loader#9", "shutdown"]
        );
    }

    #[test]
    fn state_threads_through_every_hook() {
        let system = ActorSystem::new();
        let observed = Arc::new(Mutex::new(Vec::new()));
        let log = observed.clone();

        let producer = system
            .stateful_producer::<Vec<&'static str>>()
            .on_setup(|state| state.push("setup"))
            .on_run(|state| state.push("run"))
            .on_shutdown(move |state| {
                state.push("shutdown");
                log.lock().extend(state.iter().copied());
            })
            .create()
            .unwrap();

        producer.start().unwrap();
        producer.await_termination().unwrap();
        assert_eq!(*observed.lock(), vec!["setup", "run", "shutdown"]);
    }

    #[test]
    fn default_hooks_are_noops() {
        let system = ActorSystem::new();
        let producer = system.producer().create().unwrap();
        assert_eq!(producer.identity(), &ActorIdentity::default());
        producer.start().unwrap();
        producer.await_termination().unwrap();
    }

    #[test]
    fn run_hook_panic_surfaces_on_await() {
        let system = ActorSystem::new();
        let shutdown_ran = Arc::new(Mutex::new(false));
        let flag = shutdown_ran.clone();

        let producer = system
            .producer()
            .name("doomed")
            .on_run(|| panic!("task failed"))
            .on_shutdown(move || *flag.lock() = true)
            .create()
            .unwrap();

        producer.start().unwrap();
        match producer.await_termination() {
            Err(ActorError::Panicked { message, .. }) => assert_eq!(message, "task failed"),
            other => panic!("expected panic, got {:?}", other),
        }
        assert!(!*shutdown_ran.lock(), "shutdown is not run after a failed task");
    }
}
