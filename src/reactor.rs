//! # Reactors
//!
//! A reactor owns a bounded [`Mailbox`] and consumes it on its own thread:
//!
//! ```text
//! setup -> loop { receive(mailbox.dequeue()) }
//! ```
//!
//! The loop has no natural exit, so a reactor runs for as long as the process
//! does and awaiting it blocks forever. This is the intended mode for
//! always-on stream processors.
//!
//! [`Reactor::stop`] is an opt-in way out: it queues a stop marker behind
//! every message already sent. When the loop reaches it, the mailbox is
//! closed, the shutdown hook runs and the thread ends. Messages queued behind
//! the marker are discarded, and once the mailbox is closed `send` drops its
//! message and returns instead of blocking. A reactor whose thread ended in a
//! panic closes its mailbox the same way.
//!
//! Messages are handed to the receive hook by value, one at a time and in
//! send order, so state owned by a stateful reactor never needs locking.

use crate::actor::{noop_hook, short_type_name, Actor, ActorIdentity, ActorThread, Hook};
use crate::error::{ActorError, Result};
use crate::group::ActorBuilder;
use crate::mailbox::Mailbox;
use crate::state::{hook_setters, StateKind, Stateful, Stateless};
use crate::system::ActorSystem;
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub(crate) type ReceiveHook<T, S> = Arc<dyn Fn(T, &mut S, &ActorIdentity) + Send + Sync>;

enum Envelope<T> {
    Message(T),
    Stop,
}

/// Closes the mailbox when the reactor thread ends, including by panic.
struct CloseOnExit<T>(Arc<Mailbox<Envelope<T>>>);

impl<T> Drop for CloseOnExit<T> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Actor that continuously consumes messages of type `T`, optionally owning state `S`.
pub struct Reactor<T, S = ()> {
    identity: ActorIdentity,
    mailbox: Arc<Mailbox<Envelope<T>>>,
    thread: ActorThread,
    _state: PhantomData<fn() -> S>,
}

/// A reactor whose hooks share a private `S`.
pub type StatefulReactor<T, S> = Reactor<T, S>;

pub(crate) struct ReactorHooks<T, S> {
    pub(crate) setup: Hook<S>,
    pub(crate) shutdown: Hook<S>,
    pub(crate) receive: ReceiveHook<T, S>,
}

impl<T, S> Clone for ReactorHooks<T, S> {
    fn clone(&self) -> Self {
        Self {
            setup: self.setup.clone(),
            shutdown: self.shutdown.clone(),
            receive: self.receive.clone(),
        }
    }
}

impl<T: 'static, S: 'static> Default for ReactorHooks<T, S> {
    fn default() -> Self {
        Self {
            setup: noop_hook(),
            shutdown: noop_hook(),
            receive: Arc::new(|_: T, _: &mut S, _: &ActorIdentity| {}),
        }
    }
}

impl<T: Send + 'static, S: Default + Send + 'static> Reactor<T, S> {
    pub(crate) fn new(
        identity: ActorIdentity,
        capacity: NonZeroUsize,
        hooks: ReactorHooks<T, S>,
        system: &ActorSystem,
    ) -> Self {
        let mailbox = Arc::new(Mailbox::new(capacity));
        let mut state = S::default();
        let body_identity = identity.clone();
        let inbox = Arc::clone(&mailbox);
        let launch = Box::new(move || {
            let ReactorHooks {
                setup,
                shutdown,
                receive,
            } = hooks;
            let _closer = CloseOnExit(Arc::clone(&inbox));
            setup(&mut state, &body_identity);
            while let Some(Envelope::Message(message)) = inbox.dequeue() {
                receive(message, &mut state, &body_identity);
            }
            inbox.close();
            info!(
                actor_id = body_identity.id(),
                actor = body_identity.name(),
                "Reactor stop requested"
            );
            shutdown(&mut state, &body_identity);
        });

        debug!(
            actor_id = identity.id(),
            actor = identity.name(),
            capacity = capacity.get(),
            message_type = %short_type_name::<T>(),
            state = %short_type_name::<S>(),
            "Reactor built"
        );

        Self {
            identity,
            mailbox,
            thread: ActorThread::new("reactor", system.config().clone(), launch),
            _state: PhantomData,
        }
    }
}

impl<T, S> Reactor<T, S> {
    /// Enqueues `message`, blocking while the mailbox is full.
    ///
    /// Callable from any thread, including other actors' hooks. Sending before
    /// [`start`](Actor::start) is allowed; the messages wait in the mailbox.
    /// Once the reactor has stopped, the message is dropped.
    pub fn send(&self, message: T) {
        if self.mailbox.enqueue(Envelope::Message(message)).is_err() {
            debug!(actor = %self.identity, "Dropping message sent to a stopped reactor");
        }
    }

    /// Asks the reactor to finish once every message sent so far is processed.
    ///
    /// Blocks like [`send`](Self::send) when the mailbox is full. After the
    /// loop exits, the shutdown hook runs and
    /// [`await_termination`](Actor::await_termination) returns.
    /// Stopping an already stopped reactor does nothing.
    pub fn stop(&self) {
        // A closed mailbox means the loop has already exited.
        let _ = self.mailbox.enqueue(Envelope::Stop);
    }

    /// Whether the receive loop has exited and the mailbox is closed.
    pub fn is_stopped(&self) -> bool {
        self.mailbox.is_closed()
    }

    /// Messages currently waiting in the mailbox.
    pub fn pending(&self) -> usize {
        self.mailbox.len()
    }

    pub fn capacity(&self) -> usize {
        self.mailbox.capacity()
    }
}

impl<T: Send + 'static, S: Default + Send + 'static> Actor for Reactor<T, S> {
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

impl<T, S> fmt::Debug for Reactor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactor")
            .field("identity", &self.identity)
            .field("pending", &self.mailbox.len())
            .field("capacity", &self.mailbox.capacity())
            .field("state", &short_type_name::<S>())
            .finish()
    }
}

/// Fluent builder for [`Reactor`] and [`StatefulReactor`].
///
/// [`mailbox_size`](Self::mailbox_size) must be set to a positive value before
/// any actor is created; there is no default capacity.
pub struct ReactorBuilder<'a, T, K: StateKind> {
    system: &'a ActorSystem,
    identity: ActorIdentity,
    mailbox_size: Option<usize>,
    hooks: ReactorHooks<T, K::State>,
    _kind: PhantomData<K>,
}

impl<'a, T: Send + 'static, K: StateKind> ReactorBuilder<'a, T, K> {
    pub(crate) fn new(system: &'a ActorSystem) -> Self {
        Self {
            system,
            identity: ActorIdentity::default(),
            mailbox_size: None,
            hooks: ReactorHooks::default(),
            _kind: PhantomData,
        }
    }

    /// Capacity of each created reactor's mailbox. Must be positive.
    pub fn mailbox_size(mut self, mailbox_size: usize) -> Self {
        self.mailbox_size = Some(mailbox_size);
        self
    }

    fn capacity_for(&self, identity: &ActorIdentity) -> Result<NonZeroUsize> {
        let Some(size) = self.mailbox_size else {
            warn!(actor = %identity, "Reactor created without a mailbox size");
            return Err(ActorError::MailboxSizeUnset {
                actor: identity.clone(),
            });
        };
        NonZeroUsize::new(size).ok_or_else(|| {
            warn!(actor = %identity, "Reactor created with a zero mailbox size");
            ActorError::ZeroMailboxSize {
                actor: identity.clone(),
            }
        })
    }
}

impl<T, K: StateKind> Clone for ReactorBuilder<'_, T, K> {
    fn clone(&self) -> Self {
        Self {
            system: self.system,
            identity: self.identity.clone(),
            mailbox_size: self.mailbox_size,
            hooks: self.hooks.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: Send + 'static> ReactorBuilder<'_, T, Stateless> {
    hook_setters!(stateless: setup, shutdown);

    /// Sets the message handler; it receives the message and the actor identity.
    pub fn on_receive_with_context(
        mut self,
        receive: impl Fn(T, &ActorIdentity) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.receive = Arc::new(move |message: T, _: &mut (), identity: &ActorIdentity| {
            receive(message, identity)
        });
        self
    }

    /// Sets the message handler.
    pub fn on_receive(self, receive: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.on_receive_with_context(move |message, _| receive(message))
    }
}

impl<T: Send + 'static, S: Default + Send + 'static> ReactorBuilder<'_, T, Stateful<S>> {
    hook_setters!(stateful S: setup, shutdown);

    /// Sets the message handler; it receives the message, the state and the actor identity.
    pub fn on_receive_with_context(
        mut self,
        receive: impl Fn(T, &mut S, &ActorIdentity) + Send + Sync + 'static,
    ) -> Self {
        self.hooks.receive = Arc::new(receive);
        self
    }

    /// Sets the message handler; it receives the message and the state.
    pub fn on_receive(self, receive: impl Fn(T, &mut S) + Send + Sync + 'static) -> Self {
        self.on_receive_with_context(move |message, state: &mut S, _: &ActorIdentity| {
            receive(message, state)
        })
    }
}

impl<T: Send + 'static, K: StateKind> ActorBuilder for ReactorBuilder<'_, T, K> {
    type Actor = Reactor<T, K::State>;

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
        let capacity = self.capacity_for(&identity)?;
        Ok(Reactor::new(identity, capacity, self.hooks.clone(), self.system))
    }
}
